//! Process entry and panic handling for the nostd, nolibc memcheck binary.
//!
//! The memory symbols Rust core expects from libc come from the library itself (`symbols`
//! feature).  What remains here only makes sense for a standalone Linux process, so it is
//! `mod`'d by memcheck directly rather than by the shared `lib.rs`.
//!
//! This is mutually-exclusive with Rust std, which is automatically linked to for unit tests.

#![allow(unused)]

mod panic;
mod startup;
pub use startup::*;
