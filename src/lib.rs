#![cfg_attr(not(test), no_std)]

//! Overlap-safe memory copy and byte fill for targets without a C library.
//!
//! [`copy`] has `memmove` semantics and [`fill`] has `memset` semantics.  Both move data in word
//! blocks when alignment allows and fall back to single bytes otherwise.  Tuning lives in
//! [`constants`].

// Raw loads and stores.  Nothing outside the engines should touch memory this way.
mod access;

pub mod constants;
pub mod copy;
pub mod fill;
pub mod hint;
pub mod types;
pub mod util;
pub mod verify;
pub mod word;

// Print machinery, raw system calls, and error handling for the memcheck binary.
#[cfg(target_os = "linux")]
pub mod err;
#[cfg(target_os = "linux")]
pub mod os;
#[cfg(target_os = "linux")]
pub mod syscall;

// C symbols for the linker.  Unit tests link against the host libc instead.
#[cfg(all(feature = "symbols", not(test)))]
mod symbols;

pub use copy::{copy, copy_with};
pub use fill::{fill, fill_with};
