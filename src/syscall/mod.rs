//! Raw Linux system calls used by memcheck.
//!
//! Each wrapper mirrors its man page signature and returns the raw result.  The `os` module puts
//! safe interfaces on top.

mod exit_group;
mod write;

pub use exit_group::*;
pub use write::*;
