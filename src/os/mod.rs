//! Safe interfaces over the raw system calls.

mod exit;
mod fd;
mod print;

pub use exit::*;
pub use fd::*;
pub use print::*;
