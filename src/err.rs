//! # Error handling
//!
//! The engines themselves cannot fail.  The only unrecoverable scenarios are in memcheck:
//!
//! - it was invoked incorrectly
//! - a verification sweep found a divergence
//!
//! Both display a message and exit non-zero.  Our print machinery does not support typical Rust
//! `{}`-formatting, so multi-field errors have their own `Print` implementations.

use crate::os::*;
use crate::verify::Mismatch;

pub type Errno = syscalls::Errno;

/// Exit status used for every abort.
pub const ABORT_STATUS: i32 = 1;

pub fn abort_with_msg(msg: &str) -> ! {
    eprint("ERROR: ");
    eprint(msg);
    eprint("\n");

    exit(ABORT_STATUS)
}

pub trait OrAbortResult<T> {
    fn or_abort<M: Print>(self, msg: M) -> T;
}

impl<T> OrAbortResult<T> for Result<T, Mismatch> {
    fn or_abort<M: Print>(self, msg: M) -> T {
        let e = match self {
            Ok(t) => return t,
            Err(e) => e,
        };

        eprint("ERROR: ");
        eprint(msg);
        eprint(": ");
        eprint(e);
        eprint("\n");

        exit(ABORT_STATUS);
    }
}

impl<T> OrAbortResult<T> for Result<T, Errno> {
    fn or_abort<M: Print>(self, msg: M) -> T {
        let e = match self {
            Ok(t) => return t,
            Err(e) => e,
        };

        eprint("ERROR: ");
        eprint(msg);
        if let Some(e) = e.description() {
            eprint(": ");
            eprint(e);
        }
        eprint("\n");

        exit(ABORT_STATUS);
    }
}
