use crate::types::c_int;

/// Terminate the process.
#[inline]
pub fn exit(status: c_int) -> ! {
    unsafe { crate::syscall::exit_group(status) }
}
