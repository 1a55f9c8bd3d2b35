use crate::types::c_int;
use syscalls::{Sysno, syscall};

// `man 2 exit_group`:
//
// SYNOPSIS
//       [[noreturn]] void syscall(SYS_exit_group, int status);
//
// DESCRIPTION
//       This system call terminates all threads in the calling process's thread group.
//
// RETURN VALUE
//      This system call does not return.
pub unsafe fn exit_group(status: c_int) -> ! {
    let _ = unsafe { syscall!(Sysno::exit_group, status) };
    // Inform the compiler that this function does not return
    unsafe { core::hint::unreachable_unchecked() };
}
