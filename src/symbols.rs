//! C symbols Rust core expects from libc.
//!
//! Only compiled with the `symbols` feature, and never for unit tests: those link against the
//! host libc, which already provides all of these.
//!
//! The linker picks these up to satisfy both `core::` requirements and calls from C code on the
//! target.

use crate::types::c_int;
use core::ffi::c_void;

/// memcpy implementation to satisfy Rust core crate requirements
///
/// Routed through the overlap-safe copy engine, so callers that (incorrectly) rely on overlapping
/// memcpy still get memmove results.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn memcpy(dest: *mut c_void, src: *const c_void, n: usize) -> *mut c_void {
    // Safety: this is satisfying a C API requirement; the caller guarantees both regions are
    // valid for n bytes.
    unsafe { crate::copy(dest as *mut u8, src as *const u8, n) as *mut c_void }
}

/// memmove implementation to satisfy Rust core crate requirements
#[unsafe(no_mangle)]
pub unsafe extern "C" fn memmove(dest: *mut c_void, src: *const c_void, n: usize) -> *mut c_void {
    // Safety: the caller guarantees both regions are valid for n bytes.
    unsafe { crate::copy(dest as *mut u8, src as *const u8, n) as *mut c_void }
}

/// memset implementation to satisfy Rust core crate requirements
#[unsafe(no_mangle)]
pub unsafe extern "C" fn memset(dest: *mut c_void, c: c_int, n: usize) -> *mut c_void {
    // Safety: the caller guarantees the region is valid for n bytes.
    unsafe { crate::fill(dest as *mut u8, c, n) as *mut c_void }
}

/// memcmp implementation to satisfy Rust core crate requirements
///
/// Slice comparisons in core lower to this.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn memcmp(a: *const c_void, b: *const c_void, n: usize) -> c_int {
    let a = a as *const u8;
    let b = b as *const u8;

    // Volatile reads keep the compiler from turning this loop into a call to memcmp.
    let mut i = 0;
    while i < n {
        // Safety: the caller guarantees both regions are valid for n bytes.
        let (x, y) = unsafe { (a.add(i).read_volatile(), b.add(i).read_volatile()) };
        if x != y {
            return c_int::from(x) - c_int::from(y);
        }
        i += 1;
    }

    0
}

/// bcmp implementation to satisfy Rust core crate requirements
///
/// bcmp only needs to return 0 if equal, non-zero if different.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bcmp(a: *const c_void, b: *const c_void, n: usize) -> c_int {
    unsafe { memcmp(a, b, n) }
}
