//! Optional platform hooks
//!
//! Some targets have cache-control instructions that speed up bulk transfers, such as touching
//! the next source line early or clearing a whole line without reading it first.  The engines
//! never issue such instructions themselves.  With the matching feature enabled they call a hook
//! that the platform supplies at link time; without it the calls compile away.

#[cfg(feature = "prefetch")]
unsafe extern "C" {
    /// Hint that `addr` will be read soon.  Must not fault for any address, mapped or not.
    fn memrt_prefetch(addr: *const u8);
}

#[cfg(feature = "zero-hook")]
unsafe extern "C" {
    /// Clear `len` bytes at `dst`, which is aligned to `len`.  Returns false if the block was left
    /// untouched (e.g. the cache does not support block clears in the current mode).
    fn memrt_zero_block(dst: *mut u8, len: usize) -> bool;
}

/// Hint that `addr` will be read soon.
#[cfg(feature = "prefetch")]
#[inline(always)]
pub fn prefetch(addr: *const u8) {
    // Safety: the hook contract requires it to accept any address without faulting.
    unsafe { memrt_prefetch(addr) }
}

/// Hint that `addr` will be read soon.
#[cfg(not(feature = "prefetch"))]
#[inline(always)]
pub fn prefetch(_addr: *const u8) {}

/// Offer a block of zeroes to the platform.  Returns true if the platform cleared it.
///
/// # Safety
/// - `dst` must be valid for `len` byte writes.
/// - `dst` must be aligned to `len`.
#[cfg(feature = "zero-hook")]
#[inline(always)]
pub unsafe fn zero_block(dst: *mut u8, len: usize) -> bool {
    unsafe { memrt_zero_block(dst, len) }
}

/// Offer a block of zeroes to the platform.  Returns true if the platform cleared it.
///
/// # Safety
/// - `dst` must be valid for `len` byte writes.
/// - `dst` must be aligned to `len`.
#[cfg(not(feature = "zero-hook"))]
#[inline(always)]
pub unsafe fn zero_block(_dst: *mut u8, _len: usize) -> bool {
    false
}
