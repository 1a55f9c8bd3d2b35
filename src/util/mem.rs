//! Safe, panic-free wrappers around the copy and fill engines.

use crate::copy::copy;
use crate::fill::fill;
use core::ops::Range;

/// A requested range does not fit in the buffer it refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfBounds;

/// Copies elements from `src` to `dst`
pub fn copy_array<T: Copy, const N: usize>(dst: &mut [T; N], src: &[T; N]) {
    if N == 0 {
        return;
    }

    // Safety: both arrays are exactly N elements and the borrow checker keeps them distinct.
    unsafe {
        copy(
            dst.as_mut_ptr() as *mut u8,
            src.as_ptr() as *const u8,
            N * core::mem::size_of::<T>(),
        )
    };
}

/// Copies as many bytes as both slices hold, returning the count.
pub fn copy_slice(dst: &mut [u8], src: &[u8]) -> usize {
    let n = dst.len().min(src.len());
    unsafe { copy(dst.as_mut_ptr(), src.as_ptr(), n) };
    n
}

/// Copies `buf[src]` to `buf[dest..]`, allowing the two ranges to overlap.
pub fn copy_within(buf: &mut [u8], src: Range<usize>, dest: usize) -> Result<(), OutOfBounds> {
    if src.start > src.end || src.end > buf.len() {
        return Err(OutOfBounds);
    }
    let n = src.end - src.start;
    let dest_end = dest.checked_add(n).ok_or(OutOfBounds)?;
    if dest_end > buf.len() {
        return Err(OutOfBounds);
    }

    // Safety: both ranges were checked against the buffer length above.
    unsafe {
        let base = buf.as_mut_ptr();
        copy(base.add(dest), base.add(src.start), n)
    };
    Ok(())
}

pub fn fill_slice(buf: &mut [u8], value: u8) {
    unsafe { fill(buf.as_mut_ptr(), value.into(), buf.len()) };
}

pub fn zero(buf: &mut [u8]) {
    fill_slice(buf, 0);
}
