//! Raw memory access
//!
//! Every load and store the engines perform goes through this module.  Byte loops are plain
//! functions with the usual pointer validity requirements.  Word loops are only reachable through
//! [`AlignedPair`] and [`AlignedSpan`], whose constructors check alignment, block granularity and
//! (for copies) disjointness before any wide access can happen.
//!
//! All accesses are volatile.  Otherwise the compiler recognizes these loops and lowers them back
//! into calls to `memcpy`/`memset`, which are the symbols this crate provides.

use crate::hint;
use crate::types::Region;
use crate::word::Word;
use core::marker::PhantomData;

/// Copy `n` bytes in ascending address order.
///
/// # Safety
/// - `src` must be valid for `n` byte reads and `dst` for `n` byte writes.
/// - If the regions overlap, `dst` must not lie above `src`.
#[inline]
pub unsafe fn copy_bytes_forward(dst: *mut u8, src: *const u8, n: usize) {
    let mut i = 0;
    while i < n {
        unsafe { dst.add(i).write_volatile(src.add(i).read_volatile()) };
        i += 1;
    }
}

/// Copy `n` bytes in descending address order.
///
/// # Safety
/// - `src` must be valid for `n` byte reads and `dst` for `n` byte writes.
/// - If the regions overlap, `dst` must not lie below `src`.
#[inline]
pub unsafe fn copy_bytes_backward(dst: *mut u8, src: *const u8, n: usize) {
    let mut i = n;
    while i > 0 {
        i -= 1;
        unsafe { dst.add(i).write_volatile(src.add(i).read_volatile()) };
    }
}

/// Store `byte` into `n` consecutive bytes.
///
/// # Safety
/// `dst` must be valid for `n` byte writes.
#[inline]
pub unsafe fn fill_bytes(dst: *mut u8, byte: u8, n: usize) {
    let mut i = 0;
    while i < n {
        unsafe { dst.add(i).write_volatile(byte) };
        i += 1;
    }
}

/// Two disjoint regions, both aligned to `W`, whose length is a whole number of blocks.
pub struct AlignedPair<W: Word> {
    dst: *mut u8,
    src: *const u8,
    len: usize,
    block: usize,
    prefetch: bool,
    _word: PhantomData<W>,
}

impl<W: Word> AlignedPair<W> {
    /// Returns `None` unless:
    /// - `block` is a non-zero multiple of the word width
    /// - `len` is a multiple of `block`
    /// - `dst` and `src` are both aligned to the word width
    /// - the `len`-byte regions at `dst` and `src` share no byte
    pub fn new(dst: *mut u8, src: *const u8, len: usize, block: usize) -> Option<Self> {
        let d = Region::from_ptr(dst, len);
        let s = Region::from_ptr(src, len);

        if block == 0 || !block.is_multiple_of(W::WIDTH) || !len.is_multiple_of(block) {
            return None;
        }
        if d.misalignment(W::WIDTH) != 0 || s.misalignment(W::WIDTH) != 0 {
            return None;
        }
        if d.overlaps(&s) {
            return None;
        }

        Some(Self {
            dst,
            src,
            len,
            block,
            prefetch: false,
            _word: PhantomData,
        })
    }

    /// Announce each upcoming source block to [`hint::prefetch`].
    pub fn with_prefetch(mut self) -> Self {
        self.prefetch = true;
        self
    }

    /// Move every block, lowest address first.
    ///
    /// # Safety
    /// `src` must be valid for `len` byte reads and `dst` for `len` byte writes.
    pub unsafe fn copy_forward(self) {
        let mut offset = 0;
        while offset < self.len {
            if self.prefetch {
                hint::prefetch(self.src.wrapping_add(offset + self.block));
            }
            unsafe { self.copy_block(offset) };
            offset += self.block;
        }
    }

    /// Move every block, highest address first.
    ///
    /// # Safety
    /// `src` must be valid for `len` byte reads and `dst` for `len` byte writes.
    pub unsafe fn copy_backward(self) {
        let mut offset = self.len;
        while offset > 0 {
            offset -= self.block;
            if self.prefetch {
                hint::prefetch(self.src.wrapping_add(offset).wrapping_sub(self.block));
            }
            unsafe { self.copy_block(offset) };
        }
    }

    /// # Safety
    /// `offset + block` must not exceed `len`, and the pointers must be valid for `len` bytes.
    #[inline(always)]
    unsafe fn copy_block(&self, offset: usize) {
        let mut at = offset;
        let end = offset + self.block;
        while at < end {
            // Safety: `new` proved both pointers are W-aligned and block is a multiple of W, so
            // every `at` is W-aligned and in bounds.
            unsafe {
                let word = self.src.add(at).cast::<W>().read_volatile();
                self.dst.add(at).cast::<W>().write_volatile(word);
            }
            at += W::WIDTH;
        }
    }
}

/// A region aligned to `W` whose length is a whole number of blocks.
pub struct AlignedSpan<W: Word> {
    dst: *mut u8,
    len: usize,
    block: usize,
    _word: PhantomData<W>,
}

impl<W: Word> AlignedSpan<W> {
    /// Returns `None` unless `block` is a non-zero multiple of the word width, `len` is a multiple
    /// of `block`, and `dst` is aligned to the word width.
    pub fn new(dst: *mut u8, len: usize, block: usize) -> Option<Self> {
        if block == 0 || !block.is_multiple_of(W::WIDTH) || !len.is_multiple_of(block) {
            return None;
        }
        if Region::from_ptr(dst, len).misalignment(W::WIDTH) != 0 {
            return None;
        }

        Some(Self {
            dst,
            len,
            block,
            _word: PhantomData,
        })
    }

    /// Store `pattern` into every word of every block.
    ///
    /// Each block is first offered to `offload` with its address and size; blocks it reports as
    /// handled are skipped.
    ///
    /// # Safety
    /// `dst` must be valid for `len` byte writes.
    pub unsafe fn fill(self, pattern: W, mut offload: impl FnMut(*mut u8, usize) -> bool) {
        let mut offset = 0;
        while offset < self.len {
            let block = unsafe { self.dst.add(offset) };
            if !offload(block, self.block) {
                let mut at = 0;
                while at < self.block {
                    // Safety: `new` proved `dst` is W-aligned and block is a multiple of W.
                    unsafe { block.add(at).cast::<W>().write_volatile(pattern) };
                    at += W::WIDTH;
                }
            }
            offset += self.block;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(align(8))]
    struct Buf([u8; 64]);

    fn seq() -> Buf {
        let mut buf = Buf([0; 64]);
        for (i, b) in buf.0.iter_mut().enumerate() {
            *b = i as u8;
        }
        buf
    }

    #[test]
    fn test_copy_bytes_forward_overlap() {
        let mut buf = seq();
        let p = buf.0.as_mut_ptr();
        unsafe { copy_bytes_forward(p, p.add(3), 10) };
        assert_eq!(buf.0[..10], [3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_copy_bytes_backward_overlap() {
        let mut buf = seq();
        let p = buf.0.as_mut_ptr();
        unsafe { copy_bytes_backward(p.add(3), p, 10) };
        assert_eq!(buf.0[3..13], [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_fill_bytes() {
        let mut buf = [0u8; 8];
        unsafe { fill_bytes(buf.as_mut_ptr().add(2), 0x7F, 4) };
        assert_eq!(buf, [0, 0, 0x7F, 0x7F, 0x7F, 0x7F, 0, 0]);
    }

    #[test]
    fn test_pair_rejects_misaligned() {
        let src = seq();
        let mut dst = Buf([0; 64]);
        let d = dst.0.as_mut_ptr();
        let s = src.0.as_ptr();
        assert!(AlignedPair::<u64>::new(d, s, 32, 32).is_some());
        assert!(AlignedPair::<u64>::new(unsafe { d.add(4) }, s, 32, 32).is_none());
        assert!(AlignedPair::<u64>::new(d, unsafe { s.add(1) }, 32, 32).is_none());
        assert!(AlignedPair::<u32>::new(unsafe { d.add(4) }, unsafe { s.add(4) }, 16, 16).is_some());
    }

    #[test]
    fn test_pair_rejects_partial_blocks() {
        let src = seq();
        let mut dst = Buf([0; 64]);
        let d = dst.0.as_mut_ptr();
        let s = src.0.as_ptr();
        assert!(AlignedPair::<u64>::new(d, s, 40, 32).is_none());
        assert!(AlignedPair::<u64>::new(d, s, 32, 12).is_none());
        assert!(AlignedPair::<u64>::new(d, s, 32, 0).is_none());
    }

    #[test]
    fn test_pair_rejects_overlap() {
        let mut buf = seq();
        let p = buf.0.as_mut_ptr();
        assert!(AlignedPair::<u64>::new(unsafe { p.add(8) }, p, 32, 32).is_none());
        assert!(AlignedPair::<u64>::new(p, unsafe { p.add(8) }, 32, 32).is_none());
        assert!(AlignedPair::<u64>::new(unsafe { p.add(32) }, p, 32, 32).is_some());
    }

    #[test]
    fn test_pair_copy_forward() {
        let src = seq();
        let mut dst = Buf([0; 64]);
        let pair = AlignedPair::<u64>::new(dst.0.as_mut_ptr(), src.0.as_ptr(), 64, 32).unwrap();
        unsafe { pair.copy_forward() };
        assert_eq!(dst.0, src.0);
    }

    #[test]
    fn test_pair_copy_backward() {
        let src = seq();
        let mut dst = Buf([0; 64]);
        let pair = AlignedPair::<u32>::new(dst.0.as_mut_ptr(), src.0.as_ptr(), 48, 16).unwrap();
        unsafe { pair.copy_backward() };
        assert_eq!(dst.0[..48], src.0[..48]);
        assert_eq!(dst.0[48..], [0; 16]);
    }

    #[test]
    fn test_span_fill() {
        let mut buf = Buf([0; 64]);
        let span = AlignedSpan::<u32>::new(unsafe { buf.0.as_mut_ptr().add(8) }, 32, 32).unwrap();
        unsafe { span.fill(u32::splat(0xA5), |_, _| false) };
        assert_eq!(buf.0[..8], [0; 8]);
        assert_eq!(buf.0[8..40], [0xA5; 32]);
        assert_eq!(buf.0[40..], [0; 24]);
    }

    #[test]
    fn test_span_fill_offload() {
        let mut buf = Buf([0x11; 64]);
        let mut offered = 0;
        let span = AlignedSpan::<u32>::new(buf.0.as_mut_ptr(), 64, 32).unwrap();
        unsafe {
            span.fill(u32::splat(0x22), |_, len| {
                offered += 1;
                assert_eq!(len, 32);
                offered == 1
            })
        };
        assert_eq!(offered, 2);
        // First block claimed by the offload and left alone, second block stored.
        assert_eq!(buf.0[..32], [0x11; 32]);
        assert_eq!(buf.0[32..], [0x22; 32]);
    }

    #[test]
    fn test_span_rejects_misaligned() {
        let mut buf = Buf([0; 64]);
        let p = buf.0.as_mut_ptr();
        assert!(AlignedSpan::<u32>::new(unsafe { p.add(2) }, 32, 32).is_none());
        assert!(AlignedSpan::<u32>::new(p, 30, 32).is_none());
        assert!(AlignedSpan::<u32>::new(p, 0, 8).is_some());
    }
}
