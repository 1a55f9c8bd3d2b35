//! Fill Engine
//!
//! Stores one byte value into every byte of a region.  Short regions are written byte-at-a-time.
//! Longer ones are written as whole blocks of a replicated pattern word, then sub-blocks of the
//! same word, then single bytes for what is left.

use crate::access::{self, AlignedSpan};
use crate::constants::{ActiveProfile, Profile};
use crate::hint;
use crate::types::c_int;
use crate::word::Word;

/// Store the low byte of `value` into `n` bytes at `dst` using the active tuning profile.
/// Returns `dst`.
///
/// # Safety
/// - `dst` must be valid for `n` byte writes.
/// - Nothing else may access the region during the call.
#[inline]
pub unsafe fn fill(dst: *mut u8, value: c_int, n: usize) -> *mut u8 {
    unsafe { fill_with::<ActiveProfile>(dst, value, n) }
}

/// [`fill`] under an explicit tuning profile.
///
/// # Safety
/// Same as [`fill`].
pub unsafe fn fill_with<P: Profile>(dst: *mut u8, value: c_int, n: usize) -> *mut u8 {
    // Only the low byte is meaningful, as with C's memset.
    let byte = value as u8;

    if n < P::FILL_BLOCK_MIN {
        unsafe { access::fill_bytes(dst, byte, n) };
        return dst;
    }

    let pattern = P::FillWord::splat(byte);
    let width = P::FillWord::WIDTH;

    // Wide stores must be aligned, so single bytes go first up to the word boundary.
    let head = ((width - (dst as usize & (width - 1))) & (width - 1)).min(n);
    unsafe { access::fill_bytes(dst, byte, head) };

    let mut body = n - head;
    let mut at = unsafe { dst.add(head) };

    // The zero hook only takes whole aligned blocks, so words go first up to a block boundary.
    if byte == 0 && cfg!(feature = "zero-hook") {
        let lead = (P::FILL_BLOCK - at as usize % P::FILL_BLOCK) % P::FILL_BLOCK;
        if body >= lead + P::FILL_BLOCK {
            match AlignedSpan::<P::FillWord>::new(at, lead, width) {
                Some(span) => unsafe { span.fill(pattern, |_, _| false) },
                None => unsafe { access::fill_bytes(at, byte, lead) },
            }
            at = unsafe { at.add(lead) };
            body -= lead;
        }
    }

    let blocks = body - body % P::FILL_BLOCK;
    let sub_blocks = body % P::FILL_BLOCK - body % P::FILL_SUB_BLOCK;
    let tail = body % P::FILL_SUB_BLOCK;

    match AlignedSpan::<P::FillWord>::new(at, blocks, P::FILL_BLOCK) {
        Some(span) => unsafe {
            span.fill(pattern, |block, len| {
                byte == 0 && (block as usize).is_multiple_of(len) && hint::zero_block(block, len)
            })
        },
        None => unsafe { access::fill_bytes(at, byte, blocks) },
    }
    at = unsafe { at.add(blocks) };

    match AlignedSpan::<P::FillWord>::new(at, sub_blocks, P::FILL_SUB_BLOCK) {
        Some(span) => unsafe { span.fill(pattern, |_, _| false) },
        None => unsafe { access::fill_bytes(at, byte, sub_blocks) },
    }
    at = unsafe { at.add(sub_blocks) };

    unsafe { access::fill_bytes(at, byte, tail) };

    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{Narrow, Standard};

    #[repr(align(32))]
    struct Buf<const N: usize>([u8; N]);

    fn filled<const N: usize>(offset: usize, value: c_int, n: usize) -> Buf<N> {
        let mut buf = Buf([0xEE; N]);
        let p = unsafe { buf.0.as_mut_ptr().add(offset) };
        let ret = unsafe { fill(p, value, n) };
        assert_eq!(ret, p);
        buf
    }

    #[test]
    fn test_fill_40_bytes() {
        let buf: Buf<48> = filled(0, 0xAB, 40);
        assert_eq!(buf.0[..40], [0xAB; 40]);
        assert_eq!(buf.0[40..], [0xEE; 8]);
    }

    #[test]
    fn test_fill_zero_length() {
        let buf: Buf<8> = filled(0, 0x11, 0);
        assert_eq!(buf.0, [0xEE; 8]);
    }

    #[test]
    fn test_fill_discards_high_bits() {
        let buf: Buf<64> = filled(0, 0x1234_56AB, 64);
        assert_eq!(buf.0, [0xAB; 64]);

        let buf: Buf<16> = filled(0, -1, 16);
        assert_eq!(buf.0, [0xFF; 16]);
    }

    #[test]
    fn test_fill_zero_value() {
        let buf: Buf<160> = filled(0, 0, 150);
        assert_eq!(buf.0[..150], [0; 150]);
        assert_eq!(buf.0[150..], [0xEE; 10]);
    }

    #[test]
    fn test_fill_zero_from_every_block_offset() {
        for offset in 0..32 {
            for n in [32, 55, 56, 63, 64, 95, 100] {
                let buf: Buf<160> = filled(offset, 0, n);
                assert!(buf.0[..offset].iter().all(|&b| b == 0xEE));
                assert!(buf.0[offset..offset + n].iter().all(|&b| b == 0));
                assert!(buf.0[offset + n..].iter().all(|&b| b == 0xEE));
            }
        }
    }

    #[test]
    fn test_fill_thresholds() {
        for n in [0, 1, 7, 8, 19, 20, 31, 32, 33, 39, 40, 63, 64, 127, 128, 129, 200] {
            for offset in 0..4 {
                let buf: Buf<256> = filled(offset, 0x5C, n);
                assert!(buf.0[..offset].iter().all(|&b| b == 0xEE));
                assert!(buf.0[offset..offset + n].iter().all(|&b| b == 0x5C));
                assert!(buf.0[offset + n..].iter().all(|&b| b == 0xEE));
            }
        }
    }

    #[test]
    fn test_fill_narrow_profile() {
        let mut buf = Buf([0u8; 128]);
        let p = unsafe { buf.0.as_mut_ptr().add(3) };
        unsafe { fill_with::<Narrow>(p, 0x42, 100) };
        assert_eq!(buf.0[..3], [0; 3]);
        assert_eq!(buf.0[3..103], [0x42; 100]);
        assert_eq!(buf.0[103..], [0; 25]);

        let mut buf = Buf([0u8; 128]);
        unsafe { fill_with::<Standard>(buf.0.as_mut_ptr(), 0x42, 128) };
        assert_eq!(buf.0, [0x42; 128]);
    }
}
