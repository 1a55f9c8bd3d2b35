//! Word types used for chunked transfers.
//!
//! This file is also loaded by the build script, so it must not reference anything else in the
//! crate.

/// An unsigned integer that can be moved between memory and registers in one access.
pub trait Word: Copy {
    /// Size and natural alignment in bytes.
    const WIDTH: usize;

    /// A word in which every byte equals `byte`.
    fn splat(byte: u8) -> Self;
}

impl Word for u32 {
    const WIDTH: usize = 4;

    #[inline(always)]
    fn splat(byte: u8) -> Self {
        u32::from_ne_bytes([byte; 4])
    }
}

impl Word for u64 {
    const WIDTH: usize = 8;

    #[inline(always)]
    fn splat(byte: u8) -> Self {
        u64::from_ne_bytes([byte; 8])
    }
}

// Alignment checks compare address bits modulo WIDTH, which is only sound if the type's natural
// alignment does not exceed its size.
const _: () = assert!(core::mem::align_of::<u32>() <= <u32 as Word>::WIDTH);
const _: () = assert!(core::mem::align_of::<u64>() <= <u64 as Word>::WIDTH);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splat_u32() {
        assert_eq!(u32::splat(0xAB), 0xABAB_ABAB);
        assert_eq!(u32::splat(0), 0);
    }

    #[test]
    fn test_splat_u64() {
        assert_eq!(u64::splat(0x5A), 0x5A5A_5A5A_5A5A_5A5A);
        assert_eq!(u64::splat(0xFF), u64::MAX);
    }
}
