//! Copy Engine
//!
//! Moves bytes between two regions with `memmove` semantics: afterwards the destination holds
//! what the source held before the call, however the two regions overlap.
//!
//! The decision of how to copy is made up front by [`plan`], which only looks at addresses and
//! the byte count.  Overlapping regions are always copied one byte at a time, in the direction
//! that never reads a byte after it has been overwritten.  Disjoint regions may be copied in
//! word blocks if both addresses share the same misalignment.

use crate::access::{self, AlignedPair};
use crate::constants::{ActiveProfile, Profile};
use crate::types::Region;
use crate::word::Word;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Lowest address first.  Used when the destination lies below the source.
    Forward,
    /// Highest address first.  Used when the destination lies above the source.
    Backward,
}

/// Transfer width for a disjoint copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Bytes,
    Medium,
    Large,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plan {
    /// Nothing to do: the count is zero or source and destination are the same address.
    Skip,
    /// The regions share bytes.  Only a byte-at-a-time copy in this direction is correct.
    Overlapping(Direction),
    /// The regions share no byte.
    Disjoint(Direction, Tier),
}

/// Decide how `n` bytes at `src` are to be moved to `dst`.
pub fn plan<P: Profile>(dst: usize, src: usize, n: usize) -> Plan {
    if n == 0 || dst == src {
        return Plan::Skip;
    }

    let direction = if dst < src {
        Direction::Forward
    } else {
        Direction::Backward
    };

    let d = Region::new(dst, n);
    let s = Region::new(src, n);
    if d.overlaps(&s) {
        return Plan::Overlapping(direction);
    }

    let tier = if n >= P::COPY_LARGE_MIN {
        if same_misalignment::<P::CopyLargeWord>(&d, &s) {
            Tier::Large
        } else {
            Tier::Bytes
        }
    } else if n >= P::COPY_MEDIUM_MIN {
        if same_misalignment::<P::CopyMediumWord>(&d, &s) {
            Tier::Medium
        } else {
            Tier::Bytes
        }
    } else {
        Tier::Bytes
    };

    Plan::Disjoint(direction, tier)
}

fn same_misalignment<W: Word>(a: &Region, b: &Region) -> bool {
    a.misalignment(W::WIDTH) == b.misalignment(W::WIDTH)
}

/// Copy `n` bytes from `src` to `dst` using the active tuning profile.  Returns `dst`.
///
/// # Safety
/// - `src` must be valid for `n` byte reads.
/// - `dst` must be valid for `n` byte writes.
/// - Nothing else may access either region during the call.
///
/// The regions may overlap.
#[inline]
pub unsafe fn copy(dst: *mut u8, src: *const u8, n: usize) -> *mut u8 {
    unsafe { copy_with::<ActiveProfile>(dst, src, n) }
}

/// [`copy`] under an explicit tuning profile.
///
/// # Safety
/// Same as [`copy`].
pub unsafe fn copy_with<P: Profile>(dst: *mut u8, src: *const u8, n: usize) -> *mut u8 {
    use Direction::*;

    match plan::<P>(dst as usize, src as usize, n) {
        Plan::Skip => {}
        Plan::Overlapping(Forward) | Plan::Disjoint(Forward, Tier::Bytes) => unsafe {
            access::copy_bytes_forward(dst, src, n)
        },
        Plan::Overlapping(Backward) | Plan::Disjoint(Backward, Tier::Bytes) => unsafe {
            access::copy_bytes_backward(dst, src, n)
        },
        Plan::Disjoint(Forward, Tier::Medium) => unsafe {
            blocks_forward::<P::CopyMediumWord>(dst, src, n, P::COPY_MEDIUM_BLOCK, false)
        },
        Plan::Disjoint(Backward, Tier::Medium) => unsafe {
            blocks_backward::<P::CopyMediumWord>(dst, src, n, P::COPY_MEDIUM_BLOCK, false)
        },
        Plan::Disjoint(Forward, Tier::Large) => unsafe {
            blocks_forward::<P::CopyLargeWord>(dst, src, n, P::COPY_LARGE_BLOCK, true)
        },
        Plan::Disjoint(Backward, Tier::Large) => unsafe {
            blocks_backward::<P::CopyLargeWord>(dst, src, n, P::COPY_LARGE_BLOCK, true)
        },
    }

    dst
}

/// Leading bytes up to the word boundary, whole blocks, then the tail.  Lowest address first.
///
/// # Safety
/// As [`copy`], plus: the regions are disjoint and share the same misalignment modulo `W`.
unsafe fn blocks_forward<W: Word>(
    dst: *mut u8,
    src: *const u8,
    n: usize,
    block: usize,
    prefetch: bool,
) {
    let head = (W::WIDTH - (dst as usize & (W::WIDTH - 1))) & (W::WIDTH - 1);
    let head = head.min(n);
    unsafe { access::copy_bytes_forward(dst, src, head) };

    // The tail is derived from the bytes left after the head, not from a consumed loop counter.
    let body = n - head;
    let tail = body % block;
    let whole = body - tail;

    let (dst, src) = unsafe { (dst.add(head), src.add(head)) };
    match AlignedPair::<W>::new(dst, src, whole, block) {
        Some(pair) if prefetch => unsafe { pair.with_prefetch().copy_forward() },
        Some(pair) => unsafe { pair.copy_forward() },
        None => unsafe { access::copy_bytes_forward(dst, src, whole) },
    }

    unsafe { access::copy_bytes_forward(dst.add(whole), src.add(whole), tail) };
}

/// Trailing bytes past the last word boundary, whole blocks, then the head.  Highest address
/// first.
///
/// # Safety
/// As [`copy`], plus: the regions are disjoint and share the same misalignment modulo `W`.
unsafe fn blocks_backward<W: Word>(
    dst: *mut u8,
    src: *const u8,
    n: usize,
    block: usize,
    prefetch: bool,
) {
    let tail = (dst as usize).wrapping_add(n) & (W::WIDTH - 1);
    let tail = tail.min(n);
    let body = n - tail;
    unsafe { access::copy_bytes_backward(dst.add(body), src.add(body), tail) };

    let head = body % block;
    let whole = body - head;

    let (dst_blocks, src_blocks) = unsafe { (dst.add(head), src.add(head)) };
    match AlignedPair::<W>::new(dst_blocks, src_blocks, whole, block) {
        Some(pair) if prefetch => unsafe { pair.with_prefetch().copy_backward() },
        Some(pair) => unsafe { pair.copy_backward() },
        None => unsafe { access::copy_bytes_backward(dst_blocks, src_blocks, whole) },
    }

    unsafe { access::copy_bytes_backward(dst, src, head) };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{Narrow, Standard};

    #[repr(align(8))]
    struct Buf<const N: usize>([u8; N]);

    fn seq<const N: usize>() -> Buf<N> {
        let mut buf = Buf([0; N]);
        for (i, b) in buf.0.iter_mut().enumerate() {
            *b = i as u8;
        }
        buf
    }

    #[test]
    fn test_plan_skip() {
        assert_eq!(plan::<Standard>(0x1000, 0x2000, 0), Plan::Skip);
        assert_eq!(plan::<Standard>(0x1000, 0x1000, 64), Plan::Skip);
    }

    #[test]
    fn test_plan_overlapping() {
        use Direction::*;
        assert_eq!(
            plan::<Standard>(0x1000, 0x1008, 256),
            Plan::Overlapping(Forward)
        );
        assert_eq!(
            plan::<Standard>(0x1008, 0x1000, 256),
            Plan::Overlapping(Backward)
        );
        assert_eq!(plan::<Standard>(0x1000, 0x1001, 2), Plan::Overlapping(Forward));
    }

    #[test]
    fn test_plan_adjacent_is_disjoint() {
        use Direction::*;
        assert_eq!(
            plan::<Standard>(0x1000, 0x1080, 128),
            Plan::Disjoint(Forward, Tier::Large)
        );
        assert_eq!(
            plan::<Standard>(0x1080, 0x1000, 128),
            Plan::Disjoint(Backward, Tier::Large)
        );
    }

    #[test]
    fn test_plan_tiers() {
        use Direction::*;
        assert_eq!(
            plan::<Standard>(0x1000, 0x2000, 19),
            Plan::Disjoint(Forward, Tier::Bytes)
        );
        assert_eq!(
            plan::<Standard>(0x1000, 0x2000, 20),
            Plan::Disjoint(Forward, Tier::Medium)
        );
        assert_eq!(
            plan::<Standard>(0x1000, 0x2000, 127),
            Plan::Disjoint(Forward, Tier::Medium)
        );
        assert_eq!(
            plan::<Standard>(0x1000, 0x2000, 128),
            Plan::Disjoint(Forward, Tier::Large)
        );
    }

    #[test]
    fn test_plan_misaligned_falls_back_to_bytes() {
        use Direction::*;
        // Same misalignment modulo 4 but not modulo 8: large tier is refused.
        assert_eq!(
            plan::<Standard>(0x1004, 0x2000, 256),
            Plan::Disjoint(Forward, Tier::Bytes)
        );
        assert_eq!(
            plan::<Standard>(0x1001, 0x2002, 64),
            Plan::Disjoint(Forward, Tier::Bytes)
        );
        // Equal misalignment is fine.
        assert_eq!(
            plan::<Standard>(0x1003, 0x2003, 256),
            Plan::Disjoint(Forward, Tier::Large)
        );
        // The narrow profile only needs word alignment for large blocks.
        assert_eq!(
            plan::<Narrow>(0x1004, 0x2000, 256),
            Plan::Disjoint(Forward, Tier::Large)
        );
    }

    #[test]
    fn test_plan_top_of_address_space() {
        assert_eq!(
            plan::<Standard>(usize::MAX - 31, usize::MAX - 63, 32),
            Plan::Disjoint(Direction::Backward, Tier::Medium)
        );
        assert_eq!(
            plan::<Standard>(usize::MAX - 15, usize::MAX - 19, 16),
            Plan::Overlapping(Direction::Backward)
        );
    }

    #[test]
    fn test_copy_overlap_dst_above_src() {
        let mut buf: Buf<20> = seq();
        let p = buf.0.as_mut_ptr();
        let ret = unsafe { copy(p.add(5), p, 10) };
        assert_eq!(ret, unsafe { p.add(5) });
        assert_eq!(buf.0[5..15], [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(buf.0[..5], [0, 1, 2, 3, 4]);
        assert_eq!(buf.0[15..], [15, 16, 17, 18, 19]);
    }

    #[test]
    fn test_copy_overlap_dst_below_src() {
        let mut buf: Buf<300> = seq();
        let p = buf.0.as_mut_ptr();
        unsafe { copy(p, p.add(8), 256) };
        for i in 0..256 {
            assert_eq!(buf.0[i], (i + 8) as u8);
        }
    }

    #[test]
    fn test_copy_zero_length() {
        let src: Buf<16> = seq();
        let mut dst = Buf([0xEEu8; 16]);
        let d = dst.0.as_mut_ptr();
        let ret = unsafe { copy(d, src.0.as_ptr(), 0) };
        assert_eq!(ret, d);
        assert_eq!(dst.0, [0xEE; 16]);
    }

    #[test]
    fn test_copy_self() {
        let mut buf: Buf<200> = seq();
        let p = buf.0.as_mut_ptr();
        let ret = unsafe { copy(p, p, 200) };
        assert_eq!(ret, p);
        for (i, b) in buf.0.iter().enumerate() {
            assert_eq!(*b, i as u8);
        }
    }

    #[test]
    fn test_copy_large_with_head_and_tail() {
        // 3 bytes of head to reach 8-byte alignment, 4 blocks of 32, 4 bytes of tail.
        let src: Buf<160> = seq();
        let mut dst = Buf([0u8; 160]);
        let n = 3 + 128 + 4;
        unsafe { copy(dst.0.as_mut_ptr().add(5), src.0.as_ptr().add(5), n) };
        assert_eq!(dst.0[..5], [0; 5]);
        assert_eq!(dst.0[5..5 + n], src.0[5..5 + n]);
        assert!(dst.0[5 + n..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_copy_large_backward_with_head_and_tail() {
        // Destination above source in the same buffer, far enough apart to be disjoint.
        let mut buf: Buf<400> = seq();
        let p = buf.0.as_mut_ptr();
        let n = 137;
        unsafe { copy(p.add(203), p.add(3), n) };
        for i in 0..n {
            assert_eq!(buf.0[203 + i], (3 + i) as u8);
        }
        assert_eq!(buf.0[203 + n], (203 + n) as u8);
        assert_eq!(buf.0[202], 202);
    }

    #[test]
    fn test_copy_medium() {
        let src: Buf<64> = seq();
        let mut dst = Buf([0u8; 64]);
        unsafe { copy(dst.0.as_mut_ptr().add(2), src.0.as_ptr().add(6), 45) };
        assert_eq!(dst.0[2..47], src.0[6..51]);
        assert_eq!(dst.0[..2], [0, 0]);
        assert!(dst.0[47..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_copy_mismatched_alignment() {
        let src: Buf<256> = seq();
        let mut dst = Buf([0u8; 256]);
        unsafe { copy(dst.0.as_mut_ptr().add(1), src.0.as_ptr(), 200) };
        assert_eq!(dst.0[1..201], src.0[..200]);
    }

    #[test]
    fn test_copy_narrow_profile() {
        let src: Buf<256> = seq();
        let mut dst = Buf([0u8; 256]);
        let ret = unsafe { copy_with::<Narrow>(dst.0.as_mut_ptr().add(4), src.0.as_ptr(), 200) };
        assert_eq!(ret, unsafe { dst.0.as_mut_ptr().add(4) });
        assert_eq!(dst.0[4..204], src.0[..200]);
    }
}
