//! Verification sweeps
//!
//! Exhaustive checks of the copy and fill engines for every length up to [`MAX_LEN`] and every
//! start alignment within a double-word.  Each case runs inside a buffer with guard bytes on both
//! sides, so a stray store outside the destination is caught as well as a wrong value inside it.
//!
//! The unit tests and the memcheck binary both run these.  Nothing here allocates, so the sweeps
//! work under `no_std`.

use crate::copy::copy;
use crate::fill::fill;
use crate::types::c_int;

/// Longest region exercised.  Comfortably above every tier threshold.
pub const MAX_LEN: usize = 300;

/// Start offsets `0..ALIGN_SPAN` are tried for every region.
const ALIGN_SPAN: usize = 8;

/// Untouchable bytes before and after each region.
///
/// A multiple of the widest block, so alignment 0 starts on a block boundary.
const GUARD: usize = 32;

/// Shifts `1..=NEAR_SHIFTS` between source and destination are tried for every overlap length.
const NEAR_SHIFTS: usize = 12;

/// Byte that never occurs in [`pattern`].
const BACKGROUND: u8 = 0xFF;

const SINGLE: usize = GUARD + ALIGN_SPAN + MAX_LEN + GUARD;

/// Source in the middle, destination up to `MAX_LEN + 1` bytes to either side.
const OVERLAP_CENTER: usize = GUARD + MAX_LEN + 1;
const OVERLAP: usize = OVERLAP_CENTER + ALIGN_SPAN + MAX_LEN + MAX_LEN + 1 + GUARD;

/// Fill values tried.  Passed with junk in the high bits, which must be ignored.
const FILL_VALUES: [u8; 6] = [0x00, 0x01, 0x7F, 0x80, 0xAB, 0xFF];
const FILL_HIGH_BITS: c_int = 0x5A00;

#[repr(align(32))]
struct Arena<const N: usize>([u8; N]);

impl<const N: usize> Arena<N> {
    fn patterned() -> Self {
        let mut arena = Self([0; N]);
        for (i, b) in arena.0.iter_mut().enumerate() {
            *b = pattern(i);
        }
        arena
    }

    fn ptr(&mut self, offset: usize) -> *mut u8 {
        // Safety: every caller passes an offset within the arena.
        unsafe { self.0.as_mut_ptr().add(offset) }
    }
}

/// Period 251 so that neighbouring double-words never repeat, and 0xFF never appears.
fn pattern(i: usize) -> u8 {
    (i % 251) as u8
}

/// Which sweep and which parameters produced a [`Mismatch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Case {
    CopyDisjoint { dst_align: usize, src_align: usize },
    /// Destination start minus source start.
    CopyOverlapping { align: usize, shift: isize },
    CopyIdentity { align: usize },
    CopyEmpty { shift: isize },
    Fill { align: usize, value: u8 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    /// A byte inside the destination holds the wrong value.  `offset` is from the destination start.
    Byte { offset: usize, expected: u8, found: u8 },
    /// A byte outside the destination changed.  `offset` is from the start of the test buffer.
    Outside { offset: usize, expected: u8, found: u8 },
    /// The call did not return the destination pointer.
    ReturnValue,
}

/// First divergence found by a sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub case: Case,
    pub len: usize,
    pub fault: Fault,
}

/// A sweep returns how many cases it checked.
pub type Suite = fn() -> Result<usize, Mismatch>;

pub const SUITES: &[(&str, Suite)] = &[
    ("copy, disjoint", copy_disjoint),
    ("copy, overlapping", copy_overlapping),
    ("copy, identical", copy_identity),
    ("copy, empty", copy_empty),
    ("fill", fill_values),
];

/// Run every suite, returning the total number of cases.
pub fn run_all() -> Result<usize, Mismatch> {
    let mut total = 0;
    for (_, suite) in SUITES {
        total += suite()?;
    }
    Ok(total)
}

/// Compare `found` against `expected`, attributing differences inside `dst..dst + len` to the
/// destination and everything else to the surroundings.
fn compare(
    found: &[u8],
    expected: impl Fn(usize) -> u8,
    dst: usize,
    len: usize,
    case: Case,
) -> Result<(), Mismatch> {
    for (i, &byte) in found.iter().enumerate() {
        let want = expected(i);
        if byte == want {
            continue;
        }
        let fault = if i >= dst && i - dst < len {
            Fault::Byte {
                offset: i - dst,
                expected: want,
                found: byte,
            }
        } else {
            Fault::Outside {
                offset: i,
                expected: want,
                found: byte,
            }
        };
        return Err(Mismatch { case, len, fault });
    }
    Ok(())
}

fn check_return(ret: *mut u8, dst: *mut u8, case: Case, len: usize) -> Result<(), Mismatch> {
    if ret != dst {
        return Err(Mismatch {
            case,
            len,
            fault: Fault::ReturnValue,
        });
    }
    Ok(())
}

/// Separate source and destination buffers, every length, every pair of start alignments.
pub fn copy_disjoint() -> Result<usize, Mismatch> {
    let src_arena = Arena::<SINGLE>::patterned();
    let mut cases = 0;

    for len in 0..=MAX_LEN {
        for dst_align in 0..ALIGN_SPAN {
            for src_align in 0..ALIGN_SPAN {
                let case = Case::CopyDisjoint {
                    dst_align,
                    src_align,
                };
                let mut dst_arena = Arena([BACKGROUND; SINGLE]);
                let d = GUARD + dst_align;
                let s = GUARD + src_align;

                let dst = dst_arena.ptr(d);
                let ret = unsafe { copy(dst, src_arena.0.as_ptr().add(s), len) };
                check_return(ret, dst, case, len)?;

                let expect = |i: usize| {
                    if i >= d && i - d < len {
                        pattern(s + i - d)
                    } else {
                        BACKGROUND
                    }
                };
                compare(&dst_arena.0, expect, d, len, case)?;
                cases += 1;
            }
        }
    }

    // The source must come through untouched.
    let case = Case::CopyDisjoint {
        dst_align: 0,
        src_align: 0,
    };
    compare(&src_arena.0, pattern, SINGLE, 0, case)?;

    Ok(cases)
}

/// Source and destination in one buffer, destination shifted by small amounts and by exactly
/// the length (adjacent) to either side.
pub fn copy_overlapping() -> Result<usize, Mismatch> {
    let mut cases = 0;

    for len in 0..=MAX_LEN {
        for align in 0..ALIGN_SPAN {
            let far = [len.saturating_sub(1), len, len + 1];
            let shifts = (1..=NEAR_SHIFTS).chain(far.into_iter().filter(|&f| f > NEAR_SHIFTS));
            for magnitude in shifts {
                for shift in [magnitude as isize, -(magnitude as isize)] {
                    let case = Case::CopyOverlapping { align, shift };
                    copy_shifted(len, align, shift, case)?;
                    cases += 1;
                }
            }
        }
    }

    Ok(cases)
}

fn copy_shifted(len: usize, align: usize, shift: isize, case: Case) -> Result<(), Mismatch> {
    let mut arena = Arena::<OVERLAP>::patterned();
    let s = OVERLAP_CENTER + align;
    let d = s.wrapping_add_signed(shift);

    let src = arena.ptr(s) as *const u8;
    let dst = arena.ptr(d);
    let ret = unsafe { copy(dst, src, len) };
    check_return(ret, dst, case, len)?;

    // Equivalent to copying through a temporary buffer: every destination byte takes the
    // source byte as it was before the call.
    let expect = |i: usize| {
        if i >= d && i - d < len {
            pattern(s + i - d)
        } else {
            pattern(i)
        }
    };
    compare(&arena.0, expect, d, len, case)
}

/// Source and destination are the same address: nothing may change.
pub fn copy_identity() -> Result<usize, Mismatch> {
    let mut arena = Arena::<SINGLE>::patterned();
    let mut cases = 0;

    for len in 0..=MAX_LEN {
        for align in 0..ALIGN_SPAN {
            let case = Case::CopyIdentity { align };
            let p = arena.ptr(GUARD + align);
            let ret = unsafe { copy(p, p, len) };
            check_return(ret, p, case, len)?;
            compare(&arena.0, pattern, GUARD + align, len, case)?;
            cases += 1;
        }
    }

    Ok(cases)
}

/// Zero-length copies between all kinds of address pairs: nothing may change.
pub fn copy_empty() -> Result<usize, Mismatch> {
    let mut arena = Arena::<OVERLAP>::patterned();
    let mut cases = 0;

    let max = (MAX_LEN + 1) as isize;
    for shift in -max..=max {
        let case = Case::CopyEmpty { shift };
        let s = OVERLAP_CENTER;
        let dst = arena.ptr(s.wrapping_add_signed(shift));
        let src = arena.ptr(s) as *const u8;
        let ret = unsafe { copy(dst, src, 0) };
        check_return(ret, dst, case, 0)?;
        compare(&arena.0, pattern, 0, 0, case)?;
        cases += 1;
    }

    Ok(cases)
}

/// Every length, every start alignment, a spread of byte values.
pub fn fill_values() -> Result<usize, Mismatch> {
    let mut cases = 0;

    for len in 0..=MAX_LEN {
        for align in 0..ALIGN_SPAN {
            for value in FILL_VALUES {
                let case = Case::Fill { align, value };
                let background = !value;
                let mut arena = Arena([background; SINGLE]);
                let d = GUARD + align;

                let dst = arena.ptr(d);
                let ret = unsafe { fill(dst, FILL_HIGH_BITS | c_int::from(value), len) };
                check_return(ret, dst, case, len)?;

                let expect = |i: usize| {
                    if i >= d && i - d < len {
                        value
                    } else {
                        background
                    }
                };
                compare(&arena.0, expect, d, len, case)?;
                cases += 1;
            }
        }
    }

    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_disjoint_sweep() {
        let cases = copy_disjoint().unwrap();
        assert_eq!(cases, (MAX_LEN + 1) * ALIGN_SPAN * ALIGN_SPAN);
    }

    #[test]
    fn test_copy_overlapping_sweep() {
        assert!(copy_overlapping().unwrap() > (MAX_LEN + 1) * ALIGN_SPAN * NEAR_SHIFTS * 2);
    }

    #[test]
    fn test_copy_identity_sweep() {
        assert_eq!(copy_identity().unwrap(), (MAX_LEN + 1) * ALIGN_SPAN);
    }

    #[test]
    fn test_copy_empty_sweep() {
        assert_eq!(copy_empty().unwrap(), 2 * (MAX_LEN + 1) + 1);
    }

    #[test]
    fn test_fill_sweep() {
        assert_eq!(
            fill_values().unwrap(),
            (MAX_LEN + 1) * ALIGN_SPAN * FILL_VALUES.len()
        );
    }

    #[test]
    fn test_compare_reports_destination_byte() {
        let found = [0u8, 1, 9, 3];
        let err = compare(&found, |i| i as u8, 1, 2, Case::CopyIdentity { align: 0 }).unwrap_err();
        assert_eq!(
            err.fault,
            Fault::Byte {
                offset: 1,
                expected: 2,
                found: 9
            }
        );
    }

    #[test]
    fn test_compare_reports_outside_byte() {
        let found = [0u8, 1, 2, 7];
        let err = compare(&found, |i| i as u8, 1, 2, Case::CopyIdentity { align: 0 }).unwrap_err();
        assert_eq!(
            err.fault,
            Fault::Outside {
                offset: 3,
                expected: 3,
                found: 7
            }
        );
        assert_eq!(err.len, 2);
    }

    #[test]
    fn test_check_return() {
        let mut a = [0u8; 2];
        let p = a.as_mut_ptr();
        assert!(check_return(p, p, Case::CopyEmpty { shift: 0 }, 0).is_ok());
        let err = check_return(unsafe { p.add(1) }, p, Case::CopyEmpty { shift: 0 }, 0);
        assert_eq!(err.unwrap_err().fault, Fault::ReturnValue);
    }
}
