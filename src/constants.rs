//! Tuning profiles
//!
//! Every platform variant of the copy and fill routines runs the same algorithm; they differ only
//! in word widths and in the byte counts at which wider transfers start paying off.  Those knobs
//! are collected here.
//!
//! This file is also loaded by the build script, which rejects inconsistent profiles before the
//! crate is compiled.  Keep it free of references to anything but `crate::word`.

use crate::word::Word;

/// Compile-time parameters of the copy and fill engines.
pub trait Profile {
    /// Word moved by the large copy tier.
    type CopyLargeWord: Word;
    /// Word moved by the medium copy tier.
    type CopyMediumWord: Word;
    /// Pattern word stored by the fill engine.
    type FillWord: Word;

    /// Smallest byte count copied in large blocks.
    const COPY_LARGE_MIN: usize;
    /// Bytes per large copy block.
    const COPY_LARGE_BLOCK: usize;
    /// Smallest byte count copied in medium blocks.  Below this, copies are byte-at-a-time.
    const COPY_MEDIUM_MIN: usize;
    /// Bytes per medium copy block.
    const COPY_MEDIUM_BLOCK: usize;

    /// Smallest byte count filled with pattern words.  Below this, fills are byte-at-a-time.
    const FILL_BLOCK_MIN: usize;
    /// Bytes per fill block.
    const FILL_BLOCK: usize;
    /// Bytes per fill sub-block, used for what remains after whole blocks.
    const FILL_SUB_BLOCK: usize;
}

/// 32-byte copy blocks of four double-words, 16-byte blocks of four words, 32-byte fill blocks of
/// eight words.
pub struct Standard;

impl Profile for Standard {
    type CopyLargeWord = u64;
    type CopyMediumWord = u32;
    type FillWord = u32;

    const COPY_LARGE_MIN: usize = 128;
    const COPY_LARGE_BLOCK: usize = 32;
    const COPY_MEDIUM_MIN: usize = 20;
    const COPY_MEDIUM_BLOCK: usize = 16;

    const FILL_BLOCK_MIN: usize = 32;
    const FILL_BLOCK: usize = 32;
    const FILL_SUB_BLOCK: usize = 8;
}

/// Same thresholds as [`Standard`], but never issues 64-bit accesses.  Large copy blocks are
/// eight words.
pub struct Narrow;

impl Profile for Narrow {
    type CopyLargeWord = u32;
    type CopyMediumWord = u32;
    type FillWord = u32;

    const COPY_LARGE_MIN: usize = 128;
    const COPY_LARGE_BLOCK: usize = 32;
    const COPY_MEDIUM_MIN: usize = 20;
    const COPY_MEDIUM_BLOCK: usize = 16;

    const FILL_BLOCK_MIN: usize = 32;
    const FILL_BLOCK: usize = 32;
    const FILL_SUB_BLOCK: usize = 8;
}

/// Profile used by [`crate::copy()`], [`crate::fill()`] and the exported symbols.
#[cfg(not(feature = "narrow"))]
pub type ActiveProfile = Standard;

/// Profile used by [`crate::copy()`], [`crate::fill()`] and the exported symbols.
#[cfg(feature = "narrow")]
pub type ActiveProfile = Narrow;
