use crate::constants::Profile;
use crate::word::Word;

/// Trait providing compile-time profile checking methods.
///
/// The engines fall back to byte copies whenever a block transfer cannot be proven safe, so a bad
/// profile would not corrupt memory.  It would silently never take the fast path, though, which
/// is why it is rejected here.
pub trait ProfileCheck: Profile {
    fn check_profile(name: &str) {
        check_copy_tier(
            name,
            "large",
            Self::COPY_LARGE_MIN,
            Self::COPY_LARGE_BLOCK,
            Self::CopyLargeWord::WIDTH,
        );
        check_copy_tier(
            name,
            "medium",
            Self::COPY_MEDIUM_MIN,
            Self::COPY_MEDIUM_BLOCK,
            Self::CopyMediumWord::WIDTH,
        );
        Self::check_tier_order(name);
        Self::check_fill(name);
    }

    fn check_tier_order(name: &str) {
        if Self::COPY_MEDIUM_MIN >= Self::COPY_LARGE_MIN {
            panic!(
                "{name}: medium copy tier starts at {} bytes, at or above the large tier's {}",
                Self::COPY_MEDIUM_MIN,
                Self::COPY_LARGE_MIN
            );
        }
    }

    fn check_fill(name: &str) {
        let width = Self::FillWord::WIDTH;
        check_block(name, "fill block", Self::FILL_BLOCK, width);
        check_block(name, "fill sub-block", Self::FILL_SUB_BLOCK, width);

        if Self::FILL_SUB_BLOCK > Self::FILL_BLOCK {
            panic!(
                "{name}: fill sub-block of {} bytes is larger than the {}-byte fill block",
                Self::FILL_SUB_BLOCK,
                Self::FILL_BLOCK
            );
        }
        if Self::FILL_BLOCK_MIN < width {
            panic!(
                "{name}: fills of {} bytes would use {width}-byte pattern words",
                Self::FILL_BLOCK_MIN
            );
        }
    }
}

fn check_copy_tier(name: &str, tier: &str, min: usize, block: usize, width: usize) {
    check_block(name, tier, block, width);

    // Up to width - 1 leading bytes are copied singly before the first aligned block.
    if min < block + width - 1 {
        panic!(
            "{name}: {tier} copy tier starts at {min} bytes, which may not leave room for one \
             {block}-byte block after aligning to {width} bytes"
        );
    }
}

/// Blocks must be whole numbers of words, and both powers of two so that alignment can be
/// computed with masks.
fn check_block(name: &str, what: &str, block: usize, width: usize) {
    if !width.is_power_of_two() {
        panic!("{name}: {what} word width {width} is not a power of two");
    }
    if !block.is_power_of_two() {
        panic!("{name}: {what} of {block} bytes is not a power of two");
    }
    if block < width {
        panic!("{name}: {what} of {block} bytes is smaller than its {width}-byte word");
    }
}
