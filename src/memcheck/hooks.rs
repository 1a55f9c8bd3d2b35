//! Platform hooks for the `prefetch` and `zero-hook` features.
//!
//! A real target implements these with cache-control instructions.  memcheck only counts the
//! calls (and clears blocks with plain stores).  Zero fills longer than a block reach the
//! zero hook from any start offset, so the fill sweep reports a non-zero count.

#[cfg(any(feature = "prefetch", feature = "zero-hook"))]
use core::sync::atomic::{AtomicUsize, Ordering};
#[cfg(any(feature = "prefetch", feature = "zero-hook"))]
use memrt::os::*;

#[cfg(feature = "prefetch")]
static PREFETCHES: AtomicUsize = AtomicUsize::new(0);

#[cfg(feature = "zero-hook")]
static ZERO_BLOCKS: AtomicUsize = AtomicUsize::new(0);

#[cfg(feature = "prefetch")]
#[unsafe(no_mangle)]
extern "C" fn memrt_prefetch(_addr: *const u8) {
    PREFETCHES.fetch_add(1, Ordering::Relaxed);
}

#[cfg(feature = "zero-hook")]
#[unsafe(no_mangle)]
unsafe extern "C" fn memrt_zero_block(dst: *mut u8, len: usize) -> bool {
    let mut i = 0;
    while i < len {
        unsafe { dst.add(i).write_volatile(0) };
        i += 1;
    }
    ZERO_BLOCKS.fetch_add(1, Ordering::Relaxed);
    true
}

/// Print how often each enabled hook was called.
#[allow(unused_variables)]
pub fn report(width: usize) {
    #[cfg(feature = "prefetch")]
    {
        print_padded("prefetch hook", width);
        print(PREFETCHES.load(Ordering::Relaxed));
        println(" calls");
    }

    #[cfg(feature = "zero-hook")]
    {
        print_padded("zero-block hook", width);
        print(ZERO_BLOCKS.load(Ordering::Relaxed));
        println(" blocks");
    }
}
