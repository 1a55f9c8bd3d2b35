//! Types shared by the copy and fill engines and the exported symbols.

#[allow(non_camel_case_types)]
pub type c_int = core::ffi::c_int;

/// A contiguous span of memory identified by its start address and length in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub len: usize,
}

impl Region {
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub fn from_ptr<T>(ptr: *const T, len: usize) -> Self {
        Self::new(ptr as usize, len)
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if both regions contain at least one common byte address.
    ///
    /// Uses the distance between the starts rather than computing end addresses, so a region
    /// reaching the top of the address space does not wrap.
    pub const fn overlaps(&self, other: &Region) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        if self.start <= other.start {
            other.start - self.start < self.len
        } else {
            self.start - other.start < other.len
        }
    }

    /// Low-order address bits relative to `width`, which must be a power of two.
    pub const fn misalignment(&self, width: usize) -> usize {
        self.start & (width - 1)
    }
}
