//! Print framework
//!
//! No `core::fmt`: it pulls in a large amount of code and panicking paths.  Everything printable
//! implements [`Print`] directly, with integers formatted by `itoa`.

use crate::os::{Fd, STDERR, STDOUT};
use crate::verify::{Case, Fault, Mismatch};

pub fn print<T: Print>(s: T) {
    s.print(STDOUT);
}

pub fn println<T: Print>(s: T) {
    s.print(STDOUT);
    b"\n".print(STDOUT);
}

pub fn eprint<T: Print>(s: T) {
    s.print(STDERR);
}

pub fn eprintln<T: Print>(s: T) {
    s.print(STDERR);
    b"\n".print(STDERR);
}

/// Print `s` followed by enough spaces to fill `width` columns.
pub fn print_padded(s: &str, width: usize) {
    print(s);
    let mut remaining = width.saturating_sub(s.len());
    while remaining >= 5 {
        print("     ");
        remaining -= 5;
    }
    while remaining > 0 {
        print(" ");
        remaining -= 1;
    }
}

pub trait Print {
    fn print(&self, fd: Fd);
}

impl<T: Print + ?Sized> Print for &T {
    fn print(&self, fd: Fd) {
        (**self).print(fd);
    }
}

impl Print for [u8] {
    fn print(&self, fd: Fd) {
        let _ = fd.write_all(self);
    }
}

impl<const N: usize> Print for [u8; N] {
    fn print(&self, fd: Fd) {
        let _ = fd.write_all(self);
    }
}

impl Print for str {
    fn print(&self, fd: Fd) {
        let _ = fd.write_all(self.as_bytes());
    }
}

macro_rules! print_integer {
    ($($t:ty),*) => {
        $(
            impl Print for $t {
                fn print(&self, fd: Fd) {
                    let _ = fd.write_all(itoa::Buffer::new().format(*self).as_bytes());
                }
            }
        )*
    };
}

print_integer!(u8, u32, u64, usize, isize);

impl Print for Case {
    fn print(&self, fd: Fd) {
        match *self {
            Case::CopyDisjoint {
                dst_align,
                src_align,
            } => {
                "copy, disjoint (dst align ".print(fd);
                dst_align.print(fd);
                ", src align ".print(fd);
                src_align.print(fd);
            }
            Case::CopyOverlapping { align, shift } => {
                "copy, overlapping (align ".print(fd);
                align.print(fd);
                ", shift ".print(fd);
                shift.print(fd);
            }
            Case::CopyIdentity { align } => {
                "copy, identical (align ".print(fd);
                align.print(fd);
            }
            Case::CopyEmpty { shift } => {
                "copy, empty (shift ".print(fd);
                shift.print(fd);
            }
            Case::Fill { align, value } => {
                "fill (align ".print(fd);
                align.print(fd);
                ", value ".print(fd);
                value.print(fd);
            }
        }
        ")".print(fd);
    }
}

impl Print for Fault {
    fn print(&self, fd: Fd) {
        let (what, offset, expected, found) = match *self {
            Fault::ReturnValue => {
                "returned pointer is not the destination".print(fd);
                return;
            }
            Fault::Byte {
                offset,
                expected,
                found,
            } => ("destination byte ", offset, expected, found),
            Fault::Outside {
                offset,
                expected,
                found,
            } => ("byte outside destination at buffer offset ", offset, expected, found),
        };
        what.print(fd);
        offset.print(fd);
        " is ".print(fd);
        found.print(fd);
        ", expected ".print(fd);
        expected.print(fd);
    }
}

impl Print for Mismatch {
    fn print(&self, fd: Fd) {
        self.case.print(fd);
        ", len ".print(fd);
        self.len.print(fd);
        ": ".print(fd);
        self.fault.print(fd);
    }
}
