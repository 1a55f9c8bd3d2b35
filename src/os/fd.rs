use crate::err::Errno;
use crate::syscall::write;
use crate::types::c_int;

pub const STDOUT: Fd = Fd(1);
pub const STDERR: Fd = Fd(2);

/// File descriptor
#[derive(Clone, Copy)]
pub struct Fd(c_int);

impl Fd {
    pub fn write(&self, buf: &[u8]) -> Result<usize, Errno> {
        unsafe { write(self.0, buf) }
    }

    /// Write all of `buf`, retrying short writes and interrupted calls.
    pub fn write_all(&self, mut buf: &[u8]) -> Result<(), Errno> {
        while !buf.is_empty() {
            match self.write(buf) {
                Ok(0) => return Err(Errno::EIO),
                Ok(n) => buf = buf.get(n..).unwrap_or_default(),
                Err(e) if e == Errno::EINTR => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
