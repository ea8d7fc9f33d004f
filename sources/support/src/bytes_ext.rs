use bytes::{Buf, Bytes};
use thiserror::Error;

/// Raised when a read runs past the end of the buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unexpected end of input, needed {needed} more byte(s) but only {remaining} left")]
pub struct BufferExhausted {
    pub needed: usize,
    pub remaining: usize,
}

/// Checked reads over [`Bytes`].
///
/// The stock `Buf` getters panic on underflow, which turns a truncated
/// class file into a crash. These variants surface the underflow as an
/// error the parser can propagate.
pub trait SafeBuf {
    fn try_get_u8(&mut self) -> Result<u8, BufferExhausted>;
    fn try_get_u16(&mut self) -> Result<u16, BufferExhausted>;
    fn try_get_u32(&mut self) -> Result<u32, BufferExhausted>;
    fn try_get_u64(&mut self) -> Result<u64, BufferExhausted>;
    fn try_get_f32(&mut self) -> Result<f32, BufferExhausted>;
    fn try_get_f64(&mut self) -> Result<f64, BufferExhausted>;

    /// Take exactly `count` bytes off the front of the buffer.
    fn try_take(&mut self, count: usize) -> Result<Vec<u8>, BufferExhausted>;
}

macro_rules! checked {
    ($self: ident, $width: expr, $get: ident) => {{
        if $self.remaining() < $width {
            return Err(BufferExhausted {
                needed: $width,
                remaining: $self.remaining(),
            });
        }

        Ok($self.$get())
    }};
}

impl SafeBuf for Bytes {
    fn try_get_u8(&mut self) -> Result<u8, BufferExhausted> {
        checked!(self, 1, get_u8)
    }

    fn try_get_u16(&mut self) -> Result<u16, BufferExhausted> {
        checked!(self, 2, get_u16)
    }

    fn try_get_u32(&mut self) -> Result<u32, BufferExhausted> {
        checked!(self, 4, get_u32)
    }

    fn try_get_u64(&mut self) -> Result<u64, BufferExhausted> {
        checked!(self, 8, get_u64)
    }

    fn try_get_f32(&mut self) -> Result<f32, BufferExhausted> {
        checked!(self, 4, get_f32)
    }

    fn try_get_f64(&mut self) -> Result<f64, BufferExhausted> {
        checked!(self, 8, get_f64)
    }

    fn try_take(&mut self, count: usize) -> Result<Vec<u8>, BufferExhausted> {
        if self.remaining() < count {
            return Err(BufferExhausted {
                needed: count,
                remaining: self.remaining(),
            });
        }

        Ok(self.split_to(count).to_vec())
    }
}
