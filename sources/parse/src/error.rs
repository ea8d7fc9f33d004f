use support::bytes_ext::BufferExhausted;
use thiserror::Error;

/// Everything that can go wrong while decoding one class file.
///
/// A parse either yields a full `ClassFile` or one of these; there is no
/// partially populated output.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error(transparent)]
    Eof(#[from] BufferExhausted),

    #[error("invalid magic value {0:#010x}")]
    BadMagic(u32),

    #[error("unknown constant pool tag {tag} at index {index}")]
    UnknownConstantTag { tag: u8, index: u16 },

    #[error("constant pool index {0} is out of range")]
    BadPoolIndex(u16),

    #[error("constant pool index {index} holds a {actual}, expected a {expected}")]
    PoolTypeMismatch {
        index: u16,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("invalid utf8 in constant pool: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("unknown access flag bits {0:#06x}")]
    UnknownAccessFlags(u16),

    #[error("unknown element value tag {0:#04x}")]
    UnknownElementTag(u8),

    #[error("element value points at index {index}, which is not a {expected} constant")]
    BadElementConstant { index: u16, expected: &'static str },

    #[error("classfile has {0} trailing byte(s) at the end")]
    TrailingBytes(usize),
}

pub type ParseResult<T> = Result<T, ParseError>;
