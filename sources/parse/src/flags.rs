use crate::error::{ParseError, ParseResult};
use bitflags::bitflags;

bitflags! {
    pub struct ClassAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
        const MODULE = 0x8000;
    }
}

bitflags! {
    pub struct FieldAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const VOLATILE = 0x0040;
        const TRANSIENT = 0x0080;
        const SYNTHETIC = 0x1000;
        const ENUM = 0x4000;
    }
}

bitflags! {
    pub struct MethodAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const BRIDGE = 0x0040;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
    }
}

macro_rules! parse_flags {
    ($($type: ty),*) => {
        $(
            impl $type {
                pub fn parse(raw: u16) -> ParseResult<Self> {
                    Self::from_bits(raw).ok_or(ParseError::UnknownAccessFlags(raw))
                }
            }
        )*
    };
}

parse_flags!(ClassAccessFlags, FieldAccessFlags, MethodAccessFlags);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_bit_is_0x0008() {
        let flags = FieldAccessFlags::parse(0x0009).unwrap();
        assert!(flags.contains(FieldAccessFlags::STATIC));
        assert!(flags.contains(FieldAccessFlags::PUBLIC));

        let flags = FieldAccessFlags::parse(0x0002).unwrap();
        assert!(!flags.contains(FieldAccessFlags::STATIC));
    }

    #[test]
    fn undefined_bits_are_rejected() {
        assert!(FieldAccessFlags::parse(0x0200).is_err());
    }
}
