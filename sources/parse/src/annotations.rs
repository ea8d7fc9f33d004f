//! Decoding of the `RuntimeVisibleAnnotations` attribute (JVMS 4.7.16).
//!
//! Annotations come out as plain data: a type descriptor string plus an
//! ordered list of named element values. No annotation types are ever
//! instantiated; the consumer picks out the elements it cares about.

use bytes::Bytes;
use enum_as_inner::EnumAsInner;
use support::bytes_ext::SafeBuf;

use crate::{
    attributes::KnownAttribute,
    error::{ParseError, ParseResult},
    pool::{Addressed, ConstantEntry, ConstantPool, ConstantUtf8, Resolvable},
};

#[derive(Debug, Clone)]
pub struct RuntimeVisibleAnnotations {
    pub annotations: Vec<Annotation>,
}

impl KnownAttribute for RuntimeVisibleAnnotations {
    fn decode(mut bytes: Bytes, constant_pool: &ConstantPool) -> ParseResult<Self> {
        let length = bytes.try_get_u16()?;
        let mut annotations = Vec::with_capacity(length.into());

        for _ in 0..length {
            annotations.push(Annotation::parse(&mut bytes, constant_pool)?);
        }

        Ok(RuntimeVisibleAnnotations { annotations })
    }

    fn id() -> &'static str {
        "RuntimeVisibleAnnotations"
    }
}

/// One annotation: `@com.acme.Tag(value = 3)` becomes the descriptor
/// `Lcom/acme/Tag;` with a single element pair `value -> Int(3)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub descriptor: String,
    pub elements: Vec<ElementPair>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementPair {
    pub name: String,
    pub value: ElementValue,
}

impl Annotation {
    pub fn parse(bytes: &mut Bytes, constant_pool: &ConstantPool) -> ParseResult<Self> {
        let descriptor = utf8_at(constant_pool, bytes.try_get_u16()?)?;

        let length = bytes.try_get_u16()?;
        let mut elements = Vec::with_capacity(length.into());

        for _ in 0..length {
            let name = utf8_at(constant_pool, bytes.try_get_u16()?)?;
            let value = ElementValue::parse(bytes, constant_pool)?;
            elements.push(ElementPair { name, value });
        }

        Ok(Annotation {
            descriptor,
            elements,
        })
    }
}

#[derive(EnumAsInner, Debug, Clone, PartialEq)]
pub enum ElementValue {
    Byte(i8),
    Char(u16),
    Double(f64),
    Float(f32),
    Int(i32),
    Long(i64),
    Short(i16),
    Boolean(bool),
    String(String),
    Enum(EnumConst),
    Class(String),
    Annotation(Annotation),
    Array(Vec<ElementValue>),
}

/// An enum-typed element value, e.g. `@Retention(RetentionPolicy.RUNTIME)`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumConst {
    pub type_descriptor: String,
    pub const_name: String,
}

impl ElementValue {
    pub fn parse(bytes: &mut Bytes, constant_pool: &ConstantPool) -> ParseResult<Self> {
        let tag = bytes.try_get_u8()?;
        let value = match tag {
            b'B' => ElementValue::Byte(int_at(constant_pool, bytes.try_get_u16()?)? as i8),
            b'C' => ElementValue::Char(int_at(constant_pool, bytes.try_get_u16()?)? as u16),
            b'S' => ElementValue::Short(int_at(constant_pool, bytes.try_get_u16()?)? as i16),
            b'Z' => ElementValue::Boolean(int_at(constant_pool, bytes.try_get_u16()?)? != 0),
            b'I' => ElementValue::Int(int_at(constant_pool, bytes.try_get_u16()?)?),
            b'J' => {
                let index = bytes.try_get_u16()?;
                match entry_at(constant_pool, index)? {
                    ConstantEntry::Long(data) => ElementValue::Long(data.value()),
                    _ => {
                        return Err(ParseError::BadElementConstant {
                            index,
                            expected: "Long",
                        })
                    }
                }
            }
            b'F' => {
                let index = bytes.try_get_u16()?;
                match entry_at(constant_pool, index)? {
                    ConstantEntry::Float(data) => ElementValue::Float(data.bytes),
                    _ => {
                        return Err(ParseError::BadElementConstant {
                            index,
                            expected: "Float",
                        })
                    }
                }
            }
            b'D' => {
                let index = bytes.try_get_u16()?;
                match entry_at(constant_pool, index)? {
                    ConstantEntry::Double(data) => ElementValue::Double(data.bytes),
                    _ => {
                        return Err(ParseError::BadElementConstant {
                            index,
                            expected: "Double",
                        })
                    }
                }
            }
            b's' => ElementValue::String(utf8_at(constant_pool, bytes.try_get_u16()?)?),
            b'e' => ElementValue::Enum(EnumConst {
                type_descriptor: utf8_at(constant_pool, bytes.try_get_u16()?)?,
                const_name: utf8_at(constant_pool, bytes.try_get_u16()?)?,
            }),
            b'c' => ElementValue::Class(utf8_at(constant_pool, bytes.try_get_u16()?)?),
            b'@' => ElementValue::Annotation(Annotation::parse(bytes, constant_pool)?),
            b'[' => {
                let length = bytes.try_get_u16()?;
                let mut values = Vec::with_capacity(length.into());
                for _ in 0..length {
                    values.push(ElementValue::parse(bytes, constant_pool)?);
                }
                ElementValue::Array(values)
            }
            other => return Err(ParseError::UnknownElementTag(other)),
        };

        Ok(value)
    }
}

fn utf8_at(constant_pool: &ConstantPool, index: u16) -> ParseResult<String> {
    let addr: Addressed<ConstantUtf8> = constant_pool.address(index);
    addr.try_resolve()?.try_string()
}

fn entry_at(constant_pool: &ConstantPool, index: u16) -> ParseResult<ConstantEntry> {
    let addr: Addressed<ConstantEntry> = constant_pool.address(index);
    addr.try_resolve()
}

fn int_at(constant_pool: &ConstantPool, index: u16) -> ParseResult<i32> {
    match entry_at(constant_pool, index)? {
        ConstantEntry::Integer(data) => Ok(data.value()),
        _ => Err(ParseError::BadElementConstant {
            index,
            expected: "Integer",
        }),
    }
}
