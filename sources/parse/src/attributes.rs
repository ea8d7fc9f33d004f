use bytes::Bytes;
use support::bytes_ext::SafeBuf;

use crate::{
    error::ParseResult,
    pool::{Addressed, ConstantPool, ConstantUtf8, Resolvable},
};

/// One attribute as it appears in the class file: a name and an undecoded
/// payload. Attributes the analysis never needs (LineNumberTable,
/// SourceFile, ...) simply stay in this raw form.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: Addressed<ConstantUtf8>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct Attributes {
    pub values: Vec<Attribute>,
}

impl Attributes {
    pub fn parse(bytes: &mut Bytes, constant_pool: &ConstantPool) -> ParseResult<Self> {
        let length = bytes.try_get_u16()?;
        let mut attributes = Attributes {
            values: Vec::with_capacity(length.into()),
        };

        for _ in 0..length {
            let name = constant_pool.address(bytes.try_get_u16()?);
            let attr_length = bytes.try_get_u32()?;
            let data = bytes.try_take(attr_length as usize)?;

            attributes.values.push(Attribute { name, data });
        }

        Ok(attributes)
    }

    /// Decode the attribute identified by `T::id()`, if present.
    pub fn known_attribute<T>(&self, constant_pool: &ConstantPool) -> ParseResult<Option<T>>
    where
        T: KnownAttribute,
    {
        for attr in self.values.iter() {
            let name = attr.name.try_resolve()?.try_string()?;
            if name == T::id() {
                let bytes = Bytes::copy_from_slice(&attr.data);
                return T::decode(bytes, constant_pool).map(Some);
            }
        }

        Ok(None)
    }
}

/// An attribute with a structure we know how to decode.
pub trait KnownAttribute
where
    Self: Sized,
{
    fn decode(bytes: Bytes, constant_pool: &ConstantPool) -> ParseResult<Self>;
    fn id() -> &'static str;
}
