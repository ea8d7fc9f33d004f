use bytes::Bytes;
use tracing::trace;

use crate::attributes::Attributes;
use crate::classfile::{ClassFile, Field, Fields, Interfaces, MetaData, Method, Methods};
use crate::constants::MAGIC;
use crate::error::{ParseError, ParseResult};
use crate::flags::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags};
use crate::pool::{
    Addressed, ConstantClass, ConstantDouble, ConstantDynamic, ConstantEntry, ConstantFloat,
    ConstantInteger, ConstantLong, ConstantMethodHandle, ConstantMethodType, ConstantModule,
    ConstantNameAndType, ConstantPool, ConstantRef, ConstantString, ConstantUtf8,
};
use support::bytes_ext::SafeBuf;

pub struct Parser {
    bytes: Bytes,
}

impl Parser {
    pub fn new(data: &[u8]) -> Self {
        Self {
            bytes: Bytes::copy_from_slice(data),
        }
    }

    fn parse_constant_pool(&mut self) -> ParseResult<ConstantPool> {
        let length = self.bytes.try_get_u16()?;
        let mut pool = ConstantPool::new();

        let mut i = 0;
        while i < length.saturating_sub(1) {
            let tag = self.bytes.try_get_u8()?;
            let entry = match tag {
                1 => {
                    let length = self.bytes.try_get_u16()?;
                    let bytes = self.bytes.try_take(length.into())?;

                    ConstantEntry::Utf8(ConstantUtf8 { bytes })
                }
                3 => ConstantEntry::Integer(ConstantInteger {
                    bytes: self.bytes.try_get_u32()?,
                }),
                4 => ConstantEntry::Float(ConstantFloat {
                    bytes: self.bytes.try_get_f32()?,
                }),
                5 => ConstantEntry::Long(ConstantLong {
                    bytes: self.bytes.try_get_u64()?,
                }),
                6 => ConstantEntry::Double(ConstantDouble {
                    bytes: self.bytes.try_get_f64()?,
                }),
                7 => ConstantEntry::Class(ConstantClass {
                    name: pool.address(self.bytes.try_get_u16()?),
                }),
                8 => ConstantEntry::String(ConstantString {
                    string: pool.address(self.bytes.try_get_u16()?),
                }),
                9 => ConstantEntry::Field(ConstantRef {
                    class: pool.address(self.bytes.try_get_u16()?),
                    name_and_type: pool.address(self.bytes.try_get_u16()?),
                }),
                10 => ConstantEntry::Method(ConstantRef {
                    class: pool.address(self.bytes.try_get_u16()?),
                    name_and_type: pool.address(self.bytes.try_get_u16()?),
                }),
                11 => ConstantEntry::InterfaceMethod(ConstantRef {
                    class: pool.address(self.bytes.try_get_u16()?),
                    name_and_type: pool.address(self.bytes.try_get_u16()?),
                }),
                12 => ConstantEntry::NameAndType(ConstantNameAndType {
                    name: pool.address(self.bytes.try_get_u16()?),
                    descriptor: pool.address(self.bytes.try_get_u16()?),
                }),
                15 => ConstantEntry::MethodHandle(ConstantMethodHandle {
                    kind: self.bytes.try_get_u8()?,
                    index: self.bytes.try_get_u16()?,
                }),
                16 => ConstantEntry::MethodType(ConstantMethodType {
                    descriptor: pool.address(self.bytes.try_get_u16()?),
                }),
                17 => ConstantEntry::Dynamic(ConstantDynamic {
                    bootstrap_method_index: self.bytes.try_get_u16()?,
                    name_and_type: pool.address(self.bytes.try_get_u16()?),
                }),
                18 => ConstantEntry::InvokeDynamic(ConstantDynamic {
                    bootstrap_method_index: self.bytes.try_get_u16()?,
                    name_and_type: pool.address(self.bytes.try_get_u16()?),
                }),
                19 => ConstantEntry::Module(ConstantModule {
                    name: pool.address(self.bytes.try_get_u16()?),
                }),
                20 => ConstantEntry::Package(ConstantModule {
                    name: pool.address(self.bytes.try_get_u16()?),
                }),
                tag => return Err(ParseError::UnknownConstantTag { tag, index: i + 1 }),
            };

            let should_reserve_next =
                matches!(entry, ConstantEntry::Long(_) | ConstantEntry::Double(_));
            pool.insert(entry);

            // 64 bit constants take up 2 slots, so insert a dummy and skip
            // an extra index (JVMS 4.4.5)
            if should_reserve_next {
                pool.insert(ConstantEntry::Reserved);
                i += 1;
            }

            i += 1;
        }

        Ok(pool)
    }

    fn parse_interfaces(&mut self, pool: &ConstantPool) -> ParseResult<Interfaces> {
        let length = self.bytes.try_get_u16()?;
        let mut interfaces = Interfaces {
            values: Vec::with_capacity(length.into()),
        };

        for _ in 0..length {
            interfaces
                .values
                .push(pool.address(self.bytes.try_get_u16()?));
        }

        Ok(interfaces)
    }

    fn parse_fields(&mut self, pool: &ConstantPool) -> ParseResult<Fields> {
        let length = self.bytes.try_get_u16()?;
        let mut fields = Fields {
            values: Vec::with_capacity(length.into()),
        };

        for _ in 0..length {
            fields.values.push(Field {
                flags: FieldAccessFlags::parse(self.bytes.try_get_u16()?)?,
                name: pool.address(self.bytes.try_get_u16()?),
                descriptor: pool.address(self.bytes.try_get_u16()?),
                attributes: Attributes::parse(&mut self.bytes, pool)?,
            });
        }

        Ok(fields)
    }

    fn parse_methods(&mut self, pool: &ConstantPool) -> ParseResult<Methods> {
        let length = self.bytes.try_get_u16()?;
        let mut methods = Methods {
            values: Vec::with_capacity(length.into()),
        };

        for _ in 0..length {
            methods.values.push(Method {
                flags: MethodAccessFlags::parse(self.bytes.try_get_u16()?)?,
                name: pool.address(self.bytes.try_get_u16()?),
                descriptor: pool.address(self.bytes.try_get_u16()?),
                attributes: Attributes::parse(&mut self.bytes, pool)?,
            });
        }

        Ok(methods)
    }

    pub fn parse(&mut self) -> ParseResult<ClassFile> {
        let magic = self.bytes.try_get_u32()?;

        // Format checking: the first four bytes must contain the right magic
        if magic != MAGIC {
            return Err(ParseError::BadMagic(magic));
        }

        let minor = self.bytes.try_get_u16()?;
        let major = self.bytes.try_get_u16()?;

        let meta_data = MetaData {
            minor_version: minor,
            major_version: major,
        };

        trace!("classfile version {}.{}", major, minor);

        let constant_pool = self.parse_constant_pool()?;
        // Format checking: every cross-reference in the pool must point at
        // an entry of the right kind (JVMS 4.4)
        constant_pool.perform_format_checking()?;

        let access_flags = ClassAccessFlags::parse(self.bytes.try_get_u16()?)?;
        let this_class: Addressed<ConstantClass> = constant_pool.address(self.bytes.try_get_u16()?);

        let super_class_index = self.bytes.try_get_u16()?;
        let mut super_class: Option<Addressed<ConstantClass>> = None;
        if super_class_index != 0 {
            super_class = Some(constant_pool.address(super_class_index));
        }

        let interfaces = self.parse_interfaces(&constant_pool)?;
        let fields = self.parse_fields(&constant_pool)?;
        let methods = self.parse_methods(&constant_pool)?;
        let attributes = Attributes::parse(&mut self.bytes, &constant_pool)?;

        // Format checking: the class file must not have extra bytes at the end
        if !self.bytes.is_empty() {
            return Err(ParseError::TrailingBytes(self.bytes.len()));
        }

        Ok(ClassFile {
            constant_pool,
            meta_data,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
        })
    }
}
