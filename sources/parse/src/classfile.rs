use crate::{
    attributes::Attributes,
    error::ParseResult,
    flags::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags},
    pool::{Addressed, ConstantClass, ConstantPool, ConstantUtf8, Resolvable},
};

/// One fully decoded class file.
#[derive(Debug, Clone)]
pub struct ClassFile {
    pub constant_pool: ConstantPool,
    pub meta_data: MetaData,

    pub access_flags: ClassAccessFlags,
    pub this_class: Addressed<ConstantClass>,
    pub super_class: Option<Addressed<ConstantClass>>,

    pub interfaces: Interfaces,
    pub fields: Fields,
    pub methods: Methods,
    pub attributes: Attributes,
}

impl ClassFile {
    /// The class name in its internal slash form, e.g. `com/acme/Order`.
    pub fn class_name(&self) -> ParseResult<String> {
        self.this_class.try_resolve()?.name.try_resolve()?.try_string()
    }
}

#[derive(Debug, Clone)]
pub struct MetaData {
    pub minor_version: u16,
    pub major_version: u16,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub flags: FieldAccessFlags,
    pub name: Addressed<ConstantUtf8>,
    pub descriptor: Addressed<ConstantUtf8>,
    pub attributes: Attributes,
}

impl Field {
    pub fn is_static(&self) -> bool {
        self.flags.contains(FieldAccessFlags::STATIC)
    }

    pub fn name(&self) -> ParseResult<String> {
        self.name.try_resolve()?.try_string()
    }
}

#[derive(Debug, Clone)]
pub struct Fields {
    pub values: Vec<Field>,
}

#[derive(Debug, Clone)]
pub struct Method {
    pub flags: MethodAccessFlags,
    pub name: Addressed<ConstantUtf8>,
    pub descriptor: Addressed<ConstantUtf8>,
    pub attributes: Attributes,
}

#[derive(Debug, Clone)]
pub struct Methods {
    pub values: Vec<Method>,
}

#[derive(Debug, Clone)]
pub struct Interfaces {
    pub values: Vec<Addressed<ConstantClass>>,
}
