use std::{fmt, marker::PhantomData, rc::Rc};

use enum_as_inner::EnumAsInner;
use parking_lot::RwLock;

use crate::error::{ParseError, ParseResult};

/// The constant pool of one class file.
///
/// Entries are stored in JVMS numbering: slot `n` of the class file lives at
/// vector index `n - 1`, and `Long`/`Double` entries are followed by a
/// [`ConstantEntry::Reserved`] dummy so later indices still line up.
#[derive(Debug, Clone)]
pub struct ConstantPool {
    entries: Rc<RwLock<Vec<ConstantEntry>>>,
}

impl Default for ConstantPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstantPool {
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RwLock::new(vec![])),
        }
    }

    pub fn insert(&mut self, entry: ConstantEntry) {
        self.entries.write().push(entry)
    }

    /// A deferred, typed lookup into this pool. Resolution happens lazily
    /// so entries can address slots that are parsed after them.
    pub fn address<T>(&self, for_index: u16) -> Addressed<T> {
        Addressed {
            phantom: PhantomData,
            index: for_index,
            entries: Rc::clone(&self.entries),
        }
    }

    /// Walk every entry and force its cross-references, so that dangling
    /// indices surface here instead of at some later lookup.
    pub(crate) fn perform_format_checking(&self) -> ParseResult<()> {
        let entries = self.entries.read();
        for item in entries.iter() {
            match item {
                ConstantEntry::Class(data) => {
                    data.name.try_resolve()?;
                }
                ConstantEntry::Field(data)
                | ConstantEntry::Method(data)
                | ConstantEntry::InterfaceMethod(data) => {
                    data.class.try_resolve()?;
                    data.name_and_type.try_resolve()?;
                }
                ConstantEntry::String(data) => {
                    data.string.try_resolve()?;
                }
                ConstantEntry::NameAndType(data) => {
                    data.name.try_resolve()?;
                    data.descriptor.try_resolve()?;
                }
                ConstantEntry::MethodType(data) => {
                    data.descriptor.try_resolve()?;
                }
                ConstantEntry::Dynamic(data) | ConstantEntry::InvokeDynamic(data) => {
                    data.name_and_type.try_resolve()?;
                }
                ConstantEntry::Module(data) | ConstantEntry::Package(data) => {
                    data.name.try_resolve()?;
                }
                ConstantEntry::Utf8(_)
                | ConstantEntry::Integer(_)
                | ConstantEntry::Float(_)
                | ConstantEntry::Long(_)
                | ConstantEntry::Double(_)
                | ConstantEntry::MethodHandle(_)
                | ConstantEntry::Reserved => {}
            }
        }
        Ok(())
    }
}

/// A lazily resolved reference to a pool slot expected to hold a `T`.
#[derive(Clone)]
pub struct Addressed<T> {
    phantom: PhantomData<T>,

    index: u16,
    entries: Rc<RwLock<Vec<ConstantEntry>>>,
}

impl<T> fmt::Debug for Addressed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Addressed {{ {} }}", self.index)
    }
}

pub trait Resolvable<T> {
    fn try_resolve(&self) -> ParseResult<T>;
}

impl Resolvable<ConstantEntry> for Addressed<ConstantEntry> {
    fn try_resolve(&self) -> ParseResult<ConstantEntry> {
        let entries = self.entries.read();
        entries
            .get((self.index as usize).wrapping_sub(1))
            .cloned()
            .ok_or(ParseError::BadPoolIndex(self.index))
    }
}

macro_rules! address {
    ($type: ty, $enum: ident) => {
        impl Resolvable<$type> for Addressed<$type> {
            fn try_resolve(&self) -> ParseResult<$type> {
                let entries = self.entries.read();
                let value = entries
                    .get((self.index as usize).wrapping_sub(1))
                    .ok_or(ParseError::BadPoolIndex(self.index))?;

                match value {
                    ConstantEntry::$enum(data) => Ok(data.clone()),
                    other => Err(ParseError::PoolTypeMismatch {
                        index: self.index,
                        expected: stringify!($enum),
                        actual: other.kind(),
                    }),
                }
            }
        }
    };
}

address!(ConstantClass, Class);
address!(ConstantNameAndType, NameAndType);
address!(ConstantUtf8, Utf8);

#[derive(EnumAsInner, Clone, Debug)]
pub enum ConstantEntry {
    Class(ConstantClass),
    Field(ConstantRef),
    Method(ConstantRef),
    InterfaceMethod(ConstantRef),
    String(ConstantString),
    Integer(ConstantInteger),
    Float(ConstantFloat),
    Long(ConstantLong),
    Double(ConstantDouble),
    NameAndType(ConstantNameAndType),
    Utf8(ConstantUtf8),
    MethodHandle(ConstantMethodHandle),
    MethodType(ConstantMethodType),
    Dynamic(ConstantDynamic),
    InvokeDynamic(ConstantDynamic),
    Module(ConstantModule),
    Package(ConstantModule),
    Reserved,
}

impl ConstantEntry {
    pub fn kind(&self) -> &'static str {
        match self {
            ConstantEntry::Class(_) => "Class",
            ConstantEntry::Field(_) => "Field",
            ConstantEntry::Method(_) => "Method",
            ConstantEntry::InterfaceMethod(_) => "InterfaceMethod",
            ConstantEntry::String(_) => "String",
            ConstantEntry::Integer(_) => "Integer",
            ConstantEntry::Float(_) => "Float",
            ConstantEntry::Long(_) => "Long",
            ConstantEntry::Double(_) => "Double",
            ConstantEntry::NameAndType(_) => "NameAndType",
            ConstantEntry::Utf8(_) => "Utf8",
            ConstantEntry::MethodHandle(_) => "MethodHandle",
            ConstantEntry::MethodType(_) => "MethodType",
            ConstantEntry::Dynamic(_) => "Dynamic",
            ConstantEntry::InvokeDynamic(_) => "InvokeDynamic",
            ConstantEntry::Module(_) => "Module",
            ConstantEntry::Package(_) => "Package",
            ConstantEntry::Reserved => "Reserved",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConstantClass {
    pub name: Addressed<ConstantUtf8>,
}

/// Fieldref / Methodref / InterfaceMethodref share one layout.
#[derive(Debug, Clone)]
pub struct ConstantRef {
    pub class: Addressed<ConstantClass>,
    pub name_and_type: Addressed<ConstantNameAndType>,
}

#[derive(Debug, Clone)]
pub struct ConstantString {
    pub string: Addressed<ConstantUtf8>,
}

#[derive(Debug, Clone)]
pub struct ConstantInteger {
    pub bytes: u32,
}

impl ConstantInteger {
    pub fn value(&self) -> i32 {
        self.bytes as i32
    }
}

#[derive(Debug, Clone)]
pub struct ConstantFloat {
    pub bytes: f32,
}

#[derive(Debug, Clone)]
pub struct ConstantLong {
    pub bytes: u64,
}

impl ConstantLong {
    pub fn value(&self) -> i64 {
        self.bytes as i64
    }
}

#[derive(Debug, Clone)]
pub struct ConstantDouble {
    pub bytes: f64,
}

#[derive(Debug, Clone)]
pub struct ConstantNameAndType {
    pub name: Addressed<ConstantUtf8>,
    pub descriptor: Addressed<ConstantUtf8>,
}

#[derive(Debug, Clone)]
pub struct ConstantUtf8 {
    pub bytes: Vec<u8>,
}

impl ConstantUtf8 {
    pub fn try_string(self) -> ParseResult<String> {
        Ok(String::from_utf8(self.bytes)?)
    }
}

#[derive(Debug, Clone)]
pub struct ConstantMethodHandle {
    pub kind: u8,
    pub index: u16,
}

#[derive(Debug, Clone)]
pub struct ConstantMethodType {
    pub descriptor: Addressed<ConstantUtf8>,
}

/// Dynamic / InvokeDynamic share one layout.
#[derive(Debug, Clone)]
pub struct ConstantDynamic {
    pub bootstrap_method_index: u16,
    pub name_and_type: Addressed<ConstantNameAndType>,
}

/// Module / Package share one layout.
#[derive(Debug, Clone)]
pub struct ConstantModule {
    pub name: Addressed<ConstantUtf8>,
}
