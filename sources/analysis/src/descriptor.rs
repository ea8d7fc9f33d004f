use parse::{
    annotations::{Annotation, RuntimeVisibleAnnotations},
    classfile::ClassFile,
    error::ParseResult,
};

/// The slice of a parsed class file the tag analysis works on: the class
/// name and its instance fields with their runtime-visible annotations.
///
/// Static fields never make it in here. Tags only govern the serialized
/// form of instances, so a class-level field cannot conflict.
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    /// Internal slash form, e.g. `com/acme/Order`.
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub annotations: Vec<Annotation>,
}

impl ClassDescriptor {
    pub fn from_class_file(class_file: &ClassFile) -> ParseResult<Self> {
        let name = class_file.class_name()?;
        let mut fields = Vec::with_capacity(class_file.fields.values.len());

        for field in class_file.fields.values.iter() {
            if field.is_static() {
                continue;
            }

            let annotations = field
                .attributes
                .known_attribute::<RuntimeVisibleAnnotations>(&class_file.constant_pool)?
                .map(|attr| attr.annotations)
                .unwrap_or_default();

            fields.push(FieldDescriptor {
                name: field.name()?,
                annotations,
            });
        }

        Ok(ClassDescriptor { name, fields })
    }

    /// The display form of the class name, e.g. `com.acme.Order`.
    pub fn dotted_name(&self) -> String {
        self.name.replace('/', ".")
    }
}
