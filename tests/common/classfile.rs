//! Builds class file fixtures byte by byte, so tests do not depend on a
//! Java compiler. Only the pieces the checker looks at are supported:
//! a constant pool, instance/static fields and their
//! `RuntimeVisibleAnnotations` attributes.

use bytes::BufMut;

pub const TAG_DESCRIPTOR: &str = "Lio/protostuff/Tag;";

const ACC_PUBLIC: u16 = 0x0001;
const ACC_PRIVATE: u16 = 0x0002;
const ACC_STATIC: u16 = 0x0008;
const ACC_SUPER: u16 = 0x0020;

#[derive(Clone)]
pub enum Value {
    Int(i32),
    Str(&'static str),
}

#[derive(Clone)]
pub struct AnnotationSpec {
    pub descriptor: String,
    pub elements: Vec<(String, Value)>,
}

impl AnnotationSpec {
    pub fn new(descriptor: &str) -> Self {
        Self {
            descriptor: descriptor.to_string(),
            elements: vec![],
        }
    }

    /// `@Tag(value = N)`, the form javac emits for `@Tag(N)`.
    pub fn tag(value: i32) -> Self {
        Self::new(TAG_DESCRIPTOR).element("value", Value::Int(value))
    }

    pub fn element(mut self, name: &str, value: Value) -> Self {
        self.elements.push((name.to_string(), value));
        self
    }
}

struct FieldSpec {
    access: u16,
    name_index: u16,
    descriptor_index: u16,
    annotations_payload: Option<Vec<u8>>,
}

pub struct ClassBuilder {
    // Encoded pool entries in slot order. Reserved slots (the second half
    // of a Long) are counted in slot_count but emit no bytes.
    entries: Vec<Vec<u8>>,
    slot_count: u16,
    this_class: u16,
    super_class: u16,
    fields: Vec<FieldSpec>,
}

impl ClassBuilder {
    pub fn new(class_name: &str) -> Self {
        let mut builder = Self {
            entries: vec![],
            slot_count: 0,
            this_class: 0,
            super_class: 0,
            fields: vec![],
        };

        builder.this_class = builder.class(class_name);
        builder.super_class = builder.class("java/lang/Object");
        builder
    }

    fn push_entry(&mut self, encoded: Vec<u8>) -> u16 {
        self.entries.push(encoded);
        self.slot_count += 1;
        self.slot_count
    }

    fn utf8(&mut self, value: &str) -> u16 {
        let mut encoded = vec![1u8];
        encoded.put_u16(value.len() as u16);
        encoded.extend_from_slice(value.as_bytes());
        self.push_entry(encoded)
    }

    fn integer(&mut self, value: i32) -> u16 {
        let mut encoded = vec![3u8];
        encoded.put_u32(value as u32);
        self.push_entry(encoded)
    }

    fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        let mut encoded = vec![7u8];
        encoded.put_u16(name_index);
        self.push_entry(encoded)
    }

    /// Adds a CONSTANT_Long to the pool, which occupies two slots.
    pub fn long_constant(&mut self, value: i64) -> u16 {
        let mut encoded = vec![5u8];
        encoded.put_u64(value as u64);
        let index = self.push_entry(encoded);
        self.slot_count += 1;
        index
    }

    pub fn field(
        &mut self,
        name: &str,
        descriptor: &str,
        access: u16,
        annotations: Vec<AnnotationSpec>,
    ) -> &mut Self {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);

        let annotations_payload = if annotations.is_empty() {
            None
        } else {
            let mut payload = Vec::new();
            payload.put_u16(annotations.len() as u16);

            for annotation in annotations {
                let type_index = self.utf8(&annotation.descriptor);
                payload.put_u16(type_index);
                payload.put_u16(annotation.elements.len() as u16);

                for (element_name, element_value) in annotation.elements {
                    let element_name_index = self.utf8(&element_name);
                    payload.put_u16(element_name_index);

                    match element_value {
                        Value::Int(value) => {
                            let const_index = self.integer(value);
                            payload.put_u8(b'I');
                            payload.put_u16(const_index);
                        }
                        Value::Str(value) => {
                            let const_index = self.utf8(value);
                            payload.put_u8(b's');
                            payload.put_u16(const_index);
                        }
                    }
                }
            }

            Some(payload)
        };

        self.fields.push(FieldSpec {
            access,
            name_index,
            descriptor_index,
            annotations_payload,
        });
        self
    }

    pub fn tagged_field(&mut self, name: &str, tag: i32) -> &mut Self {
        self.field(name, "I", ACC_PRIVATE, vec![AnnotationSpec::tag(tag)])
    }

    pub fn static_tagged_field(&mut self, name: &str, tag: i32) -> &mut Self {
        self.field(
            name,
            "I",
            ACC_PRIVATE | ACC_STATIC,
            vec![AnnotationSpec::tag(tag)],
        )
    }

    pub fn plain_field(&mut self, name: &str) -> &mut Self {
        self.field(name, "Ljava/lang/String;", ACC_PRIVATE, vec![])
    }

    pub fn build(&mut self) -> Vec<u8> {
        let attribute_name_index = if self.fields.iter().any(|f| f.annotations_payload.is_some()) {
            self.utf8("RuntimeVisibleAnnotations")
        } else {
            0
        };

        let mut out = Vec::new();
        out.put_u32(0xCAFEBABE);
        out.put_u16(0); // minor
        out.put_u16(52); // major, Java 8

        out.put_u16(self.slot_count + 1);
        for entry in self.entries.iter() {
            out.extend_from_slice(entry);
        }

        out.put_u16(ACC_PUBLIC | ACC_SUPER);
        out.put_u16(self.this_class);
        out.put_u16(self.super_class);

        out.put_u16(0); // interfaces

        out.put_u16(self.fields.len() as u16);
        for field in self.fields.iter() {
            out.put_u16(field.access);
            out.put_u16(field.name_index);
            out.put_u16(field.descriptor_index);

            match &field.annotations_payload {
                Some(payload) => {
                    out.put_u16(1);
                    out.put_u16(attribute_name_index);
                    out.put_u32(payload.len() as u32);
                    out.extend_from_slice(payload);
                }
                None => out.put_u16(0),
            }
        }

        out.put_u16(0); // methods
        out.put_u16(0); // class attributes
        out
    }
}
