use std::collections::HashMap;

use tracing::debug;

use crate::descriptor::{ClassDescriptor, FieldDescriptor};
use crate::report::FieldInfo;
use parse::annotations::ElementValue;

/// The protostuff tag annotation, in descriptor form.
pub const DEFAULT_TAG_DESCRIPTOR: &str = "Lio/protostuff/Tag;";

/// Pull the declared tag value out of a field, if it has one.
///
/// The tag comes from the annotation matching `tag_descriptor`: its `value`
/// element, or the sole element when the annotation carries exactly one
/// (the default-parameter shorthand). Anything else, including a matching
/// annotation whose value is not an int constant, means "no tag" - that is
/// a skip, not an error.
pub fn extract_tag(field: &FieldDescriptor, tag_descriptor: &str) -> Option<i32> {
    for annotation in field.annotations.iter() {
        if annotation.descriptor != tag_descriptor {
            continue;
        }

        for (i, pair) in annotation.elements.iter().enumerate() {
            if pair.name == "value" || (i == 0 && annotation.elements.len() == 1) {
                return match pair.value {
                    ElementValue::Int(value) => Some(value),
                    _ => None,
                };
            }
        }
    }

    None
}

/// Find every tag value reused across the fields of one class.
///
/// Fields are walked in declaration order. The first field declaring a tag
/// is not a violation; a later field reusing it is, and gets recorded under
/// that tag. One slot per tag: when three or more fields collide, the most
/// recent offender replaces the previous record.
pub fn check_class(class: &ClassDescriptor, tag_descriptor: &str) -> HashMap<i32, FieldInfo> {
    let mut seen: HashMap<i32, FieldInfo> = HashMap::new();
    let mut conflicts: HashMap<i32, FieldInfo> = HashMap::new();

    for field in class.fields.iter() {
        let tag = match extract_tag(field, tag_descriptor) {
            Some(tag) => tag,
            None => continue,
        };

        debug!("class {} field {} tag {}", class.name, field.name, tag);

        let info = FieldInfo::new(class.dotted_name(), field.name.clone(), tag);
        if seen.contains_key(&tag) {
            conflicts.insert(tag, info);
        } else {
            seen.insert(tag, info);
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use parse::annotations::{Annotation, ElementPair};

    fn tagged_field(name: &str, tag: i32) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            annotations: vec![Annotation {
                descriptor: DEFAULT_TAG_DESCRIPTOR.to_string(),
                elements: vec![ElementPair {
                    name: "value".to_string(),
                    value: ElementValue::Int(tag),
                }],
            }],
        }
    }

    fn plain_field(name: &str) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            annotations: vec![],
        }
    }

    #[test]
    fn no_duplicates_means_no_conflicts() {
        let class = ClassDescriptor {
            name: "com/acme/Order".to_string(),
            fields: vec![
                tagged_field("id", 1),
                tagged_field("amount", 2),
                plain_field("cached"),
            ],
        };

        assert!(check_class(&class, DEFAULT_TAG_DESCRIPTOR).is_empty());
    }

    #[test]
    fn duplicate_tag_reports_the_second_field() {
        let class = ClassDescriptor {
            name: "com/acme/Order".to_string(),
            fields: vec![
                tagged_field("id", 1),
                tagged_field("amount", 2),
                tagged_field("status", 1),
            ],
        };

        let conflicts = check_class(&class, DEFAULT_TAG_DESCRIPTOR);
        assert_eq!(conflicts.len(), 1);

        let info = conflicts.get(&1).unwrap();
        assert_eq!(info.class_name, "com.acme.Order");
        assert_eq!(info.field_name, "status");
        assert_eq!(info.tag_value, 1);
    }

    #[test]
    fn third_collision_overwrites_the_second() {
        let class = ClassDescriptor {
            name: "Trio".to_string(),
            fields: vec![
                tagged_field("first", 7),
                tagged_field("second", 7),
                tagged_field("third", 7),
            ],
        };

        let conflicts = check_class(&class, DEFAULT_TAG_DESCRIPTOR);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts.get(&7).unwrap().field_name, "third");
    }

    #[test]
    fn shorthand_single_element_counts_as_the_value() {
        let field = FieldDescriptor {
            name: "code".to_string(),
            annotations: vec![Annotation {
                descriptor: DEFAULT_TAG_DESCRIPTOR.to_string(),
                elements: vec![ElementPair {
                    name: "v".to_string(),
                    value: ElementValue::Int(5),
                }],
            }],
        };

        assert_eq!(extract_tag(&field, DEFAULT_TAG_DESCRIPTOR), Some(5));
    }

    #[test]
    fn unrelated_annotations_are_ignored() {
        let field = FieldDescriptor {
            name: "code".to_string(),
            annotations: vec![Annotation {
                descriptor: "Ljavax/annotation/Nullable;".to_string(),
                elements: vec![],
            }],
        };

        assert_eq!(extract_tag(&field, DEFAULT_TAG_DESCRIPTOR), None);
    }

    #[test]
    fn non_int_tag_value_yields_no_tag() {
        let field = FieldDescriptor {
            name: "code".to_string(),
            annotations: vec![Annotation {
                descriptor: DEFAULT_TAG_DESCRIPTOR.to_string(),
                elements: vec![ElementPair {
                    name: "value".to_string(),
                    value: ElementValue::String("seven".to_string()),
                }],
            }],
        };

        assert_eq!(extract_tag(&field, DEFAULT_TAG_DESCRIPTOR), None);
    }

    #[test]
    fn multi_element_annotation_without_value_yields_no_tag() {
        let field = FieldDescriptor {
            name: "code".to_string(),
            annotations: vec![Annotation {
                descriptor: DEFAULT_TAG_DESCRIPTOR.to_string(),
                elements: vec![
                    ElementPair {
                        name: "alias".to_string(),
                        value: ElementValue::String("c".to_string()),
                    },
                    ElementPair {
                        name: "groupFilter".to_string(),
                        value: ElementValue::Int(3),
                    },
                ],
            }],
        };

        assert_eq!(extract_tag(&field, DEFAULT_TAG_DESCRIPTOR), None);
    }

    #[test]
    fn value_element_wins_regardless_of_position() {
        let field = FieldDescriptor {
            name: "code".to_string(),
            annotations: vec![Annotation {
                descriptor: DEFAULT_TAG_DESCRIPTOR.to_string(),
                elements: vec![
                    ElementPair {
                        name: "alias".to_string(),
                        value: ElementValue::String("c".to_string()),
                    },
                    ElementPair {
                        name: "value".to_string(),
                        value: ElementValue::Int(9),
                    },
                ],
            }],
        };

        assert_eq!(extract_tag(&field, DEFAULT_TAG_DESCRIPTOR), Some(9));
    }
}
