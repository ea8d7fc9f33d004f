use std::collections::HashMap;
use std::fmt;

/// One offending field, captured at the moment a conflict is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub class_name: String,
    pub field_name: String,
    pub tag_value: i32,
}

impl FieldInfo {
    pub fn new(class_name: String, field_name: String, tag_value: i32) -> Self {
        Self {
            class_name,
            field_name,
            tag_value,
        }
    }
}

impl fmt::Display for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{} (tag={})",
            self.class_name, self.field_name, self.tag_value
        )
    }
}

/// The outcome of one scan: for each class with at least one conflict, the
/// tag values that were reused and the field that reused them.
///
/// Built fresh per scan, never merged across scans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViolationReport {
    classes: HashMap<String, HashMap<i32, FieldInfo>>,
}

impl ViolationReport {
    /// `false` means the caller may want to fail the build.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> &HashMap<String, HashMap<i32, FieldInfo>> {
        &self.classes
    }

    pub(crate) fn record_class(&mut self, class_name: String, conflicts: HashMap<i32, FieldInfo>) {
        debug_assert!(!conflicts.is_empty());
        self.classes.insert(class_name, conflicts);
    }
}
