//! Duplicate tag detection over parsed class files.
//!
//! A "tag" here is the integer a serialization annotation assigns to a
//! field to identify it on the wire. Two instance fields of one class
//! sharing a tag value makes decoding ambiguous, so every class is checked
//! for reuse of a tag across its fields.

pub mod conflict;
pub mod descriptor;
pub mod report;
pub mod scan;

pub use conflict::DEFAULT_TAG_DESCRIPTOR;
pub use descriptor::{ClassDescriptor, FieldDescriptor};
pub use report::{FieldInfo, ViolationReport};
pub use scan::{ScanError, Scanner};
