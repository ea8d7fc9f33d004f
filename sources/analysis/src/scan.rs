use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use parse::{error::ParseError, parser::Parser};

use crate::conflict::{check_class, DEFAULT_TAG_DESCRIPTOR};
use crate::descriptor::ClassDescriptor;
use crate::report::ViolationReport;

/// A scan aborts on the first problem it hits. A malformed class file
/// anywhere under the root fails the whole run rather than producing a
/// partial report.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("could not walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse { path: PathBuf, source: ParseError },
}

/// Walks a build output directory and checks every `.class` file for
/// duplicate tag values.
///
/// Holds no state across scans; running the same scanner twice over an
/// unchanged directory yields equal reports.
pub struct Scanner {
    tag_descriptor: String,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self::with_tag_descriptor(DEFAULT_TAG_DESCRIPTOR)
    }

    pub fn with_tag_descriptor(descriptor: impl Into<String>) -> Self {
        Self {
            tag_descriptor: descriptor.into(),
        }
    }

    pub fn scan(&self, root: &Path) -> Result<ViolationReport, ScanError> {
        let mut report = ViolationReport::default();

        for entry in WalkDir::new(root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "class") {
                continue;
            }

            debug!("analyzing {}", path.display());

            // Read fully and drop the handle before parsing; nothing stays
            // open past this statement on any exit path
            let blob = fs::read(path).map_err(|source| ScanError::Io {
                path: path.to_owned(),
                source,
            })?;

            let class_descriptor = Parser::new(&blob)
                .parse()
                .and_then(|class_file| ClassDescriptor::from_class_file(&class_file))
                .map_err(|source| ScanError::Parse {
                    path: path.to_owned(),
                    source,
                })?;

            let conflicts = check_class(&class_descriptor, &self.tag_descriptor);
            if !conflicts.is_empty() {
                report.record_class(class_descriptor.dotted_name(), conflicts);
            }
        }

        Ok(report)
    }
}
