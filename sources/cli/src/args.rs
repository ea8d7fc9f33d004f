use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(author, version, about = "Checks compiled classes for duplicate serialization tags")]
pub struct Cli {
    /// The directory containing compiled .class files, scanned recursively
    pub classes_dir: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    /// Whether to exit with a failure code when duplicate tags are found
    pub fail_on_error: bool,

    #[arg(long, default_value = analysis::DEFAULT_TAG_DESCRIPTOR)]
    /// The descriptor of the tag annotation to check for
    pub annotation: String,

    #[arg(long, short)]
    /// Enable debug logging
    pub verbose: bool,
}
