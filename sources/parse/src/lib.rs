pub mod annotations;
pub mod attributes;
pub mod classfile;
pub mod constants;
pub mod error;
pub mod flags;
pub mod parser;
pub mod pool;
