pub mod classfile;
