pub mod bytes_ext;
