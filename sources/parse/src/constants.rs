/// The first four bytes of every class file.
pub const MAGIC: u32 = 0xCAFEBABE;
