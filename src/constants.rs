use std::mem::size_of;

pub const FILE_HEADER_BASE_SIZE: usize = 7 * size_of::<u16>() + 4 * size_of::<u32>();
pub const CENTRAL_DIRECTORY_ENTRY_BASE_SIZE: usize = 11 * size_of::<u16>() + 6 * size_of::<u32>();
pub const END_OF_CENTRAL_DIRECTORY_SIZE: usize = 5 * size_of::<u16>() + 3 * size_of::<u32>();

pub const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x04034b50;
pub const CENTRAL_DIRECTORY_ENTRY_SIGNATURE: u32 = 0x02014b50;
pub const CENTRAL_DIRECTORY_END_SIGNATURE: u32 = 0x06054b50;

pub const VERSION_NEEDED_TO_EXTRACT: u16 = 20;
pub const VERSION_MADE_BY: u16 = 20;

/// Compression method code for entries kept uncompressed.
pub const STORE: u16 = 0;

/// Entry count limit imposed by the 16-bit EOCD count fields.
pub const MAX_ENTRY_COUNT: usize = u16::MAX as usize;
