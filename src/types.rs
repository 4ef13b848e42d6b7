/// A named payload to be stored in the archive.
///
/// Both fields are borrowed from the caller for the duration of one build.
/// Names are taken as-is: duplicates and relative segments such as `../`
/// are not rejected here, so callers needing stricter guarantees must
/// validate before building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveEntry<'a> {
    pub name: &'a str,
    pub content: &'a str,
}

impl<'a> ArchiveEntry<'a> {
    pub fn new(name: &'a str, content: &'a str) -> ArchiveEntry<'a> {
        ArchiveEntry { name, content }
    }
}

/// Metadata recorded while an entry's local section is written, replayed
/// later into the central directory.
///
/// `offset` is the position of the entry's local header, equal to the
/// cumulative length of every earlier local section. `size` serves as both
/// compressed and uncompressed size since stored payloads are identical on
/// both sides.
#[derive(Debug)]
pub(crate) struct ArchiveFileEntry {
    pub name: Vec<u8>,
    pub size: u32,
    pub crc32: u32,
    pub offset: u32,
}
