//! In-memory archive assembly.
//!
//! Local sections are written as entries are appended; finalizing replays
//! the recorded entry metadata into the central directory and closes the
//! archive with the end-of-central-directory record.

use crate::constants::{
    CENTRAL_DIRECTORY_END_SIGNATURE, CENTRAL_DIRECTORY_ENTRY_BASE_SIZE,
    CENTRAL_DIRECTORY_ENTRY_SIGNATURE, END_OF_CENTRAL_DIRECTORY_SIZE, FILE_HEADER_BASE_SIZE,
    LOCAL_FILE_HEADER_SIGNATURE, MAX_ENTRY_COUNT, STORE, VERSION_MADE_BY,
    VERSION_NEEDED_TO_EXTRACT,
};
use crate::crc32::crc32;
use crate::descriptor::ArchiveDescriptor;
use crate::error::ArchiveError;
use crate::types::{ArchiveEntry, ArchiveFileEntry};

/// A zip archive under construction.
///
/// Append entries one by one using the [`append`](Self::append) function.
/// When finished, use the [`finalize`](Self::finalize) function to obtain
/// the completed archive as a byte buffer.
///
/// Each build owns its buffer and entry list outright; independent builds
/// share nothing and may run on any number of threads.
#[derive(Debug)]
pub struct ZipArchive {
    sink: ArchiveDescriptor,
    entries: Vec<ArchiveFileEntry>,
}

impl Default for ZipArchive {
    fn default() -> Self {
        Self::new()
    }
}

impl ZipArchive {
    /// Create a new empty archive.
    pub fn new() -> Self {
        Self {
            sink: ArchiveDescriptor::new(END_OF_CENTRAL_DIRECTORY_SIZE),
            entries: Vec::new(),
        }
    }

    /// Get the archive's current total bytes written.
    pub fn archive_size(&self) -> usize {
        self.sink.len()
    }

    /// Number of entries appended so far.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Append a new entry to the archive using the provided name and
    /// payload, stored uncompressed.
    ///
    /// Sizes and the checksum are computed over the UTF-8 bytes of
    /// `content`, and modification date/time fields are written as zero.
    /// The UTF-8-filename flag bit stays unset even when `name` contains
    /// non-ASCII characters; payloads of such entries extract intact, but
    /// strict readers may decode the name itself as cp437.
    ///
    /// # Errors
    ///
    /// Fails before anything is written when the name length, the payload
    /// length, or the next local-header offset would overflow its header
    /// field, or when the archive already holds 65535 entries.
    pub fn append(&mut self, name: &str, content: &str) -> Result<(), ArchiveError> {
        let name_bytes = name.as_bytes();
        let data = content.as_bytes();

        if self.entries.len() >= MAX_ENTRY_COUNT {
            return Err(ArchiveError::TooManyEntries(self.entries.len() + 1));
        }
        if name_bytes.len() > u16::MAX as usize {
            return Err(ArchiveError::SizeLimitExceeded {
                field: "file name length",
                value: name_bytes.len() as u64,
                limit: u16::MAX as u64,
            });
        }
        if data.len() as u64 > u32::MAX as u64 {
            return Err(ArchiveError::SizeLimitExceeded {
                field: "uncompressed size",
                value: data.len() as u64,
                limit: u32::MAX as u64,
            });
        }

        // The end of this local section is the next entry's header offset
        // and, eventually, the central directory offset. Both are 32-bit.
        let offset = self.sink.len() as u64;
        let local_section_end =
            offset + (FILE_HEADER_BASE_SIZE + name_bytes.len() + data.len()) as u64;
        if local_section_end > u32::MAX as u64 {
            return Err(ArchiveError::SizeLimitExceeded {
                field: "central directory offset",
                value: local_section_end,
                limit: u32::MAX as u64,
            });
        }

        let entry = ArchiveFileEntry {
            name: name_bytes.to_vec(),
            size: data.len() as u32,
            crc32: crc32(data),
            offset: offset as u32,
        };

        build_file_header(&mut self.sink, &entry);
        self.sink.write_bytes(data);
        self.entries.push(entry);

        Ok(())
    }

    /// Finalize the archive by writing the central directory and the
    /// end-of-central-directory record, returning the complete byte buffer.
    ///
    /// Consumes the archive, so the directory and trailer are emitted
    /// exactly once per build.
    ///
    /// # Errors
    ///
    /// Fails when the central directory itself would outgrow its 32-bit
    /// EOCD size field. Nothing is returned on failure; the partial buffer
    /// is discarded.
    pub fn finalize(self) -> Result<Vec<u8>, ArchiveError> {
        let ZipArchive { mut sink, entries } = self;

        let central_directory_offset = sink.len() as u64;
        let central_directory_size: u64 = entries
            .iter()
            .map(|entry| (CENTRAL_DIRECTORY_ENTRY_BASE_SIZE + entry.name.len()) as u64)
            .sum();
        if central_directory_size > u32::MAX as u64 {
            return Err(ArchiveError::SizeLimitExceeded {
                field: "central directory size",
                value: central_directory_size,
                limit: u32::MAX as u64,
            });
        }

        for entry in &entries {
            build_central_directory_file_header(&mut sink, entry);
        }

        let dir_end = CentralDirectoryEnd {
            number_of_entries: entries.len() as u16,
            central_directory_size: central_directory_size as u32,
            central_directory_offset: central_directory_offset as u32,
        };
        dir_end.write(&mut sink);

        Ok(sink.finish())
    }
}

/// Build a complete archive from `entries`, preserving their order.
///
/// Equivalent to appending every entry to a fresh [`ZipArchive`] and
/// finalizing it; see [`ZipArchive::append`] for the failure conditions.
pub fn build_archive(entries: &[ArchiveEntry<'_>]) -> Result<Vec<u8>, ArchiveError> {
    let mut archive = ZipArchive::new();

    for entry in entries {
        archive.append(entry.name, entry.content)?;
    }

    archive.finalize()
}

fn build_file_header(sink: &mut ArchiveDescriptor, entry: &ArchiveFileEntry) {
    sink.write_u32(LOCAL_FILE_HEADER_SIGNATURE); // Local file header signature.
    sink.write_u16(VERSION_NEEDED_TO_EXTRACT); // Version needed to extract.
    sink.write_u16(0); // General purpose flags.
    sink.write_u16(STORE); // Compression method.
    sink.write_u16(0); // Modification time.
    sink.write_u16(0); // Modification date.
    sink.write_u32(entry.crc32); // CRC-32 of the payload.
    sink.write_u32(entry.size); // Compressed size.
    sink.write_u32(entry.size); // Uncompressed size.
    sink.write_u16(entry.name.len() as u16); // File name length.
    sink.write_u16(0); // Extra field length.
    sink.write_bytes(&entry.name); // File name.
}

fn build_central_directory_file_header(sink: &mut ArchiveDescriptor, entry: &ArchiveFileEntry) {
    sink.write_u32(CENTRAL_DIRECTORY_ENTRY_SIGNATURE); // Central directory entry signature.
    sink.write_u16(VERSION_MADE_BY); // Version made by.
    sink.write_u16(VERSION_NEEDED_TO_EXTRACT); // Version needed to extract.
    sink.write_u16(0); // General purpose flags.
    sink.write_u16(STORE); // Compression method.
    sink.write_u16(0); // Modification time.
    sink.write_u16(0); // Modification date.
    sink.write_u32(entry.crc32); // CRC-32.
    sink.write_u32(entry.size); // Compressed size.
    sink.write_u32(entry.size); // Uncompressed size.
    sink.write_u16(entry.name.len() as u16); // File name length.
    sink.write_u16(0); // Extra field length.
    sink.write_u16(0); // File comment length.
    sink.write_u16(0); // Disk number.
    sink.write_u16(0); // Internal file attributes.
    sink.write_u32(0); // External file attributes.
    sink.write_u32(entry.offset); // Offset of the local header.
    sink.write_bytes(&entry.name); // File name.
}

#[derive(Debug)]
struct CentralDirectoryEnd {
    number_of_entries: u16,
    central_directory_size: u32,
    central_directory_offset: u32,
}

impl CentralDirectoryEnd {
    fn write(&self, sink: &mut ArchiveDescriptor) {
        sink.write_u32(CENTRAL_DIRECTORY_END_SIGNATURE); // End of central directory signature.
        sink.write_u16(0); // Number of this disk.
        sink.write_u16(0); // Disk where the central directory starts.
        sink.write_u16(self.number_of_entries); // Entries on this disk.
        sink.write_u16(self.number_of_entries); // Total number of entries.
        sink.write_u32(self.central_directory_size); // Central directory size.
        sink.write_u32(self.central_directory_offset); // Central directory offset.
        sink.write_u16(0); // Comment length.
    }
}
