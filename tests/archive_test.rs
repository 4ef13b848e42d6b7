use std::io::{Cursor, Read};

use memzip::archive::{build_archive, ZipArchive};
use memzip::error::ArchiveError;
use memzip::types::ArchiveEntry;

fn read_back(bytes: Vec<u8>) -> zip::ZipArchive<Cursor<Vec<u8>>> {
    zip::ZipArchive::new(Cursor::new(bytes)).unwrap()
}

fn entry_content(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, index: usize) -> String {
    let mut file = archive.by_index(index).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

#[test]
fn roundtrip_single_entry() -> Result<(), ArchiveError> {
    let entries = [ArchiveEntry::new("ex.txt", "example")];
    let bytes = build_archive(&entries)?;

    let mut archive = read_back(bytes);
    assert_eq!(archive.len(), 1);

    let name = archive.by_index(0).unwrap().name().to_owned();
    assert_eq!(name, "ex.txt");
    assert_eq!(entry_content(&mut archive, 0), "example");

    Ok(())
}

#[test]
fn roundtrip_multiple_entries_in_order() -> Result<(), ArchiveError> {
    let entries = [
        ArchiveEntry::new("file1.txt", "Some string data"),
        ArchiveEntry::new("nested/file2.txt", ""),
        ArchiveEntry::new("file3.txt", "hello\nworld\n"),
    ];
    let bytes = build_archive(&entries)?;

    let mut archive = read_back(bytes);
    assert_eq!(archive.len(), entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let file = archive.by_index(index).unwrap();
        assert_eq!(file.name(), entry.name);
        assert_eq!(file.size(), entry.content.len() as u64);
        drop(file);
        assert_eq!(entry_content(&mut archive, index), entry.content);
    }

    Ok(())
}

#[test]
fn builder_matches_one_shot_build() -> Result<(), ArchiveError> {
    let entries = [
        ArchiveEntry::new("file1.txt", "hello\n"),
        ArchiveEntry::new("file2.txt", "world\n"),
    ];

    let mut archive = ZipArchive::new();
    for entry in &entries {
        archive.append(entry.name, entry.content)?;
    }
    assert_eq!(archive.entry_count(), 2);

    assert_eq!(archive.finalize()?, build_archive(&entries)?);

    Ok(())
}

#[test]
fn empty_archive_is_openable() -> Result<(), ArchiveError> {
    let bytes = build_archive(&[])?;

    let archive = read_back(bytes);
    assert_eq!(archive.len(), 0);

    Ok(())
}

#[test]
fn duplicate_names_are_kept_verbatim() -> Result<(), ArchiveError> {
    let entries = [
        ArchiveEntry::new("same.txt", "first"),
        ArchiveEntry::new("same.txt", "second"),
    ];
    let bytes = build_archive(&entries)?;

    let mut archive = read_back(bytes);
    assert_eq!(archive.len(), 2);
    assert_eq!(entry_content(&mut archive, 0), "first");
    assert_eq!(entry_content(&mut archive, 1), "second");

    Ok(())
}

// The UTF-8-filename flag bit is never set, so readers without a UTF-8
// heuristic may mangle the displayed name. The raw name bytes and the
// payload still come back untouched.
#[test]
fn non_ascii_name_keeps_content_intact() -> Result<(), ArchiveError> {
    let entries = [ArchiveEntry::new("naïve-résumé.txt", "contenu détaillé")];
    let bytes = build_archive(&entries)?;

    let mut archive = read_back(bytes);
    let file = archive.by_index(0).unwrap();
    assert_eq!(file.name_raw(), "naïve-résumé.txt".as_bytes());
    drop(file);

    assert_eq!(entry_content(&mut archive, 0), "contenu détaillé");

    Ok(())
}
