//! File-backed sources composed with in-memory ones.

use std::fs;
use std::io::{Read, Write};
use std::sync::Arc;

use multisource::{
    ByteSource, FileSource, MemorySource, MultiReader, ReadOutcome, SegmentedSource, SharedSource,
};
use tempfile::TempDir;

fn write_parts(dir: &TempDir, parts: &[&[u8]]) -> Vec<SharedSource> {
    parts
        .iter()
        .enumerate()
        .map(|(i, data)| {
            let path = dir.path().join(format!("part{i}.bin"));
            fs::write(&path, data).unwrap();
            Arc::new(FileSource::open(&path).unwrap()) as SharedSource
        })
        .collect()
}

#[test]
fn test_file_parts_read_as_one() {
    let dir = TempDir::new().unwrap();
    let parts = write_parts(&dir, &[b"hello ", b"", b"multi", b"source world"]);

    let mut reader = MultiReader::from_sources(parts).unwrap();
    assert_eq!(reader.len(), 23);
    assert_eq!(reader.read_at(4, 9).unwrap(), b"o multiso");

    let mut all = String::new();
    reader.read_to_string(&mut all).unwrap();
    assert_eq!(all, "hello multisource world");
}

#[test]
fn test_file_source_short_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.bin");
    fs::write(&path, b"abcdef").unwrap();

    let source = FileSource::open(&path).unwrap();
    let mut buf = [0u8; 8];
    assert_eq!(
        source.read_at_into(2, &mut buf).unwrap(),
        ReadOutcome::EndOfData(4)
    );
    assert_eq!(&buf[..4], b"cdef");
    assert_eq!(
        source.read_at_into(6, &mut buf).unwrap(),
        ReadOutcome::EndOfData(0)
    );
    assert_eq!(
        source.read_at_into(60, &mut buf).unwrap(),
        ReadOutcome::EndOfData(0)
    );
}

#[test]
fn test_file_source_length_is_fixed_at_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grow.bin");
    fs::write(&path, b"abc").unwrap();

    let source = FileSource::open(&path).unwrap();
    let mut file = fs::OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(b"def").unwrap();
    file.flush().unwrap();

    assert_eq!(source.len(), 3);
    let mut buf = [0u8; 6];
    assert_eq!(
        source.read_at_into(0, &mut buf).unwrap(),
        ReadOutcome::EndOfData(3)
    );
}

#[test]
fn test_mixed_file_and_memory_flat() {
    let dir = TempDir::new().unwrap();
    let mut parts = write_parts(&dir, &[b"0123", b"4567"]);
    parts.push(Arc::new(MemorySource::from("89")));

    let source = SegmentedSource::new(parts).unwrap();
    assert_eq!(source.starts(), &[0, 4, 8]);
    assert_eq!(source.read_at(3, 6).unwrap(), b"345678");
}
