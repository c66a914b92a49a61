use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Result of a positional read: how many bytes landed in the buffer, and
/// whether the source ran out of data before the buffer was full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The whole buffer was filled.
    Filled(usize),
    /// The source ended after this many bytes (possibly zero).
    EndOfData(usize),
}

impl ReadOutcome {
    /// Classifies `n` bytes written into a buffer of `requested` bytes.
    pub fn new(n: usize, requested: usize) -> Self {
        if n < requested {
            ReadOutcome::EndOfData(n)
        } else {
            ReadOutcome::Filled(n)
        }
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        match *self {
            ReadOutcome::Filled(n) | ReadOutcome::EndOfData(n) => n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_end_of_data(&self) -> bool {
        matches!(self, ReadOutcome::EndOfData(_))
    }
}

/// A thread-safe, random-access source of bytes with a known length.
/// Allows multiple threads to read different parts of the source simultaneously.
pub trait ByteSource: Send + Sync {
    /// Returns the total length of the source.
    fn len(&self) -> u64;

    /// Returns true if the source is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads bytes starting at `offset` into the provided buffer.
    ///
    /// Fills as much of `buf` as the source can. When fewer than `buf.len()`
    /// bytes are available the result is [`ReadOutcome::EndOfData`], carrying
    /// the count actually written. Reading at or past the end is not an error.
    /// This must NOT modify any internal cursor position.
    fn read_at_into(&self, offset: u64, buf: &mut [u8]) -> Result<ReadOutcome>;

    /// Reads exactly `len` bytes starting at `offset`.
    /// This must NOT modify any internal cursor position.
    fn read_at(&self, offset: u64, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        let got = self.read_at_into(offset, &mut buf)?.len();
        if got != len {
            return Err(Error::UnexpectedEof {
                offset,
                wanted: len,
                got,
            });
        }
        Ok(buf)
    }
}

/// A shared, type-erased source. This is what [`concat`](super::concat) folds.
pub type SharedSource = Arc<dyn ByteSource>;

impl<T: ByteSource + ?Sized> ByteSource for &T {
    fn len(&self) -> u64 {
        (**self).len()
    }

    fn read_at_into(&self, offset: u64, buf: &mut [u8]) -> Result<ReadOutcome> {
        (**self).read_at_into(offset, buf)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for Box<T> {
    fn len(&self) -> u64 {
        (**self).len()
    }

    fn read_at_into(&self, offset: u64, buf: &mut [u8]) -> Result<ReadOutcome> {
        (**self).read_at_into(offset, buf)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for Arc<T> {
    fn len(&self) -> u64 {
        (**self).len()
    }

    fn read_at_into(&self, offset: u64, buf: &mut [u8]) -> Result<ReadOutcome> {
        (**self).read_at_into(offset, buf)
    }
}

// --- Implementation: Empty ---

/// A zero-length source. Every non-empty read reports end of data immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySource;

impl ByteSource for EmptySource {
    fn len(&self) -> u64 {
        0
    }

    fn read_at_into(&self, _offset: u64, buf: &mut [u8]) -> Result<ReadOutcome> {
        Ok(ReadOutcome::new(0, buf.len()))
    }
}

// --- Implementation: Local File ---

/// A file read with positional I/O. The length is captured when the source
/// is created; reads never extend past it even if the file grows.
pub struct FileSource {
    file: File, // internal file handle
    len: u64,
}

impl FileSource {
    pub fn new(file: File) -> io::Result<Self> {
        let len = file.metadata()?.len();
        Ok(Self { file, len })
    }

    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::new(File::open(path)?)
    }

    #[cfg(unix)]
    fn read_some(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        use std::os::unix::fs::FileExt; // Enables pread
        self.file.read_at(buf, offset)
    }

    #[cfg(windows)]
    fn read_some(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        use std::os::windows::fs::FileExt;
        self.file.seek_read(buf, offset)
    }

    #[cfg(all(not(unix), not(windows)))]
    fn read_some(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        use std::io::{Read, Seek, SeekFrom};
        // Fallback for WASM and other platforms
        let mut file_clone = self.file.try_clone()?;
        file_clone.seek(SeekFrom::Start(offset))?;
        file_clone.read(buf)
    }
}

impl ByteSource for FileSource {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_at_into(&self, offset: u64, buf: &mut [u8]) -> Result<ReadOutcome> {
        let available = self.len.saturating_sub(offset);
        let want = buf.len().min(usize::try_from(available).unwrap_or(usize::MAX));

        let mut filled = 0;
        while filled < want {
            match self.read_some(&mut buf[filled..want], offset + filled as u64) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(ReadOutcome::new(filled, buf.len()))
    }
}

// --- Implementation: In-Memory ---

/// An in-memory ByteSource backed by a `Vec<u8>`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for MemorySource {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<&str> for MemorySource {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl ByteSource for MemorySource {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_at_into(&self, offset: u64, buf: &mut [u8]) -> Result<ReadOutcome> {
        let start = usize::try_from(offset)
            .unwrap_or(usize::MAX)
            .min(self.data.len());
        let end = start.saturating_add(buf.len()).min(self.data.len());
        let n = end - start;
        buf[..n].copy_from_slice(&self.data[start..end]);
        Ok(ReadOutcome::new(n, buf.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_read_at_into() {
        let source = MemorySource::new(b"hello world".to_vec());
        let mut buf = [0u8; 5];
        let read = source.read_at_into(6, &mut buf).unwrap();
        assert_eq!(read, ReadOutcome::Filled(5));
        assert_eq!(&buf, b"world");
    }

    #[test]
    fn test_memory_source_read_at() {
        let source = MemorySource::new(b"abcdef".to_vec());
        let data = source.read_at(1, 3).unwrap();
        assert_eq!(&data, b"bcd");
        assert_eq!(source.as_bytes(), b"abcdef");
    }

    #[test]
    fn test_memory_source_short_read_is_end_of_data() {
        let source = MemorySource::from("abcdef");
        let mut buf = [0u8; 4];
        let read = source.read_at_into(4, &mut buf).unwrap();
        assert_eq!(read, ReadOutcome::EndOfData(2));
        assert_eq!(&buf[..2], b"ef");
    }

    #[test]
    fn test_memory_source_past_end() {
        let source = MemorySource::from("abc");
        let mut buf = [0u8; 4];
        assert_eq!(
            source.read_at_into(3, &mut buf).unwrap(),
            ReadOutcome::EndOfData(0)
        );
        assert_eq!(
            source.read_at_into(100, &mut buf).unwrap(),
            ReadOutcome::EndOfData(0)
        );
    }

    #[test]
    fn test_read_at_short_is_unexpected_eof() {
        let source = MemorySource::from("abc");
        let err = source.read_at(1, 5).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedEof {
                offset: 1,
                wanted: 5,
                got: 2
            }
        ));
    }

    #[test]
    fn test_empty_source() {
        let mut buf = [0u8; 8];
        assert_eq!(EmptySource.len(), 0);
        assert!(EmptySource.is_empty());
        assert_eq!(
            EmptySource.read_at_into(0, &mut buf).unwrap(),
            ReadOutcome::EndOfData(0)
        );
    }

    #[test]
    fn test_read_outcome_classification() {
        assert_eq!(ReadOutcome::new(4, 4), ReadOutcome::Filled(4));
        assert_eq!(ReadOutcome::new(0, 0), ReadOutcome::Filled(0));
        assert_eq!(ReadOutcome::new(1, 4), ReadOutcome::EndOfData(1));
        assert!(ReadOutcome::EndOfData(0).is_empty());
    }
}
