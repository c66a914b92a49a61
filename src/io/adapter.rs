use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};
use std::str::FromStr;

use super::byte_source::{ByteSource, ReadOutcome, SharedSource};
use super::tree::{Chain, concat};
use crate::error::{Error, Result};

/// Reference point for [`ByteSourceCursor::seek_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    Start,
    Current,
    End,
}

impl TryFrom<i32> for Whence {
    type Error = Error;

    /// Accepts the conventional `0`, `1`, `2` codes.
    fn try_from(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Whence::Start),
            1 => Ok(Whence::Current),
            2 => Ok(Whence::End),
            other => Err(Error::InvalidWhence(other.to_string())),
        }
    }
}

impl FromStr for Whence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "start" | "set" => Ok(Whence::Start),
            "current" | "cur" => Ok(Whence::Current),
            "end" => Ok(Whence::End),
            code => match code.parse::<i32>() {
                Ok(code) => Whence::try_from(code),
                Err(_) => Err(Error::InvalidWhence(s.to_string())),
            },
        }
    }
}

impl fmt::Display for Whence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Whence::Start => "start",
            Whence::Current => "current",
            Whence::End => "end",
        })
    }
}

/// Wraps a [`ByteSource`] into a stateful `Read + Seek` stream.
/// Used to pass our ByteSource into libraries like `zip::ZipArchive`.
///
/// The position never leaves `0..=len`: seeks outside that range fail and
/// leave it where it was. The cursor is the only mutable state, so sharing one
/// between threads needs outside synchronization; positional reads through
/// [`ByteSource`] do not touch it.
#[derive(Debug, Clone)]
pub struct ByteSourceCursor<S> {
    inner: S,
    position: u64,
}

/// A cursor over sources composed with [`concat`].
pub type MultiReader = ByteSourceCursor<Chain>;

impl MultiReader {
    /// Composes `sources` in order behind a cursor at position 0.
    ///
    /// Returns `None` when `sources` is empty.
    pub fn from_sources<I>(sources: I) -> Option<Self>
    where
        I: IntoIterator<Item = SharedSource>,
    {
        concat(sources).map(ByteSourceCursor::new)
    }
}

impl<S: ByteSource> ByteSourceCursor<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, position: 0 }
    }

    /// Current cursor position.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Moves the cursor and returns the new absolute position.
    ///
    /// `offset` may never exceed the total length, whatever the reference
    /// point. `Whence::End` only accepts zero or negative offsets.
    pub fn seek_to(&mut self, offset: i64, whence: Whence) -> Result<u64> {
        let size = self.inner.len();
        let total = i128::from(size);
        let offset = i128::from(offset);

        if offset > total {
            return Err(Error::out_of_range(offset, size));
        }

        let target = match whence {
            Whence::Start => offset,
            Whence::Current => i128::from(self.position) + offset,
            Whence::End => {
                if offset > 0 {
                    return Err(Error::out_of_range(total + offset, size));
                }
                total + offset
            }
        };

        if target < 0 || target > total {
            return Err(Error::out_of_range(target, size));
        }

        // 0 <= target <= size, so the conversion is lossless.
        self.position = target as u64;
        Ok(self.position)
    }

    /// Reads at the cursor and advances it by the bytes written, including
    /// the partial count of an end-of-data read.
    pub fn read_chunk(&mut self, buf: &mut [u8]) -> Result<ReadOutcome> {
        let outcome = self.inner.read_at_into(self.position, buf)?;
        self.position += outcome.len() as u64;
        Ok(outcome)
    }
}

impl<S: ByteSource> ByteSource for ByteSourceCursor<S> {
    fn len(&self) -> u64 {
        self.inner.len()
    }

    fn read_at_into(&self, offset: u64, buf: &mut [u8]) -> Result<ReadOutcome> {
        self.inner.read_at_into(offset, buf)
    }
}

impl<S: ByteSource> Read for ByteSourceCursor<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_chunk(buf)?.len())
    }
}

impl<S: ByteSource> Seek for ByteSourceCursor<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            SeekFrom::Start(p) => {
                let p = i64::try_from(p)
                    .map_err(|_| Error::out_of_range(p, self.inner.len()))?;
                (p, Whence::Start)
            }
            SeekFrom::End(p) => (p, Whence::End),
            SeekFrom::Current(p) => (p, Whence::Current),
        };
        Ok(self.seek_to(offset, whence)?)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.position)
    }
}
