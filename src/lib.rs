//! # multisource
//!
//! Read a list of sized, randomly-addressable byte sources as if they were
//! one contiguous buffer, without copying them.
//!
//! ## Features
//!
//! - Positional reads ([`ByteSource::read_at_into`]) that cross source
//!   boundaries transparently
//! - Sequential `Read + Seek` access through a cursor ([`MultiReader`])
//! - A left-deep composition of binary nodes ([`Concat`], folded by
//!   [`concat`] into a [`Chain`]) or a flat, binary-searched offset table
//!   ([`SegmentedSource`])
//! - In-memory and file-backed leaf sources
//!
//! ## Quick Start
//!
//! ```
//! use std::io::{Read, Seek, SeekFrom};
//! use std::sync::Arc;
//!
//! use multisource::{ByteSource, MemorySource, MultiReader, SharedSource};
//!
//! let parts: Vec<SharedSource> = vec![
//!     Arc::new(MemorySource::from("This is a test, ")),
//!     Arc::new(MemorySource::from("this is only")),
//!     Arc::new(MemorySource::from(" a test.")),
//! ];
//! let mut reader = MultiReader::from_sources(parts).unwrap();
//! assert_eq!(reader.len(), 36);
//!
//! // Positional reads span sources
//! assert_eq!(reader.read_at(7, 10).unwrap(), b" a test, t");
//!
//! // Sequential reads follow the cursor
//! reader.seek(SeekFrom::End(-10)).unwrap();
//! let mut tail = String::new();
//! reader.read_to_string(&mut tail).unwrap();
//! assert_eq!(tail, "ly a test.");
//! ```
//!
//! ## End of data
//!
//! Running out of bytes is reported as [`ReadOutcome::EndOfData`] together
//! with the number of bytes that were written, never as an [`Error`]. Only
//! offsets beyond the total length are errors ([`Error::OutOfRange`]).

pub mod error;
pub mod io;

pub use error::{Error, Result};
pub use io::{
    ByteSource, ByteSourceCursor, Chain, Concat, EmptySource, FileSource, MemorySource,
    MultiReader, ReadOutcome, SegmentedSource, SharedSource, Whence, concat,
};
