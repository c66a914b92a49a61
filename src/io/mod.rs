//! IO Abstractions for random-access byte reading.

mod adapter;
mod byte_source;
mod segments;
mod tree;

pub use adapter::{ByteSourceCursor, MultiReader, Whence};
pub use byte_source::{
    ByteSource, EmptySource, FileSource, MemorySource, ReadOutcome, SharedSource,
};
pub use segments::SegmentedSource;
pub use tree::{Chain, Concat, concat};
