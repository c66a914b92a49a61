//! Flat concatenation with a cumulative offset table.

use super::byte_source::{ByteSource, ReadOutcome, SharedSource};
use crate::error::{Error, Result};

/// An ordered list of sources read as one, located by binary search over
/// their start offsets.
///
/// Behaves like [`Chain`](super::Chain) for sources whose length does not
/// change, but lookups cost `O(log n)` instead of a walk over every part
/// length. Part lengths are recorded at construction.
pub struct SegmentedSource {
    parts: Vec<SharedSource>,
    starts: Vec<u64>,
    len: u64,
}

impl SegmentedSource {
    /// Builds the offset table. Returns `None` for an empty list.
    pub fn new(parts: Vec<SharedSource>) -> Option<Self> {
        if parts.is_empty() {
            return None;
        }

        let mut starts = Vec::with_capacity(parts.len());
        let mut len = 0u64;
        for part in &parts {
            starts.push(len);
            len += part.len();
        }

        log::debug!("indexed {} segments, {len} bytes total", parts.len());
        Some(Self { parts, starts, len })
    }

    /// Number of parts.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Start offset of each part in the combined address space.
    pub fn starts(&self) -> &[u64] {
        &self.starts
    }

    /// Index of the part holding `offset`. Empty parts are skipped; an offset
    /// equal to the total length maps to the last part.
    fn locate(&self, offset: u64) -> usize {
        self.starts.partition_point(|&start| start <= offset).saturating_sub(1)
    }
}

impl ByteSource for SegmentedSource {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_at_into(&self, offset: u64, buf: &mut [u8]) -> Result<ReadOutcome> {
        if offset > self.len {
            return Err(Error::out_of_range(offset, self.len));
        }

        let mut filled = 0;
        let mut index = self.locate(offset);
        while filled < buf.len() && index < self.parts.len() {
            let local = offset + filled as u64 - self.starts[index];
            log::trace!("segment {index} at local offset {local}");
            match self.parts[index].read_at_into(local, &mut buf[filled..])? {
                ReadOutcome::Filled(n) => return Ok(ReadOutcome::Filled(filled + n)),
                ReadOutcome::EndOfData(n) => filled += n,
            }
            index += 1;
        }
        Ok(ReadOutcome::new(filled, buf.len()))
    }
}
