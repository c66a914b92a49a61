//! Binary composition of sources into one address space.

use std::sync::Arc;

use super::byte_source::{ByteSource, EmptySource, ReadOutcome, SharedSource};
use crate::error::{Error, Result};

/// Two sources presented back to back: every offset below `left.len()` is
/// served by `left`, everything after by `right`.
///
/// Either side may itself be a `Concat`, so nesting composes any number of
/// sources. Each level of nesting costs a stack frame per read; use
/// [`concat`] to join long lists. Lengths are queried on every call rather
/// than cached, which keeps the node in step with its children. Shrinking or
/// rewriting a child after composition gives unspecified (but memory-safe)
/// results.
#[derive(Debug, Clone)]
pub struct Concat<L, R> {
    left: L,
    right: R,
}

impl<L: ByteSource, R: ByteSource> Concat<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &L {
        &self.left
    }

    pub fn right(&self) -> &R {
        &self.right
    }

    pub fn into_parts(self) -> (L, R) {
        (self.left, self.right)
    }
}

impl<L: ByteSource, R: ByteSource> ByteSource for Concat<L, R> {
    fn len(&self) -> u64 {
        self.left.len() + self.right.len()
    }

    fn read_at_into(&self, offset: u64, buf: &mut [u8]) -> Result<ReadOutcome> {
        let left_len = self.left.len();
        let right_len = self.right.len();

        if offset > left_len + right_len {
            return Err(Error::out_of_range(offset, left_len + right_len));
        }

        if offset < left_len {
            let first = self.left.read_at_into(offset, buf)?;
            let n1 = match first {
                ReadOutcome::Filled(_) => return Ok(first),
                ReadOutcome::EndOfData(n) => n,
            };
            log::trace!(
                "read at {offset} crosses boundary at {left_len} after {n1} of {} bytes",
                buf.len()
            );
            return Ok(match self.right.read_at_into(0, &mut buf[n1..])? {
                ReadOutcome::Filled(n2) => ReadOutcome::Filled(n1 + n2),
                ReadOutcome::EndOfData(n2) => ReadOutcome::EndOfData(n1 + n2),
            });
        }

        self.right.read_at_into(offset - left_len, buf)
    }
}

/// A left-deep fold of sources, as built by [`concat`].
///
/// Node `k` pairs node `k - 1` (or the first source, for `k == 0`) with
/// `rights[k]`. The spine is stored flat and walked with loops, so reads
/// behave exactly like nested [`Concat`] nodes without recursing once per
/// source. Lengths are queried live on every call.
pub struct Chain {
    first: SharedSource,
    rights: Vec<SharedSource>,
}

impl Chain {
    /// Right child of the root node: the last source folded in.
    pub fn right(&self) -> &SharedSource {
        // `concat` always pushes at least the terminal EmptySource.
        &self.rights[self.rights.len() - 1]
    }

    /// Number of binary nodes on the spine.
    pub fn depth(&self) -> usize {
        self.rights.len()
    }

    /// Leaf `0` is the first source; leaf `k + 1` is `rights[k]`.
    fn leaf(&self, index: usize) -> &SharedSource {
        match index {
            0 => &self.first,
            _ => &self.rights[index - 1],
        }
    }
}

impl ByteSource for Chain {
    fn len(&self) -> u64 {
        self.rights
            .iter()
            .fold(self.first.len(), |total, right| total + right.len())
    }

    fn read_at_into(&self, offset: u64, buf: &mut [u8]) -> Result<ReadOutcome> {
        let total = self.len();
        if offset > total {
            return Err(Error::out_of_range(offset, total));
        }

        // Descend from the root to the highest node whose right child holds
        // `offset`; below that, every node would go left.
        let mut left_len = total;
        let mut index = self.rights.len();
        let mut local = offset;
        while index > 0 {
            left_len = left_len.saturating_sub(self.rights[index - 1].len());
            if offset >= left_len {
                local = offset - left_len;
                break;
            }
            index -= 1;
        }

        // Climb back up: each end-of-data hands the rest of the buffer to the
        // next right child at offset 0.
        let mut filled = 0;
        loop {
            match self.leaf(index).read_at_into(local, &mut buf[filled..])? {
                ReadOutcome::Filled(n) => return Ok(ReadOutcome::Filled(filled + n)),
                ReadOutcome::EndOfData(n) => filled += n,
            }
            index += 1;
            if index > self.rights.len() {
                return Ok(ReadOutcome::EndOfData(filled));
            }
            log::trace!(
                "read at {offset} crosses into source {index} after {filled} of {} bytes",
                buf.len()
            );
            local = 0;
        }
    }
}

/// Composes `sources` into a single source, in order.
///
/// Returns `None` when there is nothing to compose. A single source is paired
/// with an [`EmptySource`]; further sources are folded in from the left, so the
/// result is a left-deep chain whose first leaf is the first source given.
pub fn concat<I>(sources: I) -> Option<Chain>
where
    I: IntoIterator<Item = SharedSource>,
{
    let mut sources = sources.into_iter();
    let first = sources.next()?;

    let mut rights = vec![Arc::new(EmptySource) as SharedSource];
    rights.extend(sources);

    let chain = Chain { first, rights };
    log::debug!(
        "composed {} sources, {} bytes total",
        chain.depth(),
        chain.len()
    );
    Some(chain)
}
