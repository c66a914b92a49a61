//! Error types for multisource operations.

use std::io;

use thiserror::Error;

/// Errors that can occur while reading or seeking a composed source.
///
/// Running out of data is not an error: see [`ReadOutcome::EndOfData`].
///
/// [`ReadOutcome::EndOfData`]: crate::io::ReadOutcome::EndOfData
#[derive(Error, Debug)]
pub enum Error {
    #[error("offset {offset} is out of range 0..={size}")]
    OutOfRange { offset: i128, size: u64 },

    #[error("invalid seek whence: {0}")]
    InvalidWhence(String),

    #[error("unexpected end of data at offset {offset}: wanted {wanted} bytes, got {got}")]
    UnexpectedEof {
        offset: u64,
        wanted: usize,
        got: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn out_of_range(offset: impl Into<i128>, size: u64) -> Self {
        Error::OutOfRange {
            offset: offset.into(),
            size,
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            Error::UnexpectedEof { .. } => io::Error::new(io::ErrorKind::UnexpectedEof, err),
            Error::OutOfRange { .. } | Error::InvalidWhence(_) => {
                io::Error::new(io::ErrorKind::InvalidInput, err)
            }
        }
    }
}
