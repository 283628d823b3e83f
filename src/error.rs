use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("input is empty")]
    EmptyInput,

    #[error("frequency table is empty")]
    EmptyTable,

    /// The serialized table alone would be larger than the data it describes.
    #[error("frequency table needs {table} bytes but the input is only {input} bytes")]
    TableTooLargeForPayload { table: usize, input: usize },

    #[error("input is not a huffpack container")]
    InvalidMagic,

    #[error("truncated or malformed frequency table: {0}")]
    TruncatedOrMalformedTable(&'static str),

    #[error("container has no payload")]
    EmptyPayload,

    #[error("payload ran out after {decoded} of {expected} symbols")]
    TruncatedPayload { decoded: usize, expected: usize },

    #[error("could not open {}", path.display())]
    FileOpenFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
