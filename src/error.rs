//! Error type shared by the word list, fix list and analysis layers.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A fix list line without the `=` delimiter. Fatal for the whole file.
    #[error("{}:{line_number}: expected `word=fix`, found `{line}`", path.display())]
    MalformedFixLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error("failed to build dictionary index: {0}")]
    Index(#[from] fst::Error),

    #[error("operation cancelled")]
    Cancelled,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
