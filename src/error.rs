use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors produced while loading a grid structure or a word list.
///
/// An unsatisfiable puzzle is not an error; the solver reports it by
/// returning `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be read.
    #[error("unable to read [{}]", .path.display())]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The structure description contained no rows.
    #[error("structure has no rows")]
    EmptyStructure,

    /// A structure row did not have the same number of cells as the first
    /// row.
    #[error("structure row [{row}] has [{found}] cells, expected [{expected}]")]
    RaggedRow {
        /// Zero based index of the offending row.
        row: usize,
        /// Number of cells in the first row.
        expected: usize,
        /// Number of cells in the offending row.
        found: usize,
    },
}
