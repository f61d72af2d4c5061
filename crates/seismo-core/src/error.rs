//! Error types for the `seismo-core` crate.

/// Errors raised while reading the event table.
///
/// Malformed numeric fields are not errors; they load as NaN.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The delimited reader failed (bad quoting, invalid UTF-8, ...).
    #[error("failed to read event table: {0}")]
    Csv(#[from] csv::Error),

    /// The table could not be opened.
    #[error("failed to open event table '{path}': {source}")]
    Io {
        /// Path that was requested.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
