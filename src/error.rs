use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The bundled dataset could not be located or read.
///
/// Malformed fields inside the dataset are never reported here; they are
/// replaced with defaults while parsing.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("dataset not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read dataset {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to split dataset rows: {0}")]
    Csv(#[from] csv::Error),
}
