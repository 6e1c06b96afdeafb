use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Replacement spec #{index} is invalid: {found}")]
    InvalidSpecKind { index: usize, found: String },

    #[error("No atomization has been cached yet")]
    EmptyCache,

    #[error("Cannot overwrite key '{0}' in the remapping table")]
    RemapCollision(String),

    #[error("A normalization function must be set before inserting names")]
    MissingNormalizer,

    #[error("Invalid delimiter configuration: {0}")]
    InvalidDelimiter(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
