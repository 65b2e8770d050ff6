use std::io;

use thiserror::Error;

use crate::inn::Inn;
use crate::types::{CompanyName, SourceId};

/// Error type for identifier conflicts, configuration, and export failures.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error("records for '{name}' disagree on tax identifier: '{left}' vs '{right}'")]
    IdentifierConflict {
        left: Inn,
        right: Inn,
        name: CompanyName,
    },
    #[error("identifier for '{name}' is already set to '{current}', refusing '{proposed}'")]
    IdentifierImmutable {
        current: Inn,
        proposed: Inn,
        name: CompanyName,
    },
    #[error("source '{source_id}' returned a malformed payload: {details}")]
    SourcePayload {
        source_id: SourceId,
        details: String,
    },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}
