//! Registry payload sources.
//!
//! Ownership model:
//! - `RecordSource` is the pipeline-facing interface that yields company
//!   records.
//! - `sanctions` and `contracts` own the mapping from already-fetched
//!   registry JSON pages to records; neither performs any I/O.
//!
//! The HTTP collaborator that actually talks to the registries hands its
//! response pages to these sources verbatim; auth, paging, and retry stay
//! on that side of the seam.

use crate::data::CompanyRecord;
use crate::errors::ReconError;
use crate::types::SourceId;

/// Sanctions-registry page mapping.
pub mod sanctions;

/// Contracts-registry page mapping.
pub mod contracts;

/// Pipeline-facing source of company records.
///
/// Implementations are expected to be deterministic for a fixed payload:
/// mapping the same pages twice yields the same records in the same order.
pub trait RecordSource {
    /// Stable source identifier stamped onto produced records.
    fn id(&self) -> &str;

    /// Produce all records this source holds.
    fn records(&self) -> Result<Vec<CompanyRecord>, ReconError>;
}

/// Source over prebuilt records, for tests and demos.
pub struct InMemorySource {
    id: SourceId,
    records: Vec<CompanyRecord>,
}

impl InMemorySource {
    /// Create an in-memory source from prebuilt records.
    pub fn new(id: impl Into<SourceId>, records: Vec<CompanyRecord>) -> Self {
        Self {
            id: id.into(),
            records,
        }
    }
}

impl RecordSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn records(&self) -> Result<Vec<CompanyRecord>, ReconError> {
        Ok(self.records.clone())
    }
}
