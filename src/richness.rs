//! Completeness scoring for company records.
//!
//! When two sources describe the same entity, the richer record drives
//! conflict resolution during merging and the final output ordering. The
//! score ranks identity-completeness above content-completeness: a record
//! with a validated identifier always outranks one without, no matter how
//! many aliases or contracts the latter accumulated.

use std::cmp::Reverse;

use crate::constants::richness::{CONTENT_CAP, IDENTITY_WEIGHT};
use crate::data::CompanyRecord;
use crate::inn::Inn;
use crate::types::CompanyName;

/// Completeness score for one record. Higher means more complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RichnessScore(pub u64);

impl RichnessScore {
    /// Return the raw score value.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Compute the completeness score of a record.
///
/// The identifier contributes a weight above the saturated content count;
/// content fields (non-empty name, each alias, each sanction flag, each
/// contract line item, each extra field) count one unit apiece. Adding a
/// populated field never lowers the result.
pub fn score(record: &CompanyRecord) -> RichnessScore {
    let mut content: u64 = 0;
    if !record.name.trim().is_empty() {
        content += 1;
    }
    content += record.aliases.len() as u64;
    content += record.sanctions_flags.len() as u64;
    content += record.source_contracts.len() as u64;
    content += record.extra_fields.len() as u64;

    let identity = if record.inn.is_some() {
        IDENTITY_WEIGHT
    } else {
        0
    };
    RichnessScore(identity + content.min(CONTENT_CAP))
}

/// Stable ordering key over records: richest first, then identifier
/// (records without one last), then name.
///
/// Used to pick the leading input of a merge and to order deduplicated
/// output, so equal-score ties resolve the same way everywhere.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MergeRank {
    score: Reverse<u64>,
    missing_inn: bool,
    inn: Option<Inn>,
    name: CompanyName,
}

/// Build the ordering key for a record. Smaller keys sort first.
pub fn merge_rank(record: &CompanyRecord) -> MergeRank {
    MergeRank {
        score: Reverse(score(record).value()),
        missing_inn: record.inn.is_none(),
        inn: record.inn.clone(),
        name: record.name.clone(),
    }
}
