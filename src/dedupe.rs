//! Deduplication of a combined record set by tax identifier.
//!
//! Records sharing a validated identifier describe the same legal entity
//! and collapse into one merged record. Records without an identifier
//! carry no evidence of shared identity, so they are never merged with
//! each other automatically; they pass through as singletons and surface
//! downstream as needing a manual identifier.

use indexmap::IndexMap;
use tracing::debug;

use crate::data::CompanyRecord;
use crate::errors::ReconError;
use crate::inn::Inn;
use crate::merge::merge;
use crate::richness::merge_rank;

/// Collapse duplicate records, one output record per distinct identifier
/// plus one per identifier-less input.
///
/// Identifier groups keep first-seen order while folding; any merge
/// failure short-circuits to the caller instead of being resolved
/// silently. Output is ordered by descending richness, then identifier,
/// with identifier-less records last.
pub fn deduplicate(records: Vec<CompanyRecord>) -> Result<Vec<CompanyRecord>, ReconError> {
    let total = records.len();
    let mut groups: IndexMap<Inn, Vec<CompanyRecord>> = IndexMap::new();
    let mut singletons: Vec<CompanyRecord> = Vec::new();

    for record in records {
        match record.inn.clone() {
            Some(inn) => groups.entry(inn).or_default().push(record),
            None => singletons.push(record),
        }
    }

    debug!(
        records = total,
        identifier_groups = groups.len(),
        without_identifier = singletons.len(),
        "partitioned records for deduplication"
    );

    let mut output: Vec<CompanyRecord> = Vec::with_capacity(groups.len() + singletons.len());
    for (inn, group) in groups {
        if group.len() > 1 {
            debug!(%inn, members = group.len(), "collapsing identifier group");
        }
        let mut members = group.into_iter();
        let mut folded = members.next().expect("identifier group is non-empty");
        for record in members {
            folded = merge(&folded, &record)?;
        }
        output.push(folded);
    }
    output.extend(singletons);

    output.sort_by_cached_key(merge_rank);
    Ok(output)
}
