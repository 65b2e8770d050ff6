//! Pipeline orchestration over the two registry streams.
//!
//! Everything here consumes fully-materialized record sequences; fetching,
//! credential handling, and operator prompts live in collaborators around
//! the library. The manual-identifier path re-enters through
//! [`resolve_manual`] instead of suspending inside the pipeline.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::data::CompanyRecord;
use crate::dedupe::deduplicate;
use crate::errors::ReconError;
use crate::filter::{filter_contracts, FilterConfig};
use crate::inn::Inn;
use crate::types::CompanyName;

/// Outcome of one enrichment pass.
#[derive(Clone, Debug, Default)]
pub struct EnrichedResult {
    /// Deduplicated records carrying a validated identifier.
    pub records: Vec<CompanyRecord>,
    /// Records that still need a manually supplied identifier.
    pub unresolved: Vec<CompanyRecord>,
}

impl EnrichedResult {
    /// True when no record is waiting on a manual identifier.
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Run the reconciliation pipeline over the two registry streams.
///
/// Validates the filter configuration, filters every contract-sourced
/// record's line items, deduplicates the combined set, and splits the
/// survivors by identifier presence. Identifier conflicts and
/// configuration faults propagate to the caller.
pub fn enrich(
    sanctions_records: Vec<CompanyRecord>,
    contract_records: Vec<CompanyRecord>,
    filter: &FilterConfig,
) -> Result<EnrichedResult, ReconError> {
    filter.validate()?;

    let mut combined = sanctions_records;
    for mut record in contract_records {
        record.source_contracts = filter_contracts(&record.source_contracts, filter);
        combined.push(record);
    }
    debug!(records = combined.len(), "combined registry streams");

    let deduplicated = deduplicate(combined)?;
    let result = partition(deduplicated);
    info!(
        resolved = result.records.len(),
        unresolved = result.unresolved.len(),
        "enrichment pass complete"
    );
    Ok(result)
}

/// Attach a validated identifier to a record.
///
/// A record's identifier is immutable once set: re-assigning the same
/// value is a no-op, a different value is refused.
pub fn assign_identifier(
    mut record: CompanyRecord,
    inn: Inn,
) -> Result<CompanyRecord, ReconError> {
    match &record.inn {
        None => {
            record.inn = Some(inn);
            Ok(record)
        }
        Some(current) if *current == inn => Ok(record),
        Some(current) => Err(ReconError::IdentifierImmutable {
            current: current.clone(),
            proposed: inn,
            name: record.name.clone(),
        }),
    }
}

/// Apply operator-supplied identifiers to unresolved records and rerun
/// deduplication over the full set.
///
/// `assignments` is keyed by company name, the value an operator saw when
/// prompted. Unresolved records without an assignment stay unresolved.
/// This is the re-entrant half of manual identifier entry; the prompting
/// itself happens outside the library.
pub fn resolve_manual(
    resolved: Vec<CompanyRecord>,
    unresolved: Vec<CompanyRecord>,
    assignments: &IndexMap<CompanyName, Inn>,
) -> Result<EnrichedResult, ReconError> {
    let mut combined = resolved;
    let mut applied = 0usize;
    for record in unresolved {
        match assignments.get(&record.name) {
            Some(inn) => {
                applied += 1;
                combined.push(assign_identifier(record, inn.clone())?);
            }
            None => combined.push(record),
        }
    }
    debug!(applied, "applied manual identifier assignments");

    let deduplicated = deduplicate(combined)?;
    Ok(partition(deduplicated))
}

fn partition(records: Vec<CompanyRecord>) -> EnrichedResult {
    let mut result = EnrichedResult::default();
    for record in records {
        if record.inn.is_some() {
            result.records.push(record);
        } else {
            result.unresolved.push(record);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inn::normalize;

    fn inn(raw: &str) -> Inn {
        normalize(raw).expect("valid inn fixture")
    }

    #[test]
    fn enrich_partitions_by_identifier_presence() {
        let sanctions = vec![
            CompanyRecord::named("sanctions", "Acme LLC").with_inn(inn("1234567890")),
            CompanyRecord::named("sanctions", "Mystery Co"),
        ];
        let contracts = vec![CompanyRecord::named("contracts", "ACME").with_inn(inn("1234567890"))];

        let result =
            enrich(sanctions, contracts, &FilterConfig::default()).expect("no conflicts");
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.unresolved.len(), 1);
        assert_eq!(result.unresolved[0].name, "Mystery Co");
        assert!(!result.is_fully_resolved());
    }

    #[test]
    fn enrich_rejects_invalid_filter_config_up_front() {
        let config = FilterConfig {
            allowed_codes: ["".to_string()].into_iter().collect(),
            ..FilterConfig::default()
        };
        let err = enrich(Vec::new(), Vec::new(), &config).expect_err("blank code");
        assert!(matches!(err, ReconError::Configuration(_)));
    }

    #[test]
    fn assign_identifier_is_immutable_once_set() {
        let record = CompanyRecord::named("sanctions", "Acme").with_inn(inn("1111111111"));
        let same = assign_identifier(record.clone(), inn("1111111111")).expect("same value");
        assert_eq!(same.inn, Some(inn("1111111111")));

        let err = assign_identifier(record, inn("2222222222")).expect_err("different value");
        assert!(matches!(err, ReconError::IdentifierImmutable { .. }));
    }

    #[test]
    fn resolve_manual_merges_corrected_records() {
        let resolved = vec![CompanyRecord::named("sanctions", "Acme LLC").with_inn(inn("1234567890"))];
        let mut pending = CompanyRecord::named("contracts", "Acme");
        pending.push_alias("acme trading");
        let skipped = CompanyRecord::named("contracts", "Unknown Co");

        let assignments: IndexMap<CompanyName, Inn> =
            [("Acme".to_string(), inn("1234567890"))].into_iter().collect();

        let result = resolve_manual(resolved, vec![pending, skipped], &assignments)
            .expect("no conflicts");
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].aliases, vec!["acme trading".to_string()]);
        assert_eq!(result.unresolved.len(), 1);
        assert_eq!(result.unresolved[0].name, "Unknown Co");
    }
}
