//! Deterministic merging of two records describing the same entity.
//!
//! Merging never mutates its inputs and never guesses on identity: two
//! different validated identifiers are a data-quality fault surfaced as
//! [`ReconError::IdentifierConflict`], not a silent pick.

use indexmap::IndexMap;

use crate::data::CompanyRecord;
use crate::errors::ReconError;
use crate::richness::merge_rank;
use crate::types::CompanyName;

/// Merge two records that share an identifier (or where at most one side
/// has an identifier) into a new record maximizing completeness.
///
/// Field policy:
/// - identifier: the present one; both present and unequal is a conflict
/// - name: longer non-empty string, ties broken lexicographically
/// - aliases, sanction flags, sources: order-preserving union led by the
///   higher-ranked input
/// - contracts: concatenation deduplicated by contract id, keep first
/// - extra fields: union, higher-ranked input wins key collisions
///
/// The higher-ranked input (richness, then identifier, then name) leads
/// every union, so the result does not depend on argument order. Inputs
/// identical on that whole key are interchangeable. Merging a record with
/// itself returns an equal record.
pub fn merge(a: &CompanyRecord, b: &CompanyRecord) -> Result<CompanyRecord, ReconError> {
    if let (Some(left), Some(right)) = (&a.inn, &b.inn) {
        if left != right {
            return Err(ReconError::IdentifierConflict {
                left: left.clone(),
                right: right.clone(),
                name: pick_name(&a.name, &b.name),
            });
        }
    }

    let (primary, secondary) = if merge_rank(a) <= merge_rank(b) {
        (a, b)
    } else {
        (b, a)
    };

    let mut aliases = primary.aliases.clone();
    for alias in &secondary.aliases {
        if !aliases.contains(alias) {
            aliases.push(alias.clone());
        }
    }

    let mut sanctions_flags = primary.sanctions_flags.clone();
    sanctions_flags.extend(secondary.sanctions_flags.iter().cloned());

    let mut source_contracts = primary.source_contracts.clone();
    for item in &secondary.source_contracts {
        if !source_contracts
            .iter()
            .any(|seen| seen.contract_id == item.contract_id)
        {
            source_contracts.push(item.clone());
        }
    }

    let mut extra_fields: IndexMap<_, _> = secondary.extra_fields.clone();
    for (key, value) in &primary.extra_fields {
        extra_fields.insert(key.clone(), value.clone());
    }

    let mut sources = primary.sources.clone();
    for source in &secondary.sources {
        if !sources.contains(source) {
            sources.push(source.clone());
        }
    }

    Ok(CompanyRecord {
        inn: primary.inn.clone().or_else(|| secondary.inn.clone()),
        name: pick_name(&primary.name, &secondary.name),
        aliases,
        sanctions_flags,
        source_contracts,
        extra_fields,
        sources,
    })
}

/// Prefer the longer non-empty name; equal lengths take the
/// lexicographically smaller one.
fn pick_name(a: &str, b: &str) -> CompanyName {
    match (a.trim().is_empty(), b.trim().is_empty()) {
        (true, true) => String::new(),
        (true, false) => b.to_string(),
        (false, true) => a.to_string(),
        (false, false) => match a.chars().count().cmp(&b.chars().count()) {
            std::cmp::Ordering::Greater => a.to_string(),
            std::cmp::Ordering::Less => b.to_string(),
            std::cmp::Ordering::Equal => a.min(b).to_string(),
        },
    }
}
