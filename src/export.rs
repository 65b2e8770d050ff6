//! Flattened summary rows for downstream presentation.
//!
//! The presentation collaborator decides the final format; this module
//! only aggregates per-supplier contract totals and serializes rows as
//! JSON. Aggregation is deterministic: equal totals order by supplier
//! identifier.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::export::TOP_SUPPLIERS;
use crate::constants::source::FIELD_SUPPLIER_PREFIX;
use crate::data::CompanyRecord;
use crate::errors::ReconError;

/// One supplier's aggregated contract volume for a company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupplierShare {
    /// Supplier tax identifier as reported by the registry.
    pub inn: String,
    /// Supplier display name, when the payload carried one.
    pub name: String,
    /// Summed contract amounts attributed to this supplier.
    pub total: f64,
}

/// Aggregate contract amounts per supplier, largest first.
pub fn supplier_totals(record: &CompanyRecord) -> Vec<SupplierShare> {
    let mut totals: IndexMap<&str, f64> = IndexMap::new();
    for item in &record.source_contracts {
        if item.supplier_inn.is_empty() {
            continue;
        }
        *totals.entry(item.supplier_inn.as_str()).or_insert(0.0) += item.amount;
    }

    let mut shares: Vec<SupplierShare> = totals
        .into_iter()
        .map(|(inn, total)| SupplierShare {
            inn: inn.to_string(),
            name: record
                .extra_fields
                .get(&format!("{FIELD_SUPPLIER_PREFIX}{inn}"))
                .cloned()
                .unwrap_or_default(),
            total,
        })
        .collect();
    shares.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.inn.cmp(&b.inn))
    });
    shares
}

/// Summary row for one enriched company.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompanyRow {
    /// Company tax identifier, absent for unresolved records.
    pub inn: Option<String>,
    /// Company display name.
    pub name: String,
    /// Alternate names in discovery order.
    pub aliases: Vec<String>,
    /// Sanction topic tags.
    pub sanctions_flags: Vec<String>,
    /// Number of contract line items kept after filtering.
    pub contract_count: usize,
    /// Summed amount of kept line items.
    pub contract_total: f64,
    /// Largest suppliers by aggregated amount.
    pub top_suppliers: Vec<SupplierShare>,
}

impl CompanyRow {
    /// Flatten a record plus its top suppliers.
    pub fn from_record(record: &CompanyRecord) -> Self {
        let mut top_suppliers = supplier_totals(record);
        top_suppliers.truncate(TOP_SUPPLIERS);
        Self {
            inn: record.inn.as_ref().map(|inn| inn.as_str().to_string()),
            name: record.name.clone(),
            aliases: record.aliases.clone(),
            sanctions_flags: record.sanctions_flags.iter().cloned().collect(),
            contract_count: record.source_contracts.len(),
            contract_total: record.source_contracts.iter().map(|item| item.amount).sum(),
            top_suppliers,
        }
    }
}

/// Write summary rows to `path` as pretty-printed JSON.
pub fn write_json(path: &Path, rows: &[CompanyRow]) -> Result<(), ReconError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), rows)?;
    Ok(())
}
