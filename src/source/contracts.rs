//! Mapping of contracts-registry result pages into company records.
//!
//! A page is the deserialized JSON body of one filtered-contracts
//! response: a `data` array of contract objects. Contracts are grouped by
//! customer tax identifier into one record per company, each contract
//! contributing one line item. Malformed entries are skipped with a
//! warning; a bad date or amount degrades to an absent field.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::warn;

use crate::constants::source::FIELD_SUPPLIER_PREFIX;
use crate::data::{CompanyRecord, ContractLineItem};
use crate::errors::ReconError;
use crate::inn::normalize;
use crate::source::RecordSource;
use crate::types::SourceId;

/// Map one result page into company records, one per customer identifier.
pub fn map_page(page: &Value) -> Vec<CompanyRecord> {
    let Some(contracts) = page.get("data").and_then(Value::as_array) else {
        warn!("contracts page has no data array, mapping nothing");
        return Vec::new();
    };

    let mut by_customer: IndexMap<String, CompanyRecord> = IndexMap::new();
    for contract in contracts {
        let Some(regnum) = contract.get("regnum").and_then(Value::as_str) else {
            warn!("contract entry without regnum, skipping");
            continue;
        };
        let Some(customer_inn) = contract.get("customer_inn").and_then(Value::as_str) else {
            warn!(regnum, "contract entry without customer identifier, skipping");
            continue;
        };

        let record = by_customer
            .entry(customer_inn.to_string())
            .or_insert_with(|| {
                let name = contract
                    .get("customer_name")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let mut record = CompanyRecord::named("contracts", name);
                record.inn = normalize(customer_inn);
                record
            });

        let suppliers = supplier_pairs(contract);
        for (supplier_inn, supplier_name) in &suppliers {
            record.extra_fields.insert(
                format!("{FIELD_SUPPLIER_PREFIX}{supplier_inn}"),
                supplier_name.clone(),
            );
        }

        let products = contract
            .get("products")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let okpd2_code = products
            .first()
            .and_then(|product| product.get("okpd2_code"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        let description = products
            .iter()
            .filter_map(|product| product.get("name").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; ");

        record.source_contracts.push(ContractLineItem {
            contract_id: regnum.to_string(),
            okpd2_code: okpd2_code.to_string(),
            supplier_inn: suppliers
                .first()
                .map(|(inn, _)| inn.clone())
                .unwrap_or_default(),
            amount: contract
                .get("amount_rur")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
            description,
            sign_date: contract
                .get("sign_date")
                .and_then(Value::as_str)
                .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()),
        });
    }

    by_customer.into_values().collect()
}

/// Zip the parallel supplier id/name arrays, tolerating length mismatches.
fn supplier_pairs(contract: &Value) -> Vec<(String, String)> {
    let inns = contract
        .get("supplier_inns")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let names = contract
        .get("supplier_names")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    inns.iter()
        .filter_map(Value::as_str)
        .enumerate()
        .map(|(idx, inn)| {
            let name = names
                .get(idx)
                .and_then(Value::as_str)
                .unwrap_or_default();
            (inn.to_string(), name.to_string())
        })
        .collect()
}

/// Source over already-fetched contracts result pages.
pub struct ContractsPayloadSource {
    id: SourceId,
    pages: Vec<Value>,
}

impl ContractsPayloadSource {
    /// Wrap fetched pages.
    pub fn new(pages: Vec<Value>) -> Self {
        Self {
            id: "contracts".to_string(),
            pages,
        }
    }
}

impl RecordSource for ContractsPayloadSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn records(&self) -> Result<Vec<CompanyRecord>, ReconError> {
        let mut records = Vec::new();
        for page in &self.pages {
            if !page.is_object() {
                return Err(ReconError::SourcePayload {
                    source_id: self.id.clone(),
                    details: "page body is not a JSON object".to_string(),
                });
            }
            records.extend(map_page(page));
        }
        Ok(records)
    }
}
