use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::inn::Inn;

pub use crate::types::{
    AliasName, CompanyName, ContractId, FieldKey, FieldValue, Okpd2Code, SanctionTag, SourceId,
};

/// Canonical company record assembled from registry payloads.
///
/// Two records carrying the same identifier describe the same legal entity
/// and are collapsed by deduplication. A record whose identifier is absent
/// stays on its own until an operator supplies one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Validated tax identifier, when the source data carried one.
    pub inn: Option<Inn>,
    /// Primary display name (the registry caption).
    pub name: CompanyName,
    /// Alternate names in discovery order, duplicates removed.
    pub aliases: Vec<AliasName>,
    /// Sanction topic tags attached to the entity.
    pub sanctions_flags: IndexSet<SanctionTag>,
    /// Contract line items observed for this company as a customer.
    pub source_contracts: Vec<ContractLineItem>,
    /// Free-form enrichment fields (registry ids, raw tax numbers, supplier names).
    pub extra_fields: IndexMap<FieldKey, FieldValue>,
    /// Registry sources that contributed to this record, in discovery order.
    pub sources: Vec<SourceId>,
}

impl CompanyRecord {
    /// Create an empty record with only a source and display name.
    pub fn named(source: impl Into<SourceId>, name: impl Into<CompanyName>) -> Self {
        Self {
            inn: None,
            name: name.into(),
            aliases: Vec::new(),
            sanctions_flags: IndexSet::new(),
            source_contracts: Vec::new(),
            extra_fields: IndexMap::new(),
            sources: vec![source.into()],
        }
    }

    /// Attach a validated identifier, consuming and returning the record.
    pub fn with_inn(mut self, inn: Inn) -> Self {
        self.inn = Some(inn);
        self
    }

    /// Append an alias unless an equal one was already recorded.
    pub fn push_alias(&mut self, alias: impl Into<AliasName>) {
        let alias = alias.into();
        if !self.aliases.contains(&alias) {
            self.aliases.push(alias);
        }
    }

    /// True when no content field beyond the name is populated.
    pub fn is_bare(&self) -> bool {
        self.inn.is_none()
            && self.aliases.is_empty()
            && self.sanctions_flags.is_empty()
            && self.source_contracts.is_empty()
            && self.extra_fields.is_empty()
    }
}

/// One product position of a signed contract. Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractLineItem {
    /// Registry number of the contract this item belongs to.
    pub contract_id: ContractId,
    /// Product classification code of the item.
    pub okpd2_code: Okpd2Code,
    /// Raw supplier tax identifier as reported by the registry.
    pub supplier_inn: String,
    /// Contract amount in rubles attributed to this item.
    pub amount: f64,
    /// Item subject text used for keyword exclusion.
    pub description: String,
    /// Contract signing date, when the payload carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_record_is_bare() {
        let record = CompanyRecord::named("sanctions", "Acme LLC");
        assert!(record.is_bare());
        assert_eq!(record.sources, vec!["sanctions".to_string()]);
    }

    #[test]
    fn push_alias_keeps_first_seen_order_and_dedupes() {
        let mut record = CompanyRecord::named("sanctions", "Acme LLC");
        record.push_alias("acme");
        record.push_alias("acme llc");
        record.push_alias("acme");
        assert_eq!(record.aliases, vec!["acme".to_string(), "acme llc".to_string()]);
    }
}
