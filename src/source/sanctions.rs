//! Mapping of sanctions-registry search pages into company records.
//!
//! A page is the deserialized JSON body of one search response: a
//! `results` array of entity objects carrying `schema`, `caption`, and a
//! `properties` bag. Entries that do not describe a sanctioned legal
//! entity (natural persons, captions hitting the exclusion keywords) are
//! skipped; malformed entries degrade to records with absent fields
//! rather than failing the page.

use serde_json::Value;
use tracing::{debug, warn};

use crate::constants::source::{FIELD_ENTITY_ID, FIELD_SCHEMA, FIELD_TAX_NUMBER, SCHEMA_PERSON};
use crate::constants::DEFAULT_CAPTION_EXCLUSIONS;
use crate::data::CompanyRecord;
use crate::errors::ReconError;
use crate::inn::normalize;
use crate::source::RecordSource;
use crate::types::SourceId;

/// Letters that occur in Russian spellings but not Ukrainian ones.
const RUSSIAN_SPECIFIC: [char; 3] = ['ы', 'э', 'й'];
/// Letters that occur in Ukrainian spellings but not Russian ones.
const UKRAINIAN_SPECIFIC: [char; 4] = ['є', 'і', 'ї', 'ґ'];

/// Options controlling how registry entities are mapped.
#[derive(Clone, Debug)]
pub struct SanctionsMapping {
    /// Case-insensitive caption substrings that disqualify an entity.
    pub excluded_caption_keywords: Vec<String>,
}

impl Default for SanctionsMapping {
    fn default() -> Self {
        Self {
            excluded_caption_keywords: DEFAULT_CAPTION_EXCLUSIONS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
        }
    }
}

/// Map one search page into company records.
pub fn map_page(page: &Value, mapping: &SanctionsMapping) -> Vec<CompanyRecord> {
    let Some(results) = page.get("results").and_then(Value::as_array) else {
        warn!("sanctions page has no results array, mapping nothing");
        return Vec::new();
    };

    let excluded: Vec<String> = mapping
        .excluded_caption_keywords
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .collect();

    let mut records = Vec::new();
    for entity in results {
        let schema = entity
            .get("schema")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if schema.eq_ignore_ascii_case(SCHEMA_PERSON) {
            continue;
        }

        let caption = entity
            .get("caption")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let caption_lower = caption.to_lowercase();
        if excluded.iter().any(|keyword| caption_lower.contains(keyword)) {
            debug!(caption, "skipping entity via caption exclusion");
            continue;
        }

        let properties = entity.get("properties").unwrap_or(&Value::Null);
        let mut record = CompanyRecord::named("sanctions", caption);

        let inn_code = first_string(properties, "innCode");
        let tax_number = first_string(properties, "taxNumber");
        record.inn = inn_code
            .as_deref()
            .and_then(normalize)
            .or_else(|| tax_number.as_deref().and_then(normalize));
        if let Some(tax_number) = tax_number {
            // Keep the raw registration number even when it is not the INN.
            if record.inn.as_ref().map(|inn| inn.as_str()) != Some(tax_number.as_str()) {
                record
                    .extra_fields
                    .insert(FIELD_TAX_NUMBER.to_string(), tax_number);
            }
        }

        for alias in russian_aliases(properties) {
            record.push_alias(alias);
        }

        if let Some(topics) = properties.get("topics").and_then(Value::as_array) {
            for topic in topics.iter().filter_map(Value::as_str) {
                record.sanctions_flags.insert(topic.to_string());
            }
        }

        if let Some(entity_id) = entity.get("id").and_then(Value::as_str) {
            record
                .extra_fields
                .insert(FIELD_ENTITY_ID.to_string(), entity_id.to_string());
        }
        if !schema.is_empty() {
            record
                .extra_fields
                .insert(FIELD_SCHEMA.to_string(), schema.to_string());
        }

        records.push(record);
    }
    records
}

/// Collect lowercased Russian-language aliases from the `alias` and `name`
/// properties, first-seen order, duplicates removed.
///
/// Registry alias entries are either tagged objects (`{lang, value}`) or
/// bare strings; bare strings are kept only when their spelling is
/// recognizably Russian and not Ukrainian.
fn russian_aliases(properties: &Value) -> Vec<String> {
    let mut aliases = Vec::new();
    for field in ["alias", "name"] {
        let Some(entries) = properties.get(field).and_then(Value::as_array) else {
            continue;
        };
        for entry in entries {
            let candidate = match entry {
                Value::Object(tagged) => {
                    if tagged.get("lang").and_then(Value::as_str) != Some("rus") {
                        continue;
                    }
                    tagged.get("value").and_then(Value::as_str)
                }
                Value::String(bare) => Some(bare.as_str()),
                _ => None,
            };
            let Some(candidate) = candidate else { continue };
            let lowered = candidate.to_lowercase();
            if !looks_russian(&lowered) {
                continue;
            }
            if !aliases.contains(&lowered) {
                aliases.push(lowered);
            }
        }
    }
    aliases
}

/// First entry of a string-array property, if any.
fn first_string(properties: &Value, key: &str) -> Option<String> {
    properties
        .get(key)?
        .as_array()?
        .first()?
        .as_str()
        .map(|value| value.to_string())
}

fn looks_russian(text: &str) -> bool {
    text.chars().any(|ch| RUSSIAN_SPECIFIC.contains(&ch))
        && !text.chars().any(|ch| UKRAINIAN_SPECIFIC.contains(&ch))
}

/// Source over already-fetched sanctions search pages.
pub struct SanctionsPayloadSource {
    id: SourceId,
    pages: Vec<Value>,
    mapping: SanctionsMapping,
}

impl SanctionsPayloadSource {
    /// Wrap fetched pages with the given mapping options.
    pub fn new(pages: Vec<Value>, mapping: SanctionsMapping) -> Self {
        Self {
            id: "sanctions".to_string(),
            pages,
            mapping,
        }
    }
}

impl RecordSource for SanctionsPayloadSource {
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
            records.extend(map_page(page, &self.mapping));
        }
        Ok(records)
    }
}
