use chrono::NaiveDate;

use crate::constants::DEFAULT_CAPTION_EXCLUSIONS;
use crate::data::CompanyRecord;
use crate::filter::{CodeMatch, DateRange, FilterConfig};
use crate::source::sanctions::SanctionsMapping;
use crate::types::Okpd2Code;

/// Run-level settings for one enrichment pass.
///
/// The embedding application assembles this from its own configuration
/// sources (flags, environment, prompts); the library never reads the
/// environment itself.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Search keywords handed to the sanctions-registry collaborator.
    pub search_keywords: Vec<String>,
    /// Caption substrings that disqualify a sanctions entity.
    pub excluded_caption_keywords: Vec<String>,
    /// OKPD2 codes kept when filtering contract line items.
    pub product_codes: Vec<Okpd2Code>,
    /// Description substrings that disqualify a contract line item.
    pub excluded_description_keywords: Vec<String>,
    /// OKPD2 comparison policy.
    pub code_match: CodeMatch,
    /// Contract signing-date window.
    pub date_range: Option<DateRange>,
    /// Optional cap on processed companies, for test runs.
    pub record_cap: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            search_keywords: Vec::new(),
            excluded_caption_keywords: DEFAULT_CAPTION_EXCLUSIONS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
            product_codes: Vec::new(),
            excluded_description_keywords: Vec::new(),
            code_match: CodeMatch::default(),
            date_range: default_date_range(),
            record_cap: None,
        }
    }
}

/// Signing-date window applied when none is configured explicitly.
fn default_date_range() -> Option<DateRange> {
    let from = NaiveDate::from_ymd_opt(2014, 7, 31)?;
    let to = NaiveDate::from_ymd_opt(2022, 2, 23)?;
    Some(DateRange { from, to })
}

impl RunConfig {
    /// Derive the contract filter settings for the pipeline core.
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            allowed_codes: self.product_codes.iter().cloned().collect(),
            excluded_keywords: self
                .excluded_description_keywords
                .iter()
                .cloned()
                .collect(),
            code_match: self.code_match,
            date_range: self.date_range,
        }
    }

    /// Derive the sanctions payload mapping options.
    pub fn sanctions_mapping(&self) -> SanctionsMapping {
        SanctionsMapping {
            excluded_caption_keywords: self.excluded_caption_keywords.clone(),
        }
    }

    /// Truncate a record set to the configured cap, when one is set.
    pub fn apply_cap(&self, mut records: Vec<CompanyRecord>) -> Vec<CompanyRecord> {
        if let Some(cap) = self.record_cap {
            records.truncate(cap);
        }
        records
    }
}
