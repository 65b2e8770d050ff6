//! Contract line-item filtering by classification code, description
//! keywords, and signing date.

use chrono::NaiveDate;
use indexmap::IndexSet;
use tracing::debug;

use crate::data::ContractLineItem;
use crate::errors::ReconError;
use crate::types::Okpd2Code;

/// How allowed OKPD2 codes are compared against line-item codes.
///
/// The classification is hierarchical (`25.4` covers `25.40.11`), but not
/// every caller wants subtree matching, so the policy is explicit
/// configuration rather than a guess. `Exact` is the conservative default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CodeMatch {
    /// Keep an item only when its code equals an allowed code.
    #[default]
    Exact,
    /// Keep an item when its code starts with an allowed code.
    Prefix,
}

/// Inclusive contract signing-date window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest signing date kept.
    pub from: NaiveDate,
    /// Latest signing date kept.
    pub to: NaiveDate,
}

/// Caller-supplied contract filtering rules.
#[derive(Clone, Debug, Default)]
pub struct FilterConfig {
    /// OKPD2 codes to keep. Empty means no filtering by code.
    pub allowed_codes: IndexSet<Okpd2Code>,
    /// Case-insensitive substrings that disqualify an item by description.
    pub excluded_keywords: IndexSet<String>,
    /// Code comparison policy.
    pub code_match: CodeMatch,
    /// Optional signing-date window; items without a date always pass.
    pub date_range: Option<DateRange>,
}

impl FilterConfig {
    /// Reject configurations that cannot express a meaningful filter.
    ///
    /// Blank codes or keywords would silently match everything or nothing;
    /// an inverted date window keeps no contract at all. Both are surfaced
    /// immediately rather than applied.
    pub fn validate(&self) -> Result<(), ReconError> {
        if self.allowed_codes.iter().any(|code| code.trim().is_empty()) {
            return Err(ReconError::Configuration(
                "allowed OKPD2 codes must be non-empty".to_string(),
            ));
        }
        if self
            .excluded_keywords
            .iter()
            .any(|keyword| keyword.trim().is_empty())
        {
            return Err(ReconError::Configuration(
                "excluded keywords must be non-empty".to_string(),
            ));
        }
        if let Some(range) = &self.date_range {
            if range.from > range.to {
                return Err(ReconError::Configuration(format!(
                    "date range is inverted: {} > {}",
                    range.from, range.to
                )));
            }
        }
        Ok(())
    }
}

/// Select the line items passing every configured rule, preserving input
/// order.
///
/// An item is kept iff its code is allowed (empty allow-list passes all),
/// its description contains none of the excluded keywords
/// (case-insensitive), and its signing date falls inside the window when
/// both are present.
pub fn filter_contracts(items: &[ContractLineItem], config: &FilterConfig) -> Vec<ContractLineItem> {
    let lowered_keywords: Vec<String> = config
        .excluded_keywords
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .collect();

    let kept: Vec<ContractLineItem> = items
        .iter()
        .filter(|item| code_allowed(&item.okpd2_code, config))
        .filter(|item| {
            let description = item.description.to_lowercase();
            !lowered_keywords
                .iter()
                .any(|keyword| description.contains(keyword))
        })
        .filter(|item| date_allowed(item.sign_date, config.date_range.as_ref()))
        .cloned()
        .collect();

    debug!(total = items.len(), kept = kept.len(), "filtered contract items");
    kept
}

fn code_allowed(code: &str, config: &FilterConfig) -> bool {
    if config.allowed_codes.is_empty() {
        return true;
    }
    match config.code_match {
        CodeMatch::Exact => config.allowed_codes.contains(code),
        CodeMatch::Prefix => config
            .allowed_codes
            .iter()
            .any(|allowed| code.starts_with(allowed.as_str())),
    }
}

fn date_allowed(sign_date: Option<NaiveDate>, range: Option<&DateRange>) -> bool {
    match (sign_date, range) {
        (Some(date), Some(range)) => range.from <= date && date <= range.to,
        _ => true,
    }
}
