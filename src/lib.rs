#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Run-level configuration types.
pub mod config;
/// Centralized constants used across scoring, mapping, and export.
pub mod constants;
/// Company record and contract line-item types.
pub mod data;
/// Deduplication of records by tax identifier.
pub mod dedupe;
/// Reusable demo runners shared by the `demos/` wrappers.
pub mod demo_apps;
/// Enrichment pipeline orchestration.
pub mod enrich;
/// Flattened export rows and JSON output.
pub mod export;
/// Contract line-item filtering.
pub mod filter;
/// Tax identifier normalization.
pub mod inn;
/// Deterministic record merging.
pub mod merge;
/// Record completeness scoring.
pub mod richness;
/// Registry payload sources and mappers.
pub mod source;
/// Shared type aliases.
pub mod types;

mod errors;

pub use config::RunConfig;
pub use data::{CompanyRecord, ContractLineItem};
pub use dedupe::deduplicate;
pub use enrich::{assign_identifier, enrich, resolve_manual, EnrichedResult};
pub use errors::ReconError;
pub use export::{supplier_totals, CompanyRow, SupplierShare};
pub use filter::{filter_contracts, CodeMatch, DateRange, FilterConfig};
pub use inn::{normalize, Inn};
pub use merge::merge;
pub use richness::{merge_rank, score, RichnessScore};
pub use source::contracts::ContractsPayloadSource;
pub use source::sanctions::{SanctionsMapping, SanctionsPayloadSource};
pub use source::{InMemorySource, RecordSource};
pub use types::{
    AliasName, CompanyName, ContractId, FieldKey, FieldValue, Okpd2Code, SanctionTag, SourceId,
};
