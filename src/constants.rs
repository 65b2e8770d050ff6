/// Constants used by identifier normalization.
pub mod inn {
    /// Digit counts accepted as a valid tax identifier (legal entity, individual).
    pub const VALID_LENGTHS: [usize; 2] = [10, 12];
}

/// Constants used by richness scoring.
pub mod richness {
    /// Score contribution of a present, validated identifier.
    ///
    /// Sits above the saturated content count so that identifier presence
    /// always outranks any number of populated content fields.
    pub const IDENTITY_WEIGHT: u64 = 1 << 32;
    /// Upper bound applied to the content-field count before weighting.
    pub const CONTENT_CAP: u64 = (1 << 32) - 1;
}

/// Constants used by source payload mapping.
pub mod source {
    /// Extra-field key holding the registry-assigned entity id.
    pub const FIELD_ENTITY_ID: &str = "entity_id";
    /// Extra-field key holding the registry schema label.
    pub const FIELD_SCHEMA: &str = "schema";
    /// Extra-field key holding a tax number that did not validate as an INN.
    pub const FIELD_TAX_NUMBER: &str = "tax_number";
    /// Extra-field key prefix for supplier display names, suffixed by INN.
    pub const FIELD_SUPPLIER_PREFIX: &str = "supplier_name:";
    /// Registry schema label identifying natural persons (skipped on mapping).
    pub const SCHEMA_PERSON: &str = "person";
}

/// Constants used by export summaries.
pub mod export {
    /// Number of top suppliers flattened into a company summary row.
    pub const TOP_SUPPLIERS: usize = 3;
}

/// Caption keywords excluded by default when mapping sanctions pages.
pub const DEFAULT_CAPTION_EXCLUSIONS: [&str; 3] = ["banks", "politics", "medical"];
