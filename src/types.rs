/// Identifier for the registry source that produced a record.
/// Examples: `sanctions`, `contracts`
pub type SourceId = String;
/// Primary display name of a company.
/// Example: `ООО "Прибор"`
pub type CompanyName = String;
/// Alternate company name discovered in registry properties.
/// Example: `акционерное общество "прибор"`
pub type AliasName = String;
/// Tag describing why an entity appears in the sanctions registry.
/// Examples: `sanction`, `export.control`
pub type SanctionTag = String;
/// Registry number of a signed contract.
/// Example: `0173100004521000021`
pub type ContractId = String;
/// Product/service classification code attached to a contract line item.
/// Examples: `25.40.11`, `26.51.66.190`
pub type Okpd2Code = String;
/// Key for free-form enrichment fields carried on a record.
/// Examples: `entity_id`, `schema`, `tax_number`
pub type FieldKey = String;
/// Value for free-form enrichment fields carried on a record.
/// Examples: `NK-smzF7qYZcBwheq9YbYzYg`, `LegalEntity`
pub type FieldValue = String;
