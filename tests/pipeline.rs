use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::json;

use inn_recon::config::RunConfig;
use inn_recon::enrich::{enrich, resolve_manual};
use inn_recon::export::CompanyRow;
use inn_recon::filter::CodeMatch;
use inn_recon::inn::{normalize, Inn};
use inn_recon::source::contracts::ContractsPayloadSource;
use inn_recon::source::sanctions::SanctionsPayloadSource;
use inn_recon::source::RecordSource;
use inn_recon::types::CompanyName;

fn sanctions_pages() -> Vec<serde_json::Value> {
    vec![json!({
        "results": [
            {
                "id": "NK-pribor",
                "schema": "Company",
                "caption": "Pribor JSC",
                "properties": {
                    "innCode": ["7707083893"],
                    "topics": ["sanction"],
                    "alias": [{"lang": "rus", "value": "АО Приборный Завод"}]
                }
            },
            {
                "id": "NK-shadow",
                "schema": "Company",
                "caption": "Shadow Trading",
                "properties": {}
            }
        ]
    })]
}

fn contracts_pages() -> Vec<serde_json::Value> {
    vec![json!({
        "data": [
            {
                "regnum": "c-100",
                "customer_inn": "7707083893",
                "customer_name": "АО Прибор",
                "amount_rur": 1_000_000.0,
                "sign_date": "2020-06-01",
                "products": [{"okpd2_code": "25.40.11", "name": "tank parts"}],
                "supplier_inns": ["1111111111"],
                "supplier_names": ["ООО Поставщик"]
            },
            {
                "regnum": "c-101",
                "customer_inn": "7707083893",
                "customer_name": "АО Прибор",
                "amount_rur": 50_000.0,
                "sign_date": "2020-07-01",
                "products": [{"okpd2_code": "25.40.11", "name": "toy tank model"}],
                "supplier_inns": ["2222222222"],
                "supplier_names": ["ООО Игрушка"]
            },
            {
                "regnum": "c-102",
                "customer_inn": "7707083893",
                "customer_name": "АО Прибор",
                "amount_rur": 75_000.0,
                "sign_date": "2020-08-01",
                "products": [{"okpd2_code": "26.51.66", "name": "sensors"}],
                "supplier_inns": ["3333333333"],
                "supplier_names": ["АО Сенсор"]
            }
        ]
    })]
}

fn run_config() -> RunConfig {
    RunConfig {
        product_codes: vec!["25.40".to_string()],
        excluded_description_keywords: vec!["toy".to_string()],
        code_match: CodeMatch::Prefix,
        ..RunConfig::default()
    }
}

#[test]
fn full_pass_reconciles_both_registries() {
    let config = run_config();
    let sanctions = SanctionsPayloadSource::new(sanctions_pages(), config.sanctions_mapping());
    let contracts = ContractsPayloadSource::new(contracts_pages());

    let result = enrich(
        sanctions.records().expect("sanctions pages map"),
        contracts.records().expect("contracts pages map"),
        &config.filter_config(),
    )
    .expect("no identifier conflicts");

    // Pribor appears in both registries under one INN and merges.
    assert_eq!(result.records.len(), 1);
    let pribor = &result.records[0];
    assert_eq!(pribor.inn, normalize("7707083893"));
    assert_eq!(pribor.name, "Pribor JSC");
    assert!(pribor.aliases.contains(&"ао приборный завод".to_string()));
    assert!(pribor.sanctions_flags.contains("sanction"));
    assert_eq!(pribor.sources, vec!["sanctions".to_string(), "contracts".to_string()]);

    // The toy contract is keyword-excluded, the sensor contract is outside
    // the allowed code subtree; only c-100 survives.
    let ids: Vec<&str> = pribor
        .source_contracts
        .iter()
        .map(|item| item.contract_id.as_str())
        .collect();
    assert_eq!(ids, vec!["c-100"]);

    // Shadow Trading has no identifier anywhere.
    assert_eq!(result.unresolved.len(), 1);
    assert_eq!(result.unresolved[0].name, "Shadow Trading");
}

#[test]
fn manual_identifier_entry_resolves_the_remainder() {
    let config = run_config();
    let sanctions = SanctionsPayloadSource::new(sanctions_pages(), config.sanctions_mapping());
    let contracts = ContractsPayloadSource::new(contracts_pages());
    let result = enrich(
        sanctions.records().expect("sanctions pages map"),
        contracts.records().expect("contracts pages map"),
        &config.filter_config(),
    )
    .expect("no identifier conflicts");

    let assignments: IndexMap<CompanyName, Inn> = [(
        "Shadow Trading".to_string(),
        normalize("9876543210").expect("valid inn"),
    )]
    .into_iter()
    .collect();

    let resolved = resolve_manual(result.records, result.unresolved, &assignments)
        .expect("no conflicts after assignment");
    assert!(resolved.is_fully_resolved());
    assert_eq!(resolved.records.len(), 2);
}

#[test]
fn export_rows_summarize_the_enriched_set() {
    let config = run_config();
    let sanctions = SanctionsPayloadSource::new(sanctions_pages(), config.sanctions_mapping());
    let contracts = ContractsPayloadSource::new(contracts_pages());
    let result = enrich(
        sanctions.records().expect("sanctions pages map"),
        contracts.records().expect("contracts pages map"),
        &config.filter_config(),
    )
    .expect("no identifier conflicts");

    let rows: Vec<CompanyRow> = result.records.iter().map(CompanyRow::from_record).collect();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.inn.as_deref(), Some("7707083893"));
    assert_eq!(row.contract_count, 1);
    assert_eq!(row.contract_total, 1_000_000.0);
    assert_eq!(row.top_suppliers.len(), 1);
    assert_eq!(row.top_suppliers[0].name, "ООО Поставщик");
}

#[test]
fn record_cap_limits_a_test_run() {
    let config = RunConfig {
        record_cap: Some(1),
        ..run_config()
    };
    let sanctions = SanctionsPayloadSource::new(sanctions_pages(), config.sanctions_mapping());
    let records = config.apply_cap(sanctions.records().expect("sanctions pages map"));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Pribor JSC");
}
