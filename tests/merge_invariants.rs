use pretty_assertions::assert_eq;

use inn_recon::data::{CompanyRecord, ContractLineItem};
use inn_recon::dedupe::deduplicate;
use inn_recon::filter::{filter_contracts, FilterConfig};
use inn_recon::inn::{normalize, Inn};
use inn_recon::merge::merge;
use inn_recon::richness::score;
use inn_recon::ReconError;

fn inn(raw: &str) -> Inn {
    normalize(raw).expect("valid inn fixture")
}

fn build_record(source: &str, name: &str, raw_inn: Option<&str>) -> CompanyRecord {
    let mut record = CompanyRecord::named(source, name);
    record.inn = raw_inn.map(inn);
    record
}

fn build_item(contract_id: &str, code: &str, description: &str) -> ContractLineItem {
    ContractLineItem {
        contract_id: contract_id.to_string(),
        okpd2_code: code.to_string(),
        supplier_inn: "7707083893".to_string(),
        amount: 500.0,
        description: description.to_string(),
        sign_date: None,
    }
}

#[test]
fn merging_a_record_with_itself_changes_nothing() {
    let mut record = build_record("sanctions", "Acme LLC", Some("1234567890"));
    record.push_alias("acme");
    record.sanctions_flags.insert("sanction".to_string());
    record.source_contracts.push(build_item("c-1", "25.40.11", "tank parts"));
    record
        .extra_fields
        .insert("entity_id".to_string(), "NK-1".to_string());

    let merged = merge(&record, &record).expect("identical identifiers");
    assert_eq!(merged, record);
}

#[test]
fn merge_result_does_not_depend_on_argument_order() {
    let mut a = build_record("sanctions", "Acme LLC", Some("1234567890"));
    a.push_alias("acme");
    a.extra_fields
        .insert("schema".to_string(), "LegalEntity".to_string());
    let mut b = build_record("contracts", "Acme", Some("1234567890"));
    b.source_contracts.push(build_item("c-1", "25.40.11", "tank parts"));
    b.extra_fields
        .insert("schema".to_string(), "Company".to_string());

    let ab = merge(&a, &b).expect("no conflict");
    let ba = merge(&b, &a).expect("no conflict");
    assert_eq!(ab, ba);
}

#[test]
fn richer_name_and_aliases_survive_the_merge() {
    // One source knows the proper name, the other only aliases.
    let named = build_record("sanctions", "Acme LLC", Some("1234567890"));
    let mut aliased = build_record("contracts", "", Some("1234567890"));
    aliased.push_alias("акционерное общество");
    aliased.push_alias("ао прибор");

    let merged = merge(&named, &aliased).expect("no conflict");
    assert_eq!(merged.name, "Acme LLC");
    assert_eq!(merged.aliases.len(), 2);
}

#[test]
fn populating_fields_never_lowers_the_score() {
    let mut record = build_record("sanctions", "Acme LLC", Some("1234567890"));
    let mut previous = score(&record);
    record.push_alias("acme");
    assert!(score(&record) >= previous);

    previous = score(&record);
    record.source_contracts.push(build_item("c-1", "25.40.11", "tank parts"));
    assert!(score(&record) >= previous);
}

#[test]
fn deduplicated_output_never_repeats_an_identifier() {
    let records = vec![
        build_record("sanctions", "Acme LLC", Some("1234567890")),
        build_record("contracts", "ACME", Some("1234567890")),
        build_record("sanctions", "Acme branch", Some("1234567890")),
        build_record("contracts", "Other Co", Some("9876543210")),
        build_record("contracts", "No Id Co", None),
    ];

    let deduped = deduplicate(records).expect("no conflicts");
    let mut identifiers: Vec<String> = deduped
        .iter()
        .filter_map(|record| record.inn.as_ref().map(|inn| inn.as_str().to_string()))
        .collect();
    let before = identifiers.len();
    identifiers.sort();
    identifiers.dedup();
    assert_eq!(identifiers.len(), before);
}

#[test]
fn same_name_different_identifiers_stay_apart_without_error() {
    let records = vec![
        build_record("sanctions", "A", Some("1111111111")),
        build_record("contracts", "A", Some("2222222222")),
    ];
    let deduped = deduplicate(records).expect("never paired, never conflicts");
    assert_eq!(deduped.len(), 2);

    // Explicitly pairing them is the only way to surface the conflict.
    let a = build_record("sanctions", "A", Some("1111111111"));
    let b = build_record("contracts", "A", Some("2222222222"));
    let err = merge(&a, &b).expect_err("explicit pairing conflicts");
    assert!(matches!(err, ReconError::IdentifierConflict { .. }));
}

#[test]
fn empty_filter_config_is_a_pass_through() {
    let items = vec![
        build_item("c-1", "25.40.11", "tank parts"),
        build_item("c-2", "26.51.66", "sensors"),
        build_item("c-3", "32.40.39", "toy tank model"),
    ];
    let kept = filter_contracts(&items, &FilterConfig::default());
    assert_eq!(kept, items);
}

#[test]
fn acme_scenario_keeps_the_name_and_both_aliases() {
    let named = build_record("sanctions", "Acme LLC", Some("1234567890"));
    let mut aliased = build_record("contracts", "", Some("1234567890"));
    aliased.push_alias("first alias");
    aliased.push_alias("second alias");

    let deduped = deduplicate(vec![named, aliased]).expect("no conflicts");
    assert_eq!(deduped.len(), 1);
    assert_eq!(deduped[0].name, "Acme LLC");
    assert_eq!(
        deduped[0].aliases,
        vec!["first alias".to_string(), "second alias".to_string()]
    );
}
