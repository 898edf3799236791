use std::path::PathBuf;

use smart_collection::workflows::statistics::{
    InMemoryStatistics, StatisticsError, StatisticsStore,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/kenmerken_sample.csv")
}

fn store() -> InMemoryStatistics {
    InMemoryStatistics::from_path(fixture_path()).expect("fixture imports")
}

#[test]
fn import_reads_every_row() {
    let store = store();
    assert_eq!(store.len(), 15);
    assert!(!store.is_empty());
}

#[test]
fn dashboard_combines_all_views_for_year() {
    let dashboard = store().dashboard("2024-01").expect("dashboard builds");

    assert_eq!(dashboard.year, "2024-01");
    assert_eq!(dashboard.total_debtors, 700_000);

    let themas: Vec<&str> = dashboard
        .overview
        .iter()
        .map(|entry| entry.thema.as_str())
        .collect();
    assert_eq!(
        themas,
        vec!["Sociale zekerheid", "Inkomen", "Persoon", "Huishouden"]
    );
    assert_eq!(dashboard.overview[0].total_records, 6);
    assert!((dashboard.overview[1].avg_percentage - 50.0).abs() < 1e-9);

    assert_eq!(dashboard.vulnerable_groups.len(), 3);
    assert_eq!(dashboard.vulnerable_groups[0].label, "Laag huishoudinkomen");
    assert_eq!(dashboard.vulnerable_groups[0].aantal, Some(270_000));

    assert_eq!(dashboard.income.low_income, 38.4);
    assert_eq!(dashboard.income.benefits.len(), 2);
    assert_eq!(
        dashboard.income.benefits[0].benefit_type,
        "Bijstandsuitkering in huishouden"
    );
    assert_eq!(dashboard.income.average_income[0].percentage, 61.6);

    let ages: Vec<&str> = dashboard
        .demographics
        .age
        .iter()
        .map(|share| share.range.as_str())
        .collect();
    assert_eq!(ages, vec!["1 25 tot 35 jaar", "2 35 tot 45 jaar"]);
    assert_eq!(
        dashboard.demographics.household[0].household_type,
        "Eenpersoonshuishouden"
    );
    assert_eq!(dashboard.demographics.origin.len(), 1);

    let municipalities: Vec<&str> = dashboard
        .top_municipalities
        .iter()
        .map(|entry| entry.gemeentenaam.as_str())
        .collect();
    assert_eq!(municipalities, vec!["Amsterdam", "Rotterdam", "Utrecht"]);
}

#[test]
fn other_years_are_isolated() {
    let store = store();

    assert_eq!(store.total_debtors("2023-01").expect("total"), 250_000);
    assert!(store
        .top_municipalities("2023-01", 10)
        .expect("municipalities")
        .is_empty());
    assert_eq!(store.income("2023-01").expect("income").low_income, 36.9);
}

#[test]
fn missing_export_is_an_io_error() {
    let result = InMemoryStatistics::from_path("does/not/exist.csv");
    assert!(matches!(result, Err(StatisticsError::Io(_))));
}
