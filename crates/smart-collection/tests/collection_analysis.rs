use chrono::{TimeZone, Utc};
use serde_json::json;

use smart_collection::workflows::collection::{
    sample_cases, CollectionService, CostCalculator, DebtAnalysisRequest, PortfolioFilters,
    RecommendedAction, RuleBasedClassifier,
};

fn parking_fine() -> DebtAnalysisRequest {
    serde_json::from_value(json!({
        "debt": {
            "amount": 35,
            "type": "parkeerboete",
            "originDate": "2024-10-10",
            "dueDate": "2024-10-25"
        },
        "citizen": {
            "bsn": "456456456",
            "income": 3200,
            "incomeSource": "employment",
            "otherDebtsCount": 0,
            "inDebtAssistance": false,
            "paymentHistory": []
        }
    }))
    .expect("request deserializes")
}

#[test]
fn wire_request_flows_through_engine() {
    let now = Utc
        .with_ymd_and_hms(2026, 1, 15, 10, 0, 0)
        .single()
        .expect("valid instant");
    let report = CostCalculator::new().analyze_at(&parking_fine(), now);

    assert_eq!(report.recommendation.action, RecommendedAction::Consolidate);
    assert!(report.analysis_id.starts_with('A'));

    let body = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(body["timestamp"], "2026-01-15T10:00:00.000Z");
    assert_eq!(body["recommendation"]["action"], "consolidate");
    assert_eq!(body["financialAnalysis"]["collectionCosts"]["total"], 660.0);
    assert_eq!(body["societalImpact"]["riskScore"], 0);
    assert_eq!(body["alternatives"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["estimatedSavings"]["total"], 640.0);
}

#[tokio::test]
async fn rule_table_drives_enhanced_analysis_without_model_service() {
    let service = CollectionService::new(RuleBasedClassifier, sample_cases());

    let enhanced = service.analyze_enhanced(&parking_fine()).await;

    // 35 euro against 3200 income stays under both forgiveness thresholds.
    assert_eq!(enhanced.report.recommendation.action, RecommendedAction::Forgive);
    assert!((enhanced.report.recommendation.confidence - 60.0).abs() < 1e-9);
    assert!(enhanced.ml_enhanced);
    assert!(service.classifier_available().await);
}

#[test]
fn sample_portfolio_summary_is_consistent() {
    let service = CollectionService::new(RuleBasedClassifier, sample_cases());

    let report = service.bulk_analyze(&PortfolioFilters::default());
    let breakdown = &report.recommendations;
    let counted = breakdown.forgive.count
        + breakdown.payment_plan.count
        + breakdown.consolidate.count
        + breakdown.collect_standard.count
        + breakdown.refer_to_assistance.count;

    assert_eq!(report.summary.total_debts, 109);
    assert_eq!(counted, report.summary.total_debts);
    assert!(report.top_wasteful_debt_types.len() <= 10);
    assert!(report
        .top_wasteful_debt_types
        .windows(2)
        .all(|pair| pair[0].loss >= pair[1].loss));

    let savings = &report.impact.savings;
    assert!((savings.per_year - savings.total * 12.0).abs() < 1e-6);
}
