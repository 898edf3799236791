mod samples;

pub use samples::sample_cases;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::analysis::CostCalculator;
use super::domain::{DebtAnalysisRequest, RecommendedAction};
use super::report::AnalysisReport;

const TRADITIONAL_COST_PER_CASE: f64 = 73.0;
const TRADITIONAL_RECOVERY_RATE: f64 = 0.3;
const TRADITIONAL_SOCIETAL_SHARE: f64 = 0.7;
const MONTHS_PER_YEAR: f64 = 12.0;
const WASTEFUL_TYPES_SHOWN: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioFilters {
    pub amount_less_than: f64,
    pub limit: usize,
}

impl Default for PortfolioFilters {
    fn default() -> Self {
        Self {
            amount_less_than: 100.0,
            limit: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_debts: usize,
    pub total_amount: f64,
    pub average_amount: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgivenessBreakdown {
    pub count: usize,
    pub total_amount: f64,
    pub estimated_costs: f64,
    pub estimated_savings: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionBreakdown {
    pub count: usize,
    pub total_amount: f64,
    pub estimated_costs: f64,
    pub expected_revenue: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationBreakdown {
    pub forgive: ForgivenessBreakdown,
    pub payment_plan: CollectionBreakdown,
    pub consolidate: CollectionBreakdown,
    pub collect_standard: CollectionBreakdown,
    pub refer_to_assistance: CollectionBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraditionalApproach {
    pub collection_costs: f64,
    pub expected_revenue: f64,
    pub net_loss: f64,
    pub societal_costs: f64,
    pub total_loss: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartCollectionApproach {
    pub collection_costs: f64,
    pub expected_revenue: f64,
    pub net_profit: f64,
    pub societal_costs_prevented: f64,
    pub total_benefit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSavings {
    pub direct: f64,
    pub societal: f64,
    pub total: f64,
    pub per_year: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioImpact {
    pub traditional_approach: TraditionalApproach,
    pub smart_collection_approach: SmartCollectionApproach,
    pub savings: PortfolioSavings,
}

/// Loss made by standard collection on one debt category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtTypeLoss {
    #[serde(rename = "type")]
    pub debt_type: String,
    pub count: usize,
    pub avg_amount: f64,
    pub total_costs: f64,
    pub expected_revenue: f64,
    pub loss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub summary: PortfolioSummary,
    pub recommendations: RecommendationBreakdown,
    pub impact: PortfolioImpact,
    pub top_wasteful_debt_types: Vec<DebtTypeLoss>,
}

/// Runs the engine over a whole portfolio and compares standard collection
/// with following every recommendation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortfolioAnalyzer {
    calculator: CostCalculator,
}

impl PortfolioAnalyzer {
    pub fn new(calculator: CostCalculator) -> Self {
        Self { calculator }
    }

    pub fn analyze(
        &self,
        cases: &[DebtAnalysisRequest],
        filters: &PortfolioFilters,
    ) -> PortfolioReport {
        self.analyze_at(cases, filters, Utc::now())
    }

    pub fn analyze_at(
        &self,
        cases: &[DebtAnalysisRequest],
        filters: &PortfolioFilters,
        now: DateTime<Utc>,
    ) -> PortfolioReport {
        let selected: Vec<&DebtAnalysisRequest> = cases
            .iter()
            .filter(|case| case.debt.amount < filters.amount_less_than)
            .take(filters.limit)
            .collect();

        let analyses: Vec<(&DebtAnalysisRequest, AnalysisReport)> = selected
            .into_iter()
            .map(|case| (case, self.calculator.analyze_at(case, now)))
            .collect();

        let summary = summarize(&analyses);
        info!(
            total_debts = summary.total_debts,
            total_amount = summary.total_amount,
            "portfolio analysis completed"
        );

        PortfolioReport {
            summary,
            recommendations: breakdown(&analyses),
            impact: impact(&analyses),
            top_wasteful_debt_types: wasteful_debt_types(&analyses),
        }
    }
}

fn summarize(analyses: &[(&DebtAnalysisRequest, AnalysisReport)]) -> PortfolioSummary {
    let total_debts = analyses.len();
    let total_amount: f64 = analyses
        .iter()
        .map(|(_, report)| report.financial_analysis.debt_amount)
        .sum();
    let average_amount = if total_debts == 0 {
        0.0
    } else {
        total_amount / total_debts as f64
    };

    PortfolioSummary {
        total_debts,
        total_amount,
        average_amount,
    }
}

fn per_case_cost(action: RecommendedAction) -> f64 {
    match action {
        RecommendedAction::Forgive => 5.0,
        RecommendedAction::PaymentPlan => 40.0,
        RecommendedAction::Consolidate => 20.0,
        RecommendedAction::CollectStandard => TRADITIONAL_COST_PER_CASE,
        RecommendedAction::ReferToAssistance => 10.0,
    }
}

fn breakdown(analyses: &[(&DebtAnalysisRequest, AnalysisReport)]) -> RecommendationBreakdown {
    let mut totals = RecommendationBreakdown::default();

    for (_, report) in analyses {
        let action = report.recommendation.action;
        let amount = report.financial_analysis.debt_amount;
        let cost = per_case_cost(action);

        match action {
            RecommendedAction::Forgive => {
                let forgive = &mut totals.forgive;
                forgive.count += 1;
                forgive.total_amount += amount;
                forgive.estimated_costs += cost;
                forgive.estimated_savings += report.estimated_savings.total;
            }
            RecommendedAction::CollectStandard => tally(
                &mut totals.collect_standard,
                amount,
                cost,
                report.financial_analysis.expected_revenue,
            ),
            RecommendedAction::PaymentPlan => tally(
                &mut totals.payment_plan,
                amount,
                cost,
                scenario_revenue(report),
            ),
            RecommendedAction::Consolidate => tally(
                &mut totals.consolidate,
                amount,
                cost,
                scenario_revenue(report),
            ),
            RecommendedAction::ReferToAssistance => tally(
                &mut totals.refer_to_assistance,
                amount,
                cost,
                scenario_revenue(report),
            ),
        }
    }

    totals
}

fn tally(bucket: &mut CollectionBreakdown, amount: f64, cost: f64, revenue: f64) {
    bucket.count += 1;
    bucket.total_amount += amount;
    bucket.estimated_costs += cost;
    bucket.expected_revenue += revenue;
}

fn scenario_revenue(report: &AnalysisReport) -> f64 {
    report
        .chosen_scenario()
        .map_or(0.0, |scenario| scenario.expected_revenue)
}

fn impact(analyses: &[(&DebtAnalysisRequest, AnalysisReport)]) -> PortfolioImpact {
    let mut traditional_revenue = 0.0;
    let mut traditional_societal = 0.0;
    let mut smart_costs = 0.0;
    let mut smart_revenue = 0.0;
    let mut prevented = 0.0;

    for (_, report) in analyses {
        traditional_revenue += report.financial_analysis.debt_amount * TRADITIONAL_RECOVERY_RATE;
        traditional_societal += report.societal_impact.estimated_costs.total_societal_cost
            * TRADITIONAL_SOCIETAL_SHARE;

        if let Some(chosen) = report.chosen_scenario() {
            smart_costs += chosen.costs;
            smart_revenue += chosen.expected_revenue;
            prevented += chosen.societal_benefit;
        }
    }

    let traditional_costs = analyses.len() as f64 * TRADITIONAL_COST_PER_CASE;
    let direct = traditional_costs - smart_costs;
    let total = direct + prevented;

    PortfolioImpact {
        traditional_approach: TraditionalApproach {
            collection_costs: traditional_costs,
            expected_revenue: traditional_revenue,
            net_loss: traditional_revenue - traditional_costs,
            societal_costs: traditional_societal,
            total_loss: traditional_revenue - traditional_costs - traditional_societal,
        },
        smart_collection_approach: SmartCollectionApproach {
            collection_costs: smart_costs,
            expected_revenue: smart_revenue,
            net_profit: smart_revenue - smart_costs,
            societal_costs_prevented: prevented,
            total_benefit: smart_revenue - smart_costs + prevented,
        },
        savings: PortfolioSavings {
            direct,
            societal: prevented,
            total,
            per_year: total * MONTHS_PER_YEAR,
        },
    }
}

#[derive(Default)]
struct TypeTotals {
    count: usize,
    amount: f64,
    costs: f64,
    revenue: f64,
}

fn wasteful_debt_types(analyses: &[(&DebtAnalysisRequest, AnalysisReport)]) -> Vec<DebtTypeLoss> {
    let mut per_type: BTreeMap<String, TypeTotals> = BTreeMap::new();

    for (case, report) in analyses {
        let totals = per_type
            .entry(case.debt.debt_type.as_str().to_string())
            .or_default();
        totals.count += 1;
        totals.amount += report.financial_analysis.debt_amount;
        totals.costs += report.financial_analysis.collection_costs.total;
        totals.revenue += report.financial_analysis.expected_revenue;
    }

    let mut losses: Vec<DebtTypeLoss> = per_type
        .into_iter()
        .map(|(debt_type, totals)| DebtTypeLoss {
            debt_type,
            count: totals.count,
            avg_amount: totals.amount / totals.count as f64,
            total_costs: totals.costs,
            expected_revenue: totals.revenue,
            loss: totals.costs - totals.revenue,
        })
        .collect();

    losses.sort_by(|a, b| {
        b.loss
            .partial_cmp(&a.loss)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    losses.truncate(WASTEFUL_TYPES_SHOWN);
    losses
}
