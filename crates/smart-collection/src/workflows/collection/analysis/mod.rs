mod costs;
mod factors;
mod recommendation;
mod scenarios;
mod societal;

pub use costs::DirectCosts;
pub use factors::SuccessFactors;
pub use recommendation::Recommendation;
pub use scenarios::ScenarioResult;
pub use societal::{
    DebtAssistanceCosts, DomesticViolenceCosts, EmploymentCosts, HealthcareCosts, LegalCosts,
    SocietalCosts,
};

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use tracing::debug;

use super::domain::DebtAnalysisRequest;
use super::report::{AnalysisReport, EstimatedSavings, FinancialAnalysis, SocietalImpact};
use recommendation::{recommend, RecommendationInput};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Stateless scoring engine turning a debt and debtor profile into an [`AnalysisReport`].
///
/// Every call is independent; the calculator holds no state and can be shared
/// across any number of request handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostCalculator;

impl CostCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, request: &DebtAnalysisRequest) -> AnalysisReport {
        self.analyze_at(request, Utc::now())
    }

    /// Runs the analysis with `now` as the reference instant for debt age,
    /// the report timestamp, and the analysis id.
    pub fn analyze_at(&self, request: &DebtAnalysisRequest, now: DateTime<Utc>) -> AnalysisReport {
        let debt_amount = request.debt.amount;

        let direct_costs = costs::direct_costs(debt_amount);
        let success_factors = factors::success_factors(request, now.date_naive());
        let risk_score = factors::risk_score(&request.citizen);
        let societal_costs = societal::societal_costs(&request.citizen, risk_score);

        let success_probability = success_factors.combined_probability;
        let expected_revenue = debt_amount * success_probability;
        let net_result = expected_revenue - direct_costs.total;
        let cost_to_debt_ratio = direct_costs.total / debt_amount;

        let alternatives = scenarios::alternatives(
            debt_amount,
            success_probability,
            societal_costs.total_societal_cost,
        );

        let recommendation = recommend(RecommendationInput {
            direct_costs: &direct_costs,
            debt_amount,
            success_probability,
            societal_costs: &societal_costs,
            risk_score,
            alternatives: &alternatives,
        });

        let chosen = alternatives
            .iter()
            .find(|scenario| scenario.action == recommendation.action)
            .unwrap_or(&alternatives[0]);
        let estimated_savings = EstimatedSavings::relative_to(&direct_costs, chosen);

        debug!(
            action = recommendation.action.label(),
            risk_score,
            confidence = recommendation.confidence,
            success_probability,
            "debt analysis completed"
        );

        AnalysisReport {
            analysis_id: analysis_id(now),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            financial_analysis: FinancialAnalysis {
                debt_amount,
                collection_costs: direct_costs,
                success_probability,
                expected_revenue,
                net_result,
                cost_to_debt_ratio,
            },
            success_factors,
            societal_impact: SocietalImpact {
                risk_score,
                estimated_costs: societal_costs,
                total_cost_to_debt_ratio: societal_costs.total_societal_cost / debt_amount,
            },
            alternatives,
            recommendation,
            estimated_savings,
        }
    }
}

fn analysis_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect();
    format!("A{}-{suffix}", now.timestamp_millis())
}
