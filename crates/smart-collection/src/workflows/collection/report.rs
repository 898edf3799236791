use serde::{Deserialize, Serialize};

use super::analysis::{
    DirectCosts, Recommendation, ScenarioResult, SocietalCosts, SuccessFactors,
};
use super::domain::RecommendedAction;

/// Standard collection figures for the debt under analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAnalysis {
    pub debt_amount: f64,
    pub collection_costs: DirectCosts,
    pub success_probability: f64,
    pub expected_revenue: f64,
    pub net_result: f64,
    pub cost_to_debt_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocietalImpact {
    pub risk_score: u8,
    pub estimated_costs: SocietalCosts,
    pub total_cost_to_debt_ratio: f64,
}

/// Savings of the recommended strategy relative to standard collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatedSavings {
    pub direct: f64,
    pub societal: f64,
    pub total: f64,
}

impl EstimatedSavings {
    pub(crate) fn relative_to(direct_costs: &DirectCosts, chosen: &ScenarioResult) -> Self {
        let direct = direct_costs.total - chosen.costs;
        let societal = chosen.societal_benefit;
        Self {
            direct,
            societal,
            total: direct + societal,
        }
    }
}

/// Complete cost-benefit analysis of one debt. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub analysis_id: String,
    pub timestamp: String,
    pub financial_analysis: FinancialAnalysis,
    pub success_factors: SuccessFactors,
    pub societal_impact: SocietalImpact,
    pub alternatives: Vec<ScenarioResult>,
    pub recommendation: Recommendation,
    pub estimated_savings: EstimatedSavings,
}

impl AnalysisReport {
    pub fn scenario_for(&self, action: RecommendedAction) -> Option<&ScenarioResult> {
        self.alternatives
            .iter()
            .find(|scenario| scenario.action == action)
    }

    /// The alternative backing the engine's own recommendation.
    pub fn chosen_scenario(&self) -> Option<&ScenarioResult> {
        self.scenario_for(self.recommendation.action)
    }
}
