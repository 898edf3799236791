use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::super::domain::RecommendedAction;

/// Financial and societal outcome of one non-standard collection strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub action: RecommendedAction,
    pub costs: f64,
    pub expected_revenue: f64,
    pub net_result: f64,
    pub societal_benefit: f64,
    pub total_benefit: f64,
    /// Display hint only; the recommendation is always the top-ranked scenario.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended: Option<bool>,
}

struct Strategy {
    action: RecommendedAction,
    costs: f64,
    societal_share: f64,
}

impl Strategy {
    fn evaluate(&self, expected_revenue: f64, total_societal_cost: f64) -> ScenarioResult {
        let net_result = expected_revenue - self.costs;
        let societal_benefit = total_societal_cost * self.societal_share;

        ScenarioResult {
            action: self.action,
            costs: self.costs,
            expected_revenue,
            net_result,
            societal_benefit,
            total_benefit: net_result + societal_benefit,
            recommended: None,
        }
    }
}

/// Evaluates the four alternatives and ranks them by total benefit, best first.
/// Ties keep construction order.
pub(crate) fn alternatives(
    debt_amount: f64,
    success_probability: f64,
    total_societal_cost: f64,
) -> Vec<ScenarioResult> {
    let payment_plan = Strategy {
        action: RecommendedAction::PaymentPlan,
        costs: 40.0,
        societal_share: 0.4,
    }
    .evaluate(
        debt_amount * (success_probability + 0.15).min(0.6),
        total_societal_cost,
    );

    let consolidation = Strategy {
        action: RecommendedAction::Consolidate,
        costs: 20.0,
        societal_share: 0.3,
    }
    .evaluate(debt_amount * (success_probability + 0.1), total_societal_cost);

    let mut forgiveness = Strategy {
        action: RecommendedAction::Forgive,
        costs: 5.0,
        societal_share: 1.0,
    }
    .evaluate(0.0, total_societal_cost);
    forgiveness.recommended = Some(true);

    let referral = Strategy {
        action: RecommendedAction::ReferToAssistance,
        costs: 10.0,
        societal_share: 0.6,
    }
    .evaluate(debt_amount * 0.3, total_societal_cost);

    let mut ranked = vec![payment_plan, consolidation, forgiveness, referral];
    ranked.sort_by(|a, b| {
        b.total_benefit
            .partial_cmp(&a.total_benefit)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}
