use serde::{Deserialize, Serialize};

use super::super::domain::RecommendedAction;
use super::costs::DirectCosts;
use super::scenarios::ScenarioResult;
use super::societal::SocietalCosts;

const MAX_CONFIDENCE: f64 = 100.0;

/// Recommended strategy with the rule trail that produced its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub action: RecommendedAction,
    pub confidence: f64,
    pub reasoning: Vec<String>,
    pub suggested_steps: Vec<String>,
}

pub(crate) struct RecommendationInput<'a> {
    pub direct_costs: &'a DirectCosts,
    pub debt_amount: f64,
    pub success_probability: f64,
    pub societal_costs: &'a SocietalCosts,
    pub risk_score: u8,
    pub alternatives: &'a [ScenarioResult],
}

/// Picks the top-ranked alternative and scores how strongly the profile argues
/// against standard collection. `alternatives` must be non-empty and ranked.
pub(crate) fn recommend(input: RecommendationInput<'_>) -> Recommendation {
    let RecommendationInput {
        direct_costs,
        debt_amount,
        success_probability,
        societal_costs,
        risk_score,
        alternatives,
    } = input;

    let cost_to_debt_ratio = direct_costs.total / debt_amount;
    let best = &alternatives[0];

    let mut reasoning = Vec::new();
    let mut confidence = 0.0;

    if cost_to_debt_ratio > 10.0 && success_probability < 0.2 {
        reasoning.push(format!(
            "Invorderingskosten (€{}) zijn {}× de schuld (€{})",
            fixed(direct_costs.total, 0),
            fixed(cost_to_debt_ratio, 0),
            fixed(debt_amount, 2)
        ));
        confidence += 30.0;
    }

    if success_probability < 0.25 {
        reasoning.push(format!(
            "Succeskans inning is zeer laag ({}%)",
            fixed(success_probability * 100.0, 0)
        ));
        confidence += 25.0;
    }

    if risk_score > 60 {
        reasoning.push(format!(
            "Burger heeft hoog risicoprofiel voor escalatie (score: {risk_score}/100)"
        ));
        confidence += 20.0;
    }

    if societal_costs.total_societal_cost > 1000.0 {
        reasoning.push(format!(
            "Geschatte maatschappelijke kosten van €{} bij doorinnen",
            fixed(societal_costs.total_societal_cost, 0)
        ));
        confidence += 25.0;
    }

    if best.action == RecommendedAction::Forgive {
        reasoning.push(format!(
            "Kwijtschelding kost slechts €{} en voorkomt verdere schade",
            best.costs
        ));
    }

    Recommendation {
        action: best.action,
        confidence: f64::min(confidence, MAX_CONFIDENCE),
        reasoning,
        suggested_steps: suggested_steps(best.action),
    }
}

/// Consolidation and standard collection carry no checklist.
fn suggested_steps(action: RecommendedAction) -> Vec<String> {
    let steps: &[&str] = match action {
        RecommendedAction::Forgive => &[
            "Kwijtschelding goedkeuren",
            "Verstuur vriendelijke brief met uitleg",
            "Automatische doorverwijzing naar gemeentelijke schuldhulp",
            "Meld bij Early Warning System voor monitoring",
        ],
        RecommendedAction::PaymentPlan => &[
            "Bied betalingsregeling aan zonder juridische dreiging",
            "Flexibele termijnen gebaseerd op inkomen",
            "Geen extra kosten bij naleving",
        ],
        RecommendedAction::ReferToAssistance => &[
            "Doorverwijzing naar schuldhulpverlening",
            "Schuld on-hold tot traject loopt",
            "Coördineer met andere schuldeisers",
        ],
        RecommendedAction::Consolidate | RecommendedAction::CollectStandard => &[],
    };

    steps.iter().map(|step| step.to_string()).collect()
}

/// Fixed-point rendering with exact halves rounded away from zero.
fn fixed(value: f64, digits: i32) -> String {
    let scale = 10f64.powi(digits);
    format!("{:.*}", digits.max(0) as usize, (value * scale).round() / scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::collection::analysis::scenarios::alternatives;
    use crate::workflows::collection::analysis::societal::societal_costs;
    use crate::workflows::collection::domain::{CitizenProfile, IncomeSource};

    fn citizen() -> CitizenProfile {
        CitizenProfile {
            bsn: None,
            id: None,
            income: 1000.0,
            income_source: IncomeSource::BenefitSocial,
            other_debts_count: 0,
            in_debt_assistance: false,
            payment_history: Vec::new(),
        }
    }

    #[test]
    fn all_triggers_reach_full_confidence() {
        let direct = DirectCosts::standard();
        let societal = societal_costs(&citizen(), 90);
        let ranked = alternatives(10.0, 0.1, societal.total_societal_cost);

        let recommendation = recommend(RecommendationInput {
            direct_costs: &direct,
            debt_amount: 10.0,
            success_probability: 0.1,
            societal_costs: &societal,
            risk_score: 90,
            alternatives: &ranked,
        });

        assert_eq!(recommendation.action, RecommendedAction::Forgive);
        assert_eq!(recommendation.confidence, 100.0);
        assert_eq!(recommendation.reasoning.len(), 5);
        assert_eq!(
            recommendation.reasoning[0],
            "Invorderingskosten (€660) zijn 66× de schuld (€10.00)"
        );
        assert_eq!(recommendation.reasoning[1], "Succeskans inning is zeer laag (10%)");
        assert_eq!(
            recommendation.reasoning[4],
            "Kwijtschelding kost slechts €5 en voorkomt verdere schade"
        );
        assert_eq!(recommendation.suggested_steps.len(), 4);
    }

    #[test]
    fn quiet_profile_has_zero_confidence_and_no_reasoning() {
        let direct = DirectCosts::standard();
        let societal = societal_costs(&citizen(), 0);
        let ranked = alternatives(1000.0, 0.8, 0.0);

        let recommendation = recommend(RecommendationInput {
            direct_costs: &direct,
            debt_amount: 1000.0,
            success_probability: 0.8,
            societal_costs: &societal,
            risk_score: 0,
            alternatives: &ranked,
        });

        assert_eq!(recommendation.action, RecommendedAction::Consolidate);
        assert_eq!(recommendation.confidence, 0.0);
        assert!(recommendation.reasoning.is_empty());
        assert!(recommendation.suggested_steps.is_empty());
    }

    #[test]
    fn checklists_follow_the_recommended_action() {
        assert_eq!(suggested_steps(RecommendedAction::PaymentPlan).len(), 3);
        assert_eq!(suggested_steps(RecommendedAction::ReferToAssistance).len(), 3);
        assert!(suggested_steps(RecommendedAction::CollectStandard).is_empty());
    }

    #[test]
    fn exact_halves_round_up_in_reasoning() {
        let direct = DirectCosts::standard();
        let mut employed = citizen();
        employed.income_source = IncomeSource::Employment;
        let societal = societal_costs(&employed, 25);
        assert_eq!(societal.total_societal_cost, 3442.5);
        let ranked = alternatives(8.0, 0.05, societal.total_societal_cost);

        let recommendation = recommend(RecommendationInput {
            direct_costs: &direct,
            debt_amount: 8.0,
            success_probability: 0.05,
            societal_costs: &societal,
            risk_score: 25,
            alternatives: &ranked,
        });

        assert_eq!(
            recommendation.reasoning[0],
            "Invorderingskosten (€660) zijn 83× de schuld (€8.00)"
        );
        assert_eq!(recommendation.reasoning[1], "Succeskans inning is zeer laag (5%)");
        assert_eq!(
            recommendation.reasoning[2],
            "Geschatte maatschappelijke kosten van €3443 bij doorinnen"
        );
    }

    #[test]
    fn fixed_point_matches_decimal_rounding() {
        assert_eq!(fixed(82.5, 0), "83");
        assert_eq!(fixed(0.5, 0), "1");
        assert_eq!(fixed(8.125, 2), "8.13");
        assert_eq!(fixed(10.0, 2), "10.00");
    }
}
