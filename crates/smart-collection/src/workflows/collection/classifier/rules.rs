use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use super::super::domain::{DebtAnalysisRequest, RecommendedAction};
use super::{ClassifierError, ClassifierInsights, ClassifierVerdict, DebtClassifier};

const FALLBACK_CONFIDENCE: f64 = 0.6;

/// Local rule table used whenever the model service cannot answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedClassifier;

impl RuleBasedClassifier {
    pub fn verdict(&self, request: &DebtAnalysisRequest) -> ClassifierVerdict {
        let debt = &request.debt;
        let citizen = &request.citizen;
        let debt_to_income_ratio = debt.amount / citizen.income;

        let recommendation = if debt.amount < 50.0 && debt_to_income_ratio < 0.05 {
            RecommendedAction::Forgive
        } else if citizen.in_debt_assistance || debt_to_income_ratio > 1.0 {
            RecommendedAction::ReferToAssistance
        } else if citizen.income_source.is_benefit_dependent() {
            RecommendedAction::PaymentPlan
        } else {
            RecommendedAction::CollectStandard
        };

        let mut features = Map::new();
        features.insert("debt_amount".to_string(), json!(debt.amount));
        features.insert("monthly_income".to_string(), json!(citizen.income));
        features.insert(
            "debt_to_income_ratio".to_string(),
            json!(debt_to_income_ratio),
        );
        features.insert("fallback_mode".to_string(), Value::Bool(true));

        ClassifierVerdict {
            recommendation,
            confidence: FALLBACK_CONFIDENCE,
            insights: ClassifierInsights {
                probabilities: BTreeMap::new(),
                features,
                model_accuracy: 0.0,
            },
            fallback: true,
        }
    }
}

impl DebtClassifier for RuleBasedClassifier {
    async fn classify(
        &self,
        request: &DebtAnalysisRequest,
    ) -> Result<ClassifierVerdict, ClassifierError> {
        Ok(self.verdict(request))
    }

    async fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::collection::domain::{
        CitizenProfile, DebtRecord, DebtType, IncomeSource,
    };

    fn request(amount: f64, income: f64, source: IncomeSource, assisted: bool) -> DebtAnalysisRequest {
        DebtAnalysisRequest {
            debt: DebtRecord {
                amount,
                debt_type: DebtType::Hondenbelasting,
                origin_date: None,
                due_date: None,
                id: None,
            },
            citizen: CitizenProfile {
                bsn: None,
                id: None,
                income,
                income_source: source,
                other_debts_count: 0,
                in_debt_assistance: assisted,
                payment_history: Vec::new(),
            },
        }
    }

    #[test]
    fn small_relative_debt_is_forgiven() {
        let verdict = RuleBasedClassifier.verdict(&request(20.0, 2000.0, IncomeSource::Employment, false));
        assert_eq!(verdict.recommendation, RecommendedAction::Forgive);
        assert_eq!(verdict.confidence, 0.6);
        assert!(verdict.insights.probabilities.is_empty());
        assert_eq!(verdict.insights.features.get("fallback_mode"), Some(&Value::Bool(true)));
        assert!(verdict.fallback);
    }

    #[test]
    fn assistance_or_heavy_burden_is_referred() {
        let assisted = RuleBasedClassifier.verdict(&request(80.0, 2000.0, IncomeSource::Employment, true));
        assert_eq!(assisted.recommendation, RecommendedAction::ReferToAssistance);

        let heavy = RuleBasedClassifier.verdict(&request(1500.0, 1000.0, IncomeSource::Employment, false));
        assert_eq!(heavy.recommendation, RecommendedAction::ReferToAssistance);
    }

    #[test]
    fn benefit_income_gets_payment_plan_otherwise_standard() {
        let benefit = RuleBasedClassifier.verdict(&request(80.0, 1200.0, IncomeSource::BenefitUnemployment, false));
        assert_eq!(benefit.recommendation, RecommendedAction::PaymentPlan);

        let employed = RuleBasedClassifier.verdict(&request(80.0, 1200.0, IncomeSource::Employment, false));
        assert_eq!(employed.recommendation, RecommendedAction::CollectStandard);
    }
}
