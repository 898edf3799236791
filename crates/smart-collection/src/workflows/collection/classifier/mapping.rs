use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::super::domain::{DebtAnalysisRequest, DebtType, IncomeSource, RecommendedAction};

/// Body posted to the classification service's `/predict` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub debt_amount: f64,
    pub monthly_income: f64,
    pub income_source: &'static str,
    pub has_children: bool,
    pub in_debt_assistance: bool,
    pub other_debts_count: u32,
    pub debt_type: &'static str,
}

impl PredictionRequest {
    pub fn from_analysis(request: &DebtAnalysisRequest) -> Self {
        Self {
            debt_amount: request.debt.amount,
            monthly_income: request.citizen.income,
            income_source: income_source_code(&request.citizen.income_source),
            // Household composition is not part of the citizen profile yet.
            has_children: false,
            in_debt_assistance: request.citizen.in_debt_assistance,
            other_debts_count: request.citizen.other_debts_count,
            debt_type: debt_type_code(&request.debt.debt_type),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PredictionResponse {
    pub(crate) recommendation: String,
    pub(crate) confidence: f64,
    #[serde(default)]
    pub(crate) probabilities: BTreeMap<String, f64>,
    #[serde(default)]
    pub(crate) features_used: Map<String, Value>,
    #[serde(default)]
    pub(crate) ml_model_info: ModelInfo,
}

/// Model metadata; `accuracy` may be reported as the string "N/A".
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ModelInfo {
    #[serde(default)]
    pub(crate) accuracy: Value,
}

impl ModelInfo {
    pub(crate) fn accuracy(&self) -> f64 {
        self.accuracy.as_f64().unwrap_or(0.0)
    }
}

pub(crate) fn income_source_code(source: &IncomeSource) -> &'static str {
    match source {
        IncomeSource::Employment => "EMPLOYMENT",
        IncomeSource::BenefitUnemployment => "BENEFIT_UNEMPLOYMENT",
        IncomeSource::BenefitDisability => "BENEFIT_DISABILITY",
        IncomeSource::BenefitSocial => "BENEFIT_SOCIAL",
        IncomeSource::Pension => "PENSION",
        IncomeSource::SelfEmployed => "SELF_EMPLOYED",
        IncomeSource::None | IncomeSource::Other(_) => "OTHER",
    }
}

pub(crate) fn debt_type_code(debt_type: &DebtType) -> &'static str {
    match debt_type {
        DebtType::CakEigenBijdrage => "CAK_EIGEN_BIJDRAGE",
        DebtType::ZorgverzekeringPremie => "HEALTHCARE_INSURANCE",
        DebtType::Hondenbelasting | DebtType::Afvalstoffenheffing => "MUNICIPALITY",
        DebtType::Other(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "cak" => "CAK_EIGEN_BIJDRAGE",
            "healthcare" => "HEALTHCARE_INSURANCE",
            "tax" => "TAX",
            "municipality" => "MUNICIPALITY",
            "utilities" => "UTILITIES",
            _ => "OTHER",
        },
        DebtType::Parkeerboete
        | DebtType::BijzondereBijstand
        | DebtType::Studiefinanciering
        | DebtType::Verkeersboete => "OTHER",
    }
}

/// Labels the model was trained on; `REMINDER` and unknown labels fall back to
/// standard collection.
pub(crate) fn action_from_label(label: &str) -> RecommendedAction {
    match label.trim() {
        "FORGIVE" => RecommendedAction::Forgive,
        "PAYMENT_PLAN" => RecommendedAction::PaymentPlan,
        "REFER_TO_ASSISTANCE" => RecommendedAction::ReferToAssistance,
        _ => RecommendedAction::CollectStandard,
    }
}
