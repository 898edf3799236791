//! Externalised costs of aggressive collection, loosely based on the IBO
//! problematic-debt cost estimates. Line items are descriptive; only the
//! category maximum multiplied by its probability enters the totals.

use serde::{Deserialize, Serialize};

use super::super::domain::CitizenProfile;

const HEALTHCARE_MAX: f64 = 3000.0;
const EMPLOYMENT_MAX: f64 = 5550.0;
const DEBT_ASSISTANCE_MAX: f64 = 7400.0;
const DOMESTIC_VIOLENCE_MAX: f64 = 6000.0;
const LEGAL_MAX: f64 = 3650.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthcareCosts {
    pub probability: f64,
    pub ggz_treatment: f64,
    pub gp_visits: f64,
    pub medication: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentCosts {
    pub probability: f64,
    pub sick_leave: f64,
    pub reduced_reintegration: f64,
    pub longer_benefit_period: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtAssistanceCosts {
    pub probability: f64,
    pub intake: f64,
    pub trajectory: f64,
    pub administration: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomesticViolenceCosts {
    pub probability: f64,
    pub police_costs: f64,
    pub shelter_costs: f64,
    pub total: f64,
}

/// Legal costs carry no exposed probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalCosts {
    pub legal_aid: f64,
    pub court_procedures: f64,
    pub enforcement: f64,
    pub total: f64,
}

/// Annualised societal cost expected when the debt is collected the standard way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocietalCosts {
    pub healthcare: HealthcareCosts,
    pub employment: EmploymentCosts,
    pub debt_assistance: DebtAssistanceCosts,
    pub domestic_violence: DomesticViolenceCosts,
    pub legal: LegalCosts,
    pub total_societal_cost: f64,
}

pub(crate) fn societal_costs(citizen: &CitizenProfile, risk_score: u8) -> SocietalCosts {
    let base_risk = f64::from(risk_score) / 100.0;

    let healthcare_probability = (base_risk * 0.5).min(0.4);
    let healthcare = HealthcareCosts {
        probability: healthcare_probability,
        ggz_treatment: 2400.0,
        gp_visits: 180.0,
        medication: 420.0,
        total: HEALTHCARE_MAX * healthcare_probability,
    };

    let employment_probability = if citizen.income_source.is_benefit_dependent() {
        (base_risk * 0.7).min(0.6)
    } else {
        (base_risk * 0.4).min(0.3)
    };
    let employment = EmploymentCosts {
        probability: employment_probability,
        sick_leave: 0.0,
        reduced_reintegration: 1200.0,
        longer_benefit_period: 4350.0,
        total: EMPLOYMENT_MAX * employment_probability,
    };

    let debt_assistance_probability = (base_risk * 0.9).min(0.8);
    let debt_assistance = DebtAssistanceCosts {
        probability: debt_assistance_probability,
        intake: 1800.0,
        trajectory: 3200.0,
        administration: 2400.0,
        total: DEBT_ASSISTANCE_MAX * debt_assistance_probability,
    };

    let domestic_violence_probability = (base_risk * 0.2).min(0.15);
    let domestic_violence = DomesticViolenceCosts {
        probability: domestic_violence_probability,
        police_costs: 1200.0,
        shelter_costs: 4800.0,
        total: DOMESTIC_VIOLENCE_MAX * domestic_violence_probability,
    };

    let legal = LegalCosts {
        legal_aid: 800.0,
        court_procedures: 2400.0,
        enforcement: 450.0,
        total: LEGAL_MAX * (base_risk * 0.6).min(0.5),
    };

    let total_societal_cost = healthcare.total
        + employment.total
        + debt_assistance.total
        + domestic_violence.total
        + legal.total;

    SocietalCosts {
        healthcare,
        employment,
        debt_assistance,
        domestic_violence,
        legal,
        total_societal_cost,
    }
}
