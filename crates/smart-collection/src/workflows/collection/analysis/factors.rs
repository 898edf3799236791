use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::domain::{CitizenProfile, DebtAnalysisRequest};

const INCOME_CEILING: f64 = 3000.0;
const LATENESS_HORIZON_DAYS: f64 = 90.0;
const DEBT_AGE_HORIZON_DAYS: f64 = 365.0;
const OTHER_DEBT_PENALTY: f64 = 0.15;
/// Assumed lateness for a citizen without payment history when estimating success.
const UNKNOWN_HISTORY_DAYS_LATE: f64 = 30.0;

pub(crate) const MIN_PROBABILITY: f64 = 0.05;
pub(crate) const MAX_PROBABILITY: f64 = 0.95;
pub(crate) const MAX_RISK_SCORE: u8 = 100;

/// Sub-scores in `[0, 1]` feeding the collection success estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessFactors {
    pub citizen_income: f64,
    pub payment_history: f64,
    pub other_debts: f64,
    pub debt_age: f64,
    pub combined_probability: f64,
}

pub(crate) fn success_factors(request: &DebtAnalysisRequest, today: NaiveDate) -> SuccessFactors {
    let citizen = &request.citizen;

    let citizen_income = (citizen.income / INCOME_CEILING).min(1.0);

    let avg_days_late = citizen
        .average_days_late()
        .unwrap_or(UNKNOWN_HISTORY_DAYS_LATE);
    let payment_history = (1.0 - avg_days_late / LATENESS_HORIZON_DAYS).max(0.0);

    let other_debts = (1.0 - f64::from(citizen.other_debts_count) * OTHER_DEBT_PENALTY).max(0.0);

    let overdue = days_overdue(request.debt.due_date, today);
    let debt_age = (1.0 - overdue as f64 / DEBT_AGE_HORIZON_DAYS).max(0.0);

    let combined = citizen_income * 0.3 + payment_history * 0.3 + other_debts * 0.25 + debt_age * 0.15;

    SuccessFactors {
        citizen_income,
        payment_history,
        other_debts,
        debt_age,
        combined_probability: combined.clamp(MIN_PROBABILITY, MAX_PROBABILITY),
    }
}

/// Whole days since the due date; zero for future or unknown due dates.
pub(crate) fn days_overdue(due_date: Option<NaiveDate>, today: NaiveDate) -> i64 {
    due_date
        .map(|due| (today - due).num_days().max(0))
        .unwrap_or(0)
}

/// Additive vulnerability score capped at [`MAX_RISK_SCORE`].
pub(crate) fn risk_score(citizen: &CitizenProfile) -> u8 {
    let mut score: u32 = 0;

    if citizen.income < 1500.0 {
        score += 30;
    } else if citizen.income < 2000.0 {
        score += 15;
    }

    score += citizen.other_debts_count.saturating_mul(10).min(30);

    if citizen.in_debt_assistance {
        score += 20;
    }

    // Empty history counts as punctual here, unlike the success estimate.
    let avg_days_late = citizen.average_days_late().unwrap_or(0.0);
    if avg_days_late > 30.0 {
        score += 15;
    } else if avg_days_late > 14.0 {
        score += 10;
    }

    if citizen.income_source.is_benefit_dependent() {
        score += 15;
    }

    score.min(u32::from(MAX_RISK_SCORE)) as u8
}
