use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Category of the outstanding government debt.
///
/// Unknown strings from untyped callers are kept as [`DebtType::Other`] instead of
/// failing the request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DebtType {
    CakEigenBijdrage,
    Parkeerboete,
    Hondenbelasting,
    Afvalstoffenheffing,
    BijzondereBijstand,
    Studiefinanciering,
    ZorgverzekeringPremie,
    Verkeersboete,
    Other(String),
}

impl DebtType {
    pub const KNOWN: [DebtType; 8] = [
        DebtType::CakEigenBijdrage,
        DebtType::Parkeerboete,
        DebtType::Hondenbelasting,
        DebtType::Afvalstoffenheffing,
        DebtType::BijzondereBijstand,
        DebtType::Studiefinanciering,
        DebtType::ZorgverzekeringPremie,
        DebtType::Verkeersboete,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            DebtType::CakEigenBijdrage => "cak_eigen_bijdrage",
            DebtType::Parkeerboete => "parkeerboete",
            DebtType::Hondenbelasting => "hondenbelasting",
            DebtType::Afvalstoffenheffing => "afvalstoffenheffing",
            DebtType::BijzondereBijstand => "bijzondere_bijstand",
            DebtType::Studiefinanciering => "studiefinanciering",
            DebtType::ZorgverzekeringPremie => "zorgverzekering_premie",
            DebtType::Verkeersboete => "verkeersboete",
            DebtType::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for DebtType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "cak_eigen_bijdrage" => DebtType::CakEigenBijdrage,
            "parkeerboete" => DebtType::Parkeerboete,
            "hondenbelasting" => DebtType::Hondenbelasting,
            "afvalstoffenheffing" => DebtType::Afvalstoffenheffing,
            "bijzondere_bijstand" => DebtType::BijzondereBijstand,
            "studiefinanciering" => DebtType::Studiefinanciering,
            "zorgverzekering_premie" => DebtType::ZorgverzekeringPremie,
            "verkeersboete" => DebtType::Verkeersboete,
            _ => DebtType::Other(value),
        }
    }
}

impl From<DebtType> for String {
    fn from(value: DebtType) -> Self {
        match value {
            DebtType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Primary source of the citizen's monthly income.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IncomeSource {
    Employment,
    BenefitUnemployment,
    BenefitDisability,
    BenefitSocial,
    Pension,
    SelfEmployed,
    None,
    Other(String),
}

impl IncomeSource {
    pub const KNOWN: [IncomeSource; 7] = [
        IncomeSource::Employment,
        IncomeSource::BenefitUnemployment,
        IncomeSource::BenefitDisability,
        IncomeSource::BenefitSocial,
        IncomeSource::Pension,
        IncomeSource::SelfEmployed,
        IncomeSource::None,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            IncomeSource::Employment => "employment",
            IncomeSource::BenefitUnemployment => "benefit_unemployment",
            IncomeSource::BenefitDisability => "benefit_disability",
            IncomeSource::BenefitSocial => "benefit_social",
            IncomeSource::Pension => "pension",
            IncomeSource::SelfEmployed => "self_employed",
            IncomeSource::None => "none",
            IncomeSource::Other(raw) => raw.as_str(),
        }
    }

    /// Social assistance and unemployment benefits, the two sources the scoring
    /// rules treat as an escalation risk.
    pub fn is_benefit_dependent(&self) -> bool {
        matches!(
            self,
            IncomeSource::BenefitSocial | IncomeSource::BenefitUnemployment
        )
    }
}

impl From<String> for IncomeSource {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "employment" => IncomeSource::Employment,
            "benefit_unemployment" => IncomeSource::BenefitUnemployment,
            "benefit_disability" => IncomeSource::BenefitDisability,
            "benefit_social" | "benefit" => IncomeSource::BenefitSocial,
            "pension" => IncomeSource::Pension,
            "self_employed" => IncomeSource::SelfEmployed,
            "none" => IncomeSource::None,
            _ => IncomeSource::Other(value),
        }
    }
}

impl From<IncomeSource> for String {
    fn from(value: IncomeSource) -> Self {
        match value {
            IncomeSource::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Collection strategy that can be recommended for a debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    CollectStandard,
    PaymentPlan,
    Consolidate,
    Forgive,
    ReferToAssistance,
}

impl RecommendedAction {
    pub fn label(self) -> &'static str {
        match self {
            RecommendedAction::CollectStandard => "collect_standard",
            RecommendedAction::PaymentPlan => "payment_plan",
            RecommendedAction::Consolidate => "consolidate",
            RecommendedAction::Forgive => "forgive",
            RecommendedAction::ReferToAssistance => "refer_to_assistance",
        }
    }
}

/// Outstanding debt submitted for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtRecord {
    pub amount: f64,
    #[serde(rename = "type")]
    pub debt_type: DebtType,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub origin_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Single historic payment made by the citizen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date: Option<NaiveDate>,
    pub amount: f64,
    pub days_late: u32,
}

/// Financial profile of the debtor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bsn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub income: f64,
    pub income_source: IncomeSource,
    pub other_debts_count: u32,
    pub in_debt_assistance: bool,
    #[serde(default)]
    pub payment_history: Vec<PaymentRecord>,
}

impl CitizenProfile {
    /// Mean lateness over the payment history, `None` when there is no history.
    pub fn average_days_late(&self) -> Option<f64> {
        if self.payment_history.is_empty() {
            return None;
        }

        let total: f64 = self
            .payment_history
            .iter()
            .map(|payment| f64::from(payment.days_late))
            .sum();
        Some(total / self.payment_history.len() as f64)
    }
}

/// Debt plus debtor, the unit of work for every analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtAnalysisRequest {
    pub debt: DebtRecord,
    pub citizen: CitizenProfile,
}

pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc().date())
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.and_then(|raw| {
        let parsed = parse_date(&raw);
        if parsed.is_none() && !raw.trim().is_empty() {
            warn!(value = %raw, "ignoring unparseable date");
        }
        parsed
    }))
}
