//! National debt statistics published per municipality and household trait.
//!
//! Records are loaded once from a `;`-delimited export and queried in memory.
//! Every query only considers households with registered debts.

pub mod parser;
pub mod router;
pub mod store;

use serde::Serialize;
use thiserror::Error;

pub use router::statistics_router;
pub use store::InMemoryStatistics;

pub const NATIONAL: &str = "Nederland";
pub const DEFAULT_MUNICIPALITY_LIMIT: usize = 10;

/// One row of the statistics export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsRecord {
    pub jaar: String,
    pub hoofdthema: String,
    pub thema: String,
    pub label: String,
    pub kenmerken_cat: String,
    pub schuldenaren: String,
    pub gemeentenaam: String,
    pub percentage: Option<f64>,
    pub aantal: Option<u64>,
}

impl StatisticsRecord {
    pub fn has_registered_debts(&self) -> bool {
        self.schuldenaren.contains("Met geregistreerde")
    }

    pub fn is_national(&self) -> bool {
        self.gemeentenaam == NATIONAL
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPercentage {
    pub label: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemaOverview {
    pub thema: String,
    pub total_records: usize,
    pub avg_percentage: f64,
    pub top_labels: Vec<LabelPercentage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticEntry {
    pub thema: String,
    pub label: String,
    pub percentage: f64,
    pub aantal: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenefitShare {
    #[serde(rename = "type")]
    pub benefit_type: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatistics {
    pub low_income: f64,
    pub benefits: Vec<BenefitShare>,
    pub average_income: Vec<LabelPercentage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeShare {
    pub range: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseholdShare {
    #[serde(rename = "type")]
    pub household_type: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginShare {
    pub category: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Demographics {
    pub age: Vec<AgeShare>,
    pub household: Vec<HouseholdShare>,
    pub origin: Vec<OriginShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MunicipalityStatistic {
    pub gemeentenaam: String,
    pub avg_percentage: Option<f64>,
    pub total_records: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsDashboard {
    pub overview: Vec<ThemaOverview>,
    pub vulnerable_groups: Vec<StatisticEntry>,
    pub income: IncomeStatistics,
    pub demographics: Demographics,
    pub top_municipalities: Vec<MunicipalityStatistic>,
    pub total_debtors: u64,
    pub year: String,
}

#[derive(Debug, Error)]
pub enum StatisticsError {
    #[error("failed to read statistics export: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed statistics export: {0}")]
    Csv(#[from] csv::Error),
    #[error("no statistics data has been loaded")]
    Unavailable,
}

/// Read access to the statistics, filtered by reporting period (`jaar`, e.g. `2024-01`).
pub trait StatisticsStore: Send + Sync {
    fn overview(&self, jaar: &str) -> Result<Vec<ThemaOverview>, StatisticsError>;

    fn vulnerable_groups(&self, jaar: &str) -> Result<Vec<StatisticEntry>, StatisticsError>;

    fn income(&self, jaar: &str) -> Result<IncomeStatistics, StatisticsError>;

    fn demographics(&self, jaar: &str) -> Result<Demographics, StatisticsError>;

    fn top_municipalities(
        &self,
        jaar: &str,
        limit: usize,
    ) -> Result<Vec<MunicipalityStatistic>, StatisticsError>;

    fn total_debtors(&self, jaar: &str) -> Result<u64, StatisticsError>;

    fn dashboard(&self, jaar: &str) -> Result<StatisticsDashboard, StatisticsError> {
        Ok(StatisticsDashboard {
            overview: self.overview(jaar)?,
            vulnerable_groups: self.vulnerable_groups(jaar)?,
            income: self.income(jaar)?,
            demographics: self.demographics(jaar)?,
            top_municipalities: self.top_municipalities(jaar, DEFAULT_MUNICIPALITY_LIMIT)?,
            total_debtors: self.total_debtors(jaar)?,
            year: jaar.to_string(),
        })
    }
}
