//! Cost-benefit scoring of small government debts.
//!
//! [`CostCalculator`] is the pure engine. [`CollectionService`] layers the
//! optional classifier and the demonstration portfolio on top of it, and
//! [`debt_router`] exposes both over HTTP.

pub mod analysis;
pub mod classifier;
pub mod domain;
pub mod portfolio;
pub mod report;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use analysis::{
    CostCalculator, DirectCosts, Recommendation, ScenarioResult, SocietalCosts, SuccessFactors,
};
pub use classifier::{
    ClassifierError, ClassifierInsights, ClassifierVerdict, DebtClassifier, FallbackClassifier,
    RemoteClassifier, RuleBasedClassifier,
};
pub use domain::{
    CitizenProfile, DebtAnalysisRequest, DebtRecord, DebtType, IncomeSource, PaymentRecord,
    RecommendedAction,
};
pub use portfolio::{sample_cases, PortfolioAnalyzer, PortfolioFilters, PortfolioReport};
pub use report::{AnalysisReport, EstimatedSavings, FinancialAnalysis, SocietalImpact};
pub use router::debt_router;
pub use service::{CollectionService, EnhancedAnalysis};
