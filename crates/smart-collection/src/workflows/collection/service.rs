use serde::Serialize;
use tracing::info;

use super::analysis::CostCalculator;
use super::classifier::{ClassifierInsights, DebtClassifier, FallbackClassifier};
use super::domain::DebtAnalysisRequest;
use super::portfolio::{PortfolioAnalyzer, PortfolioFilters, PortfolioReport};
use super::report::AnalysisReport;

/// Engine report with the classifier's opinion folded into the recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedAnalysis {
    #[serde(flatten)]
    pub report: AnalysisReport,
    pub ml_enhanced: bool,
    pub ml_insights: ClassifierInsights,
}

/// Service composing the scoring engine, the classifier, and the demonstration portfolio.
pub struct CollectionService<C> {
    calculator: CostCalculator,
    portfolio: PortfolioAnalyzer,
    classifier: FallbackClassifier<C>,
    cases: Vec<DebtAnalysisRequest>,
}

impl<C> CollectionService<C>
where
    C: DebtClassifier + 'static,
{
    pub fn new(classifier: C, cases: Vec<DebtAnalysisRequest>) -> Self {
        let calculator = CostCalculator::new();
        Self {
            calculator,
            portfolio: PortfolioAnalyzer::new(calculator),
            classifier: FallbackClassifier::new(classifier),
            cases,
        }
    }

    pub fn analyze_local(&self, request: &DebtAnalysisRequest) -> AnalysisReport {
        self.calculator.analyze(request)
    }

    /// Runs the engine and lets the classifier pick the action. Reasoning and
    /// suggested steps stay those of the engine.
    pub async fn analyze_enhanced(&self, request: &DebtAnalysisRequest) -> EnhancedAnalysis {
        let verdict = self.classifier.verdict(request).await;
        let mut report = self.calculator.analyze(request);

        report.recommendation.action = verdict.recommendation;
        report.recommendation.confidence = (verdict.confidence * 100.0).clamp(0.0, 100.0);

        EnhancedAnalysis {
            report,
            ml_enhanced: true,
            ml_insights: verdict.insights,
        }
    }

    pub fn bulk_analyze(&self, filters: &PortfolioFilters) -> PortfolioReport {
        info!(
            amount_less_than = filters.amount_less_than,
            limit = filters.limit,
            "running portfolio analysis"
        );
        self.portfolio.analyze(&self.cases, filters)
    }

    pub fn sample_cases(&self, limit: usize) -> &[DebtAnalysisRequest] {
        &self.cases[..limit.min(self.cases.len())]
    }

    pub async fn classifier_available(&self) -> bool {
        self.classifier.is_available().await
    }
}
