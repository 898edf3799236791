//! Optional machine-learning opinion on the collection strategy.
//!
//! The remote model is advisory: [`FallbackClassifier`] substitutes the local
//! rule table whenever the service is slow, unreachable, or answers with
//! garbage, so callers always receive a verdict.

mod mapping;
mod remote;
mod rules;

use std::collections::BTreeMap;
use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use super::domain::{DebtAnalysisRequest, RecommendedAction};

pub use mapping::PredictionRequest;
pub use remote::RemoteClassifier;
pub use rules::RuleBasedClassifier;

/// Model evidence attached to an ML-enhanced analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierInsights {
    pub probabilities: BTreeMap<String, f64>,
    pub features: Map<String, Value>,
    pub model_accuracy: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierVerdict {
    pub recommendation: RecommendedAction,
    /// Model confidence in `[0, 1]`.
    pub confidence: f64,
    pub insights: ClassifierInsights,
    /// True when the verdict came from the local rule table.
    pub fallback: bool,
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier request timed out")]
    Timeout,
    #[error("classifier transport failed: {0}")]
    Transport(String),
    #[error("classifier responded with status {0}")]
    Status(u16),
    #[error("classifier response could not be decoded: {0}")]
    Decode(String),
}

pub trait DebtClassifier: Send + Sync {
    fn classify(
        &self,
        request: &DebtAnalysisRequest,
    ) -> impl Future<Output = Result<ClassifierVerdict, ClassifierError>> + Send;

    fn is_available(&self) -> impl Future<Output = bool> + Send;
}

/// Wraps a primary classifier and answers from [`RuleBasedClassifier`] when it fails.
#[derive(Debug, Clone)]
pub struct FallbackClassifier<P> {
    primary: P,
    rules: RuleBasedClassifier,
}

impl<P: DebtClassifier> FallbackClassifier<P> {
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            rules: RuleBasedClassifier,
        }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub async fn verdict(&self, request: &DebtAnalysisRequest) -> ClassifierVerdict {
        match self.primary.classify(request).await {
            Ok(verdict) => verdict,
            Err(err) => {
                warn!(error = %err, "classifier unavailable; using rule-based fallback");
                self.rules.verdict(request)
            }
        }
    }
}

impl<P: DebtClassifier> DebtClassifier for FallbackClassifier<P> {
    async fn classify(
        &self,
        request: &DebtAnalysisRequest,
    ) -> Result<ClassifierVerdict, ClassifierError> {
        Ok(self.verdict(request).await)
    }

    async fn is_available(&self) -> bool {
        self.primary.is_available().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::collection::domain::{
        CitizenProfile, DebtRecord, DebtType, IncomeSource,
    };

    struct Offline;

    impl DebtClassifier for Offline {
        async fn classify(
            &self,
            _request: &DebtAnalysisRequest,
        ) -> Result<ClassifierVerdict, ClassifierError> {
            Err(ClassifierError::Timeout)
        }

        async fn is_available(&self) -> bool {
            false
        }
    }

    fn request() -> DebtAnalysisRequest {
        DebtAnalysisRequest {
            debt: DebtRecord {
                amount: 25.0,
                debt_type: DebtType::Parkeerboete,
                origin_date: None,
                due_date: None,
                id: None,
            },
            citizen: CitizenProfile {
                bsn: None,
                id: None,
                income: 2400.0,
                income_source: IncomeSource::Employment,
                other_debts_count: 0,
                in_debt_assistance: false,
                payment_history: Vec::new(),
            },
        }
    }

    #[tokio::test]
    async fn failing_primary_falls_back_to_rules() {
        let classifier = FallbackClassifier::new(Offline);

        let verdict = classifier
            .classify(&request())
            .await
            .expect("fallback always answers");

        assert!(verdict.fallback);
        assert_eq!(verdict.recommendation, RecommendedAction::Forgive);
        assert!(!classifier.is_available().await);
    }
}
