use reqwest::Client;
use tracing::debug;

use crate::config::ClassifierConfig;

use super::super::domain::DebtAnalysisRequest;
use super::mapping::{action_from_label, PredictionRequest, PredictionResponse};
use super::{ClassifierError, ClassifierInsights, ClassifierVerdict, DebtClassifier};

/// HTTP client for the external classification service.
#[derive(Debug, Clone)]
pub struct RemoteClassifier {
    client: Client,
    config: ClassifierConfig,
}

impl RemoteClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .build()
            .map_err(|err| ClassifierError::Transport(err.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }
}

fn transport_error(err: reqwest::Error) -> ClassifierError {
    if err.is_timeout() {
        ClassifierError::Timeout
    } else if err.is_decode() {
        ClassifierError::Decode(err.to_string())
    } else {
        ClassifierError::Transport(err.to_string())
    }
}

impl DebtClassifier for RemoteClassifier {
    async fn classify(
        &self,
        request: &DebtAnalysisRequest,
    ) -> Result<ClassifierVerdict, ClassifierError> {
        let payload = PredictionRequest::from_analysis(request);
        debug!(
            debt_type = payload.debt_type,
            income_source = payload.income_source,
            "requesting classifier prediction"
        );

        let response = self
            .client
            .post(self.endpoint("/predict"))
            .timeout(self.config.request_timeout)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::Status(status.as_u16()));
        }

        let prediction: PredictionResponse = response.json().await.map_err(transport_error)?;

        Ok(ClassifierVerdict {
            recommendation: action_from_label(&prediction.recommendation),
            confidence: prediction.confidence,
            insights: ClassifierInsights {
                model_accuracy: prediction.ml_model_info.accuracy(),
                probabilities: prediction.probabilities,
                features: prediction.features_used,
            },
            fallback: false,
        })
    }

    async fn is_available(&self) -> bool {
        match self
            .client
            .get(self.endpoint("/health"))
            .timeout(self.config.health_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!(error = %err, "classifier health probe failed");
                false
            }
        }
    }
}
