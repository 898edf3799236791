use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::{json, Map, Value};

use crate::workflows::collection::classifier::{
    ClassifierError, ClassifierInsights, ClassifierVerdict, DebtClassifier,
};
use crate::workflows::collection::domain::{
    CitizenProfile, DebtAnalysisRequest, DebtRecord, DebtType, IncomeSource, PaymentRecord,
    RecommendedAction,
};
use crate::workflows::collection::{debt_router, sample_cases, CollectionService};

pub(super) fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

pub(super) fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0)
        .single()
        .expect("valid reference instant")
}

/// Tiny healthcare contribution owed by a benefit-dependent household.
pub(super) fn vulnerable_request() -> DebtAnalysisRequest {
    DebtAnalysisRequest {
        debt: DebtRecord {
            amount: 8.5,
            debt_type: DebtType::CakEigenBijdrage,
            origin_date: date(2024, 9, 15),
            due_date: date(2024, 9, 30),
            id: None,
        },
        citizen: CitizenProfile {
            bsn: Some("123456789".to_string()),
            id: None,
            income: 1450.0,
            income_source: IncomeSource::BenefitSocial,
            other_debts_count: 3,
            in_debt_assistance: false,
            payment_history: vec![
                PaymentRecord {
                    date: date(2024, 8, 15),
                    amount: 8.5,
                    days_late: 12,
                },
                PaymentRecord {
                    date: date(2024, 7, 15),
                    amount: 8.5,
                    days_late: 8,
                },
            ],
        },
    }
}

/// Parking fine owed by a well-off employee without other debts.
pub(super) fn resilient_request() -> DebtAnalysisRequest {
    DebtAnalysisRequest {
        debt: DebtRecord {
            amount: 35.0,
            debt_type: DebtType::Parkeerboete,
            origin_date: date(2024, 10, 10),
            due_date: date(2024, 10, 25),
            id: None,
        },
        citizen: CitizenProfile {
            bsn: Some("456456456".to_string()),
            id: None,
            income: 3200.0,
            income_source: IncomeSource::Employment,
            other_debts_count: 0,
            in_debt_assistance: false,
            payment_history: Vec::new(),
        },
    }
}

pub(super) fn vulnerable_payload() -> Value {
    json!({
        "debt": {
            "amount": 8.5,
            "type": "cak_eigen_bijdrage",
            "originDate": "2024-09-15",
            "dueDate": "2024-09-30T00:00:00.000Z"
        },
        "citizen": {
            "bsn": "123456789",
            "income": 1450,
            "incomeSource": "benefit_social",
            "otherDebtsCount": 3,
            "inDebtAssistance": false,
            "paymentHistory": [
                { "date": "2024-08-15", "amount": 8.5, "daysLate": 12 },
                { "date": "2024-07-15", "amount": 8.5, "daysLate": 8 }
            ]
        }
    })
}

/// Classifier double answering with a fixed verdict, or failing when `None`.
#[derive(Debug, Clone)]
pub(super) struct StubClassifier {
    verdict: Option<ClassifierVerdict>,
}

impl StubClassifier {
    pub(super) fn answering(recommendation: RecommendedAction, confidence: f64) -> Self {
        let mut probabilities = BTreeMap::new();
        probabilities.insert("PAYMENT_PLAN".to_string(), confidence);
        probabilities.insert("FORGIVE".to_string(), 1.0 - confidence);

        let mut features = Map::new();
        features.insert("debt_amount".to_string(), json!(8.5));

        Self {
            verdict: Some(ClassifierVerdict {
                recommendation,
                confidence,
                insights: ClassifierInsights {
                    probabilities,
                    features,
                    model_accuracy: 0.87,
                },
                fallback: false,
            }),
        }
    }

    pub(super) fn offline() -> Self {
        Self { verdict: None }
    }
}

impl DebtClassifier for StubClassifier {
    async fn classify(
        &self,
        _request: &DebtAnalysisRequest,
    ) -> Result<ClassifierVerdict, ClassifierError> {
        self.verdict
            .clone()
            .ok_or_else(|| ClassifierError::Transport("connection refused".to_string()))
    }

    async fn is_available(&self) -> bool {
        self.verdict.is_some()
    }
}

pub(super) fn build_service(classifier: StubClassifier) -> Arc<CollectionService<StubClassifier>> {
    Arc::new(CollectionService::new(classifier, sample_cases()))
}

pub(super) fn router_with(classifier: StubClassifier) -> axum::Router {
    debt_router(build_service(classifier))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
