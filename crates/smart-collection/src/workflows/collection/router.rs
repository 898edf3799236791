use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::classifier::DebtClassifier;
use super::domain::DebtAnalysisRequest;
use super::portfolio::{PortfolioFilters, PortfolioReport};
use super::report::AnalysisReport;
use super::service::{CollectionService, EnhancedAnalysis};

const DEFAULT_SAMPLE_LIMIT: usize = 10;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BulkAnalysisRequest {
    #[serde(default)]
    pub(crate) filters: PortfolioFilters,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SampleQuery {
    pub(crate) limit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClassifierHealth {
    pub(crate) ml_api_available: bool,
    pub(crate) timestamp: String,
}

/// Router builder exposing the debt analysis endpoints.
pub fn debt_router<C>(service: Arc<CollectionService<C>>) -> Router
where
    C: DebtClassifier + 'static,
{
    Router::new()
        .route("/api/v1/debts/analyze", post(analyze_handler::<C>))
        .route("/api/v1/debts/analyze/local", post(analyze_local_handler::<C>))
        .route("/api/v1/debts/bulk-analyze", post(bulk_analyze_handler::<C>))
        .route("/api/v1/debts/mock", get(sample_cases_handler::<C>))
        .route("/api/v1/ml/health", get(classifier_health_handler::<C>))
        .with_state(service)
}

pub(crate) async fn analyze_handler<C>(
    State(service): State<Arc<CollectionService<C>>>,
    payload: Result<Json<DebtAnalysisRequest>, JsonRejection>,
) -> Result<Json<EnhancedAnalysis>, AppError>
where
    C: DebtClassifier + 'static,
{
    let Json(request) = payload?;
    Ok(Json(service.analyze_enhanced(&request).await))
}

pub(crate) async fn analyze_local_handler<C>(
    State(service): State<Arc<CollectionService<C>>>,
    payload: Result<Json<DebtAnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, AppError>
where
    C: DebtClassifier + 'static,
{
    let Json(request) = payload?;
    Ok(Json(service.analyze_local(&request)))
}

/// An empty body runs the portfolio with default filters.
pub(crate) async fn bulk_analyze_handler<C>(
    State(service): State<Arc<CollectionService<C>>>,
    body: Bytes,
) -> Result<Json<PortfolioReport>, AppError>
where
    C: DebtClassifier + 'static,
{
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        BulkAnalysisRequest::default()
    } else {
        serde_json::from_slice::<BulkAnalysisRequest>(&body)
            .map_err(|err| AppError::InvalidRequest(err.to_string()))?
    };

    Ok(Json(service.bulk_analyze(&request.filters)))
}

pub(crate) async fn sample_cases_handler<C>(
    State(service): State<Arc<CollectionService<C>>>,
    Query(query): Query<SampleQuery>,
) -> Json<Vec<DebtAnalysisRequest>>
where
    C: DebtClassifier + 'static,
{
    let limit = query
        .limit
        .as_deref()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_SAMPLE_LIMIT);

    Json(service.sample_cases(limit).to_vec())
}

pub(crate) async fn classifier_health_handler<C>(
    State(service): State<Arc<CollectionService<C>>>,
) -> Json<ClassifierHealth>
where
    C: DebtClassifier + 'static,
{
    Json(ClassifierHealth {
        ml_api_available: service.classifier_available().await,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
