use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;

use super::{
    Demographics, IncomeStatistics, MunicipalityStatistic, StatisticsDashboard, StatisticsStore,
    ThemaOverview, DEFAULT_MUNICIPALITY_LIMIT,
};

pub(crate) struct StatisticsState<S> {
    store: Arc<S>,
    default_year: Arc<str>,
}

impl<S> Clone for StatisticsState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            default_year: Arc::clone(&self.default_year),
        }
    }
}

impl<S> StatisticsState<S> {
    fn year(&self, query: &StatisticsQuery) -> String {
        query
            .jaar
            .as_deref()
            .map(str::trim)
            .filter(|jaar| !jaar.is_empty())
            .unwrap_or(&*self.default_year)
            .to_string()
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatisticsQuery {
    pub(crate) jaar: Option<String>,
    pub(crate) limit: Option<String>,
}

/// Router builder exposing the read-only statistics endpoints. Requests without
/// `jaar` use `default_year`.
pub fn statistics_router<S>(store: Arc<S>, default_year: impl Into<String>) -> Router
where
    S: StatisticsStore + 'static,
{
    let state = StatisticsState {
        store,
        default_year: Arc::from(default_year.into()),
    };

    Router::new()
        .route("/api/v1/cbs/dashboard", get(dashboard_handler::<S>))
        .route("/api/v1/cbs/overview", get(overview_handler::<S>))
        .route("/api/v1/cbs/income", get(income_handler::<S>))
        .route("/api/v1/cbs/demographics", get(demographics_handler::<S>))
        .route("/api/v1/cbs/municipalities", get(municipalities_handler::<S>))
        .with_state(state)
}

pub(crate) async fn dashboard_handler<S>(
    State(state): State<StatisticsState<S>>,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<StatisticsDashboard>, AppError>
where
    S: StatisticsStore + 'static,
{
    let jaar = state.year(&query);
    Ok(Json(state.store.dashboard(&jaar)?))
}

pub(crate) async fn overview_handler<S>(
    State(state): State<StatisticsState<S>>,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<Vec<ThemaOverview>>, AppError>
where
    S: StatisticsStore + 'static,
{
    let jaar = state.year(&query);
    Ok(Json(state.store.overview(&jaar)?))
}

pub(crate) async fn income_handler<S>(
    State(state): State<StatisticsState<S>>,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<IncomeStatistics>, AppError>
where
    S: StatisticsStore + 'static,
{
    let jaar = state.year(&query);
    Ok(Json(state.store.income(&jaar)?))
}

pub(crate) async fn demographics_handler<S>(
    State(state): State<StatisticsState<S>>,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<Demographics>, AppError>
where
    S: StatisticsStore + 'static,
{
    let jaar = state.year(&query);
    Ok(Json(state.store.demographics(&jaar)?))
}

pub(crate) async fn municipalities_handler<S>(
    State(state): State<StatisticsState<S>>,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<Vec<MunicipalityStatistic>>, AppError>
where
    S: StatisticsStore + 'static,
{
    let jaar = state.year(&query);
    let limit = query
        .limit
        .as_deref()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_MUNICIPALITY_LIMIT);

    Ok(Json(state.store.top_municipalities(&jaar, limit)?))
}
