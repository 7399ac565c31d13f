use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::RecommendationService;
use crate::catalog::ComponentRecord;
use crate::error::AppError;
use crate::scoring::{RecommendationCriteria, WeightConfiguration};

/// Filter constraints plus an optional cap on the number of returned entries.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecommendationRequest {
    #[serde(flatten)]
    pub criteria: RecommendationCriteria,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Raw, not yet normalized weights.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct WeightsRequest {
    pub power: f64,
    pub cost: f64,
    pub feature: f64,
}

/// Router builder exposing catalog, weight, and recommendation endpoints.
pub fn recommendation_router(service: Arc<RecommendationService>) -> Router {
    Router::new()
        .route(
            "/api/v1/catalog",
            get(catalog_handler).put(replace_catalog_handler),
        )
        .route("/api/v1/weights", get(weights_handler).put(set_weights_handler))
        .route("/api/v1/recommendations", post(recommend_handler))
        .with_state(service)
}

pub(crate) async fn catalog_handler(State(service): State<Arc<RecommendationService>>) -> Response {
    let components = service.catalog();
    let payload = json!({
        "count": components.len(),
        "components": components,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn replace_catalog_handler(
    State(service): State<Arc<RecommendationService>>,
    Json(records): Json<Vec<ComponentRecord>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let loaded = service.load_catalog(records)?;
    Ok(Json(json!({ "loaded": loaded })))
}

pub(crate) async fn weights_handler(State(service): State<Arc<RecommendationService>>) -> Response {
    (StatusCode::OK, Json(service.weights())).into_response()
}

pub(crate) async fn set_weights_handler(
    State(service): State<Arc<RecommendationService>>,
    Json(request): Json<WeightsRequest>,
) -> Result<Json<WeightConfiguration>, AppError> {
    let weights = service.set_weights(request.power, request.cost, request.feature)?;
    Ok(Json(weights))
}

pub(crate) async fn recommend_handler(
    State(service): State<Arc<RecommendationService>>,
    Json(request): Json<RecommendationRequest>,
) -> Response {
    let report = service.recommend(&request.criteria, request.limit);
    (StatusCode::OK, Json(report)).into_response()
}
