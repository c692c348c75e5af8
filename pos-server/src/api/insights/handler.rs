//! Insights API Handlers

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::auth::middleware::check_permission;
use crate::auth::{permissions, CurrentUser};
use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct InsightsRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub answer: String,
}

/// POST /api/insights - AI 业务分析
pub async fn ask(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<InsightsRequest>,
) -> AppResult<Json<InsightsResponse>> {
    check_permission(&user, permissions::INSIGHTS_QUERY)?;

    let products = state.catalog.list();
    let sales = state.ledger.list()?;
    let answer = state.insights.ask(&req.question, &products, &sales).await;

    Ok(Json(InsightsResponse { answer }))
}
