//! Sales API Handlers

use axum::{extract::State, Json};
use shared::models::Sale;

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/sales - 获取销售记录 (按时间顺序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Sale>>> {
    let sales = state.ledger.list()?;
    Ok(Json(sales))
}
