//! Health API 模块

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::core::ServerState;
use crate::utils::{ok, AppResponse};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health - 健康检查
async fn health() -> Json<AppResponse<Value>> {
    ok(json!({ "status": "ok" }))
}
