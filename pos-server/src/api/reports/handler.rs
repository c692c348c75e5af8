//! Reports API Handlers

use axum::{extract::State, Extension, Json};

use crate::auth::middleware::check_permission;
use crate::auth::{permissions, CurrentUser};
use crate::core::ServerState;
use crate::reports::{self, ReportSummary};
use crate::utils::AppResult;

/// GET /api/reports/summary - 销售报表汇总
pub async fn summary(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ReportSummary>> {
    check_permission(&user, permissions::REPORTS_VIEW)?;

    let sales = state.ledger.list()?;
    let products = state.catalog.list();
    Ok(Json(reports::summarize(&sales, &products)))
}
