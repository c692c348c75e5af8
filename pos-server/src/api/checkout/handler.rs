//! Checkout API Handler
//!
//! The HTTP boundary of the transaction engine. The handler itself is
//! thin: the engine owns atomicity, the handler owns the response
//! shapes. A rejected checkout returns 409 with the authoritative
//! stock levels in the error payload so the client can fix its cart
//! without re-fetching the whole catalog.

use axum::{extract::State, Json};
use serde::Serialize;
use shared::cart::CartLine;
use shared::models::Sale;

use crate::core::ServerState;
use crate::receipt;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// The committed sale; `null` when the cart was empty
    pub sale: Option<Sale>,
    /// Printable receipt text for the committed sale
    pub receipt: Option<String>,
}

/// POST /api/checkout - 提交购物车结账
pub async fn checkout(
    State(state): State<ServerState>,
    Json(lines): Json<Vec<CartLine>>,
) -> AppResult<Json<CheckoutResponse>> {
    let sale = state.engine.checkout(&lines)?;

    let receipt = sale.as_ref().map(|s| {
        let products = state.catalog.list();
        receipt::render(s, &products, &state.config.store_name)
    });

    Ok(Json(CheckoutResponse { sale, receipt }))
}
