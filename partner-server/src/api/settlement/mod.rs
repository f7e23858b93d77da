//! Settlement API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/settlement", get(handler::summary))
        .route("/api/orders", post(handler::create_order).get(handler::list_orders))
        .route(
            "/api/settlement/payouts",
            post(handler::request_payout).get(handler::list_payouts),
        )
}
