//! Gift Card API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/gift-cards", gift_card_routes())
}

fn gift_card_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::issue))
        .route("/{code}", get(handler::get_by_code))
        .route("/{code}/redeem", post(handler::redeem))
        .route("/{code}/disable", post(handler::disable))
}
