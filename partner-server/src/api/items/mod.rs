//! Catalog Item API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/items", item_routes())
}

fn item_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/summary", get(handler::summary))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/stock", post(handler::adjust_stock))
        .route("/{id}/movements", get(handler::movements))
        .route(
            "/{id}/discount",
            put(handler::set_discount).delete(handler::clear_discount),
        )
}
