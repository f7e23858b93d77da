//! Review API 模块
//!
//! 评价嵌入在商家记录上，路由挂在 /api/stores/{id}/reviews 下

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/stores/{id}/reviews",
            get(handler::list).post(handler::create),
        )
        .route("/api/stores/{id}/reviews/insights", get(handler::insights))
        .route("/api/stores/{id}/reviews/{idx}/reply", post(handler::reply))
}
