//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`stores`] - 商家管理接口
//! - [`bookings`] - 预订管理接口
//! - [`reviews`] - 评价与洞察接口
//! - [`analytics`] - 仪表盘统计接口
//! - [`items`] - 商品与库存接口
//! - [`settlement`] - 结算与付款请求接口
//! - [`gift_cards`] - 礼品卡/通行卡接口
//! - [`offers`] - 优惠管理接口
//! - [`employees`] - 企业员工与批量导入接口

pub mod middleware;

pub mod analytics;
pub mod bookings;
pub mod employees;
pub mod gift_cards;
pub mod health;
pub mod items;
pub mod offers;
pub mod reviews;
pub mod settlement;
pub mod stores;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(stores::router())
        .merge(bookings::router())
        .merge(reviews::router())
        .merge(analytics::router())
        .merge(items::router())
        .merge(settlement::router())
        .merge(gift_cards::router())
        .merge(offers::router())
        .merge(employees::router())
}

/// Build a fully configured application with all middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Request logging - outermost, executed first
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}
