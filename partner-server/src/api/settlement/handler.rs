//! Settlement API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::analytics::{RangeToken, range_start_millis};
use crate::core::ServerState;
use crate::db::models::{
    Order, OrderCreate, PayoutDirection, PayoutRequest, PayoutRequestCreate,
};
use crate::db::repository::{OrderRepository, PayoutRequestRepository, StoreRepository};
use crate::settlement::{self, SettlementSummary};
use crate::utils::time::today_in;
use shared::error::{AppError, AppResult, ErrorCode};

#[derive(Deserialize)]
pub struct SettlementQuery {
    pub store_id: String,
    pub range: Option<String>,
}

async fn ranged_orders(
    state: &ServerState,
    store_id: &str,
    range: Option<&str>,
) -> AppResult<(RangeToken, Vec<Order>)> {
    let token = RangeToken::parse(range.unwrap_or("30"))?;
    let since = range_start_millis(token, today_in(state.config.timezone), state.config.timezone);
    let orders = OrderRepository::new(state.db.clone())
        .list_by_store(store_id, since)
        .await?;
    Ok((token, orders))
}

/// GET /api/settlement?store_id&range - 结算汇总
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<SettlementQuery>,
) -> AppResult<Json<SettlementSummary>> {
    let (_, orders) = ranged_orders(&state, &query.store_id, query.range.as_deref()).await?;
    Ok(Json(settlement::compute(&orders)))
}

/// POST /api/orders - 录入订单 (佣金比例从商家快照)
pub async fn create_order(
    State(state): State<ServerState>,
    Json(data): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let store = StoreRepository::new(state.db.clone())
        .find_by_id(&data.store_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound))?;
    let order = OrderRepository::new(state.db.clone())
        .create(data, store.commission_percent)
        .await?;
    Ok(Json(order))
}

/// GET /api/orders?store_id&range
pub async fn list_orders(
    State(state): State<ServerState>,
    Query(query): Query<SettlementQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let (_, orders) = ranged_orders(&state, &query.store_id, query.range.as_deref()).await?;
    Ok(Json(orders))
}

/// POST /api/settlement/payouts - 按当前汇总发起付款请求
///
/// 金额和方向由结算结果决定，双向都为零时拒绝
pub async fn request_payout(
    State(state): State<ServerState>,
    Json(data): Json<PayoutRequestCreate>,
) -> AppResult<Json<PayoutRequest>> {
    let (token, orders) = ranged_orders(&state, &data.store_id, data.range.as_deref()).await?;
    let summary = settlement::compute(&orders);

    let (amount, direction) = if summary.partner_payable > 0.0 {
        (summary.partner_payable, PayoutDirection::ToPartner)
    } else if summary.to_passprive > 0.0 {
        (summary.to_passprive, PayoutDirection::ToPassprive)
    } else {
        return Err(AppError::new(ErrorCode::PayoutAmountZero));
    };

    let request = PayoutRequestRepository::new(state.db.clone())
        .create(&data.store_id, token.as_str(), amount, direction)
        .await?;
    Ok(Json(request))
}

#[derive(Deserialize)]
pub struct PayoutListQuery {
    pub store_id: String,
}

/// GET /api/settlement/payouts?store_id
pub async fn list_payouts(
    State(state): State<ServerState>,
    Query(query): Query<PayoutListQuery>,
) -> AppResult<Json<Vec<PayoutRequest>>> {
    let requests = PayoutRequestRepository::new(state.db.clone())
        .list_by_store(&query.store_id)
        .await?;
    Ok(Json(requests))
}
