//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::analytics::{RangeToken, filter_by_query, range_start_millis};
use crate::core::ServerState;
use crate::db::models::{Booking, BookingCreate, BookingStatusUpdate};
use crate::db::repository::BookingRepository;
use crate::utils::time::today_in;
use shared::error::{AppError, AppResult, ErrorCode};

#[derive(Deserialize)]
pub struct ListQuery {
    pub store_id: String,
    pub range: Option<String>,
    pub q: Option<String>,
}

/// GET /api/bookings?store_id&range&q
///
/// 范围过滤在查询层生效，搜索在内存中对姓名和来源做子串匹配
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let token = RangeToken::parse(query.range.as_deref().unwrap_or("all"))?;
    let since = range_start_millis(token, today_in(state.config.timezone), state.config.timezone);

    let repo = BookingRepository::new(state.db.clone());
    let bookings = repo.list_by_store(&query.store_id, since).await?;

    let bookings = match query.q.as_deref() {
        Some(q) => filter_by_query(bookings, q, |b| {
            let mut fields = vec![b.customer_name.clone()];
            if let Some(source) = &b.source {
                fields.push(source.clone());
            }
            fields
        }),
        None => bookings,
    };
    Ok(Json(bookings))
}

/// POST /api/bookings
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    if data.customer_name.trim().is_empty() {
        return Err(AppError::validation("customer_name cannot be empty"));
    }
    let repo = BookingRepository::new(state.db.clone());
    let booking = repo.create(data).await?;
    Ok(Json(booking))
}

/// GET /api/bookings/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    let repo = BookingRepository::new(state.db.clone());
    let booking = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;
    Ok(Json(booking))
}

/// PUT /api/bookings/{id}/status
///
/// 状态流转受状态机约束，终态不可再改；
/// 更新语句带前置状态守卫，并发修改会被拒绝而不是覆盖。
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<BookingStatusUpdate>,
) -> AppResult<Json<Booking>> {
    let repo = BookingRepository::new(state.db.clone());
    let current = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;

    if !current.status.can_transition(data.status) {
        return Err(AppError::new(ErrorCode::InvalidBookingStatus)
            .with_detail("from", serde_json::json!(current.status.as_str()))
            .with_detail("to", serde_json::json!(data.status.as_str())));
    }

    let updated = repo
        .update_status_guarded(&id, current.status, data.status)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::InvalidBookingStatus))?;
    Ok(Json(updated))
}
