//! Analytics API Handlers
//!
//! 读取-转换两段式：仓储层按范围取数，
//! 统计全部走 analytics 下的纯函数。

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::analytics::{
    DayBucket, RangeToken, build_daily_series, range_start_millis, status_distribution,
};
use crate::core::ServerState;
use crate::db::models::BookingStatus;
use crate::db::repository::{BookingRepository, OrderRepository};
use crate::settlement;
use crate::utils::time::today_in;
use shared::error::AppResult;

/// "all" 没有自然窗口，序列固定回看 90 天
const ALL_SERIES_WINDOW_DAYS: u32 = 90;

#[derive(Deserialize)]
pub struct AnalyticsQuery {
    pub store_id: String,
    pub range: Option<String>,
}

#[derive(Serialize)]
pub struct Overview {
    pub total_bookings: u32,
    /// 平均客人数，没有预订时为 None
    pub avg_party_size: Option<f64>,
    /// 取消率 = cancelled / total，没有预订时为 0
    pub cancellation_rate: f64,
    pub total_revenue: f64,
    pub order_count: u32,
}

#[derive(Serialize)]
pub struct AnalyticsResponse {
    pub range: &'static str,
    pub overview: Overview,
    pub booking_status: BTreeMap<String, u32>,
    pub booking_series: Vec<DayBucket>,
    pub revenue_series: Vec<DayBucket>,
}

/// GET /api/analytics?store_id&range
pub async fn dashboard(
    State(state): State<ServerState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsResponse>> {
    let tz = state.config.timezone;
    let today = today_in(tz);
    let token = RangeToken::parse(query.range.as_deref().unwrap_or("30"))?;
    let since = range_start_millis(token, today, tz);
    let window = token.days().unwrap_or(ALL_SERIES_WINDOW_DAYS);

    let bookings = BookingRepository::new(state.db.clone())
        .list_by_store(&query.store_id, since)
        .await?;
    let orders = OrderRepository::new(state.db.clone())
        .list_by_store(&query.store_id, since)
        .await?;

    let booking_status = status_distribution(
        bookings.iter().map(|b| b.status.as_str()),
        &BookingStatus::ALL.map(|s| s.as_str()),
    );

    let cancelled = booking_status.get("cancelled").copied().unwrap_or(0);
    let total_bookings = bookings.len() as u32;
    let avg_party_size = (total_bookings > 0).then(|| {
        bookings.iter().map(|b| f64::from(b.party_size)).sum::<f64>() / f64::from(total_bookings)
    });
    let cancellation_rate = if total_bookings > 0 {
        f64::from(cancelled) / f64::from(total_bookings)
    } else {
        0.0
    };

    let summary = settlement::compute(&orders);

    let status_domain: Vec<&'static str> = BookingStatus::ALL.iter().map(|s| s.as_str()).collect();
    let booking_series = build_daily_series(
        window,
        today,
        tz,
        &status_domain,
        &bookings,
        |b| b.created_at,
        |_| 0.0,
        |b| Some(b.status.as_str().to_string()),
    );

    let settleable: Vec<_> = orders.iter().filter(|o| settlement::is_settleable(o)).collect();
    let revenue_series = build_daily_series(
        window,
        today,
        tz,
        &[],
        &settleable,
        |o| o.created_at,
        |o| o.total_amount,
        |_| None,
    );

    Ok(Json(AnalyticsResponse {
        range: token.as_str(),
        overview: Overview {
            total_bookings,
            avg_party_size,
            cancellation_rate,
            total_revenue: summary.business_made,
            order_count: summary.order_count,
        },
        booking_status,
        booking_series,
        revenue_series,
    }))
}
