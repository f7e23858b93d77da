//! Offer API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{
    DiscountType, EligibilityContext, Offer, OfferCreate, OfferUpdate,
};
use crate::db::repository::OfferRepository;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::util::now_millis;

fn validate_discount(discount_type: DiscountType, value: f64) -> AppResult<()> {
    let valid = match discount_type {
        DiscountType::Percent => value > 0.0 && value <= 100.0,
        DiscountType::Flat => value > 0.0,
    };
    if !valid {
        return Err(AppError::new(ErrorCode::InvalidOfferValue)
            .with_detail("discount_value", serde_json::json!(value)));
    }
    Ok(())
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub store_id: String,
    #[serde(default)]
    pub active_only: bool,
}

/// GET /api/offers?store_id&active_only
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Offer>>> {
    let repo = OfferRepository::new(state.db.clone());
    let offers = repo.list_by_store(&query.store_id, query.active_only).await?;
    Ok(Json(offers))
}

/// POST /api/offers
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<OfferCreate>,
) -> AppResult<Json<Offer>> {
    if data.title.trim().is_empty() {
        return Err(AppError::validation("title cannot be empty"));
    }
    validate_discount(data.discount_type, data.discount_value)?;
    let repo = OfferRepository::new(state.db.clone());
    let offer = repo.create(data).await?;
    Ok(Json(offer))
}

/// PUT /api/offers/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<OfferUpdate>,
) -> AppResult<Json<Offer>> {
    let repo = OfferRepository::new(state.db.clone());
    if let Some(value) = data.discount_value {
        let current = repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::OfferNotFound))?;
        validate_discount(current.discount_type, value)?;
    }
    let offer = repo.update(&id, data).await?;
    Ok(Json(offer))
}

/// DELETE /api/offers/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = OfferRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

#[derive(Deserialize)]
pub struct EligibilityQuery {
    pub party_size: i32,
    pub bill_amount: f64,
    #[serde(default)]
    pub is_new_user: bool,
    /// 缺省按当前时刻评估
    pub at_millis: Option<i64>,
}

#[derive(Serialize)]
pub struct EligibilityResponse {
    pub eligible: bool,
}

/// GET /api/offers/{id}/eligibility?party_size&bill_amount&is_new_user&at_millis
pub async fn eligibility(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<EligibilityQuery>,
) -> AppResult<Json<EligibilityResponse>> {
    let repo = OfferRepository::new(state.db.clone());
    let offer = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OfferNotFound))?;

    let ctx = EligibilityContext {
        party_size: query.party_size,
        bill_amount: query.bill_amount,
        is_new_user: query.is_new_user,
        at_millis: query.at_millis.unwrap_or_else(now_millis),
    };
    Ok(Json(EligibilityResponse {
        eligible: offer.is_eligible(&ctx, state.config.timezone),
    }))
}
