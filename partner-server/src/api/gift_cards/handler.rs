//! Gift Card API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{CardStatus, GiftCard, GiftCardIssue};
use crate::db::repository::{GiftCardRepository, RepoError};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::util::now_millis;

#[derive(Deserialize)]
pub struct ListQuery {
    pub store_id: String,
    pub status: Option<CardStatus>,
}

/// GET /api/gift-cards?store_id&status
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<GiftCard>>> {
    let repo = GiftCardRepository::new(state.db.clone());
    let cards = repo.list_by_store(&query.store_id, query.status).await?;
    Ok(Json(cards))
}

/// POST /api/gift-cards - 发放
pub async fn issue(
    State(state): State<ServerState>,
    Json(data): Json<GiftCardIssue>,
) -> AppResult<Json<GiftCard>> {
    let repo = GiftCardRepository::new(state.db.clone());
    let card = repo.issue(data).await.map_err(|e| match e {
        // 连续碰撞耗尽重试次数
        RepoError::Duplicate(_) => AppError::new(ErrorCode::GiftCardCodeCollision),
        other => AppError::from(other),
    })?;
    Ok(Json(card))
}

/// GET /api/gift-cards/{code}
pub async fn get_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<GiftCard>> {
    let repo = GiftCardRepository::new(state.db.clone());
    let card = repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::GiftCardNotFound))?;
    Ok(Json(card))
}

/// POST /api/gift-cards/{code}/redeem
///
/// 只有 active 且未过期的卡可核销；过期的卡在此处落为 expired
pub async fn redeem(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<GiftCard>> {
    let repo = GiftCardRepository::new(state.db.clone());
    let card = repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::GiftCardNotFound))?;

    match card.status {
        CardStatus::Active => {}
        CardStatus::Expired => return Err(AppError::new(ErrorCode::GiftCardExpired)),
        _ => return Err(AppError::new(ErrorCode::GiftCardNotActive)),
    }

    if let Some(expiry) = card.expiry_date {
        if expiry < now_millis() {
            repo.mark_expired(&code).await?;
            return Err(AppError::new(ErrorCode::GiftCardExpired));
        }
    }

    let redeemed = repo
        .redeem_guarded(&code)
        .await?
        // 守卫失败说明刚被并发核销或禁用
        .ok_or_else(|| AppError::new(ErrorCode::GiftCardNotActive))?;
    Ok(Json(redeemed))
}

/// POST /api/gift-cards/{code}/disable
pub async fn disable(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<GiftCard>> {
    let repo = GiftCardRepository::new(state.db.clone());
    let card = repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::GiftCardNotFound))?;
    if card.status != CardStatus::Active {
        return Err(AppError::new(ErrorCode::GiftCardNotActive));
    }
    let disabled = repo
        .disable_guarded(&code)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::GiftCardNotActive))?;
    Ok(Json(disabled))
}
