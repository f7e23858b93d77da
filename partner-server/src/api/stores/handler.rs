//! Store API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Store, StoreCreate};
use crate::db::repository::StoreRepository;
use shared::error::{AppError, AppResult, ErrorCode};

/// GET /api/stores - 全部商家
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Store>>> {
    let repo = StoreRepository::new(state.db.clone());
    let stores = repo.find_all().await?;
    Ok(Json(stores))
}

/// POST /api/stores - 创建商家
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<StoreCreate>,
) -> AppResult<Json<Store>> {
    if data.name.trim().is_empty() {
        return Err(AppError::validation("name cannot be empty"));
    }
    if let Some(pct) = data.commission_percent {
        if !(0.0..=100.0).contains(&pct) {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "commission_percent must be between 0 and 100",
            ));
        }
    }
    let repo = StoreRepository::new(state.db.clone());
    let store = repo.create(data).await?;
    Ok(Json(store))
}

/// GET /api/stores/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Store>> {
    let repo = StoreRepository::new(state.db.clone());
    let store = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound))?;
    Ok(Json(store))
}
