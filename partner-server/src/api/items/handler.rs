//! Catalog Item API Handlers

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::analytics::status_distribution;
use crate::core::ServerState;
use crate::db::models::{
    CatalogItem, DiscountSet, ItemCreate, ItemUpdate, StockAdjust, StockMovement, StockStatus,
};
use crate::db::repository::{CatalogItemRepository, catalog_item::StockAdjustResult};
use shared::error::{AppError, AppResult, ErrorCode};

#[derive(Deserialize)]
pub struct StoreQuery {
    pub store_id: String,
}

/// GET /api/items?store_id
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<StoreQuery>,
) -> AppResult<Json<Vec<CatalogItem>>> {
    let repo = CatalogItemRepository::new(state.db.clone());
    let items = repo.list_by_store(&query.store_id).await?;
    Ok(Json(items))
}

/// POST /api/items
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<ItemCreate>,
) -> AppResult<Json<CatalogItem>> {
    if data.name.trim().is_empty() {
        return Err(AppError::validation("name cannot be empty"));
    }
    let repo = CatalogItemRepository::new(state.db.clone());
    let item = repo
        .create(data, state.config.default_low_stock_threshold)
        .await?;
    Ok(Json(item))
}

/// GET /api/items/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CatalogItem>> {
    let repo = CatalogItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound))?;
    Ok(Json(item))
}

/// PUT /api/items/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<ItemUpdate>,
) -> AppResult<Json<CatalogItem>> {
    let repo = CatalogItemRepository::new(state.db.clone());
    let item = repo.update(&id, data).await?;
    Ok(Json(item))
}

/// POST /api/items/{id}/stock - 原子库存调整
pub async fn adjust_stock(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<StockAdjust>,
) -> AppResult<Json<StockAdjustResult>> {
    if data.delta == 0 {
        return Err(AppError::new(ErrorCode::InvalidStockDelta));
    }
    let repo = CatalogItemRepository::new(state.db.clone());
    let result = repo
        .adjust_stock(&id, data.delta, data.movement_type, data.reason)
        .await?;
    Ok(Json(result))
}

/// GET /api/items/{id}/movements
pub async fn movements(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<StockMovement>>> {
    let repo = CatalogItemRepository::new(state.db.clone());
    let movements = repo.movements(&id).await?;
    Ok(Json(movements))
}

/// PUT /api/items/{id}/discount
pub async fn set_discount(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<DiscountSet>,
) -> AppResult<Json<CatalogItem>> {
    if !(0.0..=100.0).contains(&data.percent) || data.percent == 0.0 {
        return Err(AppError::new(ErrorCode::InvalidDiscountPercent)
            .with_detail("percent", serde_json::json!(data.percent)));
    }
    let repo = CatalogItemRepository::new(state.db.clone());
    let item = repo.set_discount(&id, data.percent).await?;
    Ok(Json(item))
}

/// DELETE /api/items/{id}/discount
pub async fn clear_discount(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CatalogItem>> {
    let repo = CatalogItemRepository::new(state.db.clone());
    let current = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound))?;
    if !current.discount_active {
        return Err(AppError::new(ErrorCode::DiscountNotActive));
    }
    let item = repo.clear_discount(&id).await?;
    Ok(Json(item))
}

#[derive(Serialize)]
pub struct StockSummary {
    pub total_items: u32,
    pub by_status: BTreeMap<String, u32>,
}

/// GET /api/items/summary?store_id - 库存概览
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<StoreQuery>,
) -> AppResult<Json<StockSummary>> {
    let repo = CatalogItemRepository::new(state.db.clone());
    let items = repo.list_by_store(&query.store_id).await?;
    let by_status = status_distribution(
        items.iter().map(|i| i.stock_status.as_str()),
        &StockStatus::ALL.map(|s| s.as_str()),
    );
    Ok(Json(StockSummary {
        total_items: items.len() as u32,
        by_status,
    }))
}
