//! Catalog Item Repository
//!
//! 库存数量、状态和流水必须一起变化，调整走单个
//! 数据库事务，截断和状态推导都在事务内完成。

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{CatalogItem, ItemCreate, ItemUpdate, MovementType, StockMovement};
use crate::inventory;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ITEM_TABLE: &str = "catalog_item";

/// 一次库存调整写入的两条记录
#[derive(Debug, Clone, serde::Serialize)]
pub struct StockAdjustResult {
    pub item: CatalogItem,
    pub movement: StockMovement,
}

#[derive(Clone)]
pub struct CatalogItemRepository {
    base: BaseRepository,
}

impl CatalogItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, data: ItemCreate, default_threshold: i64) -> RepoResult<CatalogItem> {
        if data.price < 0.0 {
            return Err(RepoError::Validation("price cannot be negative".into()));
        }
        let qty = data.stock_qty.unwrap_or(0).max(0);
        let threshold = data.low_stock_threshold.unwrap_or(default_threshold).max(0);
        let status = inventory::derive_status(qty, threshold);
        let now = now_millis();

        let mut result = self
            .base
            .db()
            .query(
                "CREATE catalog_item CONTENT {
                    store: $store,
                    name: $name,
                    price: $price,
                    stock_qty: $qty,
                    low_stock_threshold: $threshold,
                    stock_status: $status,
                    is_available: $available,
                    discount_percent: NONE,
                    discount_active: false,
                    created_at: $now,
                    updated_at: $now
                }",
            )
            .bind(("store", record_id("store", &data.store_id)))
            .bind(("name", data.name))
            .bind(("price", data.price))
            .bind(("qty", qty))
            .bind(("threshold", threshold))
            .bind(("status", status))
            .bind(("available", qty > 0))
            .bind(("now", now))
            .await?;
        let items: Vec<CatalogItem> = result.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create item".into()))
    }

    pub async fn list_by_store(&self, store_id: &str) -> RepoResult<Vec<CatalogItem>> {
        let items: Vec<CatalogItem> = self
            .base
            .db()
            .query("SELECT * FROM catalog_item WHERE store = $store ORDER BY name")
            .bind(("store", record_id("store", store_id)))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CatalogItem>> {
        let item: Option<CatalogItem> = self.base.db().select(record_id(ITEM_TABLE, id)).await?;
        Ok(item)
    }

    pub async fn update(&self, id: &str, data: ItemUpdate) -> RepoResult<CatalogItem> {
        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Item {id} not found")));
        }
        set_parts.push("updated_at = $now");

        let query_str = format!("UPDATE $id SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("id", record_id(ITEM_TABLE, id)))
            .bind(("now", now_millis()));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.price {
            if v < 0.0 {
                return Err(RepoError::Validation("price cannot be negative".into()));
            }
            query = query.bind(("price", v));
        }

        let items: Vec<CatalogItem> = query.await?.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Item {id} not found")))
    }

    /// 原子库存调整：数量、状态、可售标志和流水在同一事务内写入
    ///
    /// 数量下限截断为 0，流水记录的是实际生效的变化量
    pub async fn adjust_stock(
        &self,
        id: &str,
        delta: i64,
        movement_type: MovementType,
        reason: Option<String>,
    ) -> RepoResult<StockAdjustResult> {
        if delta == 0 {
            return Err(RepoError::Validation("delta cannot be zero".into()));
        }

        let response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION;
                 LET $item = (SELECT * FROM ONLY $id);
                 IF $item IS NONE { THROW 'item_not_found' };
                 LET $after = math::max([$item.stock_qty + $delta, 0]);
                 LET $status = (IF $after <= 0 { 'out_of_stock' }
                     ELSE IF $after <= $item.low_stock_threshold { 'low_stock' }
                     ELSE { 'in_stock' });
                 UPDATE $id SET
                     stock_qty = $after,
                     stock_status = $status,
                     is_available = $after > 0,
                     updated_at = $now;
                 CREATE stock_movement CONTENT {
                     item: $id,
                     store: $item.store,
                     movement_type: $mtype,
                     qty_before: $item.stock_qty,
                     qty_after: $after,
                     qty_delta: $after - $item.stock_qty,
                     reason: $reason,
                     created_at: $now
                 };
                 COMMIT TRANSACTION;",
            )
            .bind(("id", record_id(ITEM_TABLE, id)))
            .bind(("delta", delta))
            .bind(("mtype", movement_type))
            .bind(("reason", reason))
            .bind(("now", now_millis()))
            .await?;

        let mut response = response.check().map_err(|e| {
            let msg = e.to_string();
            if msg.contains("item_not_found") {
                RepoError::NotFound(format!("Item {id} not found"))
            } else {
                RepoError::Database(msg)
            }
        })?;

        // 语句下标: 0-3 LET/IF, 4 UPDATE, 5 CREATE
        let items: Vec<CatalogItem> = response.take(4)?;
        let movements: Vec<StockMovement> = response.take(5)?;
        match (items.into_iter().next(), movements.into_iter().next()) {
            (Some(item), Some(movement)) => Ok(StockAdjustResult { item, movement }),
            _ => Err(RepoError::Database("Stock adjustment returned no rows".into())),
        }
    }

    /// 商品的库存流水，新的在前
    pub async fn movements(&self, item_id: &str) -> RepoResult<Vec<StockMovement>> {
        let movements: Vec<StockMovement> = self
            .base
            .db()
            .query("SELECT * FROM stock_movement WHERE item = $item ORDER BY created_at DESC")
            .bind(("item", record_id(ITEM_TABLE, item_id)))
            .await?
            .take(0)?;
        Ok(movements)
    }

    /// 设置折扣：百分比和生效标志一次写入
    pub async fn set_discount(&self, id: &str, percent: f64) -> RepoResult<CatalogItem> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET
                     discount_percent = $percent,
                     discount_active = true,
                     updated_at = $now
                 RETURN AFTER",
            )
            .bind(("id", record_id(ITEM_TABLE, id)))
            .bind(("percent", percent))
            .bind(("now", now_millis()))
            .await?;
        let items: Vec<CatalogItem> = result.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Item {id} not found")))
    }

    /// 清除折扣：百分比和生效标志一次清空，不留半套状态
    pub async fn clear_discount(&self, id: &str) -> RepoResult<CatalogItem> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET
                     discount_percent = NONE,
                     discount_active = false,
                     updated_at = $now
                 RETURN AFTER",
            )
            .bind(("id", record_id(ITEM_TABLE, id)))
            .bind(("now", now_millis()))
            .await?;
        let items: Vec<CatalogItem> = result.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Item {id} not found")))
    }
}
