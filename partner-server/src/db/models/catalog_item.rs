use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers::{option_record_id, record_id};
use super::stock_movement::MovementType;

/// 库存状态，始终由数量和阈值推导，不允许手工设置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::LowStock => "low_stock",
            Self::OutOfStock => "out_of_stock",
        }
    }

    pub const ALL: [StockStatus; 3] = [Self::InStock, Self::LowStock, Self::OutOfStock];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(
        with = "option_record_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    #[serde(with = "record_id")]
    pub store: RecordId,
    pub name: String,
    pub price: f64,
    pub stock_qty: i64,
    pub low_stock_threshold: i64,
    pub stock_status: StockStatus,
    pub is_available: bool,
    /// 折扣百分比，仅在 discount_active 时有意义
    pub discount_percent: Option<f64>,
    #[serde(default)]
    pub discount_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemCreate {
    pub store_id: String,
    pub name: String,
    pub price: f64,
    pub stock_qty: Option<i64>,
    pub low_stock_threshold: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
}

/// 库存调整请求
#[derive(Debug, Clone, Deserialize)]
pub struct StockAdjust {
    pub delta: i64,
    pub movement_type: MovementType,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscountSet {
    pub percent: f64,
}
