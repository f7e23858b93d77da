use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers::{option_record_id, record_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Increase,
    Decrease,
    Stockout,
}

/// 库存流水，与商品数量更新在同一事务中写入
///
/// 不变量: qty_after - qty_before == qty_delta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    #[serde(
        with = "option_record_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    #[serde(with = "record_id")]
    pub item: RecordId,
    #[serde(with = "record_id")]
    pub store: RecordId,
    pub movement_type: MovementType,
    pub qty_before: i64,
    pub qty_after: i64,
    /// 实际生效的变化量，下限截断后可能小于请求的 delta
    pub qty_delta: i64,
    pub reason: Option<String>,
    pub created_at: i64,
}
