use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers::{option_record_id, record_id};

/// 卡类型: 礼品卡按积分面额发放，通行卡 (pass) 按等级发放
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    GiftCard,
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Active,
    Redeemed,
    Expired,
    Disabled,
}

/// 礼品卡 / 通行卡
///
/// code 由服务端生成，全局唯一 (数据库唯一索引保证)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftCard {
    #[serde(
        with = "option_record_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    #[serde(with = "record_id")]
    pub store: RecordId,
    pub code: String,
    pub kind: CardKind,
    pub points: i64,
    /// 通行卡等级 (silver / gold / platinum)，礼品卡为空
    pub tier: Option<String>,
    pub status: CardStatus,
    pub expiry_date: Option<i64>,
    pub created_at: i64,
    pub redeemed_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GiftCardIssue {
    pub store_id: String,
    pub kind: CardKind,
    pub points: i64,
    pub tier: Option<String>,
    pub expiry_date: Option<i64>,
}
