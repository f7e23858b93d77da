use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers::{option_record_id, record_id};

/// 结算款项方向：平台付给商家，或商家补缴平台
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutDirection {
    ToPartner,
    ToPassprive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Pending,
    Approved,
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutRequest {
    #[serde(
        with = "option_record_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    #[serde(with = "record_id")]
    pub store: RecordId,
    /// 请求时使用的时间范围标记 ("7" / "30" / "90" / "all")
    pub period: String,
    pub amount: f64,
    pub direction: PayoutDirection,
    pub status: PayoutStatus,
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayoutRequestCreate {
    pub store_id: String,
    pub range: Option<String>,
}
