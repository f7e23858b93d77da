use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::review::Review;
use super::serde_helpers::option_record_id;

/// 商家类型
///
/// 企业 (corporate) 账户管理员工和礼品卡批量发放，
/// 餐厅 (restaurant) 管理预订，门店 (store) 管理商品库存。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    Corporate,
    Restaurant,
    Store,
}

/// 合作商家
///
/// 评价以嵌入数组形式存在商家记录上，按写入顺序保存
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    #[serde(
        with = "option_record_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub kind: StoreKind,
    /// 平台佣金百分比 (0-100)
    pub commission_percent: f64,
    pub currency: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreCreate {
    pub name: String,
    pub kind: StoreKind,
    pub commission_percent: Option<f64>,
    pub currency: Option<String>,
}
