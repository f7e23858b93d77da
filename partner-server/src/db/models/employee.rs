use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers::{option_record_id, record_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Disabled,
}

/// 企业员工，(corporate, email) 组合在数据库层有唯一索引
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(
        with = "option_record_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    #[serde(with = "record_id")]
    pub corporate: RecordId,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub status: EmployeeStatus,
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeCreate {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub department: Option<String>,
}

/// 批量导入结果：成功的记录 + 每条失败行的原因
#[derive(Debug, Clone, Serialize)]
pub struct BulkCreateReport {
    pub created: Vec<Employee>,
    pub failed: Vec<FailedRow>,
    /// 因邮箱为空被直接跳过的行数
    pub skipped_rows: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedRow {
    pub email: String,
    pub error: String,
}
