//! Repository Module
//!
//! 每个聚合一个仓储，统一通过 BaseRepository 拿数据库连接。

pub mod booking;
pub mod catalog_item;
pub mod employee;
pub mod gift_card;
pub mod offer;
pub mod order;
pub mod payout_request;
pub mod store;

pub use booking::BookingRepository;
pub use catalog_item::CatalogItemRepository;
pub use employee::EmployeeRepository;
pub use gift_card::GiftCardRepository;
pub use offer::OfferRepository;
pub use order::OrderRepository;
pub use payout_request::PayoutRequestRepository;
pub use store::StoreRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

use shared::error::{AppError, ErrorCode};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // 唯一索引冲突的报错文案固定包含 "already contains"
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "store:abc".parse()?;
//   - 创建: let id = RecordId::from_table_key("store", "abc");
//   - API 输入同时接受 "store:abc" 和裸 "abc"，由 record_id() 归一化

/// 把 API 传入的 ID 归一化为指定表的 RecordId
pub fn record_id(table: &str, id: &str) -> RecordId {
    match id.split_once(':') {
        Some((tb, key)) if tb == table && !key.is_empty() => {
            RecordId::from_table_key(table, key.trim_start_matches('⟨').trim_end_matches('⟩'))
        }
        _ => RecordId::from_table_key(table, id),
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_from_bare_key() {
        let id = record_id("store", "abc");
        assert_eq!(id.table(), "store");
    }

    #[test]
    fn test_record_id_from_prefixed() {
        let id = record_id("store", "store:abc");
        assert_eq!(id.to_string(), record_id("store", "abc").to_string());
    }

    #[test]
    fn test_record_id_foreign_prefix_kept_as_key() {
        // 前缀不匹配时整个字符串当作 key，避免跨表注入
        let id = record_id("store", "booking:abc");
        assert_eq!(id.table(), "store");
    }
}
