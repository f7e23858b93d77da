//! 数据库服务
//!
//! 使用嵌入式 SurrealDB：生产走 RocksDB 持久化，
//! 测试走内存引擎。schema 采用宽松表 + 关键唯一索引。

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use shared::error::{AppError, AppResult};

const NAMESPACE: &str = "passprive";
const DATABASE: &str = "partner";

pub struct DbService;

impl DbService {
    /// 打开 RocksDB 持久化数据库并应用 schema
    pub async fn open(path: &str) -> AppResult<Surreal<Db>> {
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::init(&db).await?;
        Ok(db)
    }

    /// 打开内存数据库 (测试用)
    pub async fn open_memory() -> AppResult<Surreal<Db>> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open memory database: {e}")))?;
        Self::init(&db).await?;
        Ok(db)
    }

    async fn init(db: &Surreal<Db>) -> AppResult<()> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Self::define_schema(db).await
    }

    /// 应用表和索引定义，可重复执行
    async fn define_schema(db: &Surreal<Db>) -> AppResult<()> {
        const SCHEMA: &str = "
            DEFINE TABLE IF NOT EXISTS store SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS booking SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS `order` SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS catalog_item SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS stock_movement SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS gift_card SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS offer SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
            DEFINE TABLE IF NOT EXISTS payout_request SCHEMALESS;

            DEFINE INDEX IF NOT EXISTS idx_booking_store ON TABLE booking FIELDS store;
            DEFINE INDEX IF NOT EXISTS idx_order_store ON TABLE `order` FIELDS store;
            DEFINE INDEX IF NOT EXISTS idx_item_store ON TABLE catalog_item FIELDS store;
            DEFINE INDEX IF NOT EXISTS idx_movement_item ON TABLE stock_movement FIELDS item;

            -- 卡号全局唯一，员工邮箱在企业内唯一
            DEFINE INDEX IF NOT EXISTS uniq_gift_card_code ON TABLE gift_card FIELDS code UNIQUE;
            DEFINE INDEX IF NOT EXISTS uniq_employee_email ON TABLE employee FIELDS corporate, email UNIQUE;
        ";
        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_and_schema() {
        let db = DbService::open_memory().await.unwrap();
        // schema 可重复应用
        DbService::define_schema(&db).await.unwrap();
    }

    #[tokio::test]
    async fn test_open_rocksdb() {
        let tmp = tempfile::tempdir().unwrap();
        let db = DbService::open(&tmp.path().to_string_lossy()).await.unwrap();
        db.query("CREATE store CONTENT { name: 'probe', created_at: 0 }")
            .await
            .unwrap();
    }
}
