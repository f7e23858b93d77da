use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::config::Config;
use crate::db::DbService;
use shared::error::{AppError, AppResult};

/// 服务器共享状态
///
/// 所有 HTTP handler 通过 `State<ServerState>` 访问
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
}

impl ServerState {
    /// 初始化服务器状态：建立工作目录、打开数据库、应用 schema
    pub async fn initialize(config: Config) -> AppResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db_path = config.database_dir();
        let db = DbService::open(&db_path.to_string_lossy()).await?;

        tracing::info!(
            path = %db_path.display(),
            timezone = %config.timezone,
            "Database opened"
        );

        Ok(Self { config, db })
    }

    /// 使用内存数据库构建状态 (测试用)
    pub async fn in_memory(config: Config) -> AppResult<Self> {
        let db = DbService::open_memory().await?;
        Ok(Self { config, db })
    }
}
