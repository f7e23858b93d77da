//! Store Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Review, ReviewReply, Store, StoreCreate};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const STORE_TABLE: &str = "store";

#[derive(Clone)]
pub struct StoreRepository {
    base: BaseRepository,
}

impl StoreRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, data: StoreCreate) -> RepoResult<Store> {
        let mut result = self
            .base
            .db()
            .query(
                "CREATE store CONTENT {
                    name: $name,
                    kind: $kind,
                    commission_percent: $commission,
                    currency: $currency,
                    reviews: [],
                    created_at: $now
                }",
            )
            .bind(("name", data.name))
            .bind(("kind", data.kind))
            .bind(("commission", data.commission_percent.unwrap_or(0.0)))
            .bind(("currency", data.currency.unwrap_or_else(|| "EUR".into())))
            .bind(("now", now_millis()))
            .await?;
        let stores: Vec<Store> = result.take(0)?;
        stores
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create store".into()))
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Store>> {
        let stores: Vec<Store> = self
            .base
            .db()
            .query("SELECT * FROM store ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(stores)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Store>> {
        let store: Option<Store> = self.base.db().select(record_id(STORE_TABLE, id)).await?;
        Ok(store)
    }

    /// 追加一条评价到商家的嵌入数组
    pub async fn add_review(&self, store_id: &str, review: Review) -> RepoResult<Store> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $store SET reviews += $review RETURN AFTER")
            .bind(("store", record_id(STORE_TABLE, store_id)))
            .bind(("review", review))
            .await?;
        let stores: Vec<Store> = result.take(0)?;
        stores
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Store {store_id} not found")))
    }

    /// 给第 `idx` 条评价写入回复，单条带守卫的定点更新
    ///
    /// 只改目标评价的 reply 字段，不回写整个数组，
    /// 并发新增的评价不会被覆盖。守卫要求下标有效且
    /// 尚无回复，不满足时返回 None。
    pub async fn reply_to_review(
        &self,
        store_id: &str,
        idx: usize,
        reply: ReviewReply,
    ) -> RepoResult<Option<Store>> {
        // 下标是受控整数，直接拼进语句 (SET 路径不接受参数下标)
        let query_str = format!(
            "UPDATE $store SET reviews[{idx}].reply = $reply
             WHERE array::len(reviews) > {idx} AND reviews[{idx}].reply IS NONE
             RETURN AFTER"
        );
        let mut result = self
            .base
            .db()
            .query(query_str)
            .bind(("store", record_id(STORE_TABLE, store_id)))
            .bind(("reply", reply))
            .await?;
        let stores: Vec<Store> = result.take(0)?;
        Ok(stores.into_iter().next())
    }
}
