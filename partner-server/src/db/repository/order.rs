//! Order Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Order, OrderCreate};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// 创建订单，佣金比例在此刻快照
    pub async fn create(&self, data: OrderCreate, commission_percent: f64) -> RepoResult<Order> {
        if data.total_amount < 0.0 {
            return Err(RepoError::Validation("total_amount cannot be negative".into()));
        }
        let mut result = self
            .base
            .db()
            .query(
                "CREATE `order` CONTENT {
                    store: $store,
                    total_amount: $total_amount,
                    payment_method: $payment_method,
                    payment_status: $payment_status,
                    order_status: $order_status,
                    commission_percent: $commission_percent,
                    created_at: $created_at
                }",
            )
            .bind(("store", record_id("store", &data.store_id)))
            .bind(("total_amount", data.total_amount))
            .bind(("payment_method", data.payment_method))
            .bind(("payment_status", data.payment_status))
            .bind(("order_status", data.order_status))
            .bind(("commission_percent", commission_percent))
            .bind(("created_at", data.created_at.unwrap_or_else(now_millis)))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create order".into()))
    }

    pub async fn list_by_store(&self, store_id: &str, since: Option<i64>) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM `order`
                 WHERE store = $store AND created_at >= $since
                 ORDER BY created_at DESC",
            )
            .bind(("store", record_id("store", store_id)))
            .bind(("since", since.unwrap_or(i64::MIN)))
            .await?
            .take(0)?;
        Ok(orders)
    }
}
