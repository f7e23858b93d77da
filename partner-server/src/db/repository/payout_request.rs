//! Payout Request Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{PayoutDirection, PayoutRequest, PayoutStatus};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct PayoutRequestRepository {
    base: BaseRepository,
}

impl PayoutRequestRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(
        &self,
        store_id: &str,
        period: &str,
        amount: f64,
        direction: PayoutDirection,
    ) -> RepoResult<PayoutRequest> {
        let mut result = self
            .base
            .db()
            .query(
                "CREATE payout_request CONTENT {
                    store: $store,
                    period: $period,
                    amount: $amount,
                    direction: $direction,
                    status: $status,
                    created_at: $now
                }",
            )
            .bind(("store", record_id("store", store_id)))
            .bind(("period", period.to_string()))
            .bind(("amount", amount))
            .bind(("direction", direction))
            .bind(("status", PayoutStatus::Pending))
            .bind(("now", now_millis()))
            .await?;
        let requests: Vec<PayoutRequest> = result.take(0)?;
        requests
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create payout request".into()))
    }

    pub async fn list_by_store(&self, store_id: &str) -> RepoResult<Vec<PayoutRequest>> {
        let requests: Vec<PayoutRequest> = self
            .base
            .db()
            .query("SELECT * FROM payout_request WHERE store = $store ORDER BY created_at DESC")
            .bind(("store", record_id("store", store_id)))
            .await?
            .take(0)?;
        Ok(requests)
    }
}
