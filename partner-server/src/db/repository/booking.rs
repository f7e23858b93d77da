//! Booking Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Booking, BookingCreate, BookingStatus};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const BOOKING_TABLE: &str = "booking";

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// 新预订始终以 pending 状态落库
    pub async fn create(&self, data: BookingCreate) -> RepoResult<Booking> {
        if data.party_size <= 0 {
            return Err(RepoError::Validation("party_size must be positive".into()));
        }
        let mut result = self
            .base
            .db()
            .query(
                "CREATE booking CONTENT {
                    store: $store,
                    customer_name: $customer_name,
                    party_size: $party_size,
                    status: $status,
                    source: $source,
                    created_at: $created_at
                }",
            )
            .bind(("store", record_id("store", &data.store_id)))
            .bind(("customer_name", data.customer_name))
            .bind(("party_size", data.party_size))
            .bind(("status", BookingStatus::Pending))
            .bind(("source", data.source))
            .bind(("created_at", data.created_at.unwrap_or_else(now_millis)))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        bookings
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create booking".into()))
    }

    /// 商家的预订列表，`since` 为范围起点 (含)，None 不过滤
    pub async fn list_by_store(&self, store_id: &str, since: Option<i64>) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query(
                "SELECT * FROM booking
                 WHERE store = $store AND created_at >= $since
                 ORDER BY created_at DESC",
            )
            .bind(("store", record_id("store", store_id)))
            .bind(("since", since.unwrap_or(i64::MIN)))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Booking>> {
        let booking: Option<Booking> = self.base.db().select(record_id(BOOKING_TABLE, id)).await?;
        Ok(booking)
    }

    /// 带前置状态守卫的状态更新
    ///
    /// 返回 None 表示当前状态已不是 `from` (并发修改)，调用方决定如何报错
    pub async fn update_status_guarded(
        &self,
        id: &str,
        from: BookingStatus,
        to: BookingStatus,
    ) -> RepoResult<Option<Booking>> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET status = $to WHERE status = $from RETURN AFTER")
            .bind(("id", record_id(BOOKING_TABLE, id)))
            .bind(("from", from))
            .bind(("to", to))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }
}
