//! Offer Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Offer, OfferCreate, OfferUpdate};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const OFFER_TABLE: &str = "offer";

#[derive(Clone)]
pub struct OfferRepository {
    base: BaseRepository,
}

impl OfferRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, data: OfferCreate) -> RepoResult<Offer> {
        let mut result = self
            .base
            .db()
            .query(
                "CREATE offer CONTENT {
                    store: $store,
                    title: $title,
                    discount_type: $discount_type,
                    discount_value: $discount_value,
                    conditions: $conditions,
                    is_active: $is_active,
                    created_at: $now
                }",
            )
            .bind(("store", record_id("store", &data.store_id)))
            .bind(("title", data.title))
            .bind(("discount_type", data.discount_type))
            .bind(("discount_value", data.discount_value))
            .bind(("conditions", data.conditions))
            .bind(("is_active", data.is_active.unwrap_or(true)))
            .bind(("now", now_millis()))
            .await?;
        let offers: Vec<Offer> = result.take(0)?;
        offers
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create offer".into()))
    }

    pub async fn list_by_store(&self, store_id: &str, active_only: bool) -> RepoResult<Vec<Offer>> {
        let query = if active_only {
            "SELECT * FROM offer WHERE store = $store AND is_active = true ORDER BY created_at DESC"
        } else {
            "SELECT * FROM offer WHERE store = $store ORDER BY created_at DESC"
        };
        let offers: Vec<Offer> = self
            .base
            .db()
            .query(query)
            .bind(("store", record_id("store", store_id)))
            .await?
            .take(0)?;
        Ok(offers)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Offer>> {
        let offer: Option<Offer> = self.base.db().select(record_id(OFFER_TABLE, id)).await?;
        Ok(offer)
    }

    pub async fn update(&self, id: &str, data: OfferUpdate) -> RepoResult<Offer> {
        let mut set_parts: Vec<&str> = Vec::new();
        if data.title.is_some() {
            set_parts.push("title = $title");
        }
        if data.discount_value.is_some() {
            set_parts.push("discount_value = $discount_value");
        }
        if data.conditions.is_some() {
            set_parts.push("conditions = $conditions");
        }
        if data.is_active.is_some() {
            set_parts.push("is_active = $is_active");
        }
        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Offer {id} not found")));
        }

        let query_str = format!("UPDATE $id SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("id", record_id(OFFER_TABLE, id)));
        if let Some(v) = data.title {
            query = query.bind(("title", v));
        }
        if let Some(v) = data.discount_value {
            query = query.bind(("discount_value", v));
        }
        if let Some(v) = data.conditions {
            query = query.bind(("conditions", v));
        }
        if let Some(v) = data.is_active {
            query = query.bind(("is_active", v));
        }

        let offers: Vec<Offer> = query.await?.take(0)?;
        offers
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Offer {id} not found")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let deleted: Option<Offer> = self.base.db().delete(record_id(OFFER_TABLE, id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Offer {id} not found")));
        }
        Ok(())
    }
}
