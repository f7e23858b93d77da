//! Gift Card Repository
//!
//! 卡号由服务端生成，唯一性靠数据库唯一索引兜底：
//! 碰撞时重新生成再试，而不是先查再插。

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{CardKind, CardStatus, GiftCard, GiftCardIssue};
use shared::util::{now_millis, secure_code};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// 卡号前缀 + 20 位随机字母数字，碰撞概率可以忽略
const CODE_PREFIX: &str = "GC";
const CODE_LENGTH: usize = 20;
const MAX_CODE_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct GiftCardRepository {
    base: BaseRepository,
}

impl GiftCardRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// 发放一张卡，卡号冲突时重新生成
    pub async fn issue(&self, data: GiftCardIssue) -> RepoResult<GiftCard> {
        if data.points <= 0 {
            return Err(RepoError::Validation("points must be positive".into()));
        }
        if data.kind == CardKind::Pass && data.tier.is_none() {
            return Err(RepoError::Validation("pass requires a tier".into()));
        }

        let mut last_err = None;
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = secure_code(CODE_PREFIX, CODE_LENGTH);
            match self.insert(&data, code).await {
                Ok(card) => return Ok(card),
                Err(RepoError::Duplicate(msg)) => {
                    tracing::warn!("Gift card code collision, regenerating: {msg}");
                    last_err = Some(RepoError::Duplicate(msg));
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err.unwrap_or_else(|| RepoError::Database("Code generation failed".into())))
    }

    async fn insert(&self, data: &GiftCardIssue, code: String) -> RepoResult<GiftCard> {
        let mut result = self
            .base
            .db()
            .query(
                "CREATE gift_card CONTENT {
                    store: $store,
                    code: $code,
                    kind: $kind,
                    points: $points,
                    tier: $tier,
                    status: $status,
                    expiry_date: $expiry_date,
                    created_at: $now,
                    redeemed_at: NONE
                }",
            )
            .bind(("store", record_id("store", &data.store_id)))
            .bind(("code", code))
            .bind(("kind", data.kind))
            .bind(("points", data.points))
            .bind(("tier", data.tier.clone()))
            .bind(("status", CardStatus::Active))
            .bind(("expiry_date", data.expiry_date))
            .bind(("now", now_millis()))
            .await?;
        let cards: Vec<GiftCard> = result.take(0)?;
        cards
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create gift card".into()))
    }

    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<GiftCard>> {
        let cards: Vec<GiftCard> = self
            .base
            .db()
            .query("SELECT * FROM gift_card WHERE code = $code")
            .bind(("code", code.to_string()))
            .await?
            .take(0)?;
        Ok(cards.into_iter().next())
    }

    pub async fn list_by_store(
        &self,
        store_id: &str,
        status: Option<CardStatus>,
    ) -> RepoResult<Vec<GiftCard>> {
        let cards: Vec<GiftCard> = match status {
            Some(status) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM gift_card
                         WHERE store = $store AND status = $status
                         ORDER BY created_at DESC",
                    )
                    .bind(("store", record_id("store", store_id)))
                    .bind(("status", status))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM gift_card WHERE store = $store ORDER BY created_at DESC")
                    .bind(("store", record_id("store", store_id)))
                    .await?
                    .take(0)?
            }
        };
        Ok(cards)
    }

    /// 带状态守卫的核销，仅 active 状态的卡可核销
    ///
    /// 返回 None 表示卡已不是 active (并发核销或已禁用)
    pub async fn redeem_guarded(&self, code: &str) -> RepoResult<Option<GiftCard>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE gift_card SET status = $redeemed, redeemed_at = $now
                 WHERE code = $code AND status = $active
                 RETURN AFTER",
            )
            .bind(("code", code.to_string()))
            .bind(("redeemed", CardStatus::Redeemed))
            .bind(("active", CardStatus::Active))
            .bind(("now", now_millis()))
            .await?;
        let cards: Vec<GiftCard> = result.take(0)?;
        Ok(cards.into_iter().next())
    }

    /// 把过期但仍标记 active 的卡落为 expired
    pub async fn mark_expired(&self, code: &str) -> RepoResult<Option<GiftCard>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE gift_card SET status = $expired
                 WHERE code = $code AND status = $active
                 RETURN AFTER",
            )
            .bind(("code", code.to_string()))
            .bind(("expired", CardStatus::Expired))
            .bind(("active", CardStatus::Active))
            .await?;
        let cards: Vec<GiftCard> = result.take(0)?;
        Ok(cards.into_iter().next())
    }

    /// 禁用一张卡 (仅 active 状态允许)
    pub async fn disable_guarded(&self, code: &str) -> RepoResult<Option<GiftCard>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE gift_card SET status = $disabled
                 WHERE code = $code AND status = $active
                 RETURN AFTER",
            )
            .bind(("code", code.to_string()))
            .bind(("disabled", CardStatus::Disabled))
            .bind(("active", CardStatus::Active))
            .await?;
        let cards: Vec<GiftCard> = result.take(0)?;
        Ok(cards.into_iter().next())
    }
}
