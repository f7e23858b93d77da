//! Review API Handlers

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::analytics::{
    Keyword, RangeToken, RatingDistribution, Sentiment, classify, filter_by_query,
    filter_by_range, range_start_millis, rating_distribution, top_keywords,
};
use crate::core::ServerState;
use crate::db::models::{Review, ReviewCreate, ReviewReply, ReviewReplyCreate, Store};
use crate::db::repository::StoreRepository;
use crate::utils::time::today_in;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::util::now_millis;

const TOP_KEYWORDS: usize = 10;

#[derive(Deserialize)]
pub struct ReviewQuery {
    pub range: Option<String>,
    pub q: Option<String>,
}

async fn load_store(state: &ServerState, id: &str) -> AppResult<Store> {
    let repo = StoreRepository::new(state.db.clone());
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound))
}

fn ranged_reviews(state: &ServerState, store: Store, range: Option<&str>) -> AppResult<Vec<Review>> {
    let token = RangeToken::parse(range.unwrap_or("all"))?;
    let since = range_start_millis(token, today_in(state.config.timezone), state.config.timezone);
    Ok(filter_by_range(store.reviews, since, |r| r.created_at))
}

/// GET /api/stores/{id}/reviews?range&q
pub async fn list(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<ReviewQuery>,
) -> AppResult<Json<Vec<Review>>> {
    let store = load_store(&state, &id).await?;
    let reviews = ranged_reviews(&state, store, query.range.as_deref())?;
    let reviews = match query.q.as_deref() {
        Some(q) => filter_by_query(reviews, q, |r| vec![r.author.clone(), r.text.clone()]),
        None => reviews,
    };
    Ok(Json(reviews))
}

/// POST /api/stores/{id}/reviews - 同步/录入一条评价
pub async fn create(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<ReviewCreate>,
) -> AppResult<Json<Store>> {
    let review = Review {
        author: data.author,
        rating: data.rating,
        text: data.text,
        reply: None,
        created_at: data.created_at.unwrap_or_else(now_millis),
    };
    let repo = StoreRepository::new(state.db.clone());
    let store = repo.add_review(&id, review).await?;
    Ok(Json(store))
}

/// POST /api/stores/{id}/reviews/{idx}/reply
///
/// 每条评价最多一条回复。写入是单条定点更新，
/// 不回写整个数组，并发新增的评价不受影响。
pub async fn reply(
    State(state): State<ServerState>,
    Path((id, idx)): Path<(String, usize)>,
    Json(data): Json<ReviewReplyCreate>,
) -> AppResult<Json<Review>> {
    if data.text.trim().is_empty() {
        return Err(AppError::validation("reply text cannot be empty"));
    }

    // 先读一次区分错误原因 (不存在 / 下标越界 / 已回复)
    let store = load_store(&state, &id).await?;
    let review = store
        .reviews
        .get(idx)
        .ok_or_else(|| AppError::new(ErrorCode::ReviewNotFound))?;
    if review.reply.is_some() {
        return Err(AppError::new(ErrorCode::ReviewAlreadyReplied));
    }

    let repo = StoreRepository::new(state.db.clone());
    let updated = repo
        .reply_to_review(
            &id,
            idx,
            ReviewReply {
                text: data.text,
                created_at: now_millis(),
            },
        )
        .await?
        // 守卫失败说明刚被并发回复
        .ok_or_else(|| AppError::new(ErrorCode::ReviewAlreadyReplied))?;
    let review = updated
        .reviews
        .into_iter()
        .nth(idx)
        .ok_or_else(|| AppError::new(ErrorCode::ReviewNotFound))?;
    Ok(Json(review))
}

#[derive(Serialize)]
pub struct ReviewInsights {
    pub distribution: RatingDistribution,
    /// positive / negative / neutral 三个桶的计数
    pub sentiment: BTreeMap<String, u32>,
    pub keywords: Vec<Keyword>,
}

/// GET /api/stores/{id}/reviews/insights?range
pub async fn insights(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<ReviewQuery>,
) -> AppResult<Json<ReviewInsights>> {
    let store = load_store(&state, &id).await?;
    let reviews = ranged_reviews(&state, store, query.range.as_deref())?;

    let distribution = rating_distribution(reviews.iter().map(|r| r.rating));

    let mut sentiment: BTreeMap<String, u32> = [
        ("positive".to_string(), 0),
        ("negative".to_string(), 0),
        ("neutral".to_string(), 0),
    ]
    .into();
    for review in &reviews {
        let bucket = match classify(&review.text) {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        };
        if let Some(count) = sentiment.get_mut(bucket) {
            *count += 1;
        }
    }

    let keywords = top_keywords(reviews.iter().map(|r| r.text.as_str()), TOP_KEYWORDS);

    Ok(Json(ReviewInsights {
        distribution,
        sentiment,
        keywords,
    }))
}
