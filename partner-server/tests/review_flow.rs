//! 评价回复：定点更新、回复守卫、不覆盖并发新增
//! Run: cargo test -p partner-server --test review_flow

use partner_server::db::DbService;
use partner_server::db::models::{Review, ReviewReply, StoreCreate, StoreKind};
use partner_server::db::repository::StoreRepository;
use shared::util::now_millis;

async fn setup() -> (StoreRepository, String) {
    let db = DbService::open_memory().await.unwrap();
    let stores = StoreRepository::new(db);
    let store = stores
        .create(StoreCreate {
            name: "La Terraza".into(),
            kind: StoreKind::Restaurant,
            commission_percent: Some(12.0),
            currency: None,
        })
        .await
        .unwrap();
    let store_id = store.id.unwrap().to_string();
    (stores, store_id)
}

fn review(author: &str, text: &str) -> Review {
    Review {
        author: author.into(),
        rating: Some(4.0),
        text: text.into(),
        reply: None,
        created_at: now_millis(),
    }
}

fn reply(text: &str) -> ReviewReply {
    ReviewReply {
        text: text.into(),
        created_at: now_millis(),
    }
}

#[tokio::test]
async fn reply_lands_on_target_review_only() {
    let (stores, store_id) = setup().await;
    stores.add_review(&store_id, review("Ana", "great food")).await.unwrap();
    stores.add_review(&store_id, review("Luis", "slow service")).await.unwrap();

    let updated = stores
        .reply_to_review(&store_id, 0, reply("thank you!"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.reviews.len(), 2);
    assert_eq!(updated.reviews[0].reply.as_ref().unwrap().text, "thank you!");
    assert!(updated.reviews[1].reply.is_none());
}

#[tokio::test]
async fn second_reply_is_rejected_by_guard() {
    let (stores, store_id) = setup().await;
    stores.add_review(&store_id, review("Ana", "great food")).await.unwrap();

    stores
        .reply_to_review(&store_id, 0, reply("first"))
        .await
        .unwrap()
        .unwrap();

    // 守卫不匹配：返回 None 而不是覆盖已有回复
    let again = stores
        .reply_to_review(&store_id, 0, reply("second"))
        .await
        .unwrap();
    assert!(again.is_none());

    let store = stores.find_by_id(&store_id).await.unwrap().unwrap();
    assert_eq!(store.reviews[0].reply.as_ref().unwrap().text, "first");
}

#[tokio::test]
async fn out_of_bounds_index_is_rejected() {
    let (stores, store_id) = setup().await;
    stores.add_review(&store_id, review("Ana", "great food")).await.unwrap();

    let result = stores.reply_to_review(&store_id, 5, reply("ghost")).await.unwrap();
    assert!(result.is_none());

    let store = stores.find_by_id(&store_id).await.unwrap().unwrap();
    assert_eq!(store.reviews.len(), 1);
    assert!(store.reviews[0].reply.is_none());
}

#[tokio::test]
async fn reply_does_not_drop_reviews_added_in_between() {
    let (stores, store_id) = setup().await;
    stores.add_review(&store_id, review("Ana", "great food")).await.unwrap();

    // 回复方读到的是只有一条评价的旧快照
    let stale = stores.find_by_id(&store_id).await.unwrap().unwrap();
    assert_eq!(stale.reviews.len(), 1);

    // 回复落库前又有新评价进来
    stores.add_review(&store_id, review("Luis", "slow service")).await.unwrap();

    let updated = stores
        .reply_to_review(&store_id, 0, reply("thank you!"))
        .await
        .unwrap()
        .unwrap();

    // 定点更新不回写整个数组，后来的评价完好保留
    assert_eq!(updated.reviews.len(), 2);
    assert_eq!(updated.reviews[0].reply.as_ref().unwrap().text, "thank you!");
    assert_eq!(updated.reviews[1].author, "Luis");
    assert!(updated.reviews[1].reply.is_none());
}
