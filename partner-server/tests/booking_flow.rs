//! 预订状态机与范围查询
//! Run: cargo test -p partner-server --test booking_flow

use partner_server::db::DbService;
use partner_server::db::models::{BookingCreate, BookingStatus, StoreCreate, StoreKind};
use partner_server::db::repository::{BookingRepository, StoreRepository};
use shared::util::now_millis;

async fn setup() -> (BookingRepository, String) {
    let db = DbService::open_memory().await.unwrap();
    let stores = StoreRepository::new(db.clone());
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
    (BookingRepository::new(db), store_id)
}

fn booking(store_id: &str, name: &str, created_at: Option<i64>) -> BookingCreate {
    BookingCreate {
        store_id: store_id.to_string(),
        customer_name: name.into(),
        party_size: 2,
        source: Some("app".into()),
        created_at,
    }
}

#[tokio::test]
async fn new_bookings_start_pending() {
    let (repo, store_id) = setup().await;
    let created = repo.create(booking(&store_id, "Ana", None)).await.unwrap();
    assert_eq!(created.status, BookingStatus::Pending);
}

#[tokio::test]
async fn guarded_update_follows_state_machine() {
    let (repo, store_id) = setup().await;
    let created = repo.create(booking(&store_id, "Ana", None)).await.unwrap();
    let id = created.id.unwrap().to_string();

    let confirmed = repo
        .update_status_guarded(&id, BookingStatus::Pending, BookingStatus::Confirmed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    // 前置状态已不匹配，守卫拒绝
    let stale = repo
        .update_status_guarded(&id, BookingStatus::Pending, BookingStatus::Cancelled)
        .await
        .unwrap();
    assert!(stale.is_none());

    let completed = repo
        .update_status_guarded(&id, BookingStatus::Confirmed, BookingStatus::Completed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, BookingStatus::Completed);
}

#[tokio::test]
async fn list_respects_since_boundary() {
    let (repo, store_id) = setup().await;
    let now = now_millis();
    let day = 24 * 3600 * 1000;

    repo.create(booking(&store_id, "Old", Some(now - 40 * day)))
        .await
        .unwrap();
    repo.create(booking(&store_id, "Recent", Some(now - 2 * day)))
        .await
        .unwrap();
    repo.create(booking(&store_id, "Today", Some(now)))
        .await
        .unwrap();

    let week = repo
        .list_by_store(&store_id, Some(now - 7 * day))
        .await
        .unwrap();
    assert_eq!(week.len(), 2);

    let all = repo.list_by_store(&store_id, None).await.unwrap();
    assert_eq!(all.len(), 3);
    // 新的在前
    assert_eq!(all[0].customer_name, "Today");
}
