//! 库存调整的端到端流程：数量截断、状态推导、流水审计
//! Run: cargo test -p partner-server --test stock_flow

use partner_server::db::DbService;
use partner_server::db::models::{
    ItemCreate, MovementType, StockStatus, StoreCreate, StoreKind,
};
use partner_server::db::repository::{CatalogItemRepository, StoreRepository};

async fn setup() -> (StoreRepository, CatalogItemRepository, String) {
    let db = DbService::open_memory().await.unwrap();
    let stores = StoreRepository::new(db.clone());
    let items = CatalogItemRepository::new(db.clone());
    let store = stores
        .create(StoreCreate {
            name: "Test Store".into(),
            kind: StoreKind::Store,
            commission_percent: Some(10.0),
            currency: None,
        })
        .await
        .unwrap();
    let store_id = store.id.unwrap().to_string();
    (stores, items, store_id)
}

async fn create_item(
    items: &CatalogItemRepository,
    store_id: &str,
    qty: i64,
    threshold: i64,
) -> String {
    let item = items
        .create(
            ItemCreate {
                store_id: store_id.to_string(),
                name: "Widget".into(),
                price: 9.99,
                stock_qty: Some(qty),
                low_stock_threshold: Some(threshold),
            },
            5,
        )
        .await
        .unwrap();
    assert_eq!(item.stock_qty, qty);
    item.id.unwrap().to_string()
}

#[tokio::test]
async fn adjust_writes_item_and_movement_atomically() {
    let (_stores, items, store_id) = setup().await;
    let item_id = create_item(&items, &store_id, 10, 5).await;

    let result = items
        .adjust_stock(&item_id, -3, MovementType::Decrease, Some("sold".into()))
        .await
        .unwrap();

    assert_eq!(result.item.stock_qty, 7);
    assert_eq!(result.item.stock_status, StockStatus::InStock);
    assert!(result.item.is_available);

    assert_eq!(result.movement.qty_before, 10);
    assert_eq!(result.movement.qty_after, 7);
    assert_eq!(result.movement.qty_delta, -3);
    assert_eq!(
        result.movement.qty_after - result.movement.qty_before,
        result.movement.qty_delta
    );
}

#[tokio::test]
async fn negative_delta_clamps_at_zero() {
    let (_stores, items, store_id) = setup().await;
    let item_id = create_item(&items, &store_id, 4, 5).await;

    let result = items
        .adjust_stock(&item_id, -10, MovementType::Decrease, None)
        .await
        .unwrap();

    assert_eq!(result.item.stock_qty, 0);
    assert_eq!(result.item.stock_status, StockStatus::OutOfStock);
    assert!(!result.item.is_available);
    // 流水记录实际生效的变化量，不是请求的 -10
    assert_eq!(result.movement.qty_delta, -4);
}

#[tokio::test]
async fn status_transitions_follow_threshold() {
    let (_stores, items, store_id) = setup().await;
    let item_id = create_item(&items, &store_id, 10, 5).await;

    let low = items
        .adjust_stock(&item_id, -6, MovementType::Decrease, None)
        .await
        .unwrap();
    assert_eq!(low.item.stock_qty, 4);
    assert_eq!(low.item.stock_status, StockStatus::LowStock);
    assert!(low.item.is_available);

    let restocked = items
        .adjust_stock(&item_id, 20, MovementType::Increase, None)
        .await
        .unwrap();
    assert_eq!(restocked.item.stock_qty, 24);
    assert_eq!(restocked.item.stock_status, StockStatus::InStock);
}

#[tokio::test]
async fn movements_are_audited_newest_first() {
    let (_stores, items, store_id) = setup().await;
    let item_id = create_item(&items, &store_id, 10, 5).await;

    items
        .adjust_stock(&item_id, -2, MovementType::Decrease, Some("sold".into()))
        .await
        .unwrap();
    items
        .adjust_stock(&item_id, 5, MovementType::Increase, Some("restock".into()))
        .await
        .unwrap();

    let movements = items.movements(&item_id).await.unwrap();
    assert_eq!(movements.len(), 2);
    // 每条流水的不变量都成立
    for movement in &movements {
        assert_eq!(
            movement.qty_after - movement.qty_before,
            movement.qty_delta
        );
    }
    // 链条连续：减仓 10 -> 8，补货接着 8 -> 13
    let decrease = movements
        .iter()
        .find(|m| m.movement_type == MovementType::Decrease)
        .unwrap();
    let increase = movements
        .iter()
        .find(|m| m.movement_type == MovementType::Increase)
        .unwrap();
    assert_eq!((decrease.qty_before, decrease.qty_after), (10, 8));
    assert_eq!((increase.qty_before, increase.qty_after), (8, 13));
}

#[tokio::test]
async fn adjust_unknown_item_fails() {
    let (_stores, items, _store_id) = setup().await;
    let result = items
        .adjust_stock("missing", -1, MovementType::Decrease, None)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn discount_set_and_clear_are_paired() {
    let (_stores, items, store_id) = setup().await;
    let item_id = create_item(&items, &store_id, 10, 5).await;

    let discounted = items.set_discount(&item_id, 15.0).await.unwrap();
    assert_eq!(discounted.discount_percent, Some(15.0));
    assert!(discounted.discount_active);

    let cleared = items.clear_discount(&item_id).await.unwrap();
    assert_eq!(cleared.discount_percent, None);
    assert!(!cleared.discount_active);
}
