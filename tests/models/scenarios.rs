use beanstore::entities::{Order, OrderPatch, OrderStatus, Product, ProductPatch, User, UserPatch};
use beanstore::{
    InMemoryModelStore, ModelError, ModelsExt, Patch, ScanRequest, StoreConfig, StoreError,
    UpdateBuilder, UpdateSpec,
};
use serde_json::json;

use crate::support::{mug, order, DownStore};

#[test]
fn product_create_then_rename() {
    let store = InMemoryModelStore::new();
    let products = store.models::<Product>();

    products.put(&mug()).unwrap();
    assert_eq!(products.get("p1").unwrap(), Some(mug()));

    let patch = ProductPatch {
        name: Some("Big Mug".into()),
        ..Default::default()
    };
    let updated = products.update("p1", &patch).unwrap().unwrap();

    let expected = Product {
        name: "Big Mug".into(),
        ..mug()
    };
    assert_eq!(updated, expected);
    assert_eq!(products.get("p1").unwrap(), Some(expected));
}

#[test]
fn orders_of_one_user() {
    let store = InMemoryModelStore::with_config(StoreConfig { max_scan_batch: 1 });
    let orders = store.models::<Order>();
    orders.put(&order("o1", "u1")).unwrap();
    orders.put(&order("o2", "u1")).unwrap();
    orders.put(&order("o3", "u2")).unwrap();

    let mut found = orders.scan_all(Some(Order::search("u1"))).unwrap();
    found.sort_by(|a, b| a.id.cmp(&b.id));

    assert_eq!(found, vec![order("o1", "u1"), order("o2", "u1")]);
}

#[test]
fn update_of_missing_id_is_absent() {
    let store = InMemoryModelStore::new();
    let patch = OrderPatch {
        status: Some(OrderStatus::Paid),
        ..Default::default()
    };

    let result = store.models::<Order>().update("ghost", &patch).unwrap();

    assert!(result.is_none());
    assert!(store.models::<Order>().get("ghost").unwrap().is_none());
}

#[test]
fn delete_is_idempotent() {
    let store = InMemoryModelStore::new();
    let products = store.models::<Product>();
    products.put(&mug()).unwrap();

    products.delete("p1").unwrap();
    assert!(products.get("p1").unwrap().is_none());
    products.delete("p1").unwrap();
}

#[test]
fn put_replaces_the_whole_entity() {
    let store = InMemoryModelStore::new();
    let users = store.models::<User>();
    let mut user = User::new("u1", "a@example.com", "Ada");
    users.put(&user).unwrap();

    user.email = "ada@example.com".into();
    users.put(&user).unwrap();

    assert_eq!(users.get("u1").unwrap(), Some(user));
}

#[test]
fn disallowed_keys_leave_entity_untouched() {
    let store = InMemoryModelStore::new();
    let products = store.models::<Product>();
    products.put(&mug()).unwrap();

    let spec = UpdateBuilder::for_patch::<ProductPatch>()
        .set("id", json!("p2"))
        .set("colour", json!("red"))
        .build();
    assert!(spec.is_empty());

    let unchanged = products.update_with("p1", &spec).unwrap();
    assert_eq!(unchanged, Some(mug()));
    assert!(products.get("p2").unwrap().is_none());
}

#[test]
fn nested_fields_are_replaced_whole() {
    let store = InMemoryModelStore::new();
    let orders = store.models::<Order>();
    orders.put(&order("o1", "u1")).unwrap();

    let patch = OrderPatch {
        line_items: Some(Vec::new()),
        ..Default::default()
    };
    let updated = orders.update("o1", &patch).unwrap().unwrap();

    assert!(updated.line_items.is_empty());
    assert_eq!(updated.user_id, "u1");
}

#[test]
fn raw_fields_go_through_the_allow_list() {
    let store = InMemoryModelStore::new();
    let users = store.models::<User>();
    users.put(&User::new("u1", "a@example.com", "Ada")).unwrap();

    let fields = json!({
        "id": "u9",
        "name": "Ada L.",
        "isAdmin": true
    });
    let serde_json::Value::Object(fields) = fields else {
        unreachable!()
    };
    let spec = UpdateSpec::from_fields::<UserPatch>(fields);
    assert_eq!(spec.fields().collect::<Vec<_>>(), vec!["name"]);

    let updated = users.update_with("u1", &spec).unwrap().unwrap();
    assert_eq!(updated.name, "Ada L.");
    assert_eq!(updated.id, "u1");
    assert!(UserPatch::FIELDS.iter().all(|f| *f != "id"));
}

#[test]
fn pending_carts_skip_empty_carts() {
    let store = InMemoryModelStore::with_config(StoreConfig { max_scan_batch: 2 });
    let users = store.models::<User>();
    for i in 0..5 {
        users
            .put(&User::new(format!("u{}", i), "x@example.com", "X"))
            .unwrap();
    }
    let patch: UserPatch = serde_json::from_value(json!({
        "cart": [{ "productId": "p1", "quantity": 1 }]
    }))
    .unwrap();
    users.update("u3", &patch).unwrap();

    let pending = users.scan_all(Some(User::pending_cart())).unwrap();

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, "u3");
}

#[test]
fn pages_chain_through_cursors() {
    let store = InMemoryModelStore::new();
    let orders = store.models::<Order>();
    for i in 0..5 {
        orders.put(&order(&format!("o{}", i), "u1")).unwrap();
    }

    let first = orders.page(ScanRequest::new().limit(Some(3))).unwrap();
    assert_eq!(first.items.len(), 3);
    assert!(first.next_cursor.is_some());

    let second = orders
        .page(ScanRequest::new().limit(Some(3)).cursor(first.next_cursor))
        .unwrap();
    assert_eq!(second.items.len(), 2);
    assert!(second.next_cursor.is_none());
}

#[test]
fn store_failures_propagate() {
    let store = DownStore;

    let err = store.models::<Product>().get("p1").unwrap_err();
    assert!(matches!(err, ModelError::Store(StoreError::Unavailable(_))));

    let err = store.models::<Order>().scan_all(None).unwrap_err();
    assert!(matches!(err, ModelError::Store(StoreError::Unavailable(_))));
}
