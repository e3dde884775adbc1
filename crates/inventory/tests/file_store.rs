//! Black-box tests: drive the store through its public API and check the file
//! it leaves behind by reopening it.

use std::collections::BTreeMap;
use std::fs;

use proptest::prelude::*;
use stockfile_core::Entity;
use stockfile_inventory::{
    InventoryError, InventoryStore, LineError, Listing, Price, Product, ProductUpdate,
};
use tempfile::TempDir;

fn snapshot(store: &InventoryStore) -> BTreeMap<String, (String, i64, f64)> {
    match store.list_all() {
        Listing::Empty => BTreeMap::new(),
        Listing::Products(products) => products
            .into_iter()
            .map(|p| {
                (
                    p.id().to_string(),
                    (p.name().to_string(), p.quantity(), p.price().value()),
                )
            })
            .collect(),
    }
}

#[test]
fn reopened_store_matches_the_previous_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stock.txt");

    let mut store = InventoryStore::open(&path);
    store
        .add(Product::new("A1", "Widget", 10, Price::new(2.499).unwrap()))
        .unwrap();
    store
        .add(Product::new("B2", "widget-pro", 3, Price::new(19.0).unwrap()))
        .unwrap();
    store
        .add(Product::new("C3", "Bolt", 100, Price::new(0.05).unwrap()))
        .unwrap();
    store.remove("C3").unwrap();
    store
        .update(
            "B2",
            ProductUpdate {
                quantity: Some(4),
                price: Some(Price::new(18.756).unwrap()),
            },
        )
        .unwrap();

    let reopened = InventoryStore::open(&path);
    assert!(reopened.last_load().is_clean());
    assert_eq!(snapshot(&reopened), snapshot(&store));
    assert_eq!(reopened.get("B2").unwrap().price().value(), 18.76);
}

#[test]
fn one_good_line_and_one_short_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stock.txt");
    fs::write(&path, "A1;Widget;10;2.5\nB2;Bolt;3\n").unwrap();

    let store = InventoryStore::open(&path);

    assert_eq!(store.len(), 1);
    assert!(store.get("A1").is_some());
    let errors: Vec<&LineError> = store.last_load().line_errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line_no(), 2);
}

#[test]
fn search_finds_both_widgets() {
    let dir = TempDir::new().unwrap();
    let mut store = InventoryStore::open(dir.path().join("stock.txt"));
    store
        .add(Product::new("1", "Widget", 1, Price::new(1.0).unwrap()))
        .unwrap();
    store
        .add(Product::new("2", "widget-pro", 1, Price::new(1.0).unwrap()))
        .unwrap();

    assert_eq!(store.find_by_name("WID").len(), 2);
}

#[test]
fn rejected_add_does_not_touch_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stock.txt");
    let mut store = InventoryStore::open(&path);
    store
        .add(Product::new("A1", "Widget", 1, Price::new(1.0).unwrap()))
        .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let err = store
        .add(Product::new("A1", "Impostor", 99, Price::new(99.0).unwrap()))
        .unwrap_err();

    assert!(matches!(err, InventoryError::DuplicateId(_)));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[derive(Debug, Clone)]
enum Op {
    Add { id: u8, name: String, quantity: i64, price: f64 },
    Remove { id: u8 },
    Update { id: u8, quantity: Option<i64>, price: Option<f64> },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let id = 0u8..8;
    let price = 0.0f64..10_000.0;
    prop_oneof![
        (id.clone(), "[A-Za-z][A-Za-z0-9 -]{0,20}", 0i64..1_000_000, price.clone()).prop_map(
            |(id, name, quantity, price)| Op::Add { id, name, quantity, price }
        ),
        id.clone().prop_map(|id| Op::Remove { id }),
        (id, proptest::option::of(0i64..1_000_000), proptest::option::of(price)).prop_map(
            |(id, quantity, price)| Op::Update { id, quantity, price }
        ),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Property: any sequence of mutations survives a save/reopen unchanged.
    #[test]
    fn mutations_round_trip_through_the_file(ops in proptest::collection::vec(op_strategy(), 1..30)) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stock.txt");
        let mut store = InventoryStore::open(&path);

        for op in ops {
            // Rejections (duplicate/unknown ids) are expected and leave the map as is.
            let _ = match op {
                Op::Add { id, name, quantity, price } => store.add(Product::new(
                    format!("P{id}"),
                    name.trim(),
                    quantity,
                    Price::new(price).unwrap(),
                )),
                Op::Remove { id } => store.remove(&format!("P{id}")),
                Op::Update { id, quantity, price } => store.update(
                    &format!("P{id}"),
                    ProductUpdate {
                        quantity,
                        price: price.map(|p| Price::new(p).unwrap()),
                    },
                ),
            };
        }

        let reopened = InventoryStore::open(&path);
        prop_assert!(reopened.last_load().is_clean());
        prop_assert_eq!(snapshot(&reopened), snapshot(&store));
    }
}
