use assert_fs::{prelude::*, TempDir};
use billdesk_core::{storage::BillingStore, storage::ImageStore, CoreError};
use billdesk_domain::{Bill, InventoryUpdate, LineItem, NewInventoryItem};
use billdesk_storage_json::{JsonBillingStore, LocalImageStore};
use std::fs;
use tempfile::tempdir;

fn sample_bill(number: &str) -> Bill {
    Bill {
        bill_number: number.into(),
        date: "2024-03-10".into(),
        customer_name: "Alice".into(),
        customer_address: "12 Market Road".into(),
        customer_phone: String::new(),
        items: vec![LineItem::new("Widget", 2.0, 100.0)],
        subtotal: 200.0,
        tax_amount: 20.0,
        total: 220.0,
    }
}

#[test]
fn missing_files_read_as_empty_collections() {
    let dir = tempdir().expect("tempdir");
    let store = JsonBillingStore::new(dir.path().join("data")).expect("create store");

    assert_eq!(store.data_dir(), dir.path().join("data"));
    assert!(store.data_dir().is_dir());
    assert!(store.list_bills().expect("list bills").is_empty());
    assert!(store.list_inventory().expect("list inventory").is_empty());
}

#[test]
fn bills_round_trip_in_insertion_order() {
    let dir = tempdir().expect("tempdir");
    let store = JsonBillingStore::new(dir.path().to_path_buf()).expect("create store");

    store.create_bill(&sample_bill("BILL-1")).expect("first bill");
    store.create_bill(&sample_bill("BILL-2")).expect("second bill");

    let bills = store.list_bills().expect("list bills");
    let numbers: Vec<_> = bills.iter().map(|bill| bill.bill_number.as_str()).collect();
    assert_eq!(numbers, ["BILL-1", "BILL-2"]);
    assert_eq!(bills[0], sample_bill("BILL-1"));

    let raw = fs::read_to_string(store.bills_path()).expect("read bills file");
    assert!(raw.contains("\"billNumber\""));
    assert!(raw.contains("\"customerAddress\""));
    assert!(!store.bills_path().with_extension("json.tmp").exists());
}

#[test]
fn duplicate_bill_number_is_rejected_and_not_stored() {
    let dir = tempdir().expect("tempdir");
    let store = JsonBillingStore::new(dir.path().to_path_buf()).expect("create store");

    store.create_bill(&sample_bill("BILL-7")).expect("first create");
    let err = store
        .create_bill(&sample_bill("BILL-7"))
        .expect_err("second create must fail");

    assert!(matches!(err, CoreError::Duplicate(_)));
    let matching = store
        .list_bills()
        .expect("list bills")
        .into_iter()
        .filter(|bill| bill.bill_number == "BILL-7")
        .count();
    assert_eq!(matching, 1);
}

#[test]
fn find_bill_locates_by_number() {
    let dir = tempdir().expect("tempdir");
    let store = JsonBillingStore::new(dir.path().to_path_buf()).expect("create store");
    store.create_bill(&sample_bill("BILL-3")).expect("create");

    assert_eq!(store.find_bill("BILL-3").expect("find").customer_name, "Alice");
    assert!(matches!(
        store.find_bill("BILL-4"),
        Err(CoreError::NotFound(_))
    ));
}

#[test]
fn seed_runs_once_and_never_overwrites() {
    let dir = tempdir().expect("tempdir");
    let store = JsonBillingStore::new(dir.path().to_path_buf()).expect("create store");

    assert!(store.seed_default_inventory().expect("seed"));
    let seeded = store.list_inventory().expect("list inventory");
    let names: Vec<_> = seeded.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(
        names,
        ["Product A", "Product B", "Product C", "Service X", "Service Y"]
    );
    assert_eq!(seeded[3].unit_price, 500.0);

    store.delete_inventory_item("1").expect("delete");
    assert!(!store.seed_default_inventory().expect("second seed"));
    assert_eq!(store.list_inventory().expect("list inventory").len(), 4);
}

#[test]
fn inventory_create_update_delete() {
    let dir = tempdir().expect("tempdir");
    let store = JsonBillingStore::new(dir.path().to_path_buf()).expect("create store");

    let first = store
        .create_inventory_item(NewInventoryItem::new("Widget", 10.0).with_description("Blue"))
        .expect("create widget");
    let second = store
        .create_inventory_item(NewInventoryItem::new("Gadget", 5.0))
        .expect("create gadget");
    assert_ne!(first.id, second.id);

    let updated = store
        .update_inventory_item(
            &first.id,
            InventoryUpdate {
                unit_price: Some(12.5),
                description: Some(String::new()),
                ..InventoryUpdate::default()
            },
        )
        .expect("update widget");
    assert_eq!(updated.name, "Widget");
    assert_eq!(updated.unit_price, 12.5);
    assert_eq!(updated.description, None);

    let missing = store.update_inventory_item(
        "unknown",
        InventoryUpdate {
            name: Some("Ghost".into()),
            ..InventoryUpdate::default()
        },
    );
    assert!(matches!(missing, Err(CoreError::NotFound(_))));

    store.delete_inventory_item(&first.id).expect("delete widget");
    store
        .delete_inventory_item(&first.id)
        .expect("deleting twice is a no-op");
    let remaining = store.list_inventory().expect("list inventory");
    assert_eq!(remaining, vec![second]);
}

#[test]
fn corrupt_bills_file_reports_serialization_error() {
    let temp = TempDir::new().expect("temp dir");
    temp.child("bills.json")
        .write_str("{ not json")
        .expect("write corrupt file");
    let store = JsonBillingStore::new(temp.path().to_path_buf()).expect("create store");

    let err = store.list_bills().expect_err("corrupt file must fail");
    assert!(matches!(err, CoreError::Serde(_)));
}

#[test]
fn image_store_writes_file_and_returns_its_path() {
    let temp = TempDir::new().expect("temp dir");
    let images = LocalImageStore::new(temp.child("images").path().to_path_buf())
        .expect("create image store");

    let reference = images
        .store_image("photo one.png", b"\x89PNG")
        .expect("store image");
    assert!(reference.ends_with("-photo_one.png"), "{reference}");
    assert!(std::path::Path::new(&reference).starts_with(images.root()));
    assert_eq!(fs::read(&reference).expect("read image"), b"\x89PNG");

    let empty = images.store_image("empty.png", &[]);
    assert!(matches!(empty, Err(CoreError::Validation(_))));
}
