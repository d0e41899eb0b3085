//! billdesk-storage-json
//!
//! Flat-file persistence: bills and inventory as pretty-printed JSON arrays,
//! product images as files in a local directory.

mod images;

pub use images::LocalImageStore;

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use billdesk_core::{storage::BillingStore, CoreError};
use billdesk_domain::{Bill, Identifiable, InventoryItem, InventoryUpdate, NewInventoryItem};

const BILLS_FILE: &str = "bills.json";
const INVENTORY_FILE: &str = "inventory.json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON persistence for bills and inventory.
///
/// Each write rewrites the whole file; concurrent writers are last-writer-wins.
#[derive(Debug, Clone)]
pub struct JsonBillingStore {
    data_dir: PathBuf,
}

impl JsonBillingStore {
    pub fn new(data_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn bills_path(&self) -> PathBuf {
        self.data_dir.join(BILLS_FILE)
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.data_dir.join(INVENTORY_FILE)
    }

    /// Writes the sample catalog when no inventory file exists yet.
    /// Returns whether anything was written.
    pub fn seed_default_inventory(&self) -> Result<bool, CoreError> {
        let path = self.inventory_path();
        if path.exists() {
            return Ok(false);
        }
        let defaults = default_inventory();
        save_records(&path, &defaults)?;
        info!(count = defaults.len(), "seeded default inventory");
        Ok(true)
    }

    fn read_bills(&self) -> Result<Vec<Bill>, CoreError> {
        load_records(&self.bills_path())
    }

    fn read_inventory(&self) -> Result<Vec<InventoryItem>, CoreError> {
        load_records(&self.inventory_path())
    }

    fn write_inventory(&self, items: &[InventoryItem]) -> Result<(), CoreError> {
        save_records(&self.inventory_path(), items)
    }
}

impl BillingStore for JsonBillingStore {
    fn list_bills(&self) -> Result<Vec<Bill>, CoreError> {
        let bills = self.read_bills()?;
        debug!(count = bills.len(), "loaded bills");
        Ok(bills)
    }

    fn create_bill(&self, bill: &Bill) -> Result<(), CoreError> {
        let mut bills = self.read_bills()?;
        if bills
            .iter()
            .any(|existing| existing.key() == bill.key())
        {
            return Err(CoreError::Duplicate(format!(
                "bill `{}` already exists",
                bill.bill_number
            )));
        }
        bills.push(bill.clone());
        save_records(&self.bills_path(), &bills)?;
        info!(bill = %bill.bill_number, total = bill.total, "bill saved");
        Ok(())
    }

    fn list_inventory(&self) -> Result<Vec<InventoryItem>, CoreError> {
        self.read_inventory()
    }

    fn create_inventory_item(&self, item: NewInventoryItem) -> Result<InventoryItem, CoreError> {
        let mut items = self.read_inventory()?;
        let created = InventoryItem::from_new(new_item_id(), item);
        items.push(created.clone());
        self.write_inventory(&items)?;
        Ok(created)
    }

    fn update_inventory_item(
        &self,
        id: &str,
        update: InventoryUpdate,
    ) -> Result<InventoryItem, CoreError> {
        let mut items = self.read_inventory()?;
        let item = items
            .iter_mut()
            .find(|item| item.key() == id)
            .ok_or_else(|| CoreError::NotFound(format!("inventory item `{id}`")))?;
        item.apply(update);
        let updated = item.clone();
        self.write_inventory(&items)?;
        Ok(updated)
    }

    fn delete_inventory_item(&self, id: &str) -> Result<(), CoreError> {
        let mut items = self.read_inventory()?;
        let before = items.len();
        items.retain(|item| item.key() != id);
        if items.len() == before {
            debug!(id, "delete of unknown inventory item ignored");
            return Ok(());
        }
        self.write_inventory(&items)
    }
}

/// Sample catalog written on first start.
pub fn default_inventory() -> Vec<InventoryItem> {
    [
        ("1", "Product A", 100.0, "Sample product A"),
        ("2", "Product B", 200.0, "Sample product B"),
        ("3", "Product C", 150.0, "Sample product C"),
        ("4", "Service X", 500.0, "Sample service X"),
        ("5", "Service Y", 750.0, "Sample service Y"),
    ]
    .into_iter()
    .map(|(id, name, price, description)| {
        InventoryItem::from_new(
            id,
            NewInventoryItem::new(name, price).with_description(description),
        )
    })
    .collect()
}

fn new_item_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&data).map_err(|err| {
        CoreError::Serde(format!("{}: {}", path.display(), err))
    })
}

fn save_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), CoreError> {
    let json =
        serde_json::to_string_pretty(records).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, json.as_bytes())?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.flush()?;
    Ok(())
}
