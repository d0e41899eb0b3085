#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;

use billdesk::desk::{BillingDesk, DeskSettings};
use billdesk_config::Config;
use billdesk_core::FixedClock;
use billdesk_domain::SelectionSet;
use billdesk_sheets::{MemoryWorkbook, SheetStore};
use billdesk_storage_json::JsonBillingStore;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// 2024-03-10 12:00 UTC.
pub fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap())
}

pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Desk over a seeded JSON store in a fresh directory.
pub fn json_desk(settings: DeskSettings) -> BillingDesk {
    let store = JsonBillingStore::new(temp_base().join("data")).expect("create json store");
    store.seed_default_inventory().expect("seed inventory");
    BillingDesk::new(Box::new(store), Arc::new(clock()), settings)
}

/// Desk opened the way the shell opens it, with images enabled.
pub fn opened_desk() -> (BillingDesk, PathBuf) {
    let base = temp_base();
    let desk = BillingDesk::open(&Config::default(), &base, Arc::new(clock())).expect("open desk");
    (desk, base)
}

/// Desk over an empty in-memory workbook.
pub fn sheet_desk() -> BillingDesk {
    let store = SheetStore::new(MemoryWorkbook::new());
    BillingDesk::new(Box::new(store), Arc::new(clock()), DeskSettings::default())
}

pub fn selection(pairs: &[(&str, f64)]) -> SelectionSet {
    pairs.iter().map(|(id, qty)| (*id, *qty)).collect()
}
