//! billdesk-sheets
//!
//! Spreadsheet-backed persistence. Bills and inventory live as rows in two
//! named sheets of a workbook; a [`SheetClient`] moves raw rows in and out and
//! the codec maps them to domain records by header text.

pub mod client;
pub mod codec;
pub mod store;
pub mod sync;

pub use client::{FileWorkbook, MemoryWorkbook, SheetClient};
pub use codec::{Row, SheetSchema, BILLS_SCHEMA, INVENTORY_SCHEMA};
pub use store::SheetStore;
pub use sync::{SheetMirror, SyncScope, SyncSummary};
