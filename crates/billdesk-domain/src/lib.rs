//! billdesk-domain
//!
//! Pure billing models (LineItem, Bill, InventoryItem, SelectionSet, report periods).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod bill;
pub mod common;
pub mod inventory;
pub mod line_item;
pub mod period;
pub mod selection;

pub use bill::*;
pub use common::*;
pub use inventory::*;
pub use line_item::*;
pub use period::*;
pub use selection::*;
