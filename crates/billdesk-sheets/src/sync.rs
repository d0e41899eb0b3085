use std::{fmt, str::FromStr};

use serde::Serialize;

use billdesk_core::CoreError;
use billdesk_domain::{Bill, InventoryItem};

/// Target that can be overwritten with a full copy of the local records.
pub trait SheetMirror: Send + Sync {
    /// Replaces all bill rows. Returns the number of bills written.
    fn overwrite_bills(&self, bills: &[Bill]) -> Result<usize, CoreError>;

    /// Replaces all inventory rows. Returns the number of items written.
    fn overwrite_inventory(&self, items: &[InventoryItem]) -> Result<usize, CoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncScope {
    Bills,
    Inventory,
    All,
}

impl SyncScope {
    pub fn includes_bills(self) -> bool {
        matches!(self, SyncScope::Bills | SyncScope::All)
    }

    pub fn includes_inventory(self) -> bool {
        matches!(self, SyncScope::Inventory | SyncScope::All)
    }
}

impl fmt::Display for SyncScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SyncScope::Bills => "bills",
            SyncScope::Inventory => "inventory",
            SyncScope::All => "all",
        };
        f.write_str(label)
    }
}

impl FromStr for SyncScope {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bills" | "bill" => Ok(SyncScope::Bills),
            "inventory" | "items" => Ok(SyncScope::Inventory),
            "all" => Ok(SyncScope::All),
            other => Err(CoreError::Validation(format!(
                "unknown sync scope `{other}` (expected bills, inventory or all)"
            ))),
        }
    }
}

/// Counts written per sheet; `None` for sheets outside the scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub bills: Option<usize>,
    pub inventory: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_parsing_and_membership() {
        assert_eq!("Bills".parse::<SyncScope>().unwrap(), SyncScope::Bills);
        assert!(SyncScope::All.includes_bills());
        assert!(SyncScope::All.includes_inventory());
        assert!(!SyncScope::Inventory.includes_bills());
        assert!(matches!(
            "orders".parse::<SyncScope>(),
            Err(CoreError::Validation(_))
        ));
    }
}
