use billdesk_domain::{Bill, InventoryItem, InventoryUpdate, NewInventoryItem};

use crate::CoreError;

/// Abstraction over persistence backends that hold bills and the inventory catalog.
///
/// Every call stands alone; there are no transactions across calls.
pub trait BillingStore: Send + Sync {
    /// Full scan of persisted bills in storage order.
    fn list_bills(&self) -> Result<Vec<Bill>, CoreError>;

    /// Persists a new bill. Fails with [`CoreError::Duplicate`] when the bill
    /// number already exists; this is the only uniqueness check.
    fn create_bill(&self, bill: &Bill) -> Result<(), CoreError>;

    fn list_inventory(&self) -> Result<Vec<InventoryItem>, CoreError>;

    /// Stores a new item under a freshly assigned, never reused id.
    fn create_inventory_item(&self, item: NewInventoryItem) -> Result<InventoryItem, CoreError>;

    /// Merges the provided fields. Fails with [`CoreError::NotFound`] for unknown ids.
    fn update_inventory_item(
        &self,
        id: &str,
        update: InventoryUpdate,
    ) -> Result<InventoryItem, CoreError>;

    /// Hard delete. Deleting an unknown id is a silent no-op.
    fn delete_inventory_item(&self, id: &str) -> Result<(), CoreError>;

    fn find_bill(&self, bill_number: &str) -> Result<Bill, CoreError> {
        self.list_bills()?
            .into_iter()
            .find(|bill| bill.bill_number == bill_number)
            .ok_or_else(|| CoreError::NotFound(format!("bill `{bill_number}`")))
    }
}

/// Object storage for product images. Returns an opaque reference.
pub trait ImageStore: Send + Sync {
    fn store_image(&self, file_name: &str, bytes: &[u8]) -> Result<String, CoreError>;
}
