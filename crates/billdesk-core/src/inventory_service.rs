//! Validation in front of the store's inventory operations.

use billdesk_domain::{InventoryItem, InventoryUpdate, NewInventoryItem};
use tracing::info;

use crate::{storage::BillingStore, CoreError};

/// Checks inventory payloads before they reach a [`BillingStore`].
pub struct InventoryService;

impl InventoryService {
    pub fn add(
        store: &dyn BillingStore,
        mut item: NewInventoryItem,
    ) -> Result<InventoryItem, CoreError> {
        item.name = item.name.trim().to_string();
        if item.name.is_empty() {
            return Err(CoreError::Validation("item name is required".into()));
        }
        validate_price(item.unit_price)?;
        item.description = normalize_text(item.description);
        item.image_ref = normalize_text(item.image_ref);

        let created = store.create_inventory_item(item)?;
        info!(id = %created.id, name = %created.name, "inventory item added");
        Ok(created)
    }

    pub fn update(
        store: &dyn BillingStore,
        id: &str,
        mut update: InventoryUpdate,
    ) -> Result<InventoryItem, CoreError> {
        if let Some(name) = update.name.as_mut() {
            *name = name.trim().to_string();
            if name.is_empty() {
                return Err(CoreError::Validation("item name cannot be blank".into()));
            }
        }
        if let Some(price) = update.unit_price {
            validate_price(price)?;
        }
        if update.is_empty() {
            return Err(CoreError::Validation("no fields to update".into()));
        }
        let updated = store.update_inventory_item(id, update)?;
        info!(id = %updated.id, "inventory item updated");
        Ok(updated)
    }

    pub fn remove(store: &dyn BillingStore, id: &str) -> Result<(), CoreError> {
        store.delete_inventory_item(id)?;
        info!(id, "inventory item removed");
        Ok(())
    }
}

fn validate_price(price: f64) -> Result<(), CoreError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CoreError::Validation(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
