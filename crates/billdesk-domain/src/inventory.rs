//! Inventory catalog records and their create/update payloads.

use serde::{Deserialize, Serialize};

use crate::common::*;

/// A product or service that can be selected onto a bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl InventoryItem {
    /// Materializes a new item under the id assigned by the store.
    pub fn from_new(id: impl Into<String>, item: NewInventoryItem) -> Self {
        Self {
            id: id.into(),
            name: item.name,
            unit_price: item.unit_price,
            description: item.description,
            image_ref: item.image_ref,
        }
    }

    /// Applies only the fields present on `update`.
    pub fn apply(&mut self, update: InventoryUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.unit_price {
            self.unit_price = price;
        }
        if let Some(description) = update.description {
            self.description = Some(description).filter(|value| !value.is_empty());
        }
        if let Some(image_ref) = update.image_ref {
            self.image_ref = Some(image_ref).filter(|value| !value.is_empty());
        }
    }
}

impl Identifiable for InventoryItem {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Displayable for InventoryItem {
    fn display_label(&self) -> String {
        format!("{} ({:.2})", self.name, self.unit_price)
    }
}

/// Payload for creating an inventory item; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "imageUrl")]
    pub image_ref: Option<String>,
}

impl NewInventoryItem {
    pub fn new(name: impl Into<String>, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            unit_price,
            description: None,
            image_ref: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update. `None` leaves a field untouched; an empty string clears
/// an optional text field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "price")]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "imageUrl")]
    pub image_ref: Option<String>,
}

impl InventoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.unit_price.is_none()
            && self.description.is_none()
            && self.image_ref.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_merges_only_present_fields() {
        let mut item = InventoryItem::from_new(
            "1",
            NewInventoryItem::new("Widget", 100.0).with_description("Blue"),
        );
        item.apply(InventoryUpdate {
            unit_price: Some(120.0),
            ..InventoryUpdate::default()
        });

        assert_eq!(item.name, "Widget");
        assert_eq!(item.unit_price, 120.0);
        assert_eq!(item.description.as_deref(), Some("Blue"));
    }

    #[test]
    fn empty_text_clears_optional_fields() {
        let mut item = InventoryItem::from_new(
            "1",
            NewInventoryItem::new("Widget", 100.0).with_description("Blue"),
        );
        item.apply(InventoryUpdate {
            description: Some(String::new()),
            ..InventoryUpdate::default()
        });
        assert_eq!(item.description, None);
    }
}
