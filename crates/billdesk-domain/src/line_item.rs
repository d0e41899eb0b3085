//! A single priced row of a bill.

use serde::{Deserialize, Serialize};

use crate::common::*;

/// One named quantity of product or service at a unit price.
///
/// `line_total` is always `quantity * unit_price`. It is recomputed by every
/// mutator and is never set on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub item_name: String,
    pub quantity: f64,
    #[serde(rename = "price")]
    pub unit_price: f64,
    #[serde(rename = "total")]
    pub line_total: f64,
}

impl LineItem {
    pub fn new(item_name: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            item_name: item_name.into(),
            quantity,
            unit_price,
            line_total: quantity * unit_price,
        }
    }

    pub fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
        self.refresh_total();
    }

    pub fn set_unit_price(&mut self, unit_price: f64) {
        self.unit_price = unit_price;
        self.refresh_total();
    }

    fn refresh_total(&mut self) {
        self.line_total = self.quantity * self.unit_price;
    }
}

impl Displayable for LineItem {
    fn display_label(&self) -> String {
        format!("{} x {} @ {:.2}", self.item_name, self.quantity, self.unit_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutators_keep_total_in_sync() {
        let mut item = LineItem::new("Widget", 2.0, 100.0);
        assert_eq!(item.line_total, 200.0);

        item.set_quantity(3.0);
        assert_eq!(item.line_total, 300.0);

        item.set_unit_price(10.5);
        assert_eq!(item.line_total, 31.5);
    }

    #[test]
    fn serializes_with_source_field_names() {
        let item = LineItem::new("Widget", 2.0, 100.0);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["itemName"], "Widget");
        assert_eq!(json["price"], 100.0);
        assert_eq!(json["total"], 200.0);
    }
}
