//! Turns a selection of inventory ids into bill line items.

use std::collections::HashMap;

use billdesk_domain::{InventoryItem, LineItem, SelectionSet};

use crate::{calculator::compute_line_total, CoreError};

/// Materializes one line item per selected id with a positive quantity.
///
/// Output follows the selection's insertion order. An id missing from
/// `catalog` means the caller holds a stale snapshot and must refetch.
pub fn build_line_items(
    catalog: &[InventoryItem],
    selection: &SelectionSet,
) -> Result<Vec<LineItem>, CoreError> {
    let by_id: HashMap<&str, &InventoryItem> = catalog
        .iter()
        .map(|item| (item.id.as_str(), item))
        .collect();

    let mut items = Vec::with_capacity(selection.len());
    for (id, quantity) in selection.iter() {
        if quantity <= 0.0 {
            continue;
        }
        let entry = by_id.get(id).ok_or_else(|| {
            CoreError::NotFound(format!("inventory item `{id}` (catalog may be stale)"))
        })?;
        items.push(LineItem {
            item_name: entry.name.clone(),
            quantity,
            unit_price: entry.unit_price,
            line_total: compute_line_total(quantity, entry.unit_price),
        });
    }
    Ok(items)
}

/// Running total of the composed lines, before tax.
pub fn selection_total(items: &[LineItem]) -> f64 {
    items.iter().fold(0.0, |sum, item| sum + item.line_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use billdesk_domain::NewInventoryItem;

    fn catalog() -> Vec<InventoryItem> {
        vec![
            InventoryItem::from_new("1", NewInventoryItem::new("Widget", 100.0)),
            InventoryItem::from_new("2", NewInventoryItem::new("Gadget", 2.5)),
        ]
    }

    #[test]
    fn follows_selection_order() {
        let selection: SelectionSet = [("2", 4.0), ("1", 1.0)].into_iter().collect();
        let items = build_line_items(&catalog(), &selection).unwrap();

        let names: Vec<_> = items.iter().map(|item| item.item_name.as_str()).collect();
        assert_eq!(names, vec!["Gadget", "Widget"]);
        assert_eq!(items[0].line_total, 10.0);
        assert_eq!(selection_total(&items), 110.0);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let selection: SelectionSet = [("1", 1.0), ("missing", 1.0)].into_iter().collect();
        let err = build_line_items(&catalog(), &selection).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(message) if message.contains("missing")));
    }

    #[test]
    fn empty_selection_yields_no_items() {
        let items = build_line_items(&catalog(), &SelectionSet::new()).unwrap();
        assert!(items.is_empty());
    }
}
