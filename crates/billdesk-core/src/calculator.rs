//! Money arithmetic for line items and bill totals.
//!
//! Values are never rounded here; rounding is a display concern.

use billdesk_domain::{BillTotals, LineItem};

/// Returns `quantity * unit_price`. Negative inputs are accepted.
pub fn compute_line_total(quantity: f64, unit_price: f64) -> f64 {
    quantity * unit_price
}

/// Sums line totals in input order and applies `tax_rate_percent`.
pub fn compute_bill_totals(items: &[LineItem], tax_rate_percent: f64) -> BillTotals {
    let subtotal = items.iter().fold(0.0, |sum, item| sum + item.line_total);
    let tax_amount = subtotal * tax_rate_percent / 100.0;
    BillTotals {
        subtotal,
        tax_amount,
        total: subtotal + tax_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_is_plain_product() {
        assert_eq!(compute_line_total(3.0, 2.5), 7.5);
        assert_eq!(compute_line_total(-1.0, 4.0), -4.0);
        assert_eq!(compute_line_total(0.0, 99.0), 0.0);
    }

    #[test]
    fn empty_items_yield_zero_totals() {
        assert_eq!(compute_bill_totals(&[], 18.0), BillTotals::default());
    }
}
