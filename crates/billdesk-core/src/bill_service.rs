//! Assembles bill records from customer data and line items.

use billdesk_domain::{Bill, CustomerDetails, LineItem, BILL_DATE_FORMAT};

use crate::{calculator::compute_bill_totals, time::Clock, CoreError};

pub const BILL_NUMBER_PREFIX: &str = "BILL-";

/// Builds validated [`Bill`] values. Persisting them is the caller's job.
pub struct BillService;

impl BillService {
    /// Builds a bill for the first attempt at a bill number.
    pub fn build(
        customer: &CustomerDetails,
        items: &[LineItem],
        tax_rate_percent: f64,
        clock: &dyn Clock,
    ) -> Result<Bill, CoreError> {
        Self::build_attempt(customer, items, tax_rate_percent, clock, 0)
    }

    /// Builds a bill whose number is derived from `clock` and `attempt`.
    ///
    /// Attempt 0 yields `BILL-<millis>`; later attempts append `-<attempt>`
    /// so a regenerated number differs even when the clock has not moved.
    pub fn build_attempt(
        customer: &CustomerDetails,
        items: &[LineItem],
        tax_rate_percent: f64,
        clock: &dyn Clock,
        attempt: u32,
    ) -> Result<Bill, CoreError> {
        let customer_name = customer.name.trim();
        if customer_name.is_empty() {
            return Err(CoreError::Validation("customer name is required".into()));
        }
        if items.is_empty() {
            return Err(CoreError::Validation(
                "a bill needs at least one item".into(),
            ));
        }
        for item in items {
            validate_line_item(item)?;
        }
        if !tax_rate_percent.is_finite() || tax_rate_percent < 0.0 {
            return Err(CoreError::Validation(format!(
                "tax rate must be a non-negative number, got {tax_rate_percent}"
            )));
        }

        let now = clock.now();
        let totals = compute_bill_totals(items, tax_rate_percent);
        Ok(Bill {
            bill_number: bill_number(now.timestamp_millis(), attempt),
            date: now.date_naive().format(BILL_DATE_FORMAT).to_string(),
            customer_name: customer_name.to_string(),
            customer_address: customer.address.trim().to_string(),
            customer_phone: customer.phone.trim().to_string(),
            items: items.to_vec(),
            subtotal: totals.subtotal,
            tax_amount: totals.tax_amount,
            total: totals.total,
        })
    }
}

fn bill_number(millis: i64, attempt: u32) -> String {
    if attempt == 0 {
        format!("{BILL_NUMBER_PREFIX}{millis}")
    } else {
        format!("{BILL_NUMBER_PREFIX}{millis}-{attempt}")
    }
}

fn validate_line_item(item: &LineItem) -> Result<(), CoreError> {
    if item.item_name.trim().is_empty() {
        return Err(CoreError::Validation("line item name is required".into()));
    }
    if !item.quantity.is_finite() || item.quantity <= 0.0 {
        return Err(CoreError::Validation(format!(
            "quantity for `{}` must be greater than zero",
            item.item_name
        )));
    }
    if !item.unit_price.is_finite() || item.unit_price < 0.0 {
        return Err(CoreError::Validation(format!(
            "price for `{}` must be a non-negative number",
            item.item_name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use chrono::{TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 30).unwrap())
    }

    #[test]
    fn date_drops_time_of_day() {
        let bill = BillService::build(
            &CustomerDetails::new("Alice"),
            &[LineItem::new("Widget", 1.0, 5.0)],
            0.0,
            &clock(),
        )
        .unwrap();
        assert_eq!(bill.date, "2024-03-10");
        assert_eq!(
            bill.bill_number,
            format!("BILL-{}", clock().0.timestamp_millis())
        );
    }

    #[test]
    fn retry_attempts_change_the_number() {
        let customer = CustomerDetails::new("Alice");
        let items = [LineItem::new("Widget", 1.0, 5.0)];
        let first = BillService::build_attempt(&customer, &items, 0.0, &clock(), 0).unwrap();
        let second = BillService::build_attempt(&customer, &items, 0.0, &clock(), 1).unwrap();
        assert_ne!(first.bill_number, second.bill_number);
        assert!(second.bill_number.ends_with("-1"));
    }

    #[test]
    fn stored_totals_match_the_calculator() {
        let items = [LineItem::new("Widget", 2.0, 100.0), LineItem::new("Gadget", 1.0, 50.0)];
        let bill =
            BillService::build(&CustomerDetails::new("Alice"), &items, 10.0, &clock()).unwrap();
        assert_eq!(bill.totals(), compute_bill_totals(&items, 10.0));
        assert_eq!(bill.totals().total, 275.0);
    }

    #[test]
    fn customer_fields_are_trimmed() {
        let customer = CustomerDetails::new("  Alice ")
            .with_address(" 1 Main St ")
            .with_phone(" 555 ");
        let bill = BillService::build(
            &customer,
            &[LineItem::new("Widget", 1.0, 5.0)],
            0.0,
            &clock(),
        )
        .unwrap();
        assert_eq!(bill.customer_name, "Alice");
        assert_eq!(bill.customer_address, "1 Main St");
        assert_eq!(bill.customer_phone, "555");
    }

    #[test]
    fn rejects_invalid_lines_and_rates() {
        let customer = CustomerDetails::new("Alice");
        let zero_qty = [LineItem::new("Widget", 0.0, 5.0)];
        let negative_price = [LineItem::new("Widget", 1.0, -5.0)];
        let unnamed = [LineItem::new(" ", 1.0, 5.0)];
        let fine = [LineItem::new("Widget", 1.0, 5.0)];

        for items in [&zero_qty[..], &negative_price[..], &unnamed[..]] {
            let err = BillService::build(&customer, items, 0.0, &clock()).unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)));
        }
        let err = BillService::build(&customer, &fine, -1.0, &clock()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
