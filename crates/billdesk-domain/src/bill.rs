//! Persisted bill records and the customer data they carry.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{common::*, line_item::LineItem};

/// Calendar date format used for `Bill::date`.
pub const BILL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Customer fields entered when composing a bill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

impl CustomerDetails {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }
}

/// Subtotal, tax and grand total derived from a set of line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BillTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

/// An issued bill. Immutable once persisted.
///
/// `date` holds the stored text rather than a parsed date so that records
/// written by other tools survive a read; use [`Bill::issue_date`] to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub bill_number: String,
    pub date: String,
    pub customer_name: String,
    #[serde(default)]
    pub customer_address: String,
    #[serde(default)]
    pub customer_phone: String,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    #[serde(rename = "tax")]
    pub tax_amount: f64,
    pub total: f64,
}

impl Bill {
    /// Parses the stored date. Accepts `YYYY-MM-DD` and full timestamps,
    /// keeping only the calendar date.
    pub fn issue_date(&self) -> Option<NaiveDate> {
        parse_bill_date(&self.date)
    }

    pub fn totals(&self) -> BillTotals {
        BillTotals {
            subtotal: self.subtotal,
            tax_amount: self.tax_amount,
            total: self.total,
        }
    }
}

impl Identifiable for Bill {
    fn key(&self) -> &str {
        &self.bill_number
    }
}

impl Displayable for Bill {
    fn display_label(&self) -> String {
        format!("{} [{}] {}", self.bill_number, self.date, self.customer_name)
    }
}

/// Parses a stored bill date into a calendar date.
pub fn parse_bill_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, BILL_DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|stamp| stamp.date())
}
