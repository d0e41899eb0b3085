//! Row codec for the `Bills` and `Inventory` sheets.
//!
//! Columns are found by header text, so reordered or legacy sheets still
//! decode. Encoding always produces the current header and column order.

use tracing::warn;

use billdesk_core::CoreError;
use billdesk_domain::{Bill, InventoryItem};

/// One spreadsheet row as raw cell text.
pub type Row = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub header: &'static str,
    pub aliases: &'static [&'static str],
    pub required: bool,
    /// Value used when the column or the cell is absent.
    pub default: &'static str,
}

impl ColumnSpec {
    const fn required(header: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            header,
            aliases,
            required: true,
            default: "",
        }
    }

    const fn optional(
        header: &'static str,
        aliases: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self {
            header,
            aliases,
            required: false,
            default,
        }
    }

    fn matches(&self, cell: &str) -> bool {
        let cell = cell.trim();
        cell.eq_ignore_ascii_case(self.header)
            || self
                .aliases
                .iter()
                .any(|alias| cell.eq_ignore_ascii_case(alias))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct SheetSchema {
    pub name: &'static str,
    pub version: u32,
    pub columns: &'static [ColumnSpec],
}

pub static BILLS_SCHEMA: SheetSchema = SheetSchema {
    name: "Bills",
    version: 1,
    columns: &[
        ColumnSpec::required("Bill Number", &["billNumber", "Bill No"]),
        ColumnSpec::required("Bill Data (JSON)", &["Bill Data", "billData"]),
    ],
};

pub static INVENTORY_SCHEMA: SheetSchema = SheetSchema {
    name: "Inventory",
    version: 1,
    columns: &[
        ColumnSpec::required("ID", &["Item ID"]),
        ColumnSpec::required("Product Name", &["Name"]),
        ColumnSpec::optional("Price", &["Unit Price"], "0"),
        ColumnSpec::optional("Description", &[], ""),
        ColumnSpec::optional("Image URL", &["Image"], ""),
    ],
};

pub(crate) mod bill_columns {
    pub const NUMBER: usize = 0;
    pub const DATA: usize = 1;
}

pub(crate) mod inventory_columns {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const PRICE: usize = 2;
    pub const DESCRIPTION: usize = 3;
    pub const IMAGE: usize = 4;
}

impl SheetSchema {
    pub fn header_row(&self) -> Row {
        self.columns
            .iter()
            .map(|column| column.header.to_string())
            .collect()
    }

    /// Locates every schema column in `header`. Fails when a required column is absent.
    pub fn layout(&'static self, header: &[String]) -> Result<SheetLayout, CoreError> {
        let positions: Vec<Option<usize>> = self
            .columns
            .iter()
            .map(|column| header.iter().position(|cell| column.matches(cell)))
            .collect();
        if let Some((missing, _)) = self
            .columns
            .iter()
            .zip(&positions)
            .find(|(column, position)| column.required && position.is_none())
        {
            return Err(CoreError::Upstream(format!(
                "sheet `{}` is missing required column `{}`",
                self.name, missing.header
            )));
        }
        Ok(SheetLayout {
            schema: self,
            positions,
        })
    }
}

/// Schema columns resolved against one sheet's header row.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    schema: &'static SheetSchema,
    positions: Vec<Option<usize>>,
}

impl SheetLayout {
    /// Trimmed cell text, `None` when the column or cell is missing or blank.
    pub fn cell<'r>(&self, row: &'r [String], column: usize) -> Option<&'r str> {
        let position = self.positions.get(column).copied().flatten()?;
        row.get(position)
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
    }

    fn value<'r>(&self, row: &'r [String], column: usize) -> &'r str {
        self.cell(row, column)
            .unwrap_or(self.schema.columns[column].default)
    }

    /// Writes schema-ordered `values` into `rows[index]`. A missing column is
    /// appended to the header only when it has something to hold.
    /// Returns whether the header row changed.
    pub fn fill_row(&mut self, rows: &mut [Row], index: usize, values: &[String]) -> bool {
        let mut header_changed = false;
        for (column, value) in values.iter().enumerate().take(self.positions.len()) {
            let position = match self.positions[column] {
                Some(position) => position,
                None if value.is_empty() => continue,
                None => {
                    let position = rows.iter().map(Vec::len).max().unwrap_or(0);
                    if let Some(header) = rows.first_mut() {
                        header.resize(position, String::new());
                        header.push(self.schema.columns[column].header.to_string());
                    }
                    self.positions[column] = Some(position);
                    header_changed = true;
                    position
                }
            };
            if let Some(row) = rows.get_mut(index) {
                if row.len() <= position {
                    row.resize(position + 1, String::new());
                }
                row[position] = value.clone();
            }
        }
        header_changed
    }
}

/// Splits off the header row. A sheet without one reads as empty.
pub(crate) fn split_header(rows: &[Row]) -> Option<(&Row, &[Row])> {
    let (header, body) = rows.split_first()?;
    if is_blank(header) {
        return None;
    }
    Some((header, body))
}

pub(crate) fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Decodes the `Bills` sheet, skipping rows that cannot be read.
pub fn decode_bills(rows: &[Row]) -> Result<Vec<Bill>, CoreError> {
    let Some((header, body)) = split_header(rows) else {
        return Ok(Vec::new());
    };
    let layout = BILLS_SCHEMA.layout(header)?;
    Ok(body
        .iter()
        .enumerate()
        .filter_map(|(offset, row)| decode_bill_row(&layout, row, offset + 2))
        .collect())
}

/// `line` is the 1-based sheet row, for log messages.
pub(crate) fn decode_bill_row(layout: &SheetLayout, row: &[String], line: usize) -> Option<Bill> {
    if is_blank(row) {
        return None;
    }
    let (Some(number), Some(data)) = (
        layout.cell(row, bill_columns::NUMBER),
        layout.cell(row, bill_columns::DATA),
    ) else {
        warn!(sheet = BILLS_SCHEMA.name, row = line, "skipping bill row with missing cells");
        return None;
    };
    match serde_json::from_str::<Bill>(data) {
        Ok(mut bill) => {
            bill.bill_number = number.to_string();
            Some(bill)
        }
        Err(err) => {
            warn!(
                sheet = BILLS_SCHEMA.name,
                row = line,
                error = %err,
                "skipping bill row with unreadable data"
            );
            None
        }
    }
}

/// Decodes the `Inventory` sheet, skipping rows without an id or a name.
pub fn decode_inventory(rows: &[Row]) -> Result<Vec<InventoryItem>, CoreError> {
    let Some((header, body)) = split_header(rows) else {
        return Ok(Vec::new());
    };
    let layout = INVENTORY_SCHEMA.layout(header)?;
    Ok(body
        .iter()
        .enumerate()
        .filter_map(|(offset, row)| decode_inventory_row(&layout, row, offset + 2))
        .collect())
}

pub(crate) fn decode_inventory_row(
    layout: &SheetLayout,
    row: &[String],
    line: usize,
) -> Option<InventoryItem> {
    if is_blank(row) {
        return None;
    }
    let (Some(id), Some(name)) = (
        layout.cell(row, inventory_columns::ID),
        layout.cell(row, inventory_columns::NAME),
    ) else {
        warn!(
            sheet = INVENTORY_SCHEMA.name,
            row = line,
            "skipping inventory row without id or name"
        );
        return None;
    };
    Some(InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        unit_price: parse_price(layout.value(row, inventory_columns::PRICE)),
        description: layout
            .cell(row, inventory_columns::DESCRIPTION)
            .map(str::to_string),
        image_ref: layout
            .cell(row, inventory_columns::IMAGE)
            .map(str::to_string),
    })
}

/// Unreadable prices decode as zero.
fn parse_price(raw: &str) -> f64 {
    raw.parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .unwrap_or(0.0)
}

pub fn bill_values(bill: &Bill) -> Result<Row, CoreError> {
    let data = serde_json::to_string(bill).map_err(|err| CoreError::Serde(err.to_string()))?;
    Ok(vec![bill.bill_number.clone(), data])
}

pub fn inventory_values(item: &InventoryItem) -> Row {
    vec![
        item.id.clone(),
        item.name.clone(),
        item.unit_price.to_string(),
        item.description.clone().unwrap_or_default(),
        item.image_ref.clone().unwrap_or_default(),
    ]
}

/// Header plus one row per bill, in the given order.
pub fn encode_bills(bills: &[Bill]) -> Result<Vec<Row>, CoreError> {
    let mut rows = Vec::with_capacity(bills.len() + 1);
    rows.push(BILLS_SCHEMA.header_row());
    for bill in bills {
        rows.push(bill_values(bill)?);
    }
    Ok(rows)
}

pub fn encode_inventory(items: &[InventoryItem]) -> Vec<Row> {
    std::iter::once(INVENTORY_SCHEMA.header_row())
        .chain(items.iter().map(inventory_values))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use billdesk_domain::LineItem;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn inventory_columns_are_found_by_header_not_position() {
        let rows = vec![
            row(&["price", "Description", "product name", "id"]),
            row(&["12.5", "Blue", "Widget", "w-1"]),
        ];
        let items = decode_inventory(&rows).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "w-1");
        assert_eq!(items[0].name, "Widget");
        assert_eq!(items[0].unit_price, 12.5);
        assert_eq!(items[0].description.as_deref(), Some("Blue"));
        assert_eq!(items[0].image_ref, None);
    }

    #[test]
    fn bad_price_decodes_as_zero_and_incomplete_rows_are_skipped() {
        let rows = vec![
            INVENTORY_SCHEMA.header_row(),
            row(&["1", "Widget", "abc", "", ""]),
            row(&["", "Orphan", "5", "", ""]),
            row(&["", "", "", "", ""]),
            row(&["3", "Gadget"]),
        ];
        let items = decode_inventory(&rows).unwrap();
        let names: Vec<_> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Widget", "Gadget"]);
        assert_eq!(items[0].unit_price, 0.0);
        assert_eq!(items[1].unit_price, 0.0);
    }

    #[test]
    fn missing_required_column_is_an_upstream_error() {
        let rows = vec![row(&["ID", "Price"]), row(&["1", "10"])];
        let err = decode_inventory(&rows).unwrap_err();
        assert!(matches!(err, CoreError::Upstream(_)));
    }

    #[test]
    fn headerless_sheet_reads_as_empty() {
        assert!(decode_bills(&[]).unwrap().is_empty());
        assert!(decode_bills(&[row(&["", " "])]).unwrap().is_empty());
    }

    #[test]
    fn bill_rows_with_bad_json_are_skipped() {
        let bill = Bill {
            bill_number: "BILL-1".into(),
            date: "2024-03-10".into(),
            customer_name: "Alice".into(),
            customer_address: String::new(),
            customer_phone: String::new(),
            items: vec![LineItem::new("Widget", 1.0, 10.0)],
            subtotal: 10.0,
            tax_amount: 0.0,
            total: 10.0,
        };
        let mut rows = encode_bills(std::slice::from_ref(&bill)).unwrap();
        rows.push(row(&["BILL-2", "{broken"]));
        rows.push(row(&["BILL-3"]));

        let decoded = decode_bills(&rows).unwrap();
        assert_eq!(decoded, vec![bill]);
    }

    #[test]
    fn fill_row_adds_missing_column_only_for_non_empty_values() {
        let mut rows = vec![
            row(&["ID", "Product Name", "Price", "Description"]),
            row(&["1", "Widget", "10", ""]),
        ];
        let mut layout = INVENTORY_SCHEMA.layout(&rows[0]).unwrap();

        let plain = row(&["1", "Widget", "11", "", ""]);
        assert!(!layout.fill_row(&mut rows, 1, &plain));
        assert_eq!(rows[0].len(), 4);

        let with_image = row(&["1", "Widget", "11", "", "img/w.png"]);
        assert!(layout.fill_row(&mut rows, 1, &with_image));
        assert_eq!(rows[0][4], "Image URL");
        assert_eq!(rows[1][4], "img/w.png");
    }
}
