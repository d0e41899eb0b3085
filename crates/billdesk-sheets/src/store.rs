use std::sync::Mutex;

use tracing::{debug, info};
use uuid::Uuid;

use billdesk_core::{storage::BillingStore, CoreError};
use billdesk_domain::{Bill, InventoryItem, InventoryUpdate, NewInventoryItem};

use crate::{
    client::SheetClient,
    codec::{
        self, bill_columns, inventory_columns, split_header, Row, SheetLayout, SheetSchema,
        BILLS_SCHEMA, INVENTORY_SCHEMA,
    },
    sync::SheetMirror,
};

/// [`BillingStore`] over the `Bills` and `Inventory` sheets of a workbook.
///
/// Without a client every operation fails with an upstream error, matching a
/// deployment whose spreadsheet credentials were never provided.
#[derive(Debug)]
pub struct SheetStore<C: SheetClient> {
    client: Option<C>,
    write_lock: Mutex<()>,
}

impl<C: SheetClient> SheetStore<C> {
    pub fn new(client: C) -> Self {
        Self {
            client: Some(client),
            write_lock: Mutex::new(()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            client: None,
            write_lock: Mutex::new(()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn client(&self) -> Result<&C, CoreError> {
        self.client
            .as_ref()
            .ok_or_else(|| CoreError::Upstream("spreadsheet not configured".into()))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, CoreError> {
        self.write_lock
            .lock()
            .map_err(|_| CoreError::Upstream("sheet store lock poisoned".into()))
    }

    /// Rows of `schema`'s sheet with a usable header in place, plus the
    /// resolved layout and whether the header had to be created.
    fn prepared_rows(
        client: &C,
        schema: &'static SheetSchema,
    ) -> Result<(Vec<Row>, SheetLayout, bool), CoreError> {
        let mut rows = client.read_rows(schema.name)?;
        let fresh = split_header(&rows).is_none();
        if fresh {
            rows = vec![schema.header_row()];
        }
        let layout = schema.layout(&rows[0])?;
        Ok((rows, layout, fresh))
    }

    fn append_record(
        client: &C,
        schema: &'static SheetSchema,
        (mut rows, mut layout, fresh): (Vec<Row>, SheetLayout, bool),
        values: &[String],
    ) -> Result<(), CoreError> {
        rows.push(Row::new());
        let index = rows.len() - 1;
        let header_changed = layout.fill_row(&mut rows, index, values);
        if fresh || header_changed {
            client.overwrite(schema.name, rows)
        } else {
            let appended = rows.swap_remove(index);
            client.append_rows(schema.name, vec![appended])
        }
    }
}

fn row_index_with(layout: &SheetLayout, rows: &[Row], column: usize, key: &str) -> Option<usize> {
    rows.iter()
        .enumerate()
        .skip(1)
        .find(|(_, row)| layout.cell(row, column) == Some(key))
        .map(|(index, _)| index)
}

impl<C: SheetClient> BillingStore for SheetStore<C> {
    fn list_bills(&self) -> Result<Vec<Bill>, CoreError> {
        let rows = self.client()?.read_rows(BILLS_SCHEMA.name)?;
        let bills = codec::decode_bills(&rows)?;
        debug!(count = bills.len(), "loaded bills from sheet");
        Ok(bills)
    }

    fn create_bill(&self, bill: &Bill) -> Result<(), CoreError> {
        let client = self.client()?;
        let _guard = self.lock()?;
        let prepared = Self::prepared_rows(client, &BILLS_SCHEMA)?;
        let (rows, layout, _) = &prepared;
        if row_index_with(layout, rows, bill_columns::NUMBER, &bill.bill_number).is_some() {
            return Err(CoreError::Duplicate(format!(
                "bill `{}` already exists",
                bill.bill_number
            )));
        }
        let values = codec::bill_values(bill)?;
        Self::append_record(client, &BILLS_SCHEMA, prepared, &values)?;
        info!(bill = %bill.bill_number, total = bill.total, "bill appended to sheet");
        Ok(())
    }

    fn list_inventory(&self) -> Result<Vec<InventoryItem>, CoreError> {
        let rows = self.client()?.read_rows(INVENTORY_SCHEMA.name)?;
        codec::decode_inventory(&rows)
    }

    fn create_inventory_item(&self, item: NewInventoryItem) -> Result<InventoryItem, CoreError> {
        let client = self.client()?;
        let _guard = self.lock()?;
        let prepared = Self::prepared_rows(client, &INVENTORY_SCHEMA)?;
        let created = InventoryItem::from_new(Uuid::new_v4().simple().to_string(), item);
        Self::append_record(
            client,
            &INVENTORY_SCHEMA,
            prepared,
            &codec::inventory_values(&created),
        )?;
        Ok(created)
    }

    fn update_inventory_item(
        &self,
        id: &str,
        update: InventoryUpdate,
    ) -> Result<InventoryItem, CoreError> {
        let client = self.client()?;
        let _guard = self.lock()?;
        let (mut rows, mut layout, _) = Self::prepared_rows(client, &INVENTORY_SCHEMA)?;
        let not_found = || CoreError::NotFound(format!("inventory item `{id}`"));
        let index =
            row_index_with(&layout, &rows, inventory_columns::ID, id).ok_or_else(not_found)?;
        let mut item =
            codec::decode_inventory_row(&layout, &rows[index], index + 1).ok_or_else(not_found)?;
        item.apply(update);
        layout.fill_row(&mut rows, index, &codec::inventory_values(&item));
        client.overwrite(INVENTORY_SCHEMA.name, rows)?;
        Ok(item)
    }

    fn delete_inventory_item(&self, id: &str) -> Result<(), CoreError> {
        let client = self.client()?;
        let _guard = self.lock()?;
        let (rows, layout, fresh) = Self::prepared_rows(client, &INVENTORY_SCHEMA)?;
        if fresh {
            debug!(id, "delete against empty inventory sheet ignored");
            return Ok(());
        }
        let before = rows.len();
        let kept: Vec<Row> = rows
            .into_iter()
            .enumerate()
            .filter(|(index, row)| {
                *index == 0 || layout.cell(row, inventory_columns::ID) != Some(id)
            })
            .map(|(_, row)| row)
            .collect();
        if kept.len() == before {
            debug!(id, "delete of unknown inventory item ignored");
            return Ok(());
        }
        client.overwrite(INVENTORY_SCHEMA.name, kept)
    }
}

impl<C: SheetClient> SheetMirror for SheetStore<C> {
    fn overwrite_bills(&self, bills: &[Bill]) -> Result<usize, CoreError> {
        let client = self.client()?;
        let _guard = self.lock()?;
        client.overwrite(BILLS_SCHEMA.name, codec::encode_bills(bills)?)?;
        info!(count = bills.len(), "bills sheet overwritten");
        Ok(bills.len())
    }

    fn overwrite_inventory(&self, items: &[InventoryItem]) -> Result<usize, CoreError> {
        let client = self.client()?;
        let _guard = self.lock()?;
        client.overwrite(INVENTORY_SCHEMA.name, codec::encode_inventory(items))?;
        info!(count = items.len(), "inventory sheet overwritten");
        Ok(items.len())
    }
}
