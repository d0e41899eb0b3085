//! Facade that coordinates the inventory, bill issuing, reports and sync on
//! top of one persistence backend.

use std::{path::Path, sync::Arc};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use billdesk_config::{Config, StorageBackend};
use billdesk_core::{
    build_line_items, BillService, BillingStore, Clock, DateValidation, ImageStore,
    InventoryService, ReportService, SalesReport,
};
use billdesk_domain::{
    Bill, CustomerDetails, Displayable, InventoryItem, InventoryUpdate, LineItem, NewInventoryItem,
    ReportPeriod, SelectionSet,
};
use billdesk_sheets::{FileWorkbook, SheetMirror, SheetStore, SyncScope, SyncSummary};
use billdesk_storage_json::{JsonBillingStore, LocalImageStore};

use crate::errors::DeskError;

/// Runtime knobs taken from [`Config`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeskSettings {
    pub default_tax_rate: f64,
    pub date_validation: DateValidation,
    /// Total attempts at a fresh bill number before a duplicate is reported.
    pub bill_number_attempts: u32,
}

impl Default for DeskSettings {
    fn default() -> Self {
        Self {
            default_tax_rate: 0.0,
            date_validation: DateValidation::Lenient,
            bill_number_attempts: Config::default_bill_number_attempts(),
        }
    }
}

impl DeskSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_tax_rate: config.default_tax_rate,
            date_validation: if config.strict_dates {
                DateValidation::Strict
            } else {
                DateValidation::Lenient
            },
            bill_number_attempts: config.bill_number_attempts.max(1),
        }
    }
}

pub struct BillingDesk {
    store: Box<dyn BillingStore>,
    images: Option<Box<dyn ImageStore>>,
    clock: Arc<dyn Clock>,
    settings: DeskSettings,
}

impl BillingDesk {
    pub fn new(store: Box<dyn BillingStore>, clock: Arc<dyn Clock>, settings: DeskSettings) -> Self {
        Self {
            store,
            images: None,
            clock,
            settings,
        }
    }

    pub fn with_image_store(mut self, images: Box<dyn ImageStore>) -> Self {
        self.images = Some(images);
        self
    }

    /// Opens the backend selected by `config`, resolving relative locations
    /// against `base_dir`.
    pub fn open(config: &Config, base_dir: &Path, clock: Arc<dyn Clock>) -> Result<Self, DeskError> {
        let store: Box<dyn BillingStore> = match config.storage {
            StorageBackend::Json => {
                let store = JsonBillingStore::new(config.resolve_data_dir(base_dir))?;
                debug!(data_dir = %store.data_dir().display(), "json store ready");
                if config.seed_inventory {
                    store.seed_default_inventory()?;
                }
                Box::new(store)
            }
            StorageBackend::Sheet => match &config.workbook_path {
                Some(path) => Box::new(SheetStore::new(FileWorkbook::new(path.clone()))),
                None => {
                    warn!("sheet storage selected without a workbook_path");
                    Box::new(SheetStore::<FileWorkbook>::unconfigured())
                }
            },
        };
        let images = LocalImageStore::new(config.resolve_image_dir(base_dir))?;
        info!(storage = %config.storage, images = %images.root().display(), "billing desk opened");
        Ok(Self::new(store, clock, DeskSettings::from_config(config))
            .with_image_store(Box::new(images)))
    }

    pub fn settings(&self) -> &DeskSettings {
        &self.settings
    }

    pub fn apply_settings(&mut self, settings: DeskSettings) {
        self.settings = settings;
    }

    pub fn store(&self) -> &dyn BillingStore {
        self.store.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn inventory(&self) -> Result<Vec<InventoryItem>, DeskError> {
        Ok(self.store.list_inventory()?)
    }

    pub fn add_item(&self, item: NewInventoryItem) -> Result<InventoryItem, DeskError> {
        Ok(InventoryService::add(self.store(), item)?)
    }

    pub fn update_item(&self, id: &str, update: InventoryUpdate) -> Result<InventoryItem, DeskError> {
        Ok(InventoryService::update(self.store(), id, update)?)
    }

    pub fn remove_item(&self, id: &str) -> Result<(), DeskError> {
        Ok(InventoryService::remove(self.store(), id)?)
    }

    /// Stores the image and points the item at it.
    pub fn attach_image(
        &self,
        id: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<InventoryItem, DeskError> {
        let images = self
            .images
            .as_ref()
            .ok_or_else(|| DeskError::Configuration("no image store configured".into()))?;
        if !self.inventory()?.iter().any(|item| item.id == id) {
            return Err(billdesk_core::CoreError::NotFound(format!("inventory item `{id}`")).into());
        }
        let reference = images.store_image(file_name, bytes)?;
        self.update_item(
            id,
            InventoryUpdate {
                image_ref: Some(reference),
                ..InventoryUpdate::default()
            },
        )
    }

    /// Line items for `selection` against a fresh catalog snapshot.
    pub fn compose(&self, selection: &SelectionSet) -> Result<Vec<LineItem>, DeskError> {
        let catalog = self.inventory()?;
        Ok(build_line_items(&catalog, selection)?)
    }

    /// Builds and persists a bill. A taken bill number is regenerated until
    /// the configured attempts run out.
    pub fn issue_bill(
        &self,
        customer: &CustomerDetails,
        selection: &SelectionSet,
        tax_rate: Option<f64>,
    ) -> Result<Bill, DeskError> {
        let items = self.compose(selection)?;
        for item in &items {
            debug!(line = %item.display_label(), "bill line");
        }
        let tax_rate = tax_rate.unwrap_or(self.settings.default_tax_rate);
        let attempts = self.settings.bill_number_attempts.max(1);

        let mut attempt = 0;
        loop {
            let bill =
                BillService::build_attempt(customer, &items, tax_rate, self.clock.as_ref(), attempt)?;
            match self.store.create_bill(&bill) {
                Ok(()) => {
                    info!(bill = %bill.bill_number, customer = %bill.customer_name, "bill issued");
                    return Ok(bill);
                }
                Err(err) if err.is_duplicate() && attempt + 1 < attempts => {
                    warn!(bill = %bill.bill_number, attempt, "bill number taken, regenerating");
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// All bills, most recent first.
    pub fn bills(&self) -> Result<Vec<Bill>, DeskError> {
        let mut bills = self.store.list_bills()?;
        bills.reverse();
        Ok(bills)
    }

    pub fn bill(&self, bill_number: &str) -> Result<Bill, DeskError> {
        Ok(self.store.find_bill(bill_number.trim())?)
    }

    /// Report for the period containing `reference` (today when `None`).
    pub fn sales_report(
        &self,
        period: ReportPeriod,
        reference: Option<NaiveDate>,
    ) -> Result<SalesReport, DeskError> {
        let bills = self.store.list_bills()?;
        let reference = reference.unwrap_or_else(|| self.today());
        Ok(ReportService::summarize(
            &bills,
            period,
            reference,
            self.settings.date_validation,
        )?)
    }

    /// Overwrites `target` with the full local contents for `scope`.
    pub fn sync_to(
        &self,
        target: &dyn SheetMirror,
        scope: SyncScope,
    ) -> Result<SyncSummary, DeskError> {
        let mut summary = SyncSummary::default();
        if scope.includes_bills() {
            let bills = self.store.list_bills()?;
            summary.bills = Some(target.overwrite_bills(&bills)?);
        }
        if scope.includes_inventory() {
            let items = self.store.list_inventory()?;
            summary.inventory = Some(target.overwrite_inventory(&items)?);
        }
        info!(%scope, bills = ?summary.bills, inventory = ?summary.inventory, "sync finished");
        Ok(summary)
    }
}
