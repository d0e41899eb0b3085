use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, RwLock},
};

use tracing::debug;

use billdesk_core::CoreError;

use crate::codec::Row;

/// Raw row access to a workbook of named sheets.
///
/// Reading a sheet that does not exist yields no rows.
pub trait SheetClient: Send + Sync {
    fn read_rows(&self, sheet: &str) -> Result<Vec<Row>, CoreError>;

    fn append_rows(&self, sheet: &str, rows: Vec<Row>) -> Result<(), CoreError>;

    /// Replaces every row of `sheet`.
    fn overwrite(&self, sheet: &str, rows: Vec<Row>) -> Result<(), CoreError>;
}

type Sheets = BTreeMap<String, Vec<Row>>;

fn poisoned() -> CoreError {
    CoreError::Upstream("workbook lock poisoned".into())
}

/// In-process workbook.
#[derive(Debug, Default)]
pub struct MemoryWorkbook {
    sheets: RwLock<Sheets>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(self, name: &str, rows: Vec<Row>) -> Self {
        if let Ok(mut sheets) = self.sheets.write() {
            sheets.insert(name.to_string(), rows);
        }
        self
    }

    /// Snapshot of one sheet's rows.
    pub fn sheet(&self, name: &str) -> Vec<Row> {
        self.read_rows(name).unwrap_or_default()
    }
}

impl SheetClient for MemoryWorkbook {
    fn read_rows(&self, sheet: &str) -> Result<Vec<Row>, CoreError> {
        let sheets = self.sheets.read().map_err(|_| poisoned())?;
        Ok(sheets.get(sheet).cloned().unwrap_or_default())
    }

    fn append_rows(&self, sheet: &str, rows: Vec<Row>) -> Result<(), CoreError> {
        let mut sheets = self.sheets.write().map_err(|_| poisoned())?;
        sheets.entry(sheet.to_string()).or_default().extend(rows);
        Ok(())
    }

    fn overwrite(&self, sheet: &str, rows: Vec<Row>) -> Result<(), CoreError> {
        let mut sheets = self.sheets.write().map_err(|_| poisoned())?;
        sheets.insert(sheet.to_string(), rows);
        Ok(())
    }
}

/// Workbook kept as one JSON document (`{ "<sheet>": [[cell, ...], ...] }`).
#[derive(Debug)]
pub struct FileWorkbook {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileWorkbook {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Sheets, CoreError> {
        if !self.path.exists() {
            return Ok(Sheets::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Sheets::new());
        }
        serde_json::from_str(&data)
            .map_err(|err| CoreError::Upstream(format!("{}: {}", self.path.display(), err)))
    }

    fn store(&self, sheets: &Sheets) -> Result<(), CoreError> {
        let json =
            serde_json::to_string_pretty(sheets).map_err(|err| CoreError::Serde(err.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update(&self, sheet: &str, apply: impl FnOnce(&mut Vec<Row>)) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().map_err(|_| poisoned())?;
        let mut sheets = self.load()?;
        apply(sheets.entry(sheet.to_string()).or_default());
        self.store(&sheets)?;
        debug!(workbook = %self.path.display(), sheet, "workbook updated");
        Ok(())
    }
}

impl SheetClient for FileWorkbook {
    fn read_rows(&self, sheet: &str) -> Result<Vec<Row>, CoreError> {
        let mut sheets = self.load()?;
        Ok(sheets.remove(sheet).unwrap_or_default())
    }

    fn append_rows(&self, sheet: &str, rows: Vec<Row>) -> Result<(), CoreError> {
        self.update(sheet, |existing| existing.extend(rows))
    }

    fn overwrite(&self, sheet: &str, rows: Vec<Row>) -> Result<(), CoreError> {
        self.update(sheet, |existing| *existing = rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn file_workbook_keeps_sheets_independent() {
        let dir = tempfile::tempdir().unwrap();
        let book = FileWorkbook::new(dir.path().join("book.json"));

        assert!(book.read_rows("Bills").unwrap().is_empty());
        book.overwrite("Bills", vec![row(&["Bill Number"])]).unwrap();
        book.append_rows("Bills", vec![row(&["BILL-1"])]).unwrap();
        book.append_rows("Inventory", vec![row(&["ID"])]).unwrap();

        assert_eq!(
            book.read_rows("Bills").unwrap(),
            vec![row(&["Bill Number"]), row(&["BILL-1"])]
        );
        assert_eq!(book.read_rows("Inventory").unwrap(), vec![row(&["ID"])]);
        assert!(!dir.path().join("book.json.tmp").exists());
    }

    #[test]
    fn memory_workbook_overwrite_replaces_rows() {
        let book = MemoryWorkbook::new().with_sheet("Bills", vec![row(&["a"]), row(&["b"])]);
        book.overwrite("Bills", vec![row(&["c"])]).unwrap();
        assert_eq!(book.sheet("Bills"), vec![row(&["c"])]);
    }
}
