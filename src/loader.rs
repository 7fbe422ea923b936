//! Catalogue file loading
//!
//! Reads the externally stored catalogues from a data directory:
//! - ingredient / single-serve tables: CSV, or the first worksheet of an
//!   `.xlsx` / `.xls` / `.ods` workbook
//! - recipe bank, side dish and carb databases: JSON
//!
//! Failures are returned as errors; `Catalogs::load` turns them into
//! diagnostics and empty catalogues.

use crate::config::Config;
use crate::error::{MacroChefError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use macrochef_common::{Catalog, CatalogSource, Table};
use std::path::{Path, PathBuf};

const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Catalogue files under one data directory
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    data_dir: PathBuf,
    ingredient_table: String,
    guideline_table: String,
    recipe_bank: String,
    side_dish_db: String,
    carb_db: String,
}

impl FileCatalogSource {
    pub fn new(data_dir: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            data_dir: data_dir.into(),
            ingredient_table: config.ingredient_table.clone(),
            guideline_table: config.guideline_table.clone(),
            recipe_bank: config.recipe_bank.clone(),
            side_dish_db: config.side_dish_db.clone(),
            carb_db: config.carb_db.clone(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}

impl CatalogSource for FileCatalogSource {
    type Error = MacroChefError;

    fn ingredient_table(&self) -> Result<Table> {
        read_table(&self.path(&self.ingredient_table))
    }

    fn guideline_table(&self) -> Result<Table> {
        read_table(&self.path(&self.guideline_table))
    }

    fn recipe_bank(&self) -> Result<Catalog> {
        read_catalog(&self.path(&self.recipe_bank))
    }

    fn side_dishes(&self) -> Result<Catalog> {
        read_catalog(&self.path(&self.side_dish_db))
    }

    fn carbs(&self) -> Result<Catalog> {
        read_catalog(&self.path(&self.carb_db))
    }
}

/// Read a table, choosing the reader by file extension
pub fn read_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(MacroChefError::FileNotFound(path.display().to_string()));
    }

    let is_workbook = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| WORKBOOK_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false);

    let table = if is_workbook {
        read_workbook(path)?
    } else {
        let content = std::fs::read_to_string(path)?;
        Table::from_csv_str(&content)?
    };

    tracing::debug!("read {} rows from {}", table.rows().len(), path.display());
    Ok(table)
}

/// First worksheet of a workbook; the first row is the header
fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| MacroChefError::Workbook(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| MacroChefError::Workbook(format!("{}: no worksheets", path.display())))?
        .map_err(|e| MacroChefError::Workbook(format!("{}: {}", path.display(), e)))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .ok_or_else(|| MacroChefError::Workbook(format!("{}: no header row", path.display())))?
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();

    let rows = rows
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|row| row.iter().any(Option::is_some))
        .collect();

    Ok(Table::new(headers, rows))
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub fn read_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(MacroChefError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let catalog = Catalog::from_json(&content)?;
    tracing::debug!("read {} entries from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Read and parse a `recipe_config.json`
pub fn read_recipe_config(path: &Path) -> Result<macrochef_common::RecipeConfig> {
    if !path.exists() {
        return Err(MacroChefError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    macrochef_common::RecipeConfig::from_json(&content)
        .map_err(|e| MacroChefError::InvalidRequest(format!("{}: {}", path.display(), e)))
}

/// Raw model output for the final check
pub fn read_llm_output(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(MacroChefError::FileNotFound(path.display().to_string()));
    }

    Ok(std::fs::read_to_string(path)?)
}
