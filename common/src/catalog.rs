//! Recipe, side dish and carb catalogues
//!
//! Read-only mappings loaded once at startup:
//! - recipe bank: variant key → serving bucket → entry
//! - side dish / carb databases: title → serving bucket → entry
//!
//! The carb database may also store an entry flat (no serving buckets), in
//! which case it serves every serving size. The recipe bank and side dish
//! database only answer through their buckets.

use crate::diagnostics::{CatalogKind, Diagnostic};
use crate::error::Result;
use crate::table::Table;
use crate::vocabulary::MasterVocabulary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Stored preparation procedure and its active ingredients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub sop: String,
    #[serde(default)]
    pub active_ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    /// Entries per serving-size key ("1", "2", ...)
    Sized(BTreeMap<String, RecipeEntry>),
    /// One entry for every serving size
    Flat(RecipeEntry),
}

impl CatalogEntry {
    /// Entry under a serving bucket. Flat entries have no buckets.
    pub fn bucket(&self, serving_key: &str) -> Option<&RecipeEntry> {
        match self {
            CatalogEntry::Sized(buckets) => buckets.get(serving_key),
            CatalogEntry::Flat(_) => None,
        }
    }

    /// Entry under a serving bucket, or the flat entry
    pub fn bucket_or_flat(&self, serving_key: &str) -> Option<&RecipeEntry> {
        match self {
            CatalogEntry::Sized(buckets) => buckets.get(serving_key),
            CatalogEntry::Flat(entry) => Some(entry),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        Ok(catalog)
    }

    /// Look up a title, then its serving bucket
    pub fn lookup(&self, title: &str, serving_key: &str) -> Option<&RecipeEntry> {
        self.entries.get(title).and_then(|e| e.bucket(serving_key))
    }

    /// Like [`Catalog::lookup`], but a flat entry serves every serving size
    pub fn lookup_or_flat(&self, title: &str, serving_key: &str) -> Option<&RecipeEntry> {
        self.entries
            .get(title)
            .and_then(|e| e.bucket_or_flat(serving_key))
    }

    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    /// All titles, sorted
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Provider of the externally stored catalogues
pub trait CatalogSource {
    type Error: Display;

    fn ingredient_table(&self) -> std::result::Result<Table, Self::Error>;
    fn guideline_table(&self) -> std::result::Result<Table, Self::Error>;
    fn recipe_bank(&self) -> std::result::Result<Catalog, Self::Error>;
    fn side_dishes(&self) -> std::result::Result<Catalog, Self::Error>;
    fn carbs(&self) -> std::result::Result<Catalog, Self::Error>;
}

/// Everything loaded at startup. Immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub vocabulary: MasterVocabulary,
    pub ingredient_table: Table,
    pub guideline_table: Table,
    pub recipe_bank: Catalog,
    pub side_dishes: Catalog,
    pub carbs: Catalog,
    load_faults: Vec<Diagnostic>,
}

impl Catalogs {
    /// Load every catalogue, degrading each failure to an empty value.
    ///
    /// A failed ingredient table leaves the vocabulary empty.
    pub fn load<S: CatalogSource>(source: &S) -> Self {
        let mut faults = Vec::new();

        let ingredient_table = or_empty(source.ingredient_table(), CatalogKind::IngredientTable, &mut faults);
        let guideline_table = or_empty(source.guideline_table(), CatalogKind::GuidelineTable, &mut faults);
        let recipe_bank = or_empty(source.recipe_bank(), CatalogKind::RecipeBank, &mut faults);
        let side_dishes = or_empty(source.side_dishes(), CatalogKind::SideDishes, &mut faults);
        let carbs = or_empty(source.carbs(), CatalogKind::Carbs, &mut faults);

        let vocabulary = MasterVocabulary::from_table(&ingredient_table);
        tracing::info!(
            "loaded {} vocabulary entries, {} recipe variants, {} side dishes, {} carbs",
            vocabulary.len(),
            recipe_bank.len(),
            side_dishes.len(),
            carbs.len()
        );

        Self {
            vocabulary,
            ingredient_table,
            guideline_table,
            recipe_bank,
            side_dishes,
            carbs,
            load_faults: faults,
        }
    }

    /// Build directly from in-memory parts (no load faults)
    pub fn from_parts(
        ingredient_table: Table,
        recipe_bank: Catalog,
        side_dishes: Catalog,
        carbs: Catalog,
    ) -> Self {
        Self {
            vocabulary: MasterVocabulary::from_table(&ingredient_table),
            ingredient_table,
            guideline_table: Table::default(),
            recipe_bank,
            side_dishes,
            carbs,
            load_faults: Vec::new(),
        }
    }

    pub fn load_faults(&self) -> &[Diagnostic] {
        &self.load_faults
    }
}

fn or_empty<T: Default, E: Display>(
    loaded: std::result::Result<T, E>,
    source: CatalogKind,
    faults: &mut Vec<Diagnostic>,
) -> T {
    match loaded {
        Ok(value) => value,
        Err(e) => {
            let fault = Diagnostic::LoadFault {
                source,
                message: e.to_string(),
            };
            fault.log();
            faults.push(fault);
            T::default()
        }
    }
}
