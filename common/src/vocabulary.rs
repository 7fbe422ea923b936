//! Master ingredient vocabulary
//!
//! The flattened, deduplicated list of every known ingredient name.
//! Its order fixes the index of each ingredient in every presence vector,
//! so it is built once and never mutated afterwards.

use crate::table::Table;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MasterVocabulary {
    entries: Vec<String>,
}

impl MasterVocabulary {
    /// Build from raw names: trim, drop empties, keep the first occurrence.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let entries = names
            .into_iter()
            .filter_map(|name| {
                let trimmed = name.as_ref().trim();
                if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect();

        Self { entries }
    }

    /// Flatten a table column by column (header row excluded).
    pub fn from_table(table: &Table) -> Self {
        Self::from_names(table.column_major_cells())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Position of an entry by exact name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
