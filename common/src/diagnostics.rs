//! Degraded-path diagnostics
//!
//! Nothing on the request path fails hard. Every best-effort fallback
//! (empty catalogue, unmatched ingredient, missing variant, length fault)
//! is recorded here so callers can inspect it instead of scraping logs.

use serde::Serialize;
use std::fmt;

/// Dish component a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Main,
    Side,
    CarbSide,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Main => write!(f, "main dish"),
            Component::Side => write!(f, "side dish"),
            Component::CarbSide => write!(f, "carb side"),
        }
    }
}

/// Externally loaded data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    IngredientTable,
    GuidelineTable,
    RecipeBank,
    SideDishes,
    Carbs,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::IngredientTable => write!(f, "ingredient table"),
            CatalogKind::GuidelineTable => write!(f, "single-serve guidelines"),
            CatalogKind::RecipeBank => write!(f, "recipe bank"),
            CatalogKind::SideDishes => write!(f, "side dish database"),
            CatalogKind::Carbs => write!(f, "carb database"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A catalogue could not be loaded and was replaced by an empty one
    LoadFault { source: CatalogKind, message: String },
    /// Ingredients with no vocabulary entry
    UnmatchedIngredients { component: Component, items: Vec<String> },
    /// Lookup key absent from its catalogue
    MissingKey { component: Component, key: String },
    /// Encoded vector length differs from the vocabulary length
    LengthMismatch {
        component: Component,
        expected: usize,
        actual: usize,
    },
}

impl Diagnostic {
    /// Emit the diagnostic through `tracing` at its severity
    pub fn log(&self) {
        match self {
            Diagnostic::LoadFault { .. } => tracing::error!("{}", self),
            Diagnostic::LengthMismatch { .. } => tracing::error!("CRITICAL: {}", self),
            Diagnostic::UnmatchedIngredients { .. } | Diagnostic::MissingKey { .. } => {
                tracing::warn!("{}", self)
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::LoadFault { source, message } => {
                write!(f, "failed to load {}: {}", source, message)
            }
            Diagnostic::UnmatchedIngredients { component, items } => write!(
                f,
                "{}: could not find these ingredients in the master list: {}",
                component,
                items.join(", ")
            ),
            Diagnostic::MissingKey { component, key } => {
                write!(f, "{}: '{}' not found", component, key)
            }
            Diagnostic::LengthMismatch {
                component,
                expected,
                actual,
            } => write!(
                f,
                "{}: vector length mismatch (master: {}, generated: {})",
                component, expected, actual
            ),
        }
    }
}

/// Overall outcome of assembling one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Complete,
    Degraded,
}

impl Status {
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        if diagnostics.is_empty() {
            Status::Complete
        } else {
            Status::Degraded
        }
    }
}
