//! Prompt contexts
//!
//! Structured output handed to the template renderer:
//! - PromptContext: one resolved request
//! - ComponentContext: main dish, side dish or carb side
//! - FinalCheckContext: validation of a model's ingredient output

use crate::catalog::Catalogs;
use crate::diagnostics::{Diagnostic, Status};
use crate::encoder::PresenceVector;
use crate::request::ModeTag;
use serde::Serialize;

/// One resolved dish component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentContext {
    /// Title as requested
    pub title: String,
    /// Key used against the catalogue (variant key for the main dish)
    pub lookup_key: String,
    /// Serving bucket used for the lookup
    pub serving_key: String,
    pub found: bool,
    pub sop: String,
    pub ingredients: Vec<String>,
    pub vector: PresenceVector,
    pub matched: Vec<String>,
    pub unmatched: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptContext {
    pub service_abstract: String,
    pub master_ingredient_list: String,
    pub master_single_serve_list: String,
    pub vector_length: usize,
    pub mode: ModeTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dish_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_choice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<ComponentContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<ComponentContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carb_side: Option<ComponentContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_custom_request: Option<String>,
    pub customization: String,
    pub translation_lang: Option<String>,
    pub customer_plan: Option<String>,
    pub status: Status,
    pub diagnostics: Vec<Diagnostic>,
}

impl PromptContext {
    pub fn is_side(&self) -> bool {
        self.side.is_some()
    }

    pub fn is_carb_side(&self) -> bool {
        self.carb_side.is_some()
    }
}

/// Context for validating and correcting a model's ingredient output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalCheckContext {
    pub master_ingredient_list: String,
    pub vector_length: usize,
    pub llm_output: String,
}

impl FinalCheckContext {
    pub fn new(catalogs: &Catalogs, llm_output: &str) -> Self {
        Self {
            master_ingredient_list: catalogs.ingredient_table.render(),
            vector_length: catalogs.vocabulary.len(),
            llm_output: llm_output.to_string(),
        }
    }
}
