//! MacroChef Common Library
//!
//! Ingredient resolution and encoding engine shared by the CLI:
//! master vocabulary, fuzzy ingredient matching, presence vectors,
//! serving-size keys and recipe variant resolution.

pub mod error;
pub mod table;
pub mod vocabulary;
pub mod matcher;
pub mod encoder;
pub mod serving;
pub mod variant;
pub mod catalog;
pub mod diagnostics;
pub mod request;
pub mod context;
pub mod resolver;

pub use error::{Error, Result};
pub use table::Table;
pub use vocabulary::MasterVocabulary;
pub use matcher::{match_ingredient, similarity, MatchResult, FUZZY_MATCH_THRESHOLD};
pub use encoder::{encode, Encoding, LengthFault, PresenceVector};
pub use serving::resolve_serving_key;
pub use variant::{build_variant_key, parse_variant_key, DishCategory, VariantChoices, VariantOptions};
pub use catalog::{Catalog, CatalogEntry, CatalogSource, Catalogs, RecipeEntry};
pub use diagnostics::{CatalogKind, Component, Diagnostic, Status};
pub use request::{Mode, ModeTag, RecipeConfig, Request, RequestOptions};
pub use context::{ComponentContext, FinalCheckContext, PromptContext};
pub use resolver::PromptAssembler;
