//! Request model
//!
//! - RecipeConfig: the loose `recipe_config.json` shape (every field optional)
//! - Mode: one of the three request modes, carrying only its own fields
//! - Request: a validated mode plus options shared by all modes

use crate::error::{Error, Result};
use crate::variant::VariantChoices;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw request configuration as written by the configuration tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeConfig {
    pub mode: Option<String>,
    pub customer_plan: Option<String>,
    pub dish_title: Option<String>,
    pub protein_choice: Option<String>,
    pub carb_choice: Option<String>,
    pub sauce_choice: Option<String>,
    pub dressing_choice: Option<String>,
    /// String or number
    pub serving_size: Option<serde_json::Value>,
    pub side_title: Option<String>,
    pub carb_side_title: Option<String>,
    pub full_custom_request: Option<String>,
    pub customization_string: Option<String>,
    pub translation_lang: Option<String>,
}

impl RecipeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Serving size as text (`4.5` and `"4.5"` both give `"4.5"`)
    pub fn serving_size_text(&self) -> Option<String> {
        match self.serving_size.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeTag {
    Generative,
    StrictVariant,
    FreeText,
}

impl std::str::FromStr for ModeTag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prefab" | "generative" => Ok(ModeTag::Generative),
            "custom_prefab" | "strict" | "strict_variant" => Ok(ModeTag::StrictVariant),
            "full_custom" | "free_text" => Ok(ModeTag::FreeText),
            _ => Err(format!(
                "Unknown mode: {}. Use prefab, custom_prefab, or full_custom",
                s
            )),
        }
    }
}

impl fmt::Display for ModeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeTag::Generative => write!(f, "prefab"),
            ModeTag::StrictVariant => write!(f, "custom_prefab"),
            ModeTag::FreeText => write!(f, "full_custom"),
        }
    }
}

/// Request mode. Exactly one is active per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// The model writes the recipe; optional side dish and carb side
    Generative {
        dish_title: Option<String>,
        serving_size: String,
        side_title: Option<String>,
        carb_side_title: Option<String>,
    },
    /// The recipe comes from the recipe bank; optional side dish
    StrictVariant {
        dish_title: String,
        choices: VariantChoices,
        serving_size: String,
        side_title: Option<String>,
    },
    /// Free-text request only
    FreeText { request: String },
}

impl Mode {
    pub fn tag(&self) -> ModeTag {
        match self {
            Mode::Generative { .. } => ModeTag::Generative,
            Mode::StrictVariant { .. } => ModeTag::StrictVariant,
            Mode::FreeText { .. } => ModeTag::FreeText,
        }
    }
}

/// Options shared by every mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub customization: String,
    pub translation_lang: Option<String>,
    pub customer_plan: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            customization: "None".to_string(),
            translation_lang: None,
            customer_plan: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub mode: Mode,
    pub options: RequestOptions,
}

impl Request {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            options: RequestOptions::default(),
        }
    }

    /// Validate a raw configuration. Only a missing or unknown mode is an error.
    pub fn from_config(config: &RecipeConfig) -> Result<Self> {
        let tag: ModeTag = config
            .mode
            .as_deref()
            .ok_or_else(|| Error::Config("mode is not set".into()))?
            .parse()
            .map_err(Error::Config)?;

        let serving_size = config
            .serving_size_text()
            .unwrap_or_else(|| "1".to_string());

        let mode = match tag {
            ModeTag::Generative => Mode::Generative {
                dish_title: present(&config.dish_title),
                serving_size,
                side_title: present(&config.side_title),
                carb_side_title: present(&config.carb_side_title),
            },
            ModeTag::StrictVariant => Mode::StrictVariant {
                dish_title: raw(&config.dish_title),
                choices: VariantChoices {
                    protein: raw(&config.protein_choice),
                    dressing: raw(&config.dressing_choice),
                    carb: raw(&config.carb_choice),
                    sauce: raw(&config.sauce_choice),
                },
                serving_size,
                side_title: present(&config.side_title),
            },
            ModeTag::FreeText => Mode::FreeText {
                request: raw(&config.full_custom_request),
            },
        };

        let options = RequestOptions {
            customization: present(&config.customization_string)
                .unwrap_or_else(|| "None".to_string()),
            translation_lang: present(&config.translation_lang),
            customer_plan: present(&config.customer_plan),
        };

        Ok(Self { mode, options })
    }
}

/// Optional field: absent when missing, blank, or "None"
fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("none"))
        .map(str::to_string)
}

/// Key-forming field: used verbatim, missing becomes empty
fn raw(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
