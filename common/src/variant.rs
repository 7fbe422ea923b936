//! Recipe variant keys
//!
//! The recipe bank stores one entry per configured variant, keyed by
//! `Base Title (Protein, Choice)`. Which choice completes the key depends
//! on the dish category, detected from the base title:
//!
//! | marker     | key                               |
//! |------------|-----------------------------------|
//! | `Salad`    | `{base} ({protein}, {dressing})`  |
//! | `Chinese`  | `{base} ({protein}, {carb})`      |
//! | `Sandwich` | `{base} ({protein}, {sauce})`     |
//! | (none)     | `{base}`                          |

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DishCategory {
    Salad,
    Chinese,
    Sandwich,
    Plain,
}

impl DishCategory {
    /// Detect the category from a title (first marker wins: Salad, Chinese, Sandwich)
    pub fn detect(title: &str) -> Self {
        if title.contains("Salad") {
            DishCategory::Salad
        } else if title.contains("Chinese") {
            DishCategory::Chinese
        } else if title.contains("Sandwich") {
            DishCategory::Sandwich
        } else {
            DishCategory::Plain
        }
    }

    /// Name of the choice that completes the key
    pub fn choice_label(&self) -> Option<&'static str> {
        match self {
            DishCategory::Salad => Some("dressing"),
            DishCategory::Chinese => Some("carb"),
            DishCategory::Sandwich => Some("sauce"),
            DishCategory::Plain => None,
        }
    }
}

impl fmt::Display for DishCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DishCategory::Salad => write!(f, "Salad"),
            DishCategory::Chinese => write!(f, "Chinese"),
            DishCategory::Sandwich => write!(f, "Sandwich"),
            DishCategory::Plain => write!(f, "Plain"),
        }
    }
}

/// Discriminating choices for a strict recipe variant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantChoices {
    pub protein: String,
    pub dressing: String,
    pub carb: String,
    pub sauce: String,
}

impl VariantChoices {
    fn for_category(&self, category: DishCategory) -> Option<&str> {
        match category {
            DishCategory::Salad => Some(self.dressing.as_str()),
            DishCategory::Chinese => Some(self.carb.as_str()),
            DishCategory::Sandwich => Some(self.sauce.as_str()),
            DishCategory::Plain => None,
        }
    }
}

/// Build the recipe bank key for a base title and its choices
pub fn build_variant_key(base_title: &str, choices: &VariantChoices) -> String {
    match choices.for_category(DishCategory::detect(base_title)) {
        Some(choice) => format!("{} ({}, {})", base_title, choices.protein, choice),
        None => base_title.to_string(),
    }
}

/// A recipe bank key split back into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVariantKey {
    pub base: String,
    pub protein: Option<String>,
    pub choice: Option<String>,
}

/// Split `Base (Protein, Choice)` into its parts
pub fn parse_variant_key(key: &str) -> ParsedVariantKey {
    lazy_static::lazy_static! {
        static ref VARIANT_KEY_RE: Regex =
            Regex::new(r"^(?P<base>.+?)\s+\((?P<params>[^()]*)\)\s*$").unwrap();
    }

    let Some(caps) = VARIANT_KEY_RE.captures(key) else {
        return ParsedVariantKey {
            base: key.trim().to_string(),
            protein: None,
            choice: None,
        };
    };

    let mut params = caps["params"]
        .split(',')
        .map(str::trim)
        .map(|p| (!p.is_empty()).then(|| p.to_string()));

    ParsedVariantKey {
        base: caps["base"].trim().to_string(),
        protein: params.next().flatten(),
        choice: params.next().flatten(),
    }
}

/// Selectable values for one dish category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryOptions {
    pub bases: BTreeSet<String>,
    pub proteins: BTreeSet<String>,
    /// Dressings, carbs or sauces depending on the category
    pub choices: BTreeSet<String>,
}

/// Selectable variant values per category, derived from recipe bank keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariantOptions {
    pub categories: BTreeMap<DishCategory, CategoryOptions>,
}

impl VariantOptions {
    /// Collect options from recipe bank keys. Keys without a category marker are skipped.
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut categories: BTreeMap<DishCategory, CategoryOptions> = BTreeMap::new();

        for key in keys {
            let category = DishCategory::detect(key);
            if category == DishCategory::Plain {
                continue;
            }

            let parsed = parse_variant_key(key);
            let options = categories.entry(category).or_default();
            options.bases.insert(parsed.base);
            if let Some(protein) = parsed.protein {
                options.proteins.insert(protein);
            }
            if let Some(choice) = parsed.choice {
                options.choices.insert(choice);
            }
        }

        Self { categories }
    }

    pub fn get(&self, category: DishCategory) -> Option<&CategoryOptions> {
        self.categories.get(&category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices() -> VariantChoices {
        VariantChoices {
            protein: "Orange Paneer".to_string(),
            dressing: "Vinaigrette".to_string(),
            carb: "Rice".to_string(),
            sauce: "Spiced Red".to_string(),
        }
    }

    #[test]
    fn test_chinese_key_uses_carb() {
        assert_eq!(
            build_variant_key("C02-B Chinese Bowl", &choices()),
            "C02-B Chinese Bowl (Orange Paneer, Rice)"
        );
    }

    #[test]
    fn test_salad_key_uses_dressing() {
        assert_eq!(
            build_variant_key("C01-B Salad Meal", &choices()),
            "C01-B Salad Meal (Orange Paneer, Vinaigrette)"
        );
    }

    #[test]
    fn test_sandwich_key_uses_sauce() {
        assert_eq!(
            build_variant_key("C03-B Sandwich", &choices()),
            "C03-B Sandwich (Orange Paneer, Spiced Red)"
        );
    }

    #[test]
    fn test_plain_title_is_unchanged() {
        assert_eq!(build_variant_key("Paneer Bhurji", &choices()), "Paneer Bhurji");
        assert_eq!(build_variant_key("", &choices()), "");
    }

    #[test]
    fn test_salad_marker_takes_priority() {
        assert_eq!(DishCategory::detect("Chinese Chicken Salad"), DishCategory::Salad);
        assert_eq!(DishCategory::detect("Chinese Sandwich"), DishCategory::Chinese);
        // markers are case-sensitive
        assert_eq!(DishCategory::detect("chinese bowl"), DishCategory::Plain);
    }

    #[test]
    fn test_parse_variant_key() {
        let parsed = parse_variant_key("C01-B Salad Meal (Paneer, Vinaigrette)");
        assert_eq!(parsed.base, "C01-B Salad Meal");
        assert_eq!(parsed.protein.as_deref(), Some("Paneer"));
        assert_eq!(parsed.choice.as_deref(), Some("Vinaigrette"));

        let parsed = parse_variant_key("Paneer Bhurji");
        assert_eq!(parsed.base, "Paneer Bhurji");
        assert_eq!(parsed.protein, None);
        assert_eq!(parsed.choice, None);
    }

    #[test]
    fn test_parse_inverts_build() {
        let key = build_variant_key("C03-B Sandwich", &choices());
        let parsed = parse_variant_key(&key);
        assert_eq!(parsed.base, "C03-B Sandwich");
        assert_eq!(parsed.protein.as_deref(), Some("Orange Paneer"));
        assert_eq!(parsed.choice.as_deref(), Some("Spiced Red"));
    }

    #[test]
    fn test_variant_options_from_keys() {
        let keys = [
            "C01-B Salad Meal (Paneer, Vinaigrette)",
            "C01-B Salad Meal (Tofu, Caesar)",
            "C02-B Chinese Bowl (Orange Paneer, Rice)",
            "C02-B Chinese Bowl (Orange Paneer, Noodles)",
            "Paneer Bhurji",
        ];
        let options = VariantOptions::from_keys(keys);

        let salad = options.get(DishCategory::Salad).unwrap();
        assert_eq!(salad.bases.iter().collect::<Vec<_>>(), vec!["C01-B Salad Meal"]);
        assert_eq!(salad.proteins.len(), 2);
        assert!(salad.choices.contains("Caesar"));

        let chinese = options.get(DishCategory::Chinese).unwrap();
        assert_eq!(chinese.proteins.len(), 1);
        assert_eq!(
            chinese.choices.iter().collect::<Vec<_>>(),
            vec!["Noodles", "Rice"]
        );

        assert!(options.get(DishCategory::Sandwich).is_none());
        assert!(options.get(DishCategory::Plain).is_none());
    }
}
