//! Request resolution
//!
//! Drives one request through the catalogues:
//! 1. Strict variant: build the variant key, fetch bucket "1" from the recipe bank
//! 2. Side dish / carb side: fetch by title and serving-size key
//! 3. Encode every found ingredient list against the master vocabulary
//!
//! Missing keys produce a sentinel SOP and an all-zero vector instead of an error.

use crate::catalog::{Catalogs, RecipeEntry};
use crate::context::{ComponentContext, PromptContext};
use crate::diagnostics::{Component, Diagnostic, Status};
use crate::encoder::{encode, PresenceVector};
use crate::request::{Mode, Request};
use crate::serving::resolve_serving_key;
use crate::variant::{build_variant_key, VariantChoices};

/// The recipe bank keeps a single canonical bucket per variant
pub const RECIPE_BANK_BUCKET: &str = "1";

/// Assembles prompt contexts from catalogues loaded at startup
pub struct PromptAssembler<'a> {
    catalogs: &'a Catalogs,
    service_abstract: String,
}

impl<'a> PromptAssembler<'a> {
    pub fn new(catalogs: &'a Catalogs) -> Self {
        Self {
            catalogs,
            service_abstract: String::new(),
        }
    }

    pub fn with_service_abstract(mut self, text: impl Into<String>) -> Self {
        self.service_abstract = text.into();
        self
    }

    /// Resolve a request into a context. Never fails; see `diagnostics`.
    pub fn assemble(&self, request: &Request) -> PromptContext {
        let mut diagnostics: Vec<Diagnostic> = self.catalogs.load_faults().to_vec();

        let mut context = PromptContext {
            service_abstract: self.service_abstract.clone(),
            master_ingredient_list: self.catalogs.ingredient_table.render(),
            master_single_serve_list: self.catalogs.guideline_table.render(),
            vector_length: self.catalogs.vocabulary.len(),
            mode: request.mode.tag(),
            dish_title: None,
            serving_size: None,
            protein_choice: None,
            main: None,
            side: None,
            carb_side: None,
            full_custom_request: None,
            customization: request.options.customization.clone(),
            translation_lang: request.options.translation_lang.clone(),
            customer_plan: request.options.customer_plan.clone(),
            status: Status::Complete,
            diagnostics: Vec::new(),
        };

        match &request.mode {
            Mode::Generative {
                dish_title,
                serving_size,
                side_title,
                carb_side_title,
            } => {
                let serving_key = resolve_serving_key(Some(serving_size.as_str()));
                context.dish_title = dish_title.clone();
                context.serving_size = Some(serving_size.clone());
                context.side = side_title
                    .as_deref()
                    .map(|title| self.resolve_side(title, &serving_key, &mut diagnostics));
                context.carb_side = carb_side_title
                    .as_deref()
                    .map(|title| self.resolve_carb_side(title, &serving_key, &mut diagnostics));
            }
            Mode::StrictVariant {
                dish_title,
                choices,
                serving_size,
                side_title,
            } => {
                let serving_key = resolve_serving_key(Some(serving_size.as_str()));
                context.dish_title = Some(dish_title.clone());
                context.serving_size = Some(serving_size.clone());
                context.protein_choice = Some(choices.protein.clone());
                context.main = Some(self.resolve_variant(dish_title, choices, &mut diagnostics));
                context.side = side_title
                    .as_deref()
                    .map(|title| self.resolve_side(title, &serving_key, &mut diagnostics));
            }
            Mode::FreeText { request } => {
                context.full_custom_request = Some(request.clone());
            }
        }

        context.status = Status::from_diagnostics(&diagnostics);
        context.diagnostics = diagnostics;
        context
    }

    /// Main dish from the recipe bank
    pub fn resolve_variant(
        &self,
        dish_title: &str,
        choices: &VariantChoices,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ComponentContext {
        let key = build_variant_key(dish_title, choices);
        let missing_sop = format!("CRITICAL: Variant '{}' not found.", key);
        let entry = self.catalogs.recipe_bank.lookup(&key, RECIPE_BANK_BUCKET);
        self.resolve_component(
            Component::Main,
            entry,
            dish_title,
            key,
            RECIPE_BANK_BUCKET,
            missing_sop,
            diagnostics,
        )
    }

    pub fn resolve_side(
        &self,
        title: &str,
        serving_key: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ComponentContext {
        let missing_sop = format!(
            "CRITICAL: Side dish '{}' not found for serving size '{}'.",
            title, serving_key
        );
        let entry = self.catalogs.side_dishes.lookup(title, serving_key);
        self.resolve_component(
            Component::Side,
            entry,
            title,
            title.to_string(),
            serving_key,
            missing_sop,
            diagnostics,
        )
    }

    pub fn resolve_carb_side(
        &self,
        title: &str,
        serving_key: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ComponentContext {
        let missing_sop = format!(
            "CRITICAL: Carb side '{}' not found for serving size '{}'.",
            title, serving_key
        );
        let entry = self.catalogs.carbs.lookup_or_flat(title, serving_key);
        self.resolve_component(
            Component::CarbSide,
            entry,
            title,
            title.to_string(),
            serving_key,
            missing_sop,
            diagnostics,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_component(
        &self,
        component: Component,
        entry: Option<&RecipeEntry>,
        title: &str,
        lookup_key: String,
        serving_key: &str,
        missing_sop: String,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ComponentContext {
        let vocabulary = &self.catalogs.vocabulary;

        let Some(entry) = entry else {
            record(
                diagnostics,
                Diagnostic::MissingKey {
                    component,
                    key: lookup_key.clone(),
                },
            );
            return ComponentContext {
                title: title.to_string(),
                lookup_key,
                serving_key: serving_key.to_string(),
                found: false,
                sop: missing_sop,
                ingredients: Vec::new(),
                vector: PresenceVector::zeros(vocabulary.len()),
                matched: Vec::new(),
                unmatched: Vec::new(),
            };
        };

        let encoding = encode(&entry.active_ingredients, vocabulary);
        if let Some(fault) = encoding.length_fault {
            record(
                diagnostics,
                Diagnostic::LengthMismatch {
                    component,
                    expected: fault.expected,
                    actual: fault.actual,
                },
            );
        }
        if !encoding.unmatched.is_empty() {
            record(
                diagnostics,
                Diagnostic::UnmatchedIngredients {
                    component,
                    items: encoding.unmatched.clone(),
                },
            );
        }

        ComponentContext {
            title: title.to_string(),
            lookup_key,
            serving_key: serving_key.to_string(),
            found: true,
            sop: entry.sop.clone(),
            ingredients: entry.active_ingredients.clone(),
            vector: encoding.vector,
            matched: encoding.matched,
            unmatched: encoding.unmatched,
        }
    }
}

fn record(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    diagnostic.log();
    diagnostics.push(diagnostic);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::request::{ModeTag, RequestOptions};
    use crate::table::Table;

    const INGREDIENTS_CSV: &str = "Protein,Carb,Sauce,Veg\n\
        Paneer,Rice,Soy Sauce,Broccoli\n\
        Tofu,Noodles,Orange Glaze,Lettuce\n\
        ,Whole Wheat Flour,,Parmesan\n";

    const RECIPE_BANK: &str = r#"{
        "C02-B Chinese Bowl (Orange Paneer, Rice)": {
            "1": {
                "sop": "Glaze paneer, steam rice",
                "active_ingredients": ["Paneer", "Rice", "Orange Glaze", "Brocoli"]
            }
        },
        "C01-B Salad Meal (Tofu, Vinaigrette)": {
            "2": {"sop": "Wrong bucket", "active_ingredients": ["Tofu"]}
        }
    }"#;

    const SIDE_DB: &str = r#"{
        "Simple Caesar Salad": {
            "1": {"sop": "Toss", "active_ingredients": ["Lettuce", "Parmesan"]},
            "4": {"sop": "Toss for four", "active_ingredients": ["Lettuce", "Parmesan", "Croutons"]}
        }
    }"#;

    const CARB_DB: &str = r#"{
        "Roti": {"4": {"sop": "Roll four", "active_ingredients": ["Whole Wheat Flour"]}}
    }"#;

    fn catalogs() -> Catalogs {
        Catalogs::from_parts(
            Table::from_csv_str(INGREDIENTS_CSV).unwrap(),
            Catalog::from_json(RECIPE_BANK).unwrap(),
            Catalog::from_json(SIDE_DB).unwrap(),
            Catalog::from_json(CARB_DB).unwrap(),
        )
    }

    fn strict(dish_title: &str, protein: &str, carb: &str, side: Option<&str>) -> Request {
        Request::new(Mode::StrictVariant {
            dish_title: dish_title.to_string(),
            choices: VariantChoices {
                protein: protein.to_string(),
                carb: carb.to_string(),
                ..Default::default()
            },
            serving_size: "4.5".to_string(),
            side_title: side.map(str::to_string),
        })
    }

    #[test]
    fn test_strict_variant_found() {
        let catalogs = catalogs();
        let context = PromptAssembler::new(&catalogs)
            .assemble(&strict("C02-B Chinese Bowl", "Orange Paneer", "Rice", None));

        let main = context.main.as_ref().unwrap();
        assert!(main.found);
        assert_eq!(main.lookup_key, "C02-B Chinese Bowl (Orange Paneer, Rice)");
        assert_eq!(main.serving_key, "1");
        assert_eq!(main.sop, "Glaze paneer, steam rice");
        // vocabulary: Paneer, Tofu, Rice, Noodles, Whole Wheat Flour, Soy Sauce, Orange Glaze, Broccoli, Lettuce, Parmesan
        assert_eq!(main.vector.as_slice(), &[1, 0, 1, 0, 0, 0, 1, 1, 0, 0]);
        assert!(main.matched.contains(&"Brocoli -> Broccoli".to_string()));
        assert_eq!(context.vector_length, 10);
        assert_eq!(context.status, Status::Complete);
        assert!(context.side.is_none());
        assert!(context.carb_side.is_none());
    }

    #[test]
    fn test_missing_variant_falls_back() {
        let catalogs = catalogs();
        let context = PromptAssembler::new(&catalogs)
            .assemble(&strict("C02-B Chinese Bowl", "Tofu", "Rice", None));

        let main = context.main.as_ref().unwrap();
        let key = "C02-B Chinese Bowl (Tofu, Rice)";
        assert!(!main.found);
        assert!(main.sop.contains(key));
        assert_eq!(main.vector, PresenceVector::zeros(catalogs.vocabulary.len()));
        assert!(main.ingredients.is_empty());
        assert_eq!(context.status, Status::Degraded);
        assert_eq!(
            context.diagnostics,
            vec![Diagnostic::MissingKey {
                component: Component::Main,
                key: key.to_string()
            }]
        );
    }

    #[test]
    fn test_variant_without_canonical_bucket_falls_back() {
        let catalogs = catalogs();
        let request = Request::new(Mode::StrictVariant {
            dish_title: "C01-B Salad Meal".to_string(),
            choices: VariantChoices {
                protein: "Tofu".to_string(),
                dressing: "Vinaigrette".to_string(),
                ..Default::default()
            },
            serving_size: "2".to_string(),
            side_title: None,
        });

        let context = PromptAssembler::new(&catalogs).assemble(&request);
        let main = context.main.unwrap();
        assert!(!main.found);
        assert_eq!(main.sop, "CRITICAL: Variant 'C01-B Salad Meal (Tofu, Vinaigrette)' not found.");
    }

    #[test]
    fn test_strict_variant_with_side_uses_serving_key() {
        let catalogs = catalogs();
        let context = PromptAssembler::new(&catalogs).assemble(&strict(
            "C02-B Chinese Bowl",
            "Orange Paneer",
            "Rice",
            Some("Simple Caesar Salad"),
        ));

        let side = context.side.as_ref().unwrap();
        assert!(side.found);
        assert_eq!(side.serving_key, "4");
        assert_eq!(side.sop, "Toss for four");
        assert_eq!(side.unmatched, vec!["Croutons"]);
        assert_eq!(side.vector.count_ones(), 2);
        assert!(context.is_side());
        assert_eq!(context.status, Status::Degraded);
        assert!(matches!(
            &context.diagnostics[0],
            Diagnostic::UnmatchedIngredients { component: Component::Side, items } if items == &vec!["Croutons".to_string()]
        ));
    }

    #[test]
    fn test_generative_side_and_carb() {
        let catalogs = catalogs();
        let request = Request::new(Mode::Generative {
            dish_title: Some("Shrimp Curry".to_string()),
            serving_size: "4".to_string(),
            side_title: Some("Simple Caesar Salad".to_string()),
            carb_side_title: Some("Roti".to_string()),
        });

        let context = PromptAssembler::new(&catalogs).assemble(&request);
        assert_eq!(context.mode, ModeTag::Generative);
        assert!(context.main.is_none());
        assert_eq!(context.dish_title.as_deref(), Some("Shrimp Curry"));

        let carb = context.carb_side.as_ref().unwrap();
        assert!(carb.found);
        assert_eq!(carb.sop, "Roll four");
        assert_eq!(carb.vector.count_ones(), 1);
        assert_eq!(carb.matched, vec!["Whole Wheat Flour -> Whole Wheat Flour"]);
    }

    #[test]
    fn test_generative_missing_carb_bucket() {
        let catalogs = catalogs();
        let request = Request::new(Mode::Generative {
            dish_title: None,
            serving_size: "abc".to_string(),
            side_title: None,
            carb_side_title: Some("Roti".to_string()),
        });

        let context = PromptAssembler::new(&catalogs).assemble(&request);
        let carb = context.carb_side.unwrap();
        assert!(!carb.found);
        assert_eq!(carb.serving_key, "1");
        assert_eq!(carb.sop, "CRITICAL: Carb side 'Roti' not found for serving size '1'.");
        assert_eq!(carb.vector.len(), 10);
        assert_eq!(carb.vector.count_ones(), 0);
        assert!(context.side.is_none());
    }

    #[test]
    fn test_flat_recipe_bank_entry_is_not_a_variant() {
        let bank = r#"{"C02-B Chinese Bowl (Tofu, Rice)": {"sop": "flat sop", "active_ingredients": ["Tofu"]}}"#;
        let catalogs = Catalogs::from_parts(
            Table::from_csv_str(INGREDIENTS_CSV).unwrap(),
            Catalog::from_json(bank).unwrap(),
            Catalog::default(),
            Catalog::default(),
        );

        let context = PromptAssembler::new(&catalogs)
            .assemble(&strict("C02-B Chinese Bowl", "Tofu", "Rice", None));
        let main = context.main.unwrap();
        assert!(!main.found);
        assert_eq!(main.sop, "CRITICAL: Variant 'C02-B Chinese Bowl (Tofu, Rice)' not found.");
        assert_eq!(main.vector, PresenceVector::zeros(10));
        assert_eq!(context.status, Status::Degraded);
    }

    #[test]
    fn test_flat_entries_only_serve_carb_sides() {
        let flat = r#"{"Roti": {"sop": "Roll roti", "active_ingredients": ["Whole Wheat Flour"]}}"#;
        let catalogs = Catalogs::from_parts(
            Table::from_csv_str(INGREDIENTS_CSV).unwrap(),
            Catalog::default(),
            Catalog::from_json(flat).unwrap(),
            Catalog::from_json(flat).unwrap(),
        );
        let request = Request::new(Mode::Generative {
            dish_title: None,
            serving_size: "3".to_string(),
            side_title: Some("Roti".to_string()),
            carb_side_title: Some("Roti".to_string()),
        });

        let context = PromptAssembler::new(&catalogs).assemble(&request);
        let side = context.side.unwrap();
        assert!(!side.found);
        assert_eq!(side.sop, "CRITICAL: Side dish 'Roti' not found for serving size '3'.");

        let carb = context.carb_side.unwrap();
        assert!(carb.found);
        assert_eq!(carb.sop, "Roll roti");
        assert_eq!(carb.vector.count_ones(), 1);
    }

    #[test]
    fn test_free_text() {
        let catalogs = catalogs();
        let mut request = Request::new(Mode::FreeText {
            request: "Keto dinner for two".to_string(),
        });
        request.options = RequestOptions {
            customization: "No onion".to_string(),
            translation_lang: Some("Hinglish".to_string()),
            customer_plan: Some("SUB".to_string()),
        };

        let context = PromptAssembler::new(&catalogs)
            .with_service_abstract("MacroChef")
            .assemble(&request);
        assert_eq!(context.full_custom_request.as_deref(), Some("Keto dinner for two"));
        assert_eq!(context.customization, "No onion");
        assert_eq!(context.service_abstract, "MacroChef");
        assert!(context.main.is_none() && context.side.is_none() && context.carb_side.is_none());
        assert_eq!(context.status, Status::Complete);
    }

    #[test]
    fn test_empty_vocabulary_yields_empty_vectors() {
        let catalogs = Catalogs::from_parts(
            Table::default(),
            Catalog::from_json(RECIPE_BANK).unwrap(),
            Catalog::default(),
            Catalog::default(),
        );
        let context = PromptAssembler::new(&catalogs)
            .assemble(&strict("C02-B Chinese Bowl", "Orange Paneer", "Rice", None));

        let main = context.main.unwrap();
        assert!(main.found);
        assert!(main.vector.is_empty());
        assert!(main.unmatched.is_empty());
        assert_eq!(context.vector_length, 0);
    }

    #[test]
    fn test_context_serializes_vectors_as_arrays() {
        let catalogs = catalogs();
        let context = PromptAssembler::new(&catalogs)
            .assemble(&strict("C02-B Chinese Bowl", "Orange Paneer", "Rice", None));
        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["mode"], "strict_variant");
        assert_eq!(json["main"]["vector"].as_array().unwrap().len(), 10);
        assert!(json.get("side").is_none());
    }
}
