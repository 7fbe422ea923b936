use crate::error::{MacroChefError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_SERVICE_ABSTRACT: &str = "MacroChef: A nutrition aware private chef service for gym goers and fitness enthusiasts. \
Main USP: Just pay us X rupees a month per person and forget about counting/tracking your macros as well as buying groceries forever. \
Just update your daily/weekly or monthly cuisine/macro/calorific preference in our app and let our 'smart chefs' take care of it for you. \
Our chefs carry the highest quality ingredients sourced specifically for you on that day and prepare tasty, healthy and personalised meals fresh in your own kitchen.";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the catalogue files (current directory when unset)
    pub data_dir: Option<PathBuf>,
    pub ingredient_table: String,
    pub guideline_table: String,
    pub recipe_bank: String,
    pub side_dish_db: String,
    pub carb_db: String,
    pub service_abstract: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit path, falling back to defaults when it does not exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MacroChefError::Config("Home directory not found".into()))?;
        Ok(home.join(".config").join("macrochef").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            data_dir: None,
            ingredient_table: "ingredients.csv".into(),
            guideline_table: "single_serve_guidelines.csv".into(),
            recipe_bank: "custom_recipe_bank.json".into(),
            side_dish_db: "side_dish_db.json".into(),
            carb_db: "carb_db.json".into(),
            service_abstract: DEFAULT_SERVICE_ABSTRACT.into(),
        }
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.data_dir = Some(dir);
        self.save()
    }

    /// Data directory: command-line override, then config, then the current directory
    pub fn resolve_data_dir(&self, overridden: Option<&Path>) -> PathBuf {
        overridden
            .map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.ingredient_table, "ingredients.csv");
        assert_eq!(config.carb_db, "carb_db.json");
        assert!(config.data_dir.is_none());
        assert!(config.service_abstract.starts_with("MacroChef"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.data_dir = Some(PathBuf::from("/srv/macrochef"));
        config.recipe_bank = "bank.json".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.data_dir, Some(PathBuf::from("/srv/macrochef")));
        assert_eq!(loaded.recipe_bank, "bank.json");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"ingredient_table": "ingredients.xlsx"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.ingredient_table, "ingredients.xlsx");
        assert_eq!(config.side_dish_db, "side_dish_db.json");
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(MacroChefError::JsonParse(_))
        ));
    }

    #[test]
    fn test_resolve_data_dir_precedence() {
        let mut config = Config::default();
        assert_eq!(config.resolve_data_dir(None), PathBuf::from("."));

        config.data_dir = Some(PathBuf::from("/data"));
        assert_eq!(config.resolve_data_dir(None), PathBuf::from("/data"));
        assert_eq!(
            config.resolve_data_dir(Some(Path::new("/override"))),
            PathBuf::from("/override")
        );
    }
}
