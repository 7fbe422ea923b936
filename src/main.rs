use anyhow::{Context, Result};
use clap::Parser;
use macrochef::cli::{Cli, Commands};
use macrochef::config::Config;
use macrochef::loader::{self, FileCatalogSource};
use macrochef_common::{encode, Catalogs, FinalCheckContext, PromptAssembler, Request, VariantOptions};
use serde::Serialize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let data_dir = config.resolve_data_dir(cli.data_dir.as_deref());

    match cli.command {
        Commands::Prompt { config: config_file, output } => {
            let recipe_config = loader::read_recipe_config(&config_file)?;
            let request = Request::from_config(&recipe_config)
                .with_context(|| format!("invalid request in {}", config_file.display()))?;

            let catalogs = load_catalogs(&data_dir, &config);
            let context = PromptAssembler::new(&catalogs)
                .with_service_abstract(config.service_abstract.as_str())
                .assemble(&request);

            tracing::info!(
                "assembled {} context ({:?}, {} diagnostics)",
                context.mode,
                context.status,
                context.diagnostics.len()
            );
            write_json(&context, output.as_deref())?;
        }

        Commands::Encode { ingredients } => {
            let catalogs = load_catalogs(&data_dir, &config);
            if catalogs.vocabulary.is_empty() {
                tracing::warn!("master vocabulary is empty; vectors will be empty");
            }

            let encoding = encode(&ingredients, &catalogs.vocabulary);
            if !encoding.unmatched.is_empty() {
                tracing::warn!(
                    "could not find these ingredients in the master list: {}",
                    encoding.unmatched.join(", ")
                );
            }
            write_json(&encoding, None)?;
        }

        Commands::Vocab => {
            let catalogs = load_catalogs(&data_dir, &config);
            for (index, name) in catalogs.vocabulary.iter().enumerate() {
                println!("{}\t{}", index, name);
            }
        }

        Commands::Options => {
            let catalogs = load_catalogs(&data_dir, &config);
            let options = serde_json::json!({
                "variants": VariantOptions::from_keys(catalogs.recipe_bank.titles()),
                "side_dishes": catalogs.side_dishes.titles().collect::<Vec<_>>(),
                "carb_sides": catalogs.carbs.titles().collect::<Vec<_>>(),
            });
            write_json(&options, None)?;
        }

        Commands::Check { llm_output, output } => {
            let text = loader::read_llm_output(&llm_output)?;
            let catalogs = load_catalogs(&data_dir, &config);
            let context = FinalCheckContext::new(&catalogs, &text);
            write_json(&context, output.as_deref())?;
        }

        Commands::Config { set_data_dir, show } => {
            let mut config = config;

            if let Some(dir) = set_data_dir {
                config.set_data_dir(dir)?;
                println!("Data directory saved");
            }

            if show {
                println!("Settings:");
                println!("  Config file: {}", Config::config_path()?.display());
                println!("  Data directory: {}", config.resolve_data_dir(None).display());
                println!("  Ingredient table: {}", config.ingredient_table);
                println!("  Single-serve guidelines: {}", config.guideline_table);
                println!("  Recipe bank: {}", config.recipe_bank);
                println!("  Side dish DB: {}", config.side_dish_db);
                println!("  Carb DB: {}", config.carb_db);
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only JSON
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalogs(data_dir: &Path, config: &Config) -> Catalogs {
    tracing::debug!("loading catalogues from {}", data_dir.display());
    Catalogs::load(&FileCatalogSource::new(data_dir, config))
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
