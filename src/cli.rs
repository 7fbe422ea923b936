use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "macrochef")]
#[command(about = "Prompt context builder for MacroChef recipe generation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalogue directory (overrides the configured one)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a recipe config into a prompt context (JSON)
    Prompt {
        /// recipe_config.json
        #[arg(required = true)]
        config: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Encode an ingredient list against the master vocabulary
    Encode {
        /// Ingredient names
        #[arg(required = true)]
        ingredients: Vec<String>,
    },

    /// List master vocabulary entries with their vector positions
    Vocab,

    /// List selectable variant choices, side dishes and carb sides
    Options,

    /// Build the final check context for a model's output
    Check {
        /// Text file holding the model output
        #[arg(required = true)]
        llm_output: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change settings
    Config {
        /// Persist the catalogue directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Print current settings
        #[arg(long)]
        show: bool,
    },
}
