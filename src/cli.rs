use crate::knowledge::Language;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tomato-doctor")]
#[command(about = "Tomato leaf disease detection and treatment advice", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one leaf image
    Analyze {
        /// Path to the leaf image
        #[arg(required = true)]
        image: PathBuf,

        /// Location for the weather lookup (default: configured location)
        #[arg(short, long)]
        location: Option<String>,

        /// Advice language (english/swahili)
        #[arg(short = 'g', long, value_enum, default_value = "english")]
        language: Language,

        /// Print the result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Analyze every leaf image in a folder and write a JSON report
    Batch {
        /// Folder containing leaf images
        #[arg(required = true)]
        folder: PathBuf,

        /// Output JSON file (default: folder/diagnosis.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Location for the weather lookup (default: configured location)
        #[arg(short, long)]
        location: Option<String>,

        /// Advice language (english/swahili)
        #[arg(short = 'g', long, value_enum, default_value = "english")]
        language: Language,
    },

    /// Show or change configuration
    Config {
        /// Store the OpenWeatherMap API key
        #[arg(long)]
        set_api_key: Option<String>,

        /// Store the model artifact path
        #[arg(long)]
        set_model_path: Option<PathBuf>,

        /// Show the current configuration
        #[arg(long)]
        show: bool,
    },

    /// Verify that the model and configuration are usable
    Check,
}
