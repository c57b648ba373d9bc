use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agriadvisor", version, about = "Agricultural advisory CLI and API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override data directory (cache, snapshots, feedback)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up sowing/irrigation/fertilizer guidance for a soil/crop pair
    Advise {
        /// Soil category (e.g. clay, loam, sandy)
        #[arg(long)]
        soil_type: String,

        /// Crop name (e.g. rice, wheat, maize)
        #[arg(long)]
        crop: String,

        /// Free-text region, echoed back in the response
        #[arg(long)]
        region: Option<String>,

        /// Override the rule table path from config
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Evaluate disease risks for a location using mock weather data
    Alerts {
        #[arg(long)]
        lat: Option<f64>,

        #[arg(long)]
        lon: Option<f64>,

        /// City name (Bengaluru, Delhi, Mumbai, Chennai, Kolkata)
        #[arg(long)]
        city: Option<String>,

        /// Outlook days
        #[arg(long, default_value_t = 7)]
        days: u32,

        #[arg(long)]
        include_outlook: bool,

        #[arg(long)]
        include_historical: bool,

        #[arg(long)]
        include_feedback: bool,

        /// Submit feedback text alongside the alert query
        #[arg(long)]
        feedback: Option<String>,

        /// Include a plain-text advisory rendering in the output
        #[arg(long)]
        advisory_export: bool,
    },
    /// Run the HTTP API
    Serve {
        /// Bind address, overrides config
        #[arg(long)]
        bind: Option<String>,
    },
    /// Re-run interactive setup
    Init,
    /// Validate config, rule table, and weather generation
    Check,
}
