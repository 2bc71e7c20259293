//! origami-dates CLI entry point.
//!
//! Renders backend timestamps exactly as the web client shows them.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use origami_dates::application::{TimestampNormalizer, canonical_wire_string};
use origami_dates::domain::{DateStyle, DisplayZone, RawTimestamp};
use origami_dates::infra::app_config::{config_path, load_config_from, save_config_to};
use origami_dates::infra::cli::input::{InputSource, acquire_timestamps};

#[derive(Parser, Debug)]
#[command(name = "origami-dates")]
#[command(version)]
#[command(about = "Render origami platform timestamps as display dates", long_about = None)]
struct Args {
    /// Date style (long, numeric, short, datetime)
    #[arg(short, long, global = true)]
    style: Option<DateStyle>,

    /// Zone to show dates in (utc, local, +HH:MM)
    #[arg(short, long, global = true)]
    zone: Option<DisplayZone>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read timestamps from a file, one per line
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Timestamps to format (JSON values or bare text)
    #[arg()]
    values: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Format timestamps as display labels
    Format {
        /// Timestamps (JSON values or bare text)
        values: Vec<String>,
    },

    /// Normalize timestamps to the feed's `YYYY-MM-DD HH:MM:SS` form
    Canonical {
        /// Timestamps (JSON values or bare text)
        values: Vec<String>,
    },

    /// Print the effective configuration
    Config {
        /// Persist the effective configuration (including --style/--zone)
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let path = args.config.clone().unwrap_or_else(config_path);
    let mut config = load_config_from(&path);
    if let Some(style) = args.style {
        config.style = style;
    }
    if let Some(zone) = args.zone {
        config.zone = zone;
    }
    log::debug!("Using config {:?} from {}", config, path.display());

    match args.command {
        Some(Commands::Config { save }) => {
            if save {
                save_config_to(&config, &path)
                    .with_context(|| format!("Failed to write config to {}", path.display()))?;
                log::info!("Saved config to {}", path.display());
            }
            let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
            print!("{}", rendered);
        }
        Some(Commands::Canonical { values }) => {
            let now = Utc::now();
            for raw in acquire(values, args.file)? {
                println!("{}", canonical_wire_string(&raw, now));
            }
        }
        Some(Commands::Format { values }) => {
            print_labels(&config.normalizer(), &acquire(values, args.file)?);
        }
        None => {
            print_labels(&config.normalizer(), &acquire(args.values, args.file)?);
        }
    }

    Ok(())
}

fn acquire(values: Vec<String>, file: Option<PathBuf>) -> Result<Vec<RawTimestamp>> {
    let source = if !values.is_empty() {
        InputSource::Args(values)
    } else if let Some(path) = file {
        InputSource::File(path)
    } else {
        InputSource::Stdin
    };

    let timestamps = acquire_timestamps(source)?;
    if timestamps.is_empty() {
        anyhow::bail!("No timestamps given. Pass them as arguments, with --file, or on stdin.");
    }
    Ok(timestamps)
}

fn print_labels(normalizer: &TimestampNormalizer, timestamps: &[RawTimestamp]) {
    for raw in timestamps {
        println!("{}", normalizer.format(raw));
    }
}
