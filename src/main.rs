use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use laserbox::{export_layout, export_stl, export_svg, init_logging, BoxConfig};
use std::path::{Path, PathBuf};
use tracing::info;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

#[derive(Parser)]
#[command(name = "laserbox")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Finger-jointed box generator for laser cutters", long_about = None)]
struct Cli {
    /// Box configuration (.toml or .json); the user config or defaults otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration to a file
    Init {
        /// Output file (format determined by extension: .toml, .json)
        file: PathBuf,
    },
    /// Export one SVG cut file per panel type
    Svg {
        #[arg(short, long)]
        out: PathBuf,
        /// Bundle the files into box_svg.zip
        #[arg(long)]
        zip: bool,
    },
    /// Export one binary STL per panel type
    Stl {
        #[arg(short, long)]
        out: PathBuf,
        /// Bundle the files into box_stl.zip
        #[arg(long)]
        zip: bool,
    },
    /// Export all six panels nested on one sheet
    Layout {
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    match cli.command {
        Commands::Init { file } => {
            BoxConfig::default()
                .save_to_file(&file)
                .with_context(|| format!("Failed to write {}", file.display()))?;
            println!("{}", file.display());
        }
        Commands::Svg { out, zip } => {
            let config = load_config(cli.config.as_deref())?;
            print_paths(&export_svg(&config, &out, zip)?);
        }
        Commands::Stl { out, zip } => {
            let config = load_config(cli.config.as_deref())?;
            print_paths(&export_stl(&config, &out, zip)?);
        }
        Commands::Layout { out } => {
            let config = load_config(cli.config.as_deref())?;
            print_paths(&[export_layout(&config, &out)?]);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<BoxConfig> {
    if let Some(path) = path {
        return BoxConfig::load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()));
    }

    match BoxConfig::default_path() {
        Some(path) if path.exists() => {
            info!("Using config {}", path.display());
            BoxConfig::load_from_file(&path)
                .with_context(|| format!("Failed to load {}", path.display()))
        }
        _ => Ok(BoxConfig::default()),
    }
}

fn print_paths(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}
