//! Inspect and normalize GMA mapper map files
//!
//! Run with: cargo run --bin gma-map -- check path/to/file.map

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gma_mapper::{check_build_configuration, MapData, SaveOptions};
use indexmap::IndexMap;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "gma-map")]
#[command(author, version, about = "Read, dump and rewrite GMA mapper map files", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a map file and summarize its contents
    Check {
        file: PathBuf,
    },

    /// Print the parsed map as JSON
    Dump {
        file: PathBuf,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Parse a map file and write it back in canonical form
    Rewrite {
        file: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Comment to record in the header line
        #[arg(long, default_value = "")]
        comment: String,

        /// Omit the __MAPPER__ header line
        #[arg(long)]
        no_header: bool,
    },
}

fn read_map(path: &Path) -> Result<MapData> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let lines = text.lines().filter(|line| !line.trim().is_empty());
    MapData::parse(lines).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    check_build_configuration()?;

    match cli.command {
        Commands::Check { file } => {
            let map = read_map(&file)?;
            let version = map
                .format
                .map_or_else(|| "none".to_string(), |v| v.to_string());
            println!(
                "{}: {} objects, {} images, {} files, format {}",
                file.display(),
                map.objects.len(),
                map.images.len(),
                map.files.len(),
                version
            );

            let mut kinds: IndexMap<&str, usize> = IndexMap::new();
            for object in &map.objects {
                *kinds.entry(object.type_tag()).or_default() += 1;
            }
            for (kind, count) in kinds {
                println!("  {kind}: {count}");
            }
        }

        Commands::Dump { file, pretty } => {
            let map = read_map(&file)?;
            let json = if pretty {
                serde_json::to_string_pretty(&map)?
            } else {
                serde_json::to_string(&map)?
            };
            println!("{json}");
        }

        Commands::Rewrite {
            file,
            output,
            comment,
            no_header,
        } => {
            let map = read_map(&file)?;
            let mut options = SaveOptions::new().with_comment(comment);
            if no_header {
                options = options.without_header();
            }
            let mut text = map.save(&options)?.join("\n");
            text.push('\n');

            match output {
                Some(path) => {
                    std::fs::write(&path, text)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), objects = map.objects.len(), "Map rewritten");
                }
                None => print!("{text}"),
            }
        }
    }

    Ok(())
}
