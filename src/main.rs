//! repmerge - CLI entry point
//!
//! Merges replicate experiment output into long-format CSV tables.

use clap::{Parser, Subcommand};
use repmerge::{produce_merged_table, Config};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repmerge")]
#[command(version)]
#[command(about = "Merge per-replicate experiment output into long-format CSV tables")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the configured sweep over a replicate range
    Merge {
        /// First replicate id (inclusive)
        first_rep: u32,

        /// Last replicate id (inclusive)
        last_rep: u32,

        /// Source filenames to merge (defaults to the configured list)
        #[arg(short, long, value_delimiter = ',')]
        files: Vec<String>,

        /// Configuration file (YAML)
        #[arg(short, long, default_value = "merge.yaml")]
        config: PathBuf,

        /// Override the source data root
        #[arg(long)]
        source_root: Option<PathBuf>,

        /// Override the output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "merge.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            first_rep,
            last_rep,
            files,
            config,
            source_root,
            output,
        } => run_merge(first_rep, last_rep, files, config, source_root, output),

        Commands::Init { output } => generate_config(output),
    }
}

fn run_merge(
    first_rep: u32,
    last_rep: u32,
    files: Vec<String>,
    config_path: PathBuf,
    source_root: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let mut config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    config.replicates.first = first_rep;
    config.replicates.last = last_rep;
    if let Some(root) = source_root {
        config.paths.source_root = root;
    }
    if let Some(dir) = output {
        config.paths.output_dir = dir;
    }
    config.validate()?;

    let files = if files.is_empty() {
        config.files.clone()
    } else {
        files
    };

    println!("Merging replicates {}-{}", first_rep, last_rep);
    println!("  Source root: {:?}", config.paths.source_root);
    println!("  Files: {}", files.join(", "));
    println!();

    std::fs::create_dir_all(&config.paths.output_dir)?;

    for filename in &files {
        let table = produce_merged_table(&config, filename)?;
        let dest = config
            .paths
            .output_dir
            .join(format!("{}{}", config.paths.output_prefix, filename));
        table.write_csv(&dest)?;
        println!("  {}: {} rows -> {:?}", filename, table.len(), dest);
    }

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Default configuration written to: {:?}", output);
    Ok(())
}
