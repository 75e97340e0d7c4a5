//! SSB compiler CLI
//!
//! Compiles HTML templates into SSB binary containers.
//!
//! # Commands
//!
//! - `compile` - Compile every template in a directory
//! - `scan` - Print the segment stream of one template
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use ssb_compiler::FormatVersion;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// SSB template compiler.
#[derive(Parser)]
#[command(name = "ssbc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every template in a directory
    Compile {
        /// Directory holding the templates
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Container format (inline, table)
        #[arg(short, long, default_value = "inline")]
        format: FormatVersion,

        /// Extension of templates to compile
        #[arg(long, default_value = ".html")]
        input_ext: String,

        /// Extension of compiled containers
        #[arg(long, default_value = ".ssb")]
        output_ext: String,

        /// Longest tag name accepted
        #[arg(long)]
        max_tag_length: Option<usize>,

        /// Sync each container to disk once written
        #[arg(short, long)]
        sync: bool,
    },

    /// Print the segment stream of one template
    Scan {
        /// Template file
        file: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Compile {
            dir,
            format,
            input_ext,
            output_ext,
            max_tag_length,
            sync,
        } => {
            let mut config = ssb_compiler::CompilerConfig::new()
                .format(format)
                .input_extension(input_ext)
                .output_extension(output_ext)
                .sync_on_finish(sync);
            if let Some(len) = max_tag_length {
                config = config.max_tag_length(len);
            }
            commands::compile::run(&dir, config)?;
        }
        Commands::Scan { file, format } => {
            commands::scan::run(&file, &format)?;
        }
        Commands::Version => {
            println!("ssbc v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "container formats: {} ({}), {} ({})",
                FormatVersion::Inline,
                String::from_utf8_lossy(FormatVersion::Inline.magic()),
                FormatVersion::Table,
                String::from_utf8_lossy(FormatVersion::Table.magic()),
            );
        }
    }

    Ok(())
}
