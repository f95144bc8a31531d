use clap::{Parser, Subcommand};
use starlist::commands::*;
use starlist::core::{error::Result, print_error, CatalogSource};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "starlist")]
#[command(about = "Generate a Markdown list of your starred GitHub repositories")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch (or reuse) stars and write the Markdown document
    Generate {
        /// Where stars come from: api or file
        #[arg(long)]
        source: Option<CatalogSource>,
        /// GitHub token (defaults to GITHUB_TOKEN)
        #[arg(long)]
        token: Option<String>,
        /// Output filename relative to the root
        #[arg(short, long)]
        output: Option<String>,
        /// Config file (defaults to .starlist.yml, then the user config)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory holding the cache and the output (defaults to the repository root)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Print the document instead of writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// Summarize the cached stars
    Inspect {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let outcome = match cli.command {
        Commands::Generate {
            source,
            token,
            output,
            config,
            root,
            dry_run,
        } => execute_generate(GenerateArgs {
            source,
            token,
            output,
            config,
            root,
            dry_run,
        }),
        Commands::Inspect { root, config } => execute_inspect(root, config),
    };

    if let Err(e) = outcome {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
