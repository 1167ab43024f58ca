#![forbid(unsafe_code)]
//! ctxkit Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ctxkit::commands::{
    execute_init, execute_list, execute_setup, execute_update, execute_version, InitOptions,
    SetupOptions,
};

#[derive(Parser)]
#[command(name = "ctxkit")]
#[command(about = "Generates AI assistant instruction files and MCP configs from a context library")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create ctxkit.yaml in the current directory
    Init {
        /// Preselect repo type: java-service, flutter-app
        #[arg(long)]
        repo_type: Option<String>,

        /// Overwrite an existing selection file
        #[arg(short, long)]
        force: bool,

        /// Skip interactive prompts
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Generate instruction files and MCP configs from ctxkit.yaml
    Setup {
        /// Path to the selection file
        #[arg(long, default_value = "ctxkit.yaml")]
        config: PathBuf,

        /// Print what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Overwrite files even when they lack the managed marker
        #[arg(short, long)]
        force: bool,
    },

    /// List packs, globals, skills, and MCP servers in the context library
    List,

    /// Refresh the cached context library
    Update,

    /// Print CLI version and update availability
    Version,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            repo_type,
            force,
            yes,
        } => execute_init(InitOptions {
            repo_type,
            force,
            yes,
        }),

        Commands::Setup {
            config,
            dry_run,
            force,
        } => execute_setup(SetupOptions {
            config,
            dry_run,
            force,
            verbose: cli.verbose,
        }),

        Commands::List => execute_list(),

        Commands::Update => execute_update(),

        Commands::Version => execute_version(),
    }
}
