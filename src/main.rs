use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod errors;
mod handlers;
mod operations;
mod ui;

use errors::map_error;

/// Facet browse - render Solr facet counts as browse links
///
/// Examples:
///   # Render a block against the Solr servers in servers.json
///   facetbrowse --servers servers.json render block.json
///
///   # Render offline against a fixture, as HTML
///   facetbrowse --fixture fixture.json render block.json --format html
///
///   # Show the Solr parameters a block would send
///   facetbrowse render block.json --dry-run
///
///   # List indexes and the fields of one index
///   facetbrowse --servers servers.json indexes
///   facetbrowse --servers servers.json fields scores
///
///   # Create or update a block configuration
///   facetbrowse configure block.json --search-index scores --solr-field ss_genre \
///     --facet-field genre --facets-path '/search?f[0]=genre:' --show-counts true
#[derive(Parser, Debug)]
#[command(name = "facetbrowse")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Backends:\n  \
    - --servers FILE: Solr servers and their indexes (JSON)\n  \
    - --fixture FILE: in-memory indexes built from JSON documents\n\n\
Logging:\n  \
    - Set RUST_LOG (e.g. RUST_LOG=facetbrowse_core=debug) to see query diagnostics")]
struct Cli {
    #[command(flatten)]
    backend: BackendArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct BackendArgs {
    /// Solr server registry file
    #[arg(long, global = true, env = "FACETBROWSE_SERVERS", value_name = "FILE")]
    pub servers: Option<PathBuf>,

    /// In-memory index fixture file
    #[arg(long, global = true, env = "FACETBROWSE_FIXTURE", value_name = "FILE")]
    pub fixture: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a facet browse block
    Render {
        /// Block configuration file
        #[arg(value_name = "FILE")]
        config: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Print the search parameters instead of running the query
        #[arg(long)]
        dry_run: bool,
    },

    /// List the search indexes available to blocks
    Indexes,

    /// List the fields of a search index
    Fields {
        /// Search index id
        #[arg(value_name = "INDEX")]
        index: String,
    },

    /// Validate a block configuration file
    Validate {
        /// Block configuration file
        #[arg(value_name = "FILE")]
        config: PathBuf,

        /// Also check that the Solr field exists in the index (needs a backend)
        #[arg(long)]
        check_field: bool,
    },

    /// Create or update a block configuration file
    Configure(handlers::ConfigureArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("facetbrowse=info,facetbrowse_core=info,facets_browse=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Render {
            config,
            format,
            dry_run,
        } => handlers::render_block(&cli.backend, &config, format, dry_run),
        Command::Indexes => handlers::print_indexes(&cli.backend),
        Command::Fields { index } => handlers::print_fields(&cli.backend, &index),
        Command::Validate {
            config,
            check_field,
        } => handlers::validate_config(&cli.backend, &config, check_field),
        Command::Configure(args) => handlers::configure(&args),
    };

    if let Err(err) = result {
        let (title, message, details) = map_error(&err);
        eprintln!("{} {}", format!("{}:", title).red().bold(), message);
        if !details.is_empty() {
            eprintln!("\n{}", details);
        }
        process::exit(1);
    }
}
