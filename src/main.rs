//! price-list: sortable retail price list with shareable view state
//!
//! Browse, sort and export a JSON product collection from the terminal.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use price_list::{
    Validatable,
    analytics::PriceMode,
    cli::{self, ExportTarget, ListSource, SortRequest},
    config::{self, AppConfig},
    export::ExportFormat,
    sorting::SortMode,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "price-list")]
#[command(author = "Binarly.io")]
#[command(version)]
#[command(about = "Sortable retail price list with shareable view state", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Browse a product file
    price-list view items.json

    # Reopen a shared view
    price-list view items.json --state 'items=%7B%22sortType%22%3A%22price-desc%22%7D'

    # Export in store-and-name order
    price-list export items.json --state '{\"sortType\":\"store-and-name\"}' -f csv

    # Print the ten cheapest items by unit price
    price-list sort items.json --unit-price --limit 10")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Product file and shared state, common to the list commands
#[derive(Parser)]
struct SourceArgs {
    /// JSON product file
    input: PathBuf,

    /// View state to restore: a query string or view-state JSON
    #[arg(long, env = "PRICE_LIST_STATE")]
    state: Option<String>,

    /// Key the view state is stored under
    #[arg(long)]
    instance_id: Option<String>,

    /// Keyword to highlight in product names (repeatable)
    #[arg(long = "highlight", value_name = "KEYWORD")]
    highlights: Vec<String>,

    /// Language of UI texts (only English ships; other codes fall back to it)
    #[arg(long)]
    language: Option<String>,
}

impl SourceArgs {
    fn source(&self) -> ListSource {
        ListSource {
            input: self.input.clone(),
            state: self.state.clone(),
        }
    }

    /// Layer these arguments over the file configuration.
    fn overrides(&self) -> AppConfig {
        let mut builder = AppConfig::builder().highlights(self.highlights.clone());
        if let Some(language) = &self.language {
            builder = builder.language(language.clone());
        }
        let mut overrides = builder.build();
        if let Some(id) = &self.instance_id {
            overrides.list.instance_id.clone_from(id);
        }
        overrides
    }
}

/// Arguments for the `view` subcommand
#[derive(Parser)]
struct ViewArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Color theme (dark, light, high-contrast)
    #[arg(long)]
    theme: Option<String>,

    /// Directory for exports made from the viewer
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

/// Arguments for the `export` subcommand
#[derive(Parser)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Export format
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Output directory (configured directory if not specified)
    #[arg(short = 'O', long, conflicts_with = "stdout")]
    output_dir: Option<PathBuf>,

    /// Print to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
}

/// Arguments for the `sort` subcommand
#[derive(Parser)]
struct SortArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Sort order (overrides the restored state)
    #[arg(short, long, value_enum)]
    sort: Option<SortMode>,

    /// Show and sort by unit price
    #[arg(long, conflicts_with = "sales_price")]
    unit_price: bool,

    /// Show and sort by sales price
    #[arg(long)]
    sales_price: bool,

    /// Print at most this many rows
    #[arg(short = 'n', long)]
    limit: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse a product file interactively
    View(ViewArgs),

    /// Export a product file as JSON or CSV
    Export(ExportArgs),

    /// Print a product file as a sorted table
    Sort(SortArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show, validate or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print the discovered config file path
    Path,
    /// Check the effective configuration for invalid values
    Validate,
    /// Print the JSON Schema of the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate an example .price-list.yaml in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with exports on stdout
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match cli.command {
        Commands::View(args) => {
            let mut overrides = args.source.overrides();
            if let Some(theme) = &args.theme {
                overrides.display.theme.clone_from(theme);
            }
            overrides.export.output_dir.clone_from(&args.output_dir);
            let config = effective_config(cli.config.as_deref(), &overrides)?;

            let share = cli::run_view(&config, &args.source.source())?;
            println!("?{share}");
            Ok(())
        }

        Commands::Export(args) => {
            let overrides = args.source.overrides();
            let config = effective_config(cli.config.as_deref(), &overrides)?;
            let format = args.format.unwrap_or(config.export.format);
            let target = if args.stdout {
                ExportTarget::Stdout
            } else {
                ExportTarget::Directory(args.output_dir.unwrap_or_else(|| config.export.dir()))
            };

            if let Some(path) = cli::run_export(&config, &args.source.source(), format, &target)? {
                eprintln!("Exported {}", path.display());
            }
            Ok(())
        }

        Commands::Sort(args) => {
            let overrides = args.source.overrides();
            let config = effective_config(cli.config.as_deref(), &overrides)?;
            let price_mode = if args.unit_price {
                Some(PriceMode::Unit)
            } else if args.sales_price {
                Some(PriceMode::Sales)
            } else {
                None
            };
            let request = SortRequest {
                sort: args.sort,
                price_mode,
                limit: args.limit,
            };
            cli::run_sort(&config, &args.source.source(), request)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "price-list", &mut io::stdout());
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml =
                    serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => println!("{}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Validate => {
                let (config, _) = config::load_or_default(cli.config.as_deref());
                let errors = config.validate();
                if errors.is_empty() {
                    eprintln!("Configuration is valid");
                    return Ok(());
                }
                for error in &errors {
                    eprintln!("  {error}");
                }
                anyhow::bail!("{} invalid configuration value(s)", errors.len())
            }
            ConfigAction::Schema { output } => {
                let schema = config::generate_json_schema();
                match output {
                    Some(path) => {
                        std::fs::write(&path, &schema)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        eprintln!("Schema written to {}", path.display());
                    }
                    None => println!("{schema}"),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".price-list.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, config::generate_full_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}

/// File configuration merged with command-line overrides, validated.
fn effective_config(path: Option<&std::path::Path>, overrides: &AppConfig) -> Result<AppConfig> {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(path, overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Using config {}", path.display());
    }

    let errors = config.validate();
    if let Some(first) = errors.first() {
        anyhow::bail!(
            "invalid configuration ({} problem(s)), first: {first}",
            errors.len()
        );
    }
    Ok(config)
}
