//! amz-vetter - Scrape Amazon product pages and vet them against acceptance criteria
//!
//! Fetches product detail pages with TLS fingerprint emulation, extracts the
//! numeric fields, and keeps the products inside the configured bounds.

use amz_vetter::commands::{CheckCommand, InspectCommand};
use amz_vetter::config::{Config, OutputFormat};
use amz_vetter::filters::Criteria;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{warn, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amz-vetter",
    version,
    about = "Scrape Amazon product pages and vet them against acceptance criteria"
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "AMZ_PROXY")]
    proxy: Option<String>,

    /// Delay between requests in milliseconds
    #[arg(long, global = true, env = "AMZ_DELAY")]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    criteria: CriteriaArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Acceptance bounds; each flag overrides the config file.
#[derive(Args)]
struct CriteriaArgs {
    /// Minimum price
    #[arg(long, global = true)]
    min_price: Option<f64>,

    /// Maximum price
    #[arg(long, global = true)]
    max_price: Option<f64>,

    /// Minimum sales rank
    #[arg(long, global = true)]
    min_rank: Option<u64>,

    /// Maximum sales rank
    #[arg(long, global = true)]
    max_rank: Option<u64>,

    /// Minimum review count
    #[arg(long, global = true)]
    min_reviews: Option<u64>,

    /// Maximum review count
    #[arg(long, global = true)]
    max_reviews: Option<u64>,

    /// Maximum length in inches
    #[arg(long, global = true)]
    max_length: Option<f64>,

    /// Maximum width in inches
    #[arg(long, global = true)]
    max_width: Option<f64>,

    /// Maximum height in inches
    #[arg(long, global = true)]
    max_height: Option<f64>,

    /// Maximum shipping weight
    #[arg(long, global = true)]
    max_weight: Option<f64>,

    /// Tolerance percentage applied to every bound
    #[arg(short, long, global = true, env = "AMZ_TOLERANCE")]
    tolerance: Option<f64>,
}

impl CriteriaArgs {
    fn apply(&self, criteria: &mut Criteria) {
        macro_rules! set {
            ($($field:ident),*) => {
                $(if let Some(v) = self.$field {
                    criteria.$field = v;
                })*
            };
        }

        set!(
            min_price,
            max_price,
            min_rank,
            max_rank,
            min_reviews,
            max_reviews,
            max_length,
            max_width,
            max_height,
            max_weight,
            tolerance
        );
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch product pages and print the ones that meet the criteria
    #[command(alias = "c")]
    Check {
        /// Product page links
        #[arg(required_unless_present = "links_file")]
        links: Vec<String>,

        /// Read additional links from a file, one per line
        #[arg(long)]
        links_file: Option<PathBuf>,
    },

    /// Parse a saved product page and show the record and verdict
    #[command(alias = "i")]
    Inspect {
        /// Saved HTML file
        file: PathBuf,

        /// Link to attach to the record (defaults to the file path)
        #[arg(long)]
        link: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    cli.criteria.apply(&mut config.criteria);

    match cli.command {
        Commands::Check { mut links, links_file } => {
            if let Some(path) = links_file {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read links file: {}", path.display()))?;
                links.extend(
                    content.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string),
                );
            }

            let cancel = CancellationToken::new();
            let signal = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupt received, finishing current page");
                    signal.cancel();
                }
            });

            let cmd = CheckCommand::new(config);
            let output = cmd.execute(&links, &cancel).await?;
            println!("{}", output);
        }

        Commands::Inspect { file, link } => {
            let cmd = InspectCommand::new(config);
            let output = cmd.execute(&file, link.as_deref())?;
            println!("{}", output);
        }
    }

    Ok(())
}
