use base_activity_score::{
    config::Settings,
    models::NormalizedTransaction,
    registry,
    retrieval::{FetchOptions, TransactionFetcher},
    scoring::ScoreCalculator,
    sources::SourceSelection,
    utils::utc_datetime_label,
};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "activity-score")]
#[clap(about = "Score onchain activity for a Base address", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch history and print the activity summary
    Score {
        #[clap(flatten)]
        query: QueryArgs,

        /// Print JSON instead of a table
        #[clap(long)]
        json: bool,
    },

    /// Fetch and print the normalized transaction list
    Transactions {
        #[clap(flatten)]
        query: QueryArgs,

        /// Print JSON instead of a table
        #[clap(long)]
        json: bool,
    },

    /// List the built-in protocol registry
    Protocols,
}

#[derive(Args)]
struct QueryArgs {
    /// Address to look up (0x + 40 hex digits)
    #[clap(short, long)]
    address: String,

    /// Data source: auto, blockscout or basescan
    #[clap(short, long)]
    source: Option<SourceSelection>,

    /// Only transactions at or after this unix timestamp
    #[clap(long)]
    from: Option<u64>,

    /// Only transactions at or before this unix timestamp
    #[clap(long)]
    to: Option<u64>,

    /// Maximum number of transactions to keep
    #[clap(short, long)]
    limit: Option<usize>,
}

impl QueryArgs {
    fn options(&self, settings: &Settings) -> FetchOptions {
        FetchOptions::default()
            .with_limit(self.limit.unwrap_or(settings.retrieval.default_limit))
            .with_source(self.source.unwrap_or(settings.retrieval.default_source))
            .with_time_range(self.from, self.to)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        eprintln!("Using default settings ({})", e);
        Settings::default()
    });

    init_tracing(&settings.app.log_level);

    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    match cli.command {
        Commands::Score { query, json } => {
            let calculator = ScoreCalculator::from_settings(&settings)?;
            let options = query.options(&settings);

            match calculator.calculate(&query.address, &options).await {
                Ok(report) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&report.summary)?);
                    } else {
                        let summary = &report.summary;
                        println!("\n=== Activity Summary ===");
                        println!("Address: {}", report.address);
                        println!("Tx count: {}", summary.tx_count);
                        println!("Active days: {}", summary.active_days);
                        if summary.protocols_used.is_empty() {
                            println!("Protocols: 0");
                        } else {
                            println!(
                                "Protocols: {} ({})",
                                summary.protocols_used.len(),
                                summary.protocols_used.join(", ")
                            );
                        }
                        println!("Score: {}/100", summary.score);
                        println!("Tier: {}", summary.tier);
                        println!("\nBreakdown:");
                        println!("  Transactions: {:.1}", report.breakdown.tx_points);
                        println!("  Active days: {:.1}", report.breakdown.day_points);
                        println!("  Protocols: {:.1}", report.breakdown.protocol_points);
                    }
                }
                Err(e) => {
                    error!("Failed to load activity: {}", e);
                    return Err(e.into());
                }
            }
        }

        Commands::Transactions { query, json } => {
            let fetcher = TransactionFetcher::from_settings(&settings)?;
            let options = query.options(&settings);

            let transactions = fetcher.get_transactions(&query.address, &options).await?;
            info!("Retrieved {} transactions", transactions.len());

            if json {
                println!("{}", serde_json::to_string_pretty(&transactions)?);
            } else {
                print_transactions(&transactions);
            }
        }

        Commands::Protocols => {
            let registry = registry::registry();
            if registry.is_empty() {
                println!("No protocols registered");
            }
            for entry in registry.entries() {
                let tags: Vec<_> = entry.tags.iter().map(String::as_str).collect();
                println!("{} ({}) [{}]", entry.name, entry.id, tags.join(", "));
                for address in &entry.addresses {
                    println!("  {}", address);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_transactions(transactions: &[NormalizedTransaction]) {
    for tx in transactions {
        let when = utc_datetime_label(tx.timestamp).unwrap_or_else(|| tx.timestamp.to_string());
        let value = tx
            .value_ether()
            .map(|v| format!("{} ETH", v))
            .unwrap_or_else(|| format!("{} wei", tx.value_wei));
        let status = match tx.success {
            Some(true) => "ok",
            Some(false) => "failed",
            None => "-",
        };

        println!(
            "{}  {}  {} -> {}  {}  {}",
            when,
            tx.hash,
            tx.from,
            tx.to.as_deref().unwrap_or("(contract creation)"),
            value,
            status
        );
    }
}
