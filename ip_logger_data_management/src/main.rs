use clap::{Parser, Subcommand};
use ip_logger_data_management::{config, lookup::HttpLookup, DataManager, USER_AGENT};
use ip_logger_lib::{
    display::LogRow,
    geo_lookup::resolve_location,
    log_record::NewLogRecord,
    telemetry::record_best_effort,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "IpLoggerCLI")]
#[command(about = "A CLI to inspect and record IP logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all logs, most recent first
    List,
    /// Print the number of stored logs
    Count,
    /// Look up this machine's public IP and record a visit for it
    Record {
        /// Attach an email, as a login attempt would
        #[arg(long)]
        email: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=trace,ip_logger_lib=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let cfg = config::load()?;
    let data_manager = DataManager::start(&cfg.database).await?;

    match cli.command {
        Commands::List => {
            for log in data_manager.get_logs().await? {
                let row = LogRow::from(&log);
                println!("{}\t{}\t{}\t{}\t{}", row.key, row.date, row.ip, row.location, row.email);
            }
        },
        Commands::Count => {
            println!("{}", data_manager.count_logs().await?);
        },
        Commands::Record { email } => {
            let lookup = HttpLookup::new()?;
            let location = resolve_location(&lookup).await?;
            tracing::info!("Resolved {} to {:?}, {:?}", location.ip, location.city, location.country);

            if !record_best_effort(&data_manager, NewLogRecord::new(location, email, USER_AGENT)).await {
                anyhow::bail!("Visit was not recorded");
            }
        },
    }

    Ok(())
}
