use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqwest::Client;
use serde_json::Value;
use token_relay::config::endpoint::EndpointConfig;
use token_relay::forward::client::Forwarder;
use token_relay::relay::pipeline::run_relay;
use token_relay::store::record_store::{init_store, store_record};
use token_relay::store::writer::StoreWriter;
use token_relay::utils::config_loader;
use token_relay::utils::constants::DEFAULT_MAX_IN_FLIGHT;
use token_relay::utils::logging;
use token_relay::utils::logging::LogLevel;
use tokio::io::BufReader;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG")]
    config: Option<String>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Append one JSON record to the record file
    Store {
        /// overrides `store.path` from the config file
        #[arg(short, long)]
        path: Option<String>,
        #[arg(short, long)]
        record: String,
    },
    /// POST one JSON payload to the configured endpoint
    Forward {
        #[arg(long)]
        payload: String,
    },
    /// Store and forward every JSON line read from stdin
    Relay {
        #[arg(short, long)]
        path: Option<String>,
        /// events stored and forwarded at the same time
        #[arg(long, default_value_t = DEFAULT_MAX_IN_FLIGHT)]
        max_in_flight: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load config, init logging
    // -------------------------------

    let args = Args::parse();
    let relay_config = config_loader::run(args.config.as_deref()).await?;
    logging::run(&relay_config, args.log_level);

    match args.command {
        // -------------------------------
        // 2. Single append
        // -------------------------------
        Command::Store { path, record } => {
            let record: Value = serde_json::from_str(&record).context("--record must be JSON")?;
            let path = path.unwrap_or(relay_config.store.path);
            store_record(&path, &record).await;
        }

        // -------------------------------
        // 3. Single forward
        // -------------------------------
        Command::Forward { payload } => {
            let payload: Value =
                serde_json::from_str(&payload).context("--payload must be JSON")?;
            match EndpointConfig::resolve(relay_config.forward.as_ref()) {
                Ok(endpoint) => Forwarder::new(Client::new(), endpoint).send_data(&payload).await,
                Err(e) => error!("{}", e),
            }
        }

        // -------------------------------
        // 4. stdin pipeline
        // -------------------------------
        Command::Relay { path, max_in_flight } => {
            let path = path.unwrap_or(relay_config.store.path);
            if let Err(e) = init_store(&path).await {
                error!("{}", e);
            }

            // endpoint is validated once; without it events are only stored
            let forwarder = EndpointConfig::resolve(relay_config.forward.as_ref())
                .inspect_err(|e| error!("{}, forwarding disabled", e))
                .ok()
                .map(|endpoint| Forwarder::new(Client::new(), endpoint));

            let (writer, worker) = StoreWriter::spawn(&path);
            info!("Relay starting, store: {}", path);
            let stdin = BufReader::new(tokio::io::stdin());
            let summary = run_relay(stdin, writer, forwarder, max_in_flight).await?;
            worker.await?;
            info!("Relay finished: {} events, {} skipped", summary.events, summary.skipped);
        }
    }

    Ok(())
}
