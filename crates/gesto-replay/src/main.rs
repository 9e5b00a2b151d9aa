//! Trace replay binary.

use anyhow::Context;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gesto_engine::ChannelSink;
use gesto_replay::{load_trace, run_trace, Cli, ReplayConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays a clean JSON stream
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("gesto=info".parse().unwrap())
        .add_directive("gesto_engine=info".parse().unwrap())
        .add_directive("gesto_replay=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Replay failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ReplayConfig::from_cli(&cli).await?;
    info!("Replay config: {:?}", config);

    let metrics_handle = if config.metrics {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    let frames = load_trace(&config.trace_path)
        .await
        .with_context(|| format!("Failed to load trace {}", config.trace_path.display()))?;

    let (sink, mut events) = ChannelSink::new();
    let print_events = !cli.summary;
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            if !print_events {
                continue;
            }
            match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(e) => error!("Failed to serialize event: {}", e),
            }
        }
    });

    let summary = run_trace(&config, frames, sink).await?;
    printer.await.context("Event printer task failed")?;

    if cli.summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    if let Some(handle) = metrics_handle {
        eprintln!("{}", handle.render());
    }

    Ok(())
}
