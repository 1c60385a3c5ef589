//! Clip request worker binary.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tsnip_media::StreamCopyCutter;
use tsnip_worker::{
    CommandTranscriber, HttpSectionGenerator, LocalDelivery, RequestOrchestrator, WorkerConfig,
};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("tsnip=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting tsnip-worker");

    if let Err(e) = run().await {
        error!("Worker error: {:#}", e);
        std::process::exit(1);
    }

    info!("Worker done");
}

async fn run() -> anyhow::Result<()> {
    let request_ids: Vec<String> = std::env::args().skip(1).collect();
    if request_ids.is_empty() {
        anyhow::bail!("usage: tsnip-worker <request_id>...");
    }

    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    let orchestrator = RequestOrchestrator::new(
        config,
        CommandTranscriber::from_env()?,
        HttpSectionGenerator::from_env()?,
        StreamCopyCutter::new(),
        LocalDelivery::new(),
    );

    // Requests are independent of each other but each id owns its record
    // file, so they run strictly one after another.
    for request_id in &request_ids {
        let delivery_ref = orchestrator.process(request_id).await?;
        info!(request_id = %request_id, "Request delivered: {}", delivery_ref);
    }

    Ok(())
}
