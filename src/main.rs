use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use tracer::core::config::{self, TracerConfig};
use tracer::tui;

#[derive(Parser)]
#[command(name = "tracer", about = "Terminal client for the trace lookup service")]
struct Args {
    /// Base URL of the trace service (overrides config file and BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to tracer.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("tracer.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        TracerConfig::default()
    });
    let resolved = config::resolve(&file_config, args.base_url.as_deref());

    log::info!(
        "Tracer starting up against {} (token file: {})",
        resolved.base_url,
        resolved.token_file.display()
    );

    tui::run(resolved)
}
