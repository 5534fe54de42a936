use clap::Parser;
use tracing_subscriber::EnvFilter;

use slidereel::http::{AppState, HttpServer, ServerConfig};
use slidereel::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "slidereel", version)]
struct Cli {
    /// Bind address.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Bind port.
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Maximum request body size in MiB.
    #[arg(long, default_value_t = 100)]
    max_body_mib: usize,

    /// Seconds each image is displayed.
    #[arg(long, default_value_t = 10)]
    seconds_per_image: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,slidereel=info,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();

    let config = AppConfig {
        max_body_bytes: cli.max_body_mib * 1024 * 1024,
        seconds_per_image: cli.seconds_per_image,
        ..AppConfig::default()
    };
    config.validate()?;

    if !slidereel::encode::is_ffmpeg_on_path() {
        tracing::warn!("ffmpeg not found on PATH; /create-video requests will fail");
    }

    tracing::info!(
        frame = format!("{}x{}", config.frame_width, config.frame_height),
        seconds_per_image = config.seconds_per_image,
        fps = config.fps,
        max_body_bytes = config.max_body_bytes,
        "slidereel configured"
    );

    let server = HttpServer::new(ServerConfig::new(&cli.host, cli.port), AppState::new(config));
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to listen for ctrl-c");
            tracing::info!("received shutdown signal");
        })
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}
