//! Sajiki watch-together server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sajiki-server
//! cargo run --bin sajiki-server -- --host 0.0.0.0 --port 3000
//! SAJIKI_YOUTUBE_API_KEY=... cargo run --bin sajiki-server
//! ```

use std::time::Duration;

use clap::Parser;
use sajiki_server::{
    bootstrap::build_server,
    config::{
        DEFAULT_INITIAL_CHOSEN_BY, DEFAULT_INITIAL_MEDIA_TITLE, DEFAULT_INITIAL_MEDIA_URL,
        ServerConfig,
    },
    infrastructure::metadata::{DEFAULT_GRAPH_BASE_URL, DEFAULT_YOUTUBE_BASE_URL, MetadataConfig},
};
use sajiki_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "sajiki-server")]
#[command(about = "Watch-together server with synchronized playback and chat", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "SAJIKI_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "SAJIKI_PORT", default_value = "8080")]
    port: u16,

    /// YouTube Data API v3 key
    #[arg(long, env = "SAJIKI_YOUTUBE_API_KEY", default_value = "", hide_env_values = true)]
    youtube_api_key: String,

    /// Graph API access token (may be empty)
    #[arg(long, env = "SAJIKI_GRAPH_ACCESS_TOKEN", default_value = "", hide_env_values = true)]
    graph_access_token: String,

    /// YouTube Data API base URL
    #[arg(long, env = "SAJIKI_YOUTUBE_BASE_URL", default_value = DEFAULT_YOUTUBE_BASE_URL)]
    youtube_base_url: String,

    /// Graph API base URL
    #[arg(long, env = "SAJIKI_GRAPH_BASE_URL", default_value = DEFAULT_GRAPH_BASE_URL)]
    graph_base_url: String,

    /// Timeout for each metadata request, in seconds
    #[arg(long, env = "SAJIKI_METADATA_TIMEOUT_SECS", default_value = "5")]
    metadata_timeout_secs: u64,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "SAJIKI_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Media playing when the server starts
    #[arg(long, env = "SAJIKI_INITIAL_MEDIA_URL", default_value = DEFAULT_INITIAL_MEDIA_URL)]
    initial_media_url: String,

    /// Title of the initial media
    #[arg(long, env = "SAJIKI_INITIAL_MEDIA_TITLE", default_value = DEFAULT_INITIAL_MEDIA_TITLE)]
    initial_media_title: String,

    /// Label shown as the chooser of the initial media
    #[arg(long, env = "SAJIKI_INITIAL_CHOSEN_BY", default_value = DEFAULT_INITIAL_CHOSEN_BY)]
    initial_chosen_by: String,
}

impl From<&Args> for ServerConfig {
    fn from(args: &Args) -> Self {
        Self {
            metadata: MetadataConfig {
                youtube_base_url: args.youtube_base_url.clone(),
                graph_base_url: args.graph_base_url.clone(),
                youtube_api_key: args.youtube_api_key.clone(),
                graph_access_token: args.graph_access_token.clone(),
                timeout: Duration::from_secs(args.metadata_timeout_secs),
            },
            initial_media_url: args.initial_media_url.clone(),
            initial_media_title: args.initial_media_title.clone(),
            initial_chosen_by: args.initial_chosen_by.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_CRATE_NAME"), env!("CARGO_BIN_NAME"), &args.log_level);

    if args.youtube_api_key.is_empty() {
        tracing::warn!("No YouTube API key configured; YouTube titles will fall back to video IDs");
    }

    let server = match build_server(ServerConfig::from(&args)) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to build server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
