use clap::{ArgAction, Parser};
use status_image_origin::DEFAULT_ORIGIN_URL;
use std::path::PathBuf;

/// Command-line configuration.
///
/// `-h` selects the host, so help is only available as `--help`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "status-image-server",
    version,
    about = "Serves status-code images from a local cache, fetching misses from an origin",
    disable_help_flag = true
)]
pub struct Config {
    /// Server host
    #[arg(short = 'h', long, default_value = "127.0.0.1")]
    pub host: String,

    /// Server port
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// Cache directory
    #[arg(short, long = "cache", value_name = "CACHE_DIR", default_value = "./cache")]
    pub cache_dir: PathBuf,

    /// Base URL of the image origin consulted on cache miss
    #[arg(long = "origin", value_name = "URL", default_value = DEFAULT_ORIGIN_URL)]
    pub origin_url: String,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
