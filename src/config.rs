use crate::geocoding::{GeocoderBackend, MAX_REMOTE_TIMEOUT};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Serve a random image from a folder over HTTPS.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Folder that is scanned recursively for jpg, jpeg, png and gif files.
    #[arg(long, default_value = "images")]
    pub image_dir: PathBuf,

    #[arg(long, default_value = "localhost")]
    pub host: String,

    #[arg(long, default_value_t = 4443)]
    pub port: u16,

    /// PEM certificate chain.
    #[arg(long, default_value = "cert.pem")]
    pub cert: PathBuf,

    /// PEM private key.
    #[arg(long, default_value = "key.pem")]
    pub key: PathBuf,

    /// Where place names for GPS-tagged images come from.
    #[arg(long, value_enum, default_value_t = GeocoderBackend::Offline)]
    pub geocoder: GeocoderBackend,

    /// Base URL of the Nominatim-compatible service used by `--geocoder remote`.
    #[arg(long, default_value = "https://nominatim.openstreetmap.org")]
    pub geocoder_url: String,

    /// Remote lookup timeout in seconds (1 to 5).
    #[arg(long, default_value_t = 5)]
    pub geocoder_timeout_secs: u64,

    /// Number of images whose metadata is kept in memory; 0 disables the cache.
    #[arg(long, default_value_t = 256)]
    pub metadata_cache_size: usize,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Config {
    pub fn geocoder_timeout(&self) -> Duration {
        Duration::from_secs(self.geocoder_timeout_secs.max(1)).min(MAX_REMOTE_TIMEOUT)
    }

    pub fn bind_target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Installs the global `tracing` subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
