use clap::Parser;
use random_image_server::config::{Config, init_tracing};
use random_image_server::geocoding::build_geocoder;
use random_image_server::{AppState, ImageIndex, ServerError, serve};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = Config::parse();
    init_tracing(config.log_format);

    let index = ImageIndex::build(&config.image_dir)?;
    info!(
        images = index.len(),
        dir = %config.image_dir.display(),
        "indexed image folder"
    );

    let geocoder = build_geocoder(
        config.geocoder,
        &config.geocoder_url,
        config.geocoder_timeout(),
    )?;
    let state = AppState::builder()
        .index(index)
        .geocoder(geocoder)
        .metadata_cache_size(config.metadata_cache_size)
        .build();

    serve(&config, state).await
}
