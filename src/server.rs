//! HTTP surface: `GET`/`HEAD /` serve an image, everything else is 404.

use crate::cache::{FileKey, MetadataCache};
use crate::config::Config;
use crate::error::ServerError;
use crate::features::extract_from_bytes;
use crate::geocoding::ReverseGeocode;
use crate::index::{ImageEntry, ImageIndex};
use crate::response::assemble;
use crate::selector::{parse_seed, select};
use crate::structs::CaptureMetadata;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header::ORIGIN;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use bon::bon;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    index: Arc<ImageIndex>,
    geocoder: Arc<dyn ReverseGeocode>,
    cache: Option<Arc<MetadataCache>>,
}

#[bon]
impl AppState {
    /// # Builder Arguments
    ///
    /// * `index: ImageIndex` - The images to serve.
    /// * `geocoder: Arc<dyn ReverseGeocode>` - Resolves place names for GPS-tagged images.
    /// * `metadata_cache_size: usize` - (Default: `0`) Entries kept in the metadata cache; `0` disables it.
    #[builder]
    pub fn new(
        index: ImageIndex,
        geocoder: Arc<dyn ReverseGeocode>,
        #[builder(default)] metadata_cache_size: usize,
    ) -> Self {
        Self {
            index: Arc::new(index),
            geocoder,
            cache: MetadataCache::new(metadata_cache_size).map(Arc::new),
        }
    }
}

impl AppState {
    pub fn index(&self) -> &ImageIndex {
        &self.index
    }

    /// Extracts metadata from `bytes` and resolves a place name for GPS
    /// positions, consulting the cache first when enabled.
    pub async fn enrich(&self, entry: &ImageEntry, bytes: &[u8]) -> CaptureMetadata {
        let key = match &self.cache {
            Some(_) => FileKey::for_path(entry.path()).await,
            None => None,
        };
        if let (Some(cache), Some(key)) = (&self.cache, &key)
            && let Some(hit) = cache.get(key)
        {
            debug!(path = %entry.path().display(), "metadata cache hit");
            return hit;
        }

        let mut metadata = extract_from_bytes(bytes);
        if let Some(coordinates) = metadata.coordinates {
            metadata.place_name = self.geocoder.resolve(coordinates).await;
        }

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.insert(key, &metadata);
        }
        metadata
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_image))
        .fallback(not_found)
        .with_state(state)
}

/// First non-blank `i` parameter, mirroring how blank query values are dropped.
fn seed_param(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .filter(|(name, _)| name == "i")
        .map(|(_, value)| value.as_str())
        .find(|value| !value.trim().is_empty())
}

async fn serve_image(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let seed = match parse_seed(seed_param(&params)) {
        Ok(seed) => seed,
        Err(e) => {
            warn!(error = %e, "rejecting request");
            return (StatusCode::BAD_REQUEST, format!("Bad request: {e}")).into_response();
        }
    };

    let entry = select(state.index(), seed, &mut rand::rng()).clone();
    let bytes = match tokio::fs::read(entry.path()).await {
        Ok(bytes) => Bytes::from(bytes),
        Err(e) => {
            error!(path = %entry.path().display(), error = %e, "failed to read image");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Could not read {}", entry.path().display()),
            )
                .into_response();
        }
    };

    let metadata = state.enrich(&entry, &bytes).await;
    info!(path = %entry.path().display(), ?seed, %method, "serving image");

    // HEAD keeps the full body so content-length matches GET; the router drops it.
    let origin = headers.get(ORIGIN).and_then(|value| value.to_str().ok());
    assemble(&entry, &metadata, origin, bytes).into_response()
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn shutdown_on_ctrl_c(handle: Handle<SocketAddr>) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
        handle.graceful_shutdown(Some(Duration::from_secs(10)));
    }
}

/// Binds `config.host:config.port` with TLS and serves until Ctrl-C.
///
/// # Errors
///
/// * [`ServerError::BindAddress`] if the host does not resolve.
/// * [`ServerError::Tls`] if the certificate or key cannot be loaded.
/// * [`ServerError::Io`] if the listener fails.
pub async fn serve(config: &Config, state: AppState) -> Result<(), ServerError> {
    let target = config.bind_target();
    let addr = tokio::net::lookup_host(target.as_str())
        .await
        .ok()
        .and_then(|mut addrs| addrs.next())
        .ok_or_else(|| ServerError::BindAddress(target.clone()))?;

    // Another crate may already have installed a provider; either is fine.
    let _ = rustls::crypto::ring::default_provider().install_default();
    let tls = RustlsConfig::from_pem_file(&config.cert, &config.key)
        .await
        .map_err(ServerError::Tls)?;

    let handle: Handle<SocketAddr> = Handle::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    info!(
        url = %format!("https://{target}"),
        images = state.index().len(),
        "serving HTTPS"
    );
    axum_server::bind_rustls(addr, tls)
        .handle(handle)
        .serve(router(state).into_make_service())
        .await?;
    Ok(())
}
