//! CORS layer construction.

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

use userdir_core::config::app::CorsConfig;

/// Builds the CORS layer from configuration.
///
/// A `"*"` entry allows any origin; otherwise only the listed origins are
/// accepted.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.iter().any(|origin| origin == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}
