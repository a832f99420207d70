//! CORS configuration for Axum using tower-http.

use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

const CLIENT_INFO: HeaderName = HeaderName::from_static("x-client-info");
const APIKEY: HeaderName = HeaderName::from_static("apikey");
const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// The CORS policy browser clients of the guard endpoints expect.
///
/// Allows:
/// - Any origin
/// - `POST` and `OPTIONS`
/// - `authorization`, `x-client-info`, `apikey` and `content-type` headers
///
/// Preflight requests are answered by the layer with an empty body. The
/// layer only lists the allowed headers on preflights; add
/// [`allowed_headers_on_responses`] outside it to list them on every response.
pub fn edge_function() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, CLIENT_INFO, APIKEY, header::CONTENT_TYPE])
}

/// Adds `access-control-allow-headers` to responses that lack it.
///
/// ```rust,ignore
/// let app = guard_routes()
///     .layer(cors::edge_function())
///     .layer(cors::allowed_headers_on_responses())
///     .with_state(state);
/// ```
pub fn allowed_headers_on_responses() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    )
}

/// Creates a permissive CORS configuration that allows all origins.
///
/// **Warning**: This is intended for development only. Do not use in production.
pub fn permissive() -> CorsLayer {
    CorsLayer::permissive()
}

/// Same headers as [`edge_function`], restricted to the given origins.
///
/// Origins that fail to parse as header values are skipped.
///
/// # Arguments
/// * `allowed_origins` - List of allowed origin URLs (e.g., `["https://inventory.example.org"]`)
pub fn default(allowed_origins: &[&str]) -> CorsLayer {
    let origins: Vec<_> = allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, CLIENT_INFO, APIKEY, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
