//! Static `Server` response header.

use axum::http::{HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;

/// Value advertised in the `Server` header of every response.
pub const SERVER_NAME: &str = "atlas-api";

/// Creates a layer that stamps `Server: atlas-api` on every response,
/// overriding any value set by handlers.
pub fn layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::SERVER, HeaderValue::from_static(SERVER_NAME))
}
