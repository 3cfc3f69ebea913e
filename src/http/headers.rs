//! Cross-cutting response headers.
//!
//! # Responsibilities
//! - Apply the CORS header set to every outgoing response
//! - Mark responses that passed through a backend with the gateway header
//!
//! # Design Decisions
//! - Header values are fixed (`from_static`), so application can never fail
//! - CORS headers go on every response, including preflight, not-found, and
//!   gateway-error responses
//! - The gateway header goes only on responses a backend actually produced

use axum::body::Body;
use axum::http::header::{
    HeaderMap, HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::Response;

/// Header identifying responses that were proxied through the gateway.
pub const X_GATEWAY: &str = "x-gateway";

/// Value of the gateway identification header.
pub const GATEWAY_NAME: &str = "api-gateway";

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Set the three CORS response headers.
pub fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOW_ORIGIN));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
}

/// Mark a proxied response with the gateway identification header.
pub fn mark_gateway(response: &mut Response<Body>) {
    response.headers_mut().insert(
        HeaderName::from_static(X_GATEWAY),
        HeaderValue::from_static(GATEWAY_NAME),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn cors_headers_are_all_set() {
        let mut headers = HeaderMap::new();
        apply_cors(&mut headers);
        assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert_eq!(
            headers.get(ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            headers.get(ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "Content-Type, Authorization"
        );
    }

    #[test]
    fn mark_gateway_sets_identifying_header() {
        let mut response = Response::builder()
            .status(StatusCode::OK)
            .body(Body::empty())
            .unwrap();
        mark_gateway(&mut response);
        assert_eq!(response.headers().get(X_GATEWAY).unwrap(), "api-gateway");
    }
}
