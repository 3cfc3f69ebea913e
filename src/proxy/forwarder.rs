//! Single-backend reverse proxy.
//!
//! # Responsibilities
//! - Hold the parsed backend target (scheme + authority), parsed once at
//!   registration rather than per request
//! - Rebuild the request URI from the rewritten path, preserving the query
//! - Rewrite the Host header to the backend authority
//! - Relay backend status, headers, and body unmodified
//! - Convert transport failures into a 502 response

use axum::body::Body;
use axum::http::header::{HeaderValue, HOST};
use axum::http::uri::{Authority, Parts, PathAndQuery, Scheme};
use axum::http::{Request, Response, StatusCode, Uri};
use axum::response::IntoResponse;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::config::validation::check_backend_url;
use crate::config::ConfigError;
use crate::http::headers;

/// Shared upstream HTTP client. Cheap to clone; all clones share one
/// connection pool.
pub type HttpClient = Client<HttpConnector, Body>;

/// Build the upstream client used by every forwarder.
pub fn upstream_client() -> HttpClient {
    Client::builder(TokioExecutor::new()).build(HttpConnector::new())
}

/// Reverse proxy bound to a single backend target.
#[derive(Clone)]
pub struct Forwarder {
    scheme: Scheme,
    authority: Authority,
    client: HttpClient,
}

impl std::fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Forwarder({}://{})", self.scheme, self.authority)
    }
}

impl Forwarder {
    /// Parse `backend` and bind a forwarder to it.
    ///
    /// The target must be an absolute http(s) URL with a host; anything else
    /// is a configuration error.
    pub fn new(backend: &str, client: HttpClient) -> Result<Self, ConfigError> {
        check_backend_url(backend).map_err(|reason| ConfigError::InvalidBackend {
            url: backend.to_string(),
            reason,
        })?;

        let uri: Uri = backend.parse().map_err(|e: axum::http::uri::InvalidUri| {
            ConfigError::InvalidBackend {
                url: backend.to_string(),
                reason: e.to_string(),
            }
        })?;
        let (scheme, authority) = match (uri.scheme().cloned(), uri.authority().cloned()) {
            (Some(scheme), Some(authority)) => (scheme, authority),
            _ => {
                return Err(ConfigError::InvalidBackend {
                    url: backend.to_string(),
                    reason: "missing scheme or host".to_string(),
                })
            }
        };

        Ok(Self {
            scheme,
            authority,
            client,
        })
    }

    /// The backend authority this forwarder is bound to.
    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Forward `req` to the backend under the rewritten `path`.
    ///
    /// The original query string, method, headers, and body are preserved.
    /// The backend response is relayed byte-for-byte with the gateway header
    /// added. A transport failure yields a 502 response; the raw error never
    /// leaves the forwarder.
    pub async fn forward(&self, req: Request<Body>, path: &str) -> Response<Body> {
        let (mut parts, body) = req.into_parts();

        let path_and_query = match parts.uri.query() {
            Some(query) => format!("{path}?{query}"),
            None => path.to_string(),
        };
        let uri = match self.build_uri(&path_and_query) {
            Ok(uri) => uri,
            Err(error) => {
                tracing::error!(backend = %self.authority, %path_and_query, %error, "Failed to build upstream URI");
                return bad_gateway();
            }
        };
        parts.uri = uri;

        // The backend sees itself as the host, as with a single-host reverse
        // proxy in front of it.
        if let Ok(host) = HeaderValue::from_str(self.authority.as_str()) {
            parts.headers.insert(HOST, host);
        }

        let req = Request::from_parts(parts, body);
        match self.client.request(req).await {
            Ok(response) => {
                let (parts, body) = response.into_parts();
                let mut response = Response::from_parts(parts, Body::new(body));
                headers::mark_gateway(&mut response);
                response
            }
            Err(error) => {
                tracing::error!(backend = %self.authority, %error, "Upstream request failed");
                bad_gateway()
            }
        }
    }

    fn build_uri(&self, path_and_query: &str) -> Result<Uri, axum::http::Error> {
        let mut parts = Parts::default();
        parts.scheme = Some(self.scheme.clone());
        parts.authority = Some(self.authority.clone());
        // A "/" route prefix strips the leading slash during the rewrite;
        // root the path again so the backend always sees an absolute one.
        let path_and_query = if path_and_query.starts_with('/') {
            PathAndQuery::try_from(path_and_query)?
        } else {
            PathAndQuery::try_from(format!("/{path_and_query}").as_str())?
        };
        parts.path_and_query = Some(path_and_query);
        Ok(Uri::from_parts(parts)?)
    }
}

fn bad_gateway() -> Response<Body> {
    (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
}
