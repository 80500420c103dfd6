//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! health endpoints, and dispatching to the configured SPA adapter.

use crate::config::{AppState, Site};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::spa::{ForwardedFrom, RequestPath, ResourceStore};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::header::{HeaderValue, SERVER};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Response together with what the SPA layer decided, for the access log
struct Routed {
    response: Response<Full<Bytes>>,
    outcome: Option<&'static str>,
    forwarded_from: Option<String>,
}

impl Routed {
    const fn plain(response: Response<Full<Bytes>>) -> Self {
        Self {
            response,
            outcome: None,
            forwarded_from: None,
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B, S>(
    req: Request<B>,
    state: Arc<AppState<S>>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    S: ResourceStore + Clone,
{
    let started = Instant::now();
    let entry = state
        .access_log_enabled()
        .then(|| access_log_entry(&req, remote_addr));

    let Routed {
        mut response,
        outcome,
        forwarded_from,
    } = route_request(req, &state).await;

    match HeaderValue::from_str(&state.config.http.server_name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(e) => logger::log_warning(&format!("Invalid http.server_name: {e}")),
    }

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default();
        entry.outcome = outcome;
        entry.forwarded_from = forwarded_from;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn access_log_entry<B>(req: &Request<B>, remote_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = format!("{:?}", req.version())
        .trim_start_matches("HTTP/")
        .to_string();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Route request based on path and configuration
async fn route_request<B, S>(req: Request<B>, state: &AppState<S>) -> Routed
where
    S: ResourceStore + Clone,
{
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(req.method()) {
        return Routed::plain(resp);
    }

    // 2. Check body size
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return Routed::plain(resp);
    }

    // 3. Health check endpoints
    let health = &state.config.health;
    if health.enabled {
        let path = req.uri().path();
        if path == health.liveness_path || path == health.readiness_path {
            return Routed::plain(http::build_health_response("ok"));
        }
    }

    // 4. SPA dispatch
    let is_head = req.method() == Method::HEAD;
    match &state.site {
        Site::Standalone(responder) => {
            let path = RequestPath::from_uri_path(req.uri().path());
            let (outcome, response) = responder.respond(&path, is_head).await;
            Routed {
                response,
                outcome: Some(outcome.label()),
                forwarded_from: None,
            }
        }
        Site::Intercepted { interceptor, files } => {
            let intercepted = interceptor.intercept(req);
            let outcome = intercepted.outcome_label();
            let request = intercepted.into_request();
            let path = RequestPath::from_uri_path(request.uri().path());
            Routed {
                response: files.serve(&path, is_head).await,
                outcome: Some(outcome),
                forwarded_from: request
                    .extensions()
                    .get::<ForwardedFrom>()
                    .map(|f| f.0.clone()),
            }
        }
    }
}
