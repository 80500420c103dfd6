//! Request interceptor
//!
//! Runs ahead of the static file handler. Client-side routes are forwarded
//! internally to the entry document; everything else, including misses,
//! continues untouched so the static handler answers with its own 404.

use super::path::RequestPath;
use super::resolver::{resolve, Miss, ResolutionOutcome};
use super::store::ResourceStore;
use crate::logger;
use hyper::{Request, Uri};

/// Original request path, stored in the extensions of a forwarded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedFrom(pub String);

/// What the interceptor did with a request
#[derive(Debug)]
pub enum Intercepted<B> {
    /// Request left unchanged for the static handler
    Continue {
        request: Request<B>,
        outcome: ResolutionOutcome,
    },
    /// Request rewritten to the entry document
    Forwarded { request: Request<B> },
    /// Request should have been forwarded but its URI could not be rewritten
    ForwardFailed { request: Request<B> },
}

impl<B> Intercepted<B> {
    pub fn into_request(self) -> Request<B> {
        match self {
            Self::Continue { request, .. }
            | Self::Forwarded { request }
            | Self::ForwardFailed { request } => request,
        }
    }

    pub fn request(&self) -> &Request<B> {
        match self {
            Self::Continue { request, .. }
            | Self::Forwarded { request }
            | Self::ForwardFailed { request } => request,
        }
    }

    /// Access-log label of the underlying resolution
    pub fn outcome_label(&self) -> &'static str {
        match self {
            Self::Continue { outcome, .. } => outcome.label(),
            Self::Forwarded { .. } => "fallback",
            Self::ForwardFailed { .. } => "forward-error",
        }
    }
}

/// SPA interceptor over a resource store
#[derive(Debug, Clone)]
pub struct Interceptor<S> {
    store: S,
    fallback: RequestPath,
    index_files: Vec<String>,
}

impl<S: ResourceStore> Interceptor<S> {
    /// `index_files` must match the welcome files of the static handler
    /// behind the interceptor.
    pub const fn new(store: S, fallback: RequestPath, index_files: Vec<String>) -> Self {
        Self {
            store,
            fallback,
            index_files,
        }
    }

    pub fn intercept<B>(&self, request: Request<B>) -> Intercepted<B> {
        let path = RequestPath::from_uri_path(request.uri().path());
        let outcome = resolve(&path, |p| self.exists(p), &self.fallback);
        logger::log_debug(&format!("Resolved {path} -> {outcome}"));

        match outcome {
            ResolutionOutcome::Fallback(target) => forward(request, &target),
            ResolutionOutcome::NotFound(Miss::Entry) => {
                logger::log_warning(&format!(
                    "Entry document {} is missing, deferring to static handler",
                    self.fallback
                ));
                Intercepted::Continue {
                    request,
                    outcome: ResolutionOutcome::NotFound(Miss::Entry),
                }
            }
            outcome => Intercepted::Continue { request, outcome },
        }
    }

    /// A directory path exists when the static handler has a welcome file for it
    fn exists(&self, path: &RequestPath) -> bool {
        if path.ends_with_slash() {
            return self
                .index_files
                .iter()
                .any(|index_file| self.store.exists(&path.with_index_file(index_file)));
        }
        self.store.exists(path)
    }
}

/// Rewrite the request path to `target`, keeping method, headers, body and query
fn forward<B>(request: Request<B>, target: &RequestPath) -> Intercepted<B> {
    let uri = match forward_uri(request.uri(), target) {
        Ok(uri) => uri,
        Err(e) => {
            logger::log_error(&format!("Cannot forward {} to {target}: {e}", request.uri()));
            return Intercepted::ForwardFailed { request };
        }
    };

    let (mut parts, body) = request.into_parts();
    let original = parts.uri.path().to_string();
    parts.uri = uri;
    parts.extensions.insert(ForwardedFrom(original));
    Intercepted::Forwarded {
        request: Request::from_parts(parts, body),
    }
}

fn forward_uri(uri: &Uri, target: &RequestPath) -> Result<Uri, hyper::http::Error> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{target}?{query}"),
        None => target.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse()?);
    Ok(Uri::from_parts(parts)?)
}
