//! Route resolution
//!
//! Decides, for a single request path, whether to serve the requested
//! resource, substitute the SPA entry document, or report not-found.
//! Both deployment adapters call [`resolve`]; neither repeats the heuristic.

use super::path::RequestPath;
use std::fmt;

/// Why a request resolved to not-found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Miss {
    /// The path looks like an asset (its last segment has a `.`) and is absent
    Asset,
    /// The entry document itself is absent; falling back to it would loop
    Entry,
}

/// Result of resolving one request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Serve the requested resource as-is
    PassThrough(RequestPath),
    /// Serve the entry document in place of the requested path
    Fallback(RequestPath),
    NotFound(Miss),
}

impl ResolutionOutcome {
    /// Status code the outcome turns into when the resource can be delivered
    pub const fn status(&self) -> u16 {
        match self {
            Self::PassThrough(_) | Self::Fallback(_) => 200,
            Self::NotFound(_) => 404,
        }
    }

    /// Short label used in access logs
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PassThrough(_) => "pass",
            Self::Fallback(_) => "fallback",
            Self::NotFound(Miss::Asset) => "miss",
            Self::NotFound(Miss::Entry) => "miss-entry",
        }
    }
}

impl fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassThrough(path) | Self::Fallback(path) => write!(f, "{} {path}", self.label()),
            Self::NotFound(_) => f.write_str(self.label()),
        }
    }
}

/// Resolve `request` against an existence oracle.
///
/// The oracle is consulted at most once and never for `/` or for a path
/// whose percent-encoding could not be decoded.
pub fn resolve<F>(request: &RequestPath, exists: F, fallback: &RequestPath) -> ResolutionOutcome
where
    F: Fn(&RequestPath) -> bool,
{
    // The root has its own welcome-file convention
    if request.is_root() {
        return ResolutionOutcome::PassThrough(request.clone());
    }

    if !request.is_malformed() && exists(request) {
        return ResolutionOutcome::PassThrough(request.clone());
    }

    if request == fallback {
        return ResolutionOutcome::NotFound(Miss::Entry);
    }

    if request.has_extension() {
        ResolutionOutcome::NotFound(Miss::Asset)
    } else {
        ResolutionOutcome::Fallback(fallback.clone())
    }
}
