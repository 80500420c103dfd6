//! Single-page-application routing
//!
//! Decides between the requested resource, the entry document, and not-found,
//! and provides the two ways of acting on that decision:
//! - [`Interceptor`]: runs ahead of the static file handler and forwards
//!   client-side routes to the entry document
//! - [`Responder`]: loads and answers with the bytes itself

pub mod interceptor;
pub mod path;
pub mod resolver;
pub mod responder;
pub mod store;

pub use interceptor::{ForwardedFrom, Intercepted, Interceptor};
pub use path::RequestPath;
pub use resolver::{resolve, Miss, ResolutionOutcome};
pub use responder::Responder;
pub use store::{FsStore, ResourceStore};

/// Diagnostic attached to the 404 sent when the entry document is absent
pub fn entry_missing_message(fallback: &RequestPath) -> String {
    format!("{} missing", fallback.last_segment())
}
