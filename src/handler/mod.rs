//! Request handler module
//!
//! Responsible for request routing dispatch and the static file handler the
//! interceptor mode sits in front of.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
