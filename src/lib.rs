//! Static file responder with single-page-application fallback
//!
//! Requests for files under the web root are served as-is. Requests that
//! miss and look like client-side routes (no `.` in the last path segment)
//! get the entry document instead; misses that look like assets stay 404.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod spa;
