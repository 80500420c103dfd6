//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! resolution logic.

pub mod mime;
pub mod response;

// Re-export commonly used functions
pub use mime::content_type_for;
pub use response::{
    build_404_response, build_404_with_diagnostic, build_405_response, build_413_response,
    build_file_response, build_health_response, build_options_response,
};
