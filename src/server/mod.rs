// Server module entry point
// Listener setup, connection handling, accept loop and signal handling

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is exposed as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use listener::{create_reusable_listener, DEFAULT_BACKLOG};
pub use server_loop::start_server_loop;
pub use signal::start_signal_handler;
