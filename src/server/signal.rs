// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)
// - SIGUSR1: Reopen log files (after external rotation)

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Start signal handlers (Unix only)
///
/// Spawns a local task that notifies `shutdown` once on SIGTERM/SIGINT.
///
/// | Signal  | Action          |
/// |---------|-----------------|
/// | SIGTERM | Graceful stop   |
/// | SIGINT  | Graceful stop   |
/// | SIGUSR1 | Reopen log files|
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigusr1 = signal(SignalKind::user_defined1())?;

    logger::log_info(&format!(
        "Signal handlers registered (pid {}): SIGTERM/SIGINT stop, SIGUSR1 reopens logs",
        std::process::id()
    ));

    tokio::task::spawn_local(async move {
        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    logger::log_info("SIGTERM received, shutting down");
                    break;
                }
                _ = sigint.recv() => {
                    logger::log_info("SIGINT received, shutting down");
                    break;
                }
                _ = sigusr1.recv() => {
                    reopen_logs();
                }
            }
        }
        // notify_one keeps a permit if the accept loop is not waiting right now
        shutdown.notify_one();
    });
    Ok(())
}

/// Fallback for non-Unix targets - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> std::io::Result<()> {
    tokio::task::spawn_local(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_info("Ctrl+C received, shutting down");
            shutdown.notify_one();
        }
    });
    Ok(())
}

#[cfg(unix)]
fn reopen_logs() {
    if !logger::writer::is_initialized() {
        return;
    }
    match logger::writer::get().reopen() {
        Ok(()) => logger::log_info("Log files reopened"),
        Err(e) => logger::log_error(&format!("Failed to reopen log files: {e}")),
    }
}
