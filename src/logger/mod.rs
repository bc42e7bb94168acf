//! Logger module
//!
//! Provides logging utilities for the portal including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
mod level;
pub mod writer;

pub use format::AccessLogEntry;
pub use level::Level;

use crate::config::Config;
use crate::storage::StorageError;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
///
/// Fails on an unknown `logging.level` or a log file that cannot be opened.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level = config
        .logging
        .level
        .parse::<Level>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        level,
    )
}

/// Whether messages at `level` pass the configured threshold.
///
/// Before `init()` the threshold is `info`.
pub fn enabled(level: Level) -> bool {
    writer::get()
        .map_or_else(Level::default, writer::LogWriter::level)
        .allows(level)
}

/// Write to info/access log
fn write_info(message: &str) {
    write_info_at(Level::Info, message);
}

fn write_info_at(level: Level, message: &str) {
    if !enabled(level) {
        return;
    }
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(level: Level, message: &str) {
    if !enabled(level) {
        return;
    }
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Secure portal started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    write_info(&format!("Storage: {:?}", config.storage));
    write_info(&format!(
        "Identity headers: {} / {}",
        config.identity.email_header, config.identity.country_header
    ));
    if config.status_page.escape_html {
        write_info("Status page: HTML-escaping header values");
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_server_stop(active_connections: usize) {
    write_info(&format!(
        "[Shutdown] Listener closed, {active_connections} connection(s) still draining"
    ));
}

pub fn log_shutdown_signal(signal: &str) {
    write_info(&format!("[Signal] {signal} received, shutting down"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info_at(Level::Debug, &format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(
        Level::Error,
        &format!("[ERROR] Failed to serve connection: {err:?}"),
    );
}

pub fn log_error(message: &str) {
    write_error(Level::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(Level::Warn, &format!("[WARN] {message}"));
}

pub fn log_storage_failure(key: &str, err: &StorageError) {
    write_error(
        Level::Error,
        &format!("[STORAGE] Failed to read '{key}': {err}"),
    );
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_before_init_is_info() {
        assert!(enabled(Level::Error));
        assert!(enabled(Level::Info));
        assert!(!enabled(Level::Debug));
    }

    #[test]
    fn test_init_rejects_unknown_level() {
        let mut config = Config::load_from("does-not-exist/portal").unwrap();
        config.logging.level = "chatty".to_string();
        let err = init(&config).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
