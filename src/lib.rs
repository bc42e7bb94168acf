//! Secure portal
//!
//! An edge request handler behind a Zero Trust access layer. It serves two things:
//! - `/secure`: a session status page built from the identity headers the access layer injects
//! - `/secure/<country>`: that country's flag image, read from object storage
//!
//! Every other path is `404 Not Found`.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
pub mod storage;
