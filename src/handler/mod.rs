//! Request handler module
//!
//! Responsible for request dispatch: the session status page and per-country flag images.

pub mod flags;
pub mod identity;
pub mod router;
pub mod status_page;

// Re-export main entry point
pub use identity::IdentityContext;
pub use router::Dispatcher;
