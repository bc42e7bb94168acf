//! Routing module
//!
//! Path-based route classification for the portal.

mod matcher;

pub use matcher::{match_route, normalize_path, path_segments, Route, SECURE_SEGMENT};
