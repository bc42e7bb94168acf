//! HTTP protocol layer module
//!
//! Response types and builders shared by the dispatcher and the server host.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_404_response, build_html_response, build_object_response, build_text_response, full,
    HttpResponse, ResponseBody, CONTENT_TYPE_HTML, CONTENT_TYPE_PNG, CONTENT_TYPE_TEXT,
};
