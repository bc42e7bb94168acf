//! HTTP response building module
//!
//! Provides builders for the responses the dispatcher can produce, decoupled from routing.

use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full};
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::storage::StoredObject;

/// Response body: either a buffered payload or a stream read from storage
pub type ResponseBody = BoxBody<Bytes, std::io::Error>;

pub type HttpResponse = Response<ResponseBody>;

pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_TYPE_TEXT: &str = "text/plain;charset=UTF-8";
pub const CONTENT_TYPE_PNG: &str = "image/png";

/// Wrap a buffered payload as a response body
pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into()).map_err(|never| match never {}).boxed()
}

fn empty() -> ResponseBody {
    Empty::new().map_err(|never| match never {}).boxed()
}

/// Build 404 Not Found response for unmatched routes
pub fn build_404_response() -> HttpResponse {
    build_text_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Build plain text response with the given status
pub fn build_text_response(status: StatusCode, text: impl Into<String>) -> HttpResponse {
    let text = text.into();
    Response::builder()
        .status(status)
        .header("Content-Type", CONTENT_TYPE_TEXT)
        .header("Content-Length", text.len())
        .body(full(text))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            fallback(status)
        })
}

/// Build generic HTML response
pub fn build_html_response(content: String) -> HttpResponse {
    let content_length = content.len();

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", CONTENT_TYPE_HTML)
        .header("Content-Length", content_length)
        .body(full(content))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            fallback(StatusCode::OK)
        })
}

/// Build 200 response streaming a stored object
pub fn build_object_response(object: StoredObject, content_type: &str) -> HttpResponse {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type);
    if let Some(size) = object.size {
        builder = builder.header("Content-Length", size);
    }

    builder.body(object.body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        fallback(StatusCode::INTERNAL_SERVER_ERROR)
    })
}

/// Empty response used when the builder rejects a header
fn fallback(status: StatusCode) -> HttpResponse {
    let mut response = Response::new(empty());
    *response.status_mut() = status;
    response
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_string(response: HttpResponse) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_404_response() {
        let resp = build_404_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()["Content-Type"], CONTENT_TYPE_TEXT);
        assert_eq!(resp.headers()["Content-Length"], "9");
        assert_eq!(body_string(resp).await, "Not Found");
    }

    #[tokio::test]
    async fn test_html_response() {
        let resp = build_html_response("<p>hi</p>".to_string());
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
        assert_eq!(body_string(resp).await, "<p>hi</p>");
    }

    #[tokio::test]
    async fn test_object_response_sets_length_when_known() {
        let resp = build_object_response(StoredObject::from_bytes(&b"abc"[..]), CONTENT_TYPE_PNG);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "image/png");
        assert_eq!(resp.headers()["Content-Length"], "3");

        let object = StoredObject {
            body: full(&b"abc"[..]),
            size: None,
        };
        let resp = build_object_response(object, CONTENT_TYPE_PNG);
        assert!(resp.headers().get("Content-Length").is_none());
        assert_eq!(body_string(resp).await, "abc");
    }
}
