//! Flag image serving
//!
//! Maps `/secure/<country>` to the stored object `<country>.png` and translates the
//! lookup outcome into a response.

use hyper::StatusCode;

use crate::http::{self, HttpResponse, CONTENT_TYPE_PNG};
use crate::logger;
use crate::storage::{ObjectLookup, ObjectStore};

pub const STORAGE_ERROR_MESSAGE: &str = "Error retrieving flag from object storage";

/// Country code shown to the caller: the path segment upper-cased
pub fn selected_country(segment: &str) -> String {
    segment.to_uppercase()
}

/// Storage key for a selected country code
pub fn flag_key(country_code: &str) -> String {
    format!("{}.png", country_code.to_lowercase())
}

/// Serve the flag for the raw path segment `segment`.
///
/// Performs exactly one read against `store`.
pub async fn serve_flag(store: &dyn ObjectStore, segment: &str) -> HttpResponse {
    let country = selected_country(segment);
    let key = flag_key(&country);

    match store.get(&key).await {
        ObjectLookup::Found(object) => http::build_object_response(object, CONTENT_TYPE_PNG),
        ObjectLookup::NotFound => http::build_text_response(
            StatusCode::NOT_FOUND,
            format!("No flag available for country: {country}"),
        ),
        ObjectLookup::Failed(err) => {
            logger::log_storage_failure(&key, &err);
            http::build_text_response(StatusCode::INTERNAL_SERVER_ERROR, STORAGE_ERROR_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBucket;
    use http_body_util::BodyExt;

    async fn body_bytes(resp: HttpResponse) -> Vec<u8> {
        resp.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[test]
    fn test_key_is_lowercased_segment() {
        for segment in ["fr", "FR", "Fr", "fR"] {
            assert_eq!(flag_key(&selected_country(segment)), "fr.png");
        }
        assert_eq!(selected_country("jp"), "JP");
    }

    #[test]
    fn test_case_round_trip_is_kept() {
        // Upper-casing first expands "ß" to "SS" before lower-casing
        assert_eq!(flag_key(&selected_country("ß")), "ss.png");
    }

    #[tokio::test]
    async fn test_found_streams_png() {
        let bucket = MemoryBucket::new();
        bucket.insert("jp.png", &b"\x89PNG\r\n"[..]);

        let resp = serve_flag(&bucket, "jp").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "image/png");
        assert_eq!(body_bytes(resp).await, b"\x89PNG\r\n");
        assert_eq!(bucket.reads(), 1);
    }

    #[tokio::test]
    async fn test_missing_names_country() {
        let bucket = MemoryBucket::new();
        let resp = serve_flag(&bucket, "zz").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_bytes(resp).await, b"No flag available for country: ZZ");
        assert_eq!(bucket.last_key().as_deref(), Some("zz.png"));
    }

    #[tokio::test]
    async fn test_backend_failure_is_500() {
        let bucket = MemoryBucket::new();
        bucket.fail("fr.png", "connection reset");
        let resp = serve_flag(&bucket, "Fr").await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_bytes(resp).await,
            b"Error retrieving flag from object storage"
        );
        assert_eq!(bucket.reads(), 1);
    }
}
