//! HTTP response building module
//!
//! Provides builders for the status codes the responder emits, decoupled from
//! the resolution logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

const NOT_FOUND: &str = "404 Not Found";

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(404, Bytes::from_static(NOT_FOUND.as_bytes()), "404")
}

/// Build 404 Not Found response carrying a diagnostic message
///
/// The body reads `404 Not Found: <message>`, so a misconfigured entry
/// document can be told apart from an ordinary missing asset.
pub fn build_404_with_diagnostic(message: &str) -> Response<Full<Bytes>> {
    build_text_response(404, Bytes::from(format!("{NOT_FOUND}: {message}")), "404")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_text_response(413, Bytes::from("413 Payload Too Large"), "413")
}

/// Build health check response
pub fn build_health_response(status: &'static str) -> Response<Full<Bytes>> {
    build_text_response(200, Bytes::from_static(status.as_bytes()), "health")
}

/// Build 200 response for resource bytes
///
/// `HEAD` requests keep the headers, including `Content-Length`, and drop the body.
pub fn build_file_response(
    data: Vec<u8>,
    content_type: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn build_text_response(status: u16, body: Bytes, label: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error(label, &e);
            Response::new(Full::new(body))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_404_bodies_are_distinguishable() {
        let plain = build_404_response();
        assert_eq!(plain.status(), 404);
        assert_eq!(body_string(plain).await, "404 Not Found");

        let diag = build_404_with_diagnostic("index.html missing");
        assert_eq!(diag.status(), 404);
        assert_eq!(body_string(diag).await, "404 Not Found: index.html missing");
    }

    #[tokio::test]
    async fn test_file_response_head_keeps_length() {
        let response = build_file_response(b"body{}".to_vec(), "text/css", true);
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "text/css");
        assert_eq!(response.headers()["content-length"], "6");
        assert_eq!(body_string(response).await, "");
    }

    #[test]
    fn test_method_responses() {
        assert_eq!(build_405_response().status(), 405);
        let options = build_options_response();
        assert_eq!(options.status(), 204);
        assert_eq!(options.headers()["allow"], "GET, HEAD, OPTIONS");
    }
}
