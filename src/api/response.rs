// API response utility functions module

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Build JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(
                    r#"{"error":"Internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// 404 Not Found response listing the valid route patterns
pub fn not_found() -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": {
            "code": 404,
            "message": "Not Found"
        },
        "available_routes": [
            "GET /{portal}/events",
            "POST /{portal}/event",
            "GET /{portal}/reports",
            "POST /{portal}/report",
            "GET /{portal}/notifications",
            "POST /{portal}/chat",
            "GET /{portal}/chat/history",
            "POST /{portal}/announcement (teacher, parent, admin)",
            "GET /{portal}/announcements (teacher, parent, admin)",
            "POST /{portal}/message (teacher, parent, admin)",
            "GET /{portal}/messages (teacher, parent, admin)"
        ]
    });
    json_response(StatusCode::NOT_FOUND, &body)
}

/// 400 Bad Request response for schema validation failures
pub fn bad_request(message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": {
            "code": 400,
            "message": message
        }
    });
    json_response(StatusCode::BAD_REQUEST, &body)
}

/// 405 Method Not Allowed response for a known path hit with the wrong method
pub fn method_not_allowed(allow: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": {
            "code": 405,
            "message": "Method Not Allowed"
        }
    });
    let mut response = json_response(StatusCode::METHOD_NOT_ALLOWED, &body);
    if let Ok(value) = allow.parse() {
        response.headers_mut().insert("Allow", value);
    }
    response
}

/// 413 Payload Too Large response
pub fn payload_too_large() -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": {
            "code": 413,
            "message": "Payload Too Large"
        }
    });
    json_response(StatusCode::PAYLOAD_TOO_LARGE, &body)
}

/// Build OPTIONS response (CORS preflight)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", "GET, POST, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "*")
            .header("Access-Control-Allow-Headers", "*")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to build OPTIONS response: {e}"));
        Response::new(Full::new(Bytes::new()))
    })
}

/// Mark a response as readable from any origin.
///
/// CORS is wide open: when enabled, every response carries the allow-all
/// origin header, not just preflights.
pub fn apply_cors(response: &mut Response<Full<Bytes>>) {
    response
        .headers_mut()
        .insert("Access-Control-Allow-Origin", hyper::header::HeaderValue::from_static("*"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_response_sets_content_type() {
        let response = json_response(StatusCode::OK, &serde_json::json!({"ok": true}));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Content-Type").map(|v| v.as_bytes()),
            Some(b"application/json".as_ref())
        );
    }

    #[test]
    fn test_method_not_allowed_carries_allow_header() {
        let response = method_not_allowed("GET");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get("Allow").map(|v| v.as_bytes()),
            Some(b"GET".as_ref())
        );
    }

    #[test]
    fn test_options_response_is_permissive_with_cors() {
        let response = build_options_response(true);
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(
            headers.get("Access-Control-Allow-Origin").map(|v| v.as_bytes()),
            Some(b"*".as_ref())
        );
        assert_eq!(
            headers.get("Access-Control-Allow-Methods").map(|v| v.as_bytes()),
            Some(b"*".as_ref())
        );
    }

    #[test]
    fn test_options_response_without_cors_has_no_origin_header() {
        let response = build_options_response(false);
        assert!(response.headers().get("Access-Control-Allow-Origin").is_none());
    }

    #[test]
    fn test_apply_cors_adds_origin_header() {
        let mut response = not_found();
        apply_cors(&mut response);
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").map(|v| v.as_bytes()),
            Some(b"*".as_ref())
        );
    }
}
