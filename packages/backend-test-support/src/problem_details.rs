//! Problem Details test helpers
//!
//! Assertions for the stable error contract of the backend without depending
//! on backend types.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderName;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Local mirror of the backend's ProblemDetails shape.
#[derive(Debug, Deserialize, Serialize)]
struct ProblemDetailsLike {
    #[serde(rename = "type")]
    type_: String,
    title: String,
    status: u16,
    detail: String,
    code: String,
    trace_id: String,
}

/// Assert that a response conforms to the stable error contract:
///
/// - HTTP status matches `expected_status`
/// - body is `application/problem+json` with matching `status` and `code`
/// - `detail` contains `expected_detail_contains`
/// - `x-trace-id` header exists and matches the body's `trace_id`
pub async fn assert_problem_details<B: MessageBody>(
    resp: ServiceResponse<B>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_detail_contains: &str,
) {
    let status = resp.status();
    let headers = resp.headers().clone();

    let (_, response) = resp.into_parts();
    let bytes = actix_web::body::to_bytes(response.into_body())
        .await
        .unwrap_or_else(|_| panic!("response body should be readable"));

    assert_eq!(status, expected_status, "unexpected HTTP status");

    let content_type = headers
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .expect("content-type header should be present");
    assert!(
        content_type.starts_with("application/problem+json"),
        "expected problem+json content type, got {content_type}"
    );

    let trace_hdr = HeaderName::from_static("x-trace-id");
    let header_trace_id = headers
        .get(&trace_hdr)
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present");
    assert!(
        !header_trace_id.is_empty(),
        "x-trace-id header should not be empty"
    );

    let problem: ProblemDetailsLike =
        serde_json::from_slice(&bytes).expect("body should be a ProblemDetails document");

    assert_eq!(problem.status, expected_status.as_u16());
    assert_eq!(problem.code, expected_code);
    assert!(
        problem.detail.contains(expected_detail_contains),
        "detail {:?} should contain {:?}",
        problem.detail,
        expected_detail_contains
    );
    assert_eq!(
        problem.trace_id, header_trace_id,
        "trace_id in body should match x-trace-id header"
    );
}
