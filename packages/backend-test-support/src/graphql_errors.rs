//! Assertions for the `{"errors":[{"message","extensions":{"code"}}]}` envelope.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde_json::Value;

/// First error of a GraphQL envelope as `(message, code)`.
pub fn first_error(body: &Value) -> Option<(&str, &str)> {
    let error = body.get("errors")?.as_array()?.first()?;
    let message = error.get("message")?.as_str()?;
    let code = error.get("extensions")?.get("code")?.as_str()?;
    Some((message, code))
}

/// All `extensions.code` values in response order.
pub fn error_codes(body: &Value) -> Vec<String> {
    body.get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.pointer("/extensions/code").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Assert parsed body parts match the error contract.
///
/// Checks that the first error carries `expected_code`, that its message
/// contains `expected_message` when given, and that transport-level
/// rejections (non-200) carry no `data` key.
pub fn assert_graphql_error_from_parts(
    status: StatusCode,
    body_bytes: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
    expected_message: Option<&str>,
) -> Value {
    assert_eq!(status, expected_status);

    let body: Value =
        serde_json::from_slice(body_bytes).expect("Response body should be valid JSON");
    let (message, code) = first_error(&body)
        .unwrap_or_else(|| panic!("Response should carry a GraphQL error, got {body}"));

    assert_eq!(code, expected_code, "unexpected error code in {body}");
    if let Some(expected) = expected_message {
        assert!(
            message.contains(expected),
            "Expected message to contain '{expected}', but got '{message}'"
        );
    }
    if status != StatusCode::OK {
        assert!(
            body.get("data").is_none(),
            "rejections before execution must not carry data: {body}"
        );
    }
    body
}

/// [`assert_graphql_error_from_parts`] over a service response. Also
/// requires the `x-request-id` header.
pub async fn assert_graphql_error<B>(
    resp: ServiceResponse<B>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_message: Option<&str>,
) -> Value
where
    B: MessageBody,
{
    assert!(
        resp.headers().contains_key("x-request-id"),
        "x-request-id header should be present"
    );
    let status = resp.status();
    let body = actix_web::test::read_body(resp).await;
    assert_graphql_error_from_parts(status, &body, expected_status, expected_code, expected_message)
}
