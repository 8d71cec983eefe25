//! Helpers for reading optional query parameters with defaults.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::Error;

/// Query parameters that are rejected with a JSON [Error] when malformed.
///
/// Unlike [Query], percent-encoded bytes that do not decode to valid UTF-8
/// are rejected instead of being replaced.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        check_utf8(parts.uri.query().unwrap_or_default())?;
        let Query(params) = Query::try_from_uri(&parts.uri)?;

        Ok(Self(params))
    }
}

fn check_utf8(query: &str) -> Result<(), Error> {
    for component in query.split(['&', '=']) {
        urlencoding::decode(component)
            .map_err(|_| Error::InvalidQuery("The query string is not valid UTF-8!".to_owned()))?;
    }

    Ok(())
}

/// Return `value`, or `default` when the parameter was not sent.
///
/// The value is kept as sent, surrounding whitespace included.
///
/// # Errors
/// Returns [Error::EmptyField] if the parameter was sent but is blank.
pub fn text_or_default(
    field: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<String, Error> {
    match value {
        None => Ok(default.to_owned()),
        Some(value) if value.trim().is_empty() => Err(Error::EmptyField(field)),
        Some(value) => Ok(value),
    }
}

/// Parse `value` as a finite number, or return `default` when the parameter was not sent.
///
/// # Errors
/// Returns [Error::InvalidNumber] if the value is not a number, or is NaN or infinite.
pub fn number_or_default(
    field: &'static str,
    value: Option<&str>,
    default: f64,
) -> Result<f64, Error> {
    let Some(raw) = value else {
        return Ok(default);
    };

    match raw.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(Error::InvalidNumber {
            field,
            value: raw.to_owned(),
        }),
    }
}

#[cfg(test)]
mod api_query_tests {
    use axum::{Json, Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use serde::{Deserialize, Serialize};

    use crate::MessageResponse;

    use super::{ApiQuery, check_utf8};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct NameParams {
        name: Option<String>,
    }

    async fn echo_name(ApiQuery(params): ApiQuery<NameParams>) -> Json<NameParams> {
        Json(params)
    }

    fn get_test_server() -> TestServer {
        let app = Router::new().route("/echo", get(echo_name));

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[test]
    fn accepts_encoded_utf8() {
        assert_eq!(check_utf8("name=Caf%C3%A9&bank_name=Kiwi+Bank"), Ok(()));
    }

    #[tokio::test]
    async fn decodes_valid_query() {
        let server = get_test_server();

        let response = server.get("/echo?name=Caf%C3%A9").await;

        response.assert_status_ok();
        response.assert_json(&NameParams {
            name: Some("Café".to_owned()),
        });
    }

    #[tokio::test]
    async fn invalid_utf8_is_bad_request() {
        let server = get_test_server();

        let response = server.get("/echo?name=%FF").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&MessageResponse::new("The query string is not valid UTF-8!"));
    }

    #[tokio::test]
    async fn repeated_param_is_json_bad_request() {
        let server = get_test_server();

        let response = server.get("/echo?name=a&name=b").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<MessageResponse>();
        assert!(
            body.message.contains("duplicate field `name`"),
            "got {:?}",
            body.message
        );
    }
}
