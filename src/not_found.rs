use axum::response::{IntoResponse, Response};

use crate::Error;

/// The fallback route handler for paths that do not match any endpoint.
pub async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}

/// The fallback route handler for known paths called with the wrong method.
pub async fn get_405_method_not_allowed() -> Response {
    Error::MethodNotAllowed.into_response()
}

#[cfg(test)]
mod not_found_tests {
    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;

    use crate::MessageResponse;

    use super::{get_404_not_found, get_405_method_not_allowed};

    #[tokio::test]
    async fn unknown_path_is_json_404() {
        let app = Router::new().fallback(get_404_not_found);
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server.get("/api/reports/").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&MessageResponse::new("Not found!"));
    }

    #[tokio::test]
    async fn wrong_method_is_json_405() {
        let app = Router::new()
            .route("/create", post(|| async {}))
            .method_not_allowed_fallback(get_405_method_not_allowed);
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server.get("/create").await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        response.assert_json(&MessageResponse::new("Method not allowed!"));
    }
}
