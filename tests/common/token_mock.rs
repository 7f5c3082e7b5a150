use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start a token endpoint at `/token` that answers an authorization code exchange.
#[allow(dead_code)]
pub async fn start_token_server(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .respond_with(response)
        .mount(&server)
        .await;

    server
}

/// Token endpoint that issues `{"access_token": "AT", "token_type": "Bearer"}` for code `XYZ`.
#[allow(dead_code)]
pub async fn start_issuing_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("code=XYZ"))
        .and(body_string_contains("client_id=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "AT",
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    server
}

#[allow(dead_code)]
pub fn token_url(server: &MockServer) -> String {
    format!("{}/token", server.uri())
}
