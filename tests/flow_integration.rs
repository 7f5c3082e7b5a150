mod common;

use std::time::Duration;

use oauth_cli::oauth::{get_token_with, ConsolePrompt, TokenType};
use oauth_cli::{get_token, CodeAcquisitionError, GetTokenOptions, OAuthCliError, ReadCode, Token, TokenError};
use tokio::io::BufReader;
use wiremock::ResponseTemplate;

use common::token_mock::{start_issuing_server, start_token_server, token_url};

fn headless(read_code: ReadCode) -> GetTokenOptions {
    GetTokenOptions {
        open_browser: false,
        read_code,
        timeout: Duration::from_secs(10),
        ..GetTokenOptions::default()
    }
}

/// F1: Redirect listener flow, end to end
#[tokio::test]
async fn webserver_flow_end_to_end() {
    let server = start_issuing_server().await;
    let port = common::free_port();
    let config = common::config(&token_url(&server), port);

    let flow = tokio::spawn(async move {
        get_token(&config, &headless(ReadCode::Webserver)).await
    });

    let resp = common::send_redirect(port, "/?code=XYZ").await;
    assert_eq!(resp.status(), 200);

    let token = flow.await.unwrap().unwrap();
    assert_eq!(
        token,
        Token {
            access_token: "AT".into(),
            client_id: "abc".into(),
            token_type: TokenType::Bearer,
            expires_in: None,
            expires_at: None,
            scope: None,
        }
    );
    assert_eq!(
        serde_json::to_value(&token).unwrap(),
        serde_json::json!({"access_token": "AT", "client_id": "abc", "token_type": "Bearer"})
    );
}

/// F2: Explicit port override wins over the redirect URL's port
#[tokio::test]
async fn webserver_flow_port_override() {
    let server = start_issuing_server().await;
    let port = common::free_port();
    let config = common::config(&token_url(&server), 8000);

    let options = GetTokenOptions {
        port: Some(port),
        ..headless(ReadCode::Webserver)
    };
    let flow = tokio::spawn(async move { get_token(&config, &options).await });

    common::send_redirect(port, "/?code=XYZ").await;
    assert_eq!(flow.await.unwrap().unwrap().access_token, "AT");
}

/// F3: Console flow with a scripted reader
#[tokio::test]
async fn console_flow_end_to_end() {
    let server = start_issuing_server().await;
    let config = common::config(&token_url(&server), 8000);
    let prompt = ConsolePrompt::new(None, BufReader::new(&b"  XYZ\n"[..]));

    let token = get_token_with(&config, &headless(ReadCode::Console), &prompt)
        .await
        .unwrap();
    assert_eq!(token.access_token, "AT");
    assert_eq!(token.client_id, "abc");
}

/// F4: Listener timeout ends the flow before any token request
#[tokio::test]
async fn webserver_flow_times_out() {
    let server = start_token_server(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "access_token": "AT",
        "token_type": "Bearer"
    })))
    .await;
    let port = common::free_port();
    let config = common::config(&token_url(&server), port);
    let options = GetTokenOptions {
        timeout: Duration::from_millis(150),
        ..headless(ReadCode::Webserver)
    };

    let err = get_token(&config, &options).await.unwrap_err();
    assert!(matches!(
        err,
        OAuthCliError::CodeAcquisition(CodeAcquisitionError::Timeout(_))
    ));
    assert_eq!(err.code(), "timeout");
    assert!(server.received_requests().await.unwrap().is_empty());
}

/// F5: Token endpoint rejection propagates with status and provider error
#[tokio::test]
async fn console_flow_rejected() {
    let server = start_token_server(ResponseTemplate::new(400).set_body_json(serde_json::json!({
        "error": "invalid_grant"
    })))
    .await;
    let config = common::config(&token_url(&server), 8000);
    let prompt = ConsolePrompt::new(None, BufReader::new(&b"stale\n"[..]));

    let err = get_token_with(&config, &headless(ReadCode::Console), &prompt)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OAuthCliError::Token(TokenError::ExchangeRejected { status: 400, .. })
    ));
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("invalid_grant"));
}

/// F6: Closed input ends the console flow
#[tokio::test]
async fn console_flow_input_closed() {
    let server = start_token_server(ResponseTemplate::new(500)).await;
    let config = common::config(&token_url(&server), 8000);
    let prompt = ConsolePrompt::new(Some("code> "), BufReader::new(&b""[..]));

    let err = get_token_with(&config, &headless(ReadCode::Console), &prompt)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "input_closed");
}
