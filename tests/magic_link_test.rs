use anyhow::Result;
use cafe_console::config::env::{SITE_ORIGIN, SUPABASE_ANON_KEY, SUPABASE_URL};
use cafe_console::{AppError, MagicLinkClient, MagicLinkOptions, MagicLinkSender, MapConfig};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

fn config_for(base_url: &str) -> MapConfig {
    MapConfig::new()
        .with(SUPABASE_URL, base_url)
        .with(SUPABASE_ANON_KEY, "anon-key")
        .with(SITE_ORIGIN, "https://cafe.example")
}

/// Read one HTTP/1.1 request (headers plus `content-length` body).
async fn read_request(stream: &mut TcpStream) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let body_len = text[..end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                return Ok(());
            }
        }
    }
}

/// Server that closes its first `drops` connections without answering and
/// replies `200` to the rest. Returns its base URL and an accept counter.
async fn flaky_server(drops: usize) -> Result<(String, Arc<AtomicUsize>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&accepted);

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let seen = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if seen <= drops {
                drop(stream);
                continue;
            }
            if read_request(&mut stream).await.is_ok() {
                let _ = stream
                    .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                    .await;
                let _ = stream.shutdown().await;
            }
        }
    });

    Ok((base_url, accepted))
}

#[tokio::test]
async fn test_magic_link_request_shape() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/auth/v1/magiclink")
            .header("content-type", "application/json")
            .header("apikey", "anon-key")
            .header("authorization", "Bearer anon-key")
            .json_body(json!({
                "email": "owner@cafe.in",
                "data": {},
                "gotrue_meta_security": {},
                "redirect_to": "https://cafe.example/auth/callback"
            }));
        then.status(200).json_body(json!({}));
    });

    let client = MagicLinkClient::new(config_for(&server.base_url()));
    client.send_magic_link("owner@cafe.in").await?;

    api_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_success_body_is_ignored() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/auth/v1/magiclink");
        then.status(204);
    });

    let client = MagicLinkClient::new(config_for(&format!("{}/", server.base_url())));
    client.send_magic_link("owner@cafe.in").await?;

    api_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_error_message_taken_from_msg_field() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/auth/v1/magiclink");
        then.status(429)
            .header("Content-Type", "application/json")
            .json_body(json!({ "code": 429, "msg": "Rate limited" }));
    });

    let client = MagicLinkClient::new(config_for(&server.base_url()));
    let err = client.send_magic_link("owner@cafe.in").await.unwrap_err();

    api_mock.assert();
    match err {
        AppError::AuthRequestError { status, message } => {
            assert_eq!(status, Some(429));
            assert_eq!(message, "Rate limited");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unparsable_error_body_falls_back() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/auth/v1/magiclink");
        then.status(500).body("<html>upstream exploded</html>");
    });

    let client = MagicLinkClient::new(config_for(&server.base_url()));
    let err = client.send_magic_link("owner@cafe.in").await.unwrap_err();
    assert_eq!(err.to_string(), "Unable to send magic link");
}

#[tokio::test]
async fn test_error_body_without_msg_falls_back() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/auth/v1/magiclink");
        then.status(400).json_body(json!({ "error": "invalid_request" }));
    });

    let client = MagicLinkClient::new(config_for(&server.base_url()));
    let err = client.send_magic_link("owner@cafe.in").await.unwrap_err();
    assert_eq!(err.user_friendly_message(), "Unable to send magic link");
}

#[tokio::test]
async fn test_missing_config_fails_before_network() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/auth/v1/magiclink");
        then.status(200);
    });

    for missing in [SUPABASE_URL, SUPABASE_ANON_KEY, SITE_ORIGIN] {
        let mut config = config_for(&server.base_url());
        config.set(missing, "");
        let client = MagicLinkClient::new(config);

        let err = client.send_magic_link("owner@cafe.in").await.unwrap_err();
        assert!(err.is_configuration());
        assert!(
            err.to_string().contains(missing),
            "error should name {}: {}",
            missing,
            err
        );
    }

    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_http_errors_are_never_retried() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/auth/v1/magiclink");
        then.status(503).json_body(json!({ "msg": "Service unavailable" }));
    });

    let client = MagicLinkClient::new(config_for(&server.base_url())).with_options(
        MagicLinkOptions {
            timeout: None,
            transport_retries: 2,
        },
    );
    let err = client.send_magic_link("owner@cafe.in").await.unwrap_err();

    assert_eq!(err.to_string(), "Service unavailable");
    api_mock.assert_hits(1);
}

#[tokio::test]
async fn test_timeout_is_a_transport_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/auth/v1/magiclink");
        then.status(200).delay(Duration::from_secs(3));
    });

    let client = MagicLinkClient::new(config_for(&server.base_url())).with_options(
        MagicLinkOptions {
            timeout: Some(Duration::from_millis(300)),
            transport_retries: 0,
        },
    );
    let err = client.send_magic_link("owner@cafe.in").await.unwrap_err();

    match &err {
        AppError::TransportError(e) => assert!(e.is_timeout()),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.user_friendly_message(), "Unable to send magic link");
}

#[tokio::test]
async fn test_connection_refused_is_retried_then_reported() -> Result<()> {
    // Grab a free port, then close it so nothing is listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let base_url = format!("http://{}", listener.local_addr()?);
    drop(listener);

    let client = MagicLinkClient::new(config_for(&base_url)).with_options(MagicLinkOptions {
        timeout: Some(Duration::from_secs(2)),
        transport_retries: 1,
    });
    let err = client.send_magic_link("owner@cafe.in").await.unwrap_err();

    assert!(matches!(err, AppError::TransportError(_)));
    assert!(!err.is_configuration());
    Ok(())
}

#[tokio::test]
async fn test_one_retry_recovers_from_dropped_connection() -> Result<()> {
    let (base_url, accepted) = flaky_server(1).await?;

    let client = MagicLinkClient::new(config_for(&base_url)).with_options(MagicLinkOptions {
        timeout: Some(Duration::from_secs(5)),
        transport_retries: 1,
    });
    client.send_magic_link("owner@cafe.in").await?;

    assert_eq!(accepted.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn test_dropped_connection_without_retries_fails_after_one_attempt() -> Result<()> {
    let (base_url, accepted) = flaky_server(1).await?;

    let client = MagicLinkClient::new(config_for(&base_url)).with_options(MagicLinkOptions {
        timeout: Some(Duration::from_secs(5)),
        transport_retries: 0,
    });
    let err = client.send_magic_link("owner@cafe.in").await.unwrap_err();

    assert!(matches!(err, AppError::TransportError(_)));
    assert_eq!(err.user_friendly_message(), "Unable to send magic link");
    assert_eq!(accepted.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_numeric_msg_is_rendered() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/auth/v1/magiclink");
        then.status(429).json_body(json!({ "msg": 429 }));
    });

    let client = MagicLinkClient::new(config_for(&server.base_url()));
    let err = client.send_magic_link("owner@cafe.in").await.unwrap_err();
    assert_eq!(err.to_string(), "429");
}
