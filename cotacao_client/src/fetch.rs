//! One-shot request to the quote server.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Body returned by the server's `/cotacao` endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BidResponse {
    pub bid: String,
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The server's answer, buffered once. `bid` is parsed out of `body`.
#[derive(Debug)]
pub struct ServerReply {
    pub body: Vec<u8>,
    pub bid: String,
}

/// GETs `url` with `timeout` covering connect, headers and the whole body.
pub async fn fetch_bid(url: &str, timeout: Duration) -> Result<ServerReply, FetchError> {
    let classify = |e: reqwest::Error| {
        if e.is_timeout() {
            FetchError::Timeout(timeout)
        } else {
            FetchError::Transport(e)
        }
    };

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(FetchError::Transport)?;
    let resp = client.get(url).send().await.map_err(classify)?;
    let status = resp.status();
    let body = resp.bytes().await.map_err(classify)?.to_vec();
    tracing::debug!("{} answered {} with {} bytes", url, status, body.len());

    if status != reqwest::StatusCode::OK {
        return Err(FetchError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    let parsed: BidResponse = serde_json::from_slice(&body)?;
    Ok(ServerReply {
        body,
        bid: parsed.bid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_with(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cotacao"))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn parses_bid_and_keeps_raw_body() {
        let server = server_with(ResponseTemplate::new(200).set_body_string(r#"{"bid":"5.43"}"#)).await;

        let reply = fetch_bid(&format!("{}/cotacao", server.uri()), Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(reply.bid, "5.43");
        assert_eq!(reply.body, br#"{"bid":"5.43"}"#);
    }

    #[tokio::test]
    async fn bad_request_is_an_error() {
        let server = server_with(ResponseTemplate::new(400).set_body_string("erro")).await;

        let err = fetch_bid(&format!("{}/cotacao", server.uri()), Duration::from_secs(2))
            .await
            .unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "erro");
            }
            other => panic!("expected Status, got {other}"),
        }
    }

    #[tokio::test]
    async fn body_without_bid_is_a_decode_error() {
        let server = server_with(ResponseTemplate::new(200).set_body_string(r#"{"ask":"5.43"}"#)).await;

        let err = fetch_bid(&format!("{}/cotacao", server.uri()), Duration::from_secs(2))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = server_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"bid":"5.43"}"#)
                .set_delay(Duration::from_secs(3)),
        )
        .await;

        let started = std::time::Instant::now();
        let err = fetch_bid(&format!("{}/cotacao", server.uri()), Duration::from_millis(300))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)));
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
