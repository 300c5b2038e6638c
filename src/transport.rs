use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::config::TransportMode;
use crate::error::Error;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieves the raw bytes behind a URL. 4xx and 5xx responses are
/// transport failures, their bodies are never decoded.
#[async_trait]
pub trait Transport: Send {
    async fn fetch(&mut self, url: &str) -> Result<Vec<u8>, Error>;
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("accept", HeaderValue::from_static("application/json"));
    headers
}

async fn read_body(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, Error> {
    let response = client.get(url).send().await?;
    tracing::debug!(status = %response.status(), "response received");
    let response = response.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// One-shot reads: every request gets its own client and no idle connection
/// is kept around afterwards.
#[derive(Debug, Default)]
pub struct BufferedTransport;

#[async_trait]
impl Transport for BufferedTransport {
    async fn fetch(&mut self, url: &str) -> Result<Vec<u8>, Error> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers())
            .pool_max_idle_per_host(0)
            .build()?;
        read_body(&client, url).await
    }
}

/// Keeps a single client alive between requests. It is opened on first use
/// and released when the transport is dropped.
#[derive(Debug, Default)]
pub struct PersistentTransport {
    client: Option<reqwest::Client>,
}

impl PersistentTransport {
    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }

    fn connection(&mut self) -> Result<&reqwest::Client, Error> {
        let client = match self.client.take() {
            Some(client) => client,
            None => {
                tracing::debug!("opening persistent connection");
                reqwest::Client::builder()
                    .default_headers(default_headers())
                    .connect_timeout(CONNECT_TIMEOUT)
                    .build()?
            }
        };
        Ok(&*self.client.insert(client))
    }
}

#[async_trait]
impl Transport for PersistentTransport {
    async fn fetch(&mut self, url: &str) -> Result<Vec<u8>, Error> {
        let client = self.connection()?;
        read_body(client, url).await
    }
}

pub fn for_mode(mode: TransportMode) -> Box<dyn Transport> {
    match mode {
        TransportMode::Buffered => Box::new(BufferedTransport),
        TransportMode::Persistent => Box::new(PersistentTransport::default()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_buffered_reads_whole_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/map/1.json")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_body(r#"{"2010-01-01": 3}"#)
            .create_async()
            .await;

        let mut transport = BufferedTransport;
        let body = transport
            .fetch(&format!("{}/map/1.json", server.url()))
            .await
            .unwrap();
        mock.assert_async().await;

        assert_eq!(body, br#"{"2010-01-01": 3}"#.to_vec());
    }

    #[tokio::test]
    async fn test_persistent_opens_lazily_and_reuses() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/map/2.json")
            .with_status(200)
            .with_body("{}")
            .expect(2)
            .create_async()
            .await;

        let mut transport = PersistentTransport::default();
        assert!(!transport.is_open());

        let url = format!("{}/map/2.json", server.url());
        transport.fetch(&url).await.unwrap();
        assert!(transport.is_open());
        transport.fetch(&url).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_a_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/teams/us/x.json")
            .with_status(500)
            .with_body(r#"{"error":"internal"}"#)
            .create_async()
            .await;

        let mut transport = for_mode(TransportMode::Persistent);
        let err = transport
            .fetch(&format!("{}/teams/us/x.json", server.url()))
            .await
            .unwrap_err();
        match err {
            Error::Request(e) => {
                assert_eq!(e.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
