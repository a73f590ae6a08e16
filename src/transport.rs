use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use url::Url;

use crate::errors::{Result, TeamsError};

/// Boxed error produced by a [`Transport`]
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Boxed future returned by [`Transport::send`]
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Outgoing HTTP request handed to a [`Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    /// JSON encoded body
    pub body: Vec<u8>,
}

/// Response as seen by the client: status code and body text
///
/// `body` is empty when the response body could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// HTTP capability used by [`TeamsClient`](crate::TeamsClient)
///
/// Implementations perform a single request/response exchange and must not
/// interpret the status code; any status is returned as `Ok`. An `Err` means
/// no response was received at all (connection refused, timeout, ...).
///
/// # Example
///
/// ```rust
/// use teams_webhook::{BoxError, BoxFuture, Transport, TransportRequest, TransportResponse};
///
/// struct AlwaysOk;
///
/// impl Transport for AlwaysOk {
///     fn send(
///         &self,
///         _request: TransportRequest,
///     ) -> BoxFuture<'_, Result<TransportResponse, BoxError>> {
///         Box::pin(async { Ok(TransportResponse::new(200, "1")) })
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'_, std::result::Result<TransportResponse, BoxError>>;
}

/// Production transport backed by a reqwest middleware client
#[derive(Clone)]
pub struct ReqwestTransport {
    client: ClientWithMiddleware,
}

impl ReqwestTransport {
    /// Create a transport with the given request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TeamsError::BuildHttpClient)?;

        let client = ClientBuilder::new(client).build();

        Ok(Self { client })
    }

    /// Wrap a custom reqwest middleware client
    ///
    /// This allows you to add custom middleware (retry, logging, etc.)
    pub fn with_client(client: ClientWithMiddleware) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'_, std::result::Result<TransportResponse, BoxError>> {
        Box::pin(async move {
            let response = self
                .client
                .request(request.method, request.url)
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(request.body)
                .send()
                .await?;

            let status = response.status().as_u16();
            // An unreadable body must not hide the status the webhook answered with
            let body = response.text().await.unwrap_or_default();
            Ok(TransportResponse { status, body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(uri: &str, body: &[u8]) -> TransportRequest {
        TransportRequest {
            method: Method::POST,
            url: Url::parse(uri).unwrap().join("/webhook").unwrap(),
            body: body.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_sends_json_body_with_content_type() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"hello": "teams"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("1"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_secs(10)).unwrap();
        let response = transport
            .send(request(&mock_server.uri(), br#"{"hello":"teams"}"#))
            .await
            .unwrap();

        assert_eq!(response, TransportResponse::new(200, "1"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service unavailable"))
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_secs(10)).unwrap();
        let response = transport
            .send(request(&mock_server.uri(), b"{}"))
            .await
            .unwrap();

        assert_eq!(response.status, 503);
        assert_eq!(response.body, "Service unavailable");
    }

    #[tokio::test]
    async fn test_connection_refused_is_an_error() {
        let transport = ReqwestTransport::new(Duration::from_secs(10)).unwrap();
        let result = transport.send(request("http://127.0.0.1:1", b"{}")).await;

        assert!(result.is_err());
    }
}
