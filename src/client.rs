use reqwest::Method;
use reqwest_middleware::ClientWithMiddleware;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::card::Card;
use crate::errors::{Result, TeamsError};
use crate::transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

/// Client for posting cards to a Microsoft Teams incoming webhook
///
/// The webhook URL embeds its own secret token, so no further
/// authentication is configured here.
///
/// # Example
///
/// ```rust,no_run
/// use teams_webhook::{Card, TeamsClient, TextBlock};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = TeamsClient::new(
///         "https://example.webhook.office.com/webhookb2/...",
///         Duration::from_secs(10),
///     )?;
///
///     let card = Card::new().with_element(TextBlock::new("Hello from Rust"));
///
///     client.post_message(&card).await?;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct TeamsClient {
    transport: Arc<dyn Transport>,
    webhook_url: String,
}

impl TeamsClient {
    /// Create a new Teams webhook client
    ///
    /// # Arguments
    ///
    /// * `webhook_url` - Incoming webhook URL copied from the Teams channel
    /// * `timeout` - Request timeout duration
    ///
    /// An empty URL is accepted here; posting with it fails with
    /// [`TeamsError::Unauthorized`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let transport = ReqwestTransport::new(timeout)?;
        Ok(Self::with_transport(webhook_url, Arc::new(transport)))
    }

    /// Create a new client with a custom reqwest middleware client
    ///
    /// This allows you to add custom middleware (retry, logging, etc.)
    pub fn with_client(webhook_url: impl Into<String>, client: ClientWithMiddleware) -> Self {
        Self::with_transport(webhook_url, Arc::new(ReqwestTransport::with_client(client)))
    }

    /// Create a new client on top of any [`Transport`]
    pub fn with_transport(webhook_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            webhook_url: webhook_url.into(),
        }
    }

    /// Replace the transport, mostly useful for test doubles
    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = transport;
    }

    /// Post a card to the webhook
    ///
    /// Returns `Ok(true)` when the webhook answers with a 2xx status.
    /// Nothing is retried.
    ///
    /// # Errors
    ///
    /// - [`TeamsError::Unauthorized`] if no webhook URL is configured (no request
    ///   is sent) or the webhook answers 401/403
    /// - [`TeamsError::NotFound`] on 404 and 405
    /// - [`TeamsError::Validation`] on 422, with the JSON body when it decodes
    /// - [`TeamsError::FailedAction`] on any other status, or when no response
    ///   was received at all
    #[instrument(
        name = "TeamsClient::post_message",
        skip_all,
        fields(element_count = card.len())
    )]
    pub async fn post_message(&self, card: &Card) -> Result<bool> {
        let webhook_url = self.webhook_url.trim();
        if webhook_url.is_empty() {
            warn!("No webhook URL configured");
            return Err(TeamsError::Unauthorized {
                status: None,
                message: "no webhook URL configured".to_string(),
            });
        }

        let url = Url::parse(webhook_url).map_err(|err| TeamsError::FailedAction {
            status: None,
            message: format!("invalid webhook URL: {err}"),
            source: Some(err.into()),
        })?;

        let body = card.to_json_vec()?;

        // The path carries the webhook secret, log the host only
        debug!(
            host = url.host_str().unwrap_or_default(),
            bytes = body.len(),
            "Posting message to Teams webhook"
        );

        let request = TransportRequest {
            method: Method::POST,
            url,
            body,
        };

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|source| TeamsError::FailedAction {
                status: None,
                message: source.to_string(),
                source: Some(source),
            })?;

        let result = classify(response);
        match &result {
            Ok(_) => debug!("Message posted successfully"),
            Err(err) => warn!(
                status = err.status(),
                error = %err,
                "Teams webhook rejected message"
            ),
        }
        result
    }

    /// Get the configured webhook URL
    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }
}

fn classify(response: TransportResponse) -> Result<bool> {
    match response.status {
        200..=299 => Ok(true),
        status @ (401 | 403) => Err(TeamsError::Unauthorized {
            status: Some(status),
            message: status_message(status, response.body),
        }),
        // Teams answers an unsupported submit method the same way as a missing webhook
        status @ (404 | 405) => Err(TeamsError::NotFound { status }),
        422 => Err(TeamsError::Validation {
            errors: serde_json::from_str(&response.body).ok(),
        }),
        status => Err(TeamsError::FailedAction {
            status: Some(status),
            message: status_message(status, response.body),
            source: None,
        }),
    }
}

fn status_message(status: u16, body: String) -> String {
    if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        body
    }
}
