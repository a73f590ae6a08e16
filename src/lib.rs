//! # Teams Webhook
//!
//! A Rust client library for posting [Adaptive Card](https://adaptivecards.io/) messages
//! to Microsoft Teams [incoming webhooks](https://learn.microsoft.com/en-us/microsoftteams/platform/webhooks-and-connectors/how-to/add-incoming-webhook).
//!
//! ## Features
//!
//! - Build cards from text blocks, fact sets and images
//! - Post a card with a single call
//! - Typed errors for the webhook's failure modes (unauthorized, not found,
//!   validation, failed action)
//! - Pluggable [`Transport`] for custom HTTP stacks and test doubles
//!
//! ## Example
//!
//! ```rust,no_run
//! use teams_webhook::{Card, FactSet, TeamsClient, TextBlock, TextWeight};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TeamsClient::new(
//!         "https://example.webhook.office.com/webhookb2/...",
//!         Duration::from_secs(10),
//!     )?;
//!
//!     let card = Card::new()
//!         .with_element(TextBlock::new("Nightly build failed").with_weight(TextWeight::Bolder))
//!         .with_element(TextBlock::new("The integration suite timed out.").wrap())
//!         .with_element(
//!             FactSet::new()
//!                 .with_fact("Branch", "main")
//!                 .with_fact("Duration", "42m"),
//!         );
//!
//!     client.post_message(&card).await?;
//!     Ok(())
//! }
//! ```

mod card;
mod client;
mod errors;
mod transport;

pub use card::{
    Card, Element, Fact, FactSet, Image, ImageSize, TextBlock, TextColor, TextSize, TextWeight,
};
pub use client::TeamsClient;
pub use errors::{ErrorKind, Result, TeamsError};
pub use transport::{
    BoxError, BoxFuture, ReqwestTransport, Transport, TransportRequest, TransportResponse,
};
