//! # Trello SDK
//!
//! A small async client for the subset of the Trello REST API used to manage
//! boards, lists, cards, labels and comments.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trello_sdk::{TrelloClient, TrelloResult};
//!
//! #[tokio::main]
//! async fn main() -> TrelloResult<()> {
//!     let client = TrelloClient::builder()
//!         .api_key("your-api-key")
//!         .api_token("your-api-token")
//!         .build()?;
//!
//!     let boards = client.boards().list_mine().await?;
//!     println!("{}", boards);
//!
//!     Ok(())
//! }
//! ```
//!
//! Responses are returned as raw [`serde_json::Value`]s. Non-2xx responses
//! that still carry a JSON body are returned as values too; only transport
//! failures and unparsable bodies are errors.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod transport;
pub mod types;

pub use client::{TrelloClient, TrelloClientBuilder};
pub use config::{ClientConfig, Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{TrelloError, TrelloResult};
pub use request::{Method, RemoteApi, RemoteRequest};
pub use transport::HttpTransport;
pub use types::{LabelColor, DEFAULT_POSITION};
