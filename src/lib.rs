//! SteemConnect client SDK.
//!
//! Build operations with fluent builders, authenticate through the OAuth2
//! code flow, broadcast, and decode the returned transaction.
//!
//! ```no_run
//! use steemconnect::{Client, SdkConfig, Token};
//! use steemconnect::operations::Vote;
//!
//! # async fn run() -> steemconnect::Result<()> {
//! let client = Client::new(SdkConfig::new("my.app", "secret"))
//!     .with_token(Token::new("access-token"));
//!
//! let mut vote = Vote::new();
//! vote.voter("alice").on("bob", "a-post").up_vote(1);
//!
//! let response = client.broadcast(&[&vote]).await?;
//! if let Some(transaction) = response.transaction()? {
//!     println!("{:?}", transaction.id());
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod operations;
pub mod transactions;

pub use auth::Token;
pub use client::Client;
pub use config::SdkConfig;
pub use error::{Error, Result};
pub use transactions::Transaction;
