//! symbl - Session-managed client for the Symbl.ai REST API
//!
//! The API hands out short-lived bearer tokens. This library logs in once,
//! keeps the credentials in a [`Session`], and transparently mints a new
//! token whenever a request is rejected with 401, re-sending the request
//! under a bounded [`RetryPolicy`].
//!
//! # Example
//!
//! ```no_run
//! use symbl::{Client, RequestContext};
//!
//! # async fn example() -> Result<(), symbl::Error> {
//! let ctx = RequestContext::new();
//! // Reads APP_ID and APP_SECRET.
//! let client = Client::from_env(&ctx).await?;
//!
//! let summary = client.get_bookmarks_summary(&ctx, "conversation-id", &[]).await?;
//! for bookmark in summary.bookmarks_summary {
//!     println!("{}: {} sentences", bookmark.bookmark_id, bookmark.summary.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod transport;
pub mod validation;

// Re-export primary types at crate root for convenience
pub use auth::{AccessToken, Authenticator, Credentials, Session};
pub use client::Client;
pub use config::ClientConfig;
pub use dispatch::{Dispatcher, RetryPolicy};
pub use error::Error;
pub use transport::{ApiRequest, HttpTransport, RequestContext, Transport};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
