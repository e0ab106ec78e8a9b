//! Authentication types and session management.
//!
//! This module provides the credential, token and session primitives. All
//! authenticated operations read their bearer token from a [`Session`].

mod authenticator;
mod credentials;
mod session;
mod tokens;

pub use authenticator::{Authenticator, DEFAULT_AUTH_URL};
pub use credentials::{APP_ID_ENV, APP_SECRET_ENV, Credentials, DEFAULT_AUTH_TYPE};
pub use session::Session;
pub use tokens::AccessToken;
