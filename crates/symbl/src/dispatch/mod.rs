//! Request dispatch with re-authentication and bounded retries.

mod dispatcher;
mod policy;

pub use dispatcher::Dispatcher;
pub use policy::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, RetryPolicy};
