//! Endpoint clients.
//!
//! Each endpoint is a method on [`crate::Client`] that checks its inputs,
//! builds the URL and body, and hands the request to the dispatcher.

mod bookmarks;
mod summary_ui;
pub mod types;

pub use summary_ui::{
    AUDIO_EXTENSIONS, AUDIO_SUMMARY_NAME, SummaryKind, TEXT_SUMMARY_NAME, VIDEO_SUMMARY_NAME,
};
pub use types::*;
