//! Request and response types for the endpoint clients.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{Validate, Violations};

// ============================================================================
// Bookmarks
// ============================================================================

/// Author of a bookmark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
}

/// Body for creating or updating a bookmark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    pub description: String,
    pub user: BookmarkUser,
    pub begin_time_offset: u64,
    pub duration: u64,
}

impl Validate for BookmarkRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        Violations::new()
            .require("description", &self.description)
            .require("user.name", &self.user.name)
            .require("user.userId", &self.user.user_id)
            .require("user.email", &self.user.email)
            .check("duration", self.duration > 0)
            .finish()
    }
}

/// Reference to a conversation message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    pub id: String,
}

/// A bookmark as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub user: Option<BookmarkUser>,
    #[serde(default)]
    pub begin_time_offset: u64,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub message_refs: Vec<MessageRef>,
}

/// Response from listing bookmarks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarksResult {
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}

/// One generated summary sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub message_refs: Vec<MessageRef>,
}

/// Summary of a single bookmark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkSummaryResult {
    #[serde(default)]
    pub bookmark_id: String,
    #[serde(default)]
    pub summary: Vec<SummaryEntry>,
}

/// Summaries of every bookmark in a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarksSummaryResult {
    #[serde(default)]
    pub bookmarks_summary: Vec<BookmarkSummaryResult>,
}

// ============================================================================
// Summary UI
// ============================================================================

/// Text summary experience request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSummaryRequest {
    pub name: String,
}

impl Validate for TextSummaryRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        Violations::new().require("name", &self.name).finish()
    }
}

/// Audio summary experience request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSummaryRequest {
    pub name: String,
    pub audio_url: String,
}

impl Validate for AudioSummaryRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        Violations::new()
            .require("name", &self.name)
            .require("audioUrl", &self.audio_url)
            .finish()
    }
}

/// Video summary experience request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummaryRequest {
    pub name: String,
    pub video_url: String,
}

impl Validate for VideoSummaryRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        Violations::new()
            .require("name", &self.name)
            .require("videoUrl", &self.video_url)
            .finish()
    }
}

/// A generated summary page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryUiResult {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_bookmark() -> BookmarkRequest {
        BookmarkRequest {
            label: "Action item".into(),
            description: "Follow up on pricing".into(),
            user: BookmarkUser {
                name: "Ada".into(),
                user_id: "ada@example.com".into(),
                email: "ada@example.com".into(),
            },
            begin_time_offset: 10,
            duration: 5,
        }
    }

    #[test]
    fn bookmark_request_wire_format() {
        let json = serde_json::to_value(valid_bookmark()).unwrap();
        assert_eq!(
            json,
            json!({
                "label": "Action item",
                "description": "Follow up on pricing",
                "user": {"name": "Ada", "userId": "ada@example.com", "email": "ada@example.com"},
                "beginTimeOffset": 10,
                "duration": 5
            })
        );
    }

    #[test]
    fn bookmark_request_reports_every_missing_field() {
        assert!(valid_bookmark().validate().is_ok());

        let err = BookmarkRequest::default().validate().unwrap_err();
        assert_eq!(
            err.fields,
            vec![
                "description",
                "user.name",
                "user.userId",
                "user.email",
                "duration"
            ]
        );
    }

    #[test]
    fn summary_requests_require_urls() {
        let err = AudioSummaryRequest {
            name: "audio-summary".into(),
            audio_url: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.fields, vec!["audioUrl"]);

        let err = TextSummaryRequest {
            name: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.fields, vec!["name"]);
    }

    #[test]
    fn bookmark_tolerates_sparse_payload() {
        let bookmark: Bookmark = serde_json::from_value(json!({
            "id": "b1",
            "description": "d",
            "messageRefs": [{"id": "m1"}]
        }))
        .unwrap();
        assert_eq!(bookmark.id, "b1");
        assert_eq!(bookmark.message_refs, vec![MessageRef { id: "m1".into() }]);
        assert!(bookmark.user.is_none());
    }
}
