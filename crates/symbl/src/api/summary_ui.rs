//! Summary UI (experience) endpoints.

use tracing::{debug, instrument};
use url::Url;

use crate::Result;
use crate::client::Client;
use crate::error::InvalidInputError;
use crate::transport::{ApiRequest, RequestContext};
use crate::validation::{Validate, require_param};

use super::types::{AudioSummaryRequest, SummaryUiResult, TextSummaryRequest, VideoSummaryRequest};

/// Experience name used for text conversations.
pub const TEXT_SUMMARY_NAME: &str = "verbose-text-summary";

/// Experience name used for audio recordings.
pub const AUDIO_SUMMARY_NAME: &str = "audio-summary";

/// Experience name used for video recordings.
pub const VIDEO_SUMMARY_NAME: &str = "video-summary";

/// File extensions treated as audio; anything else is assumed to be video.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "mpeg", "wav"];

/// Kind of summary page to generate for a media URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    Text,
    Audio,
    Video,
}

impl SummaryKind {
    /// Pick the summary kind for `uri`. No URI means a text conversation.
    pub fn for_uri(uri: Option<&str>) -> Result<Self> {
        let Some(uri) = uri.filter(|u| !u.is_empty()) else {
            return Ok(SummaryKind::Text);
        };

        let invalid = |reason: String| InvalidInputError::InvalidUri {
            value: uri.to_string(),
            reason,
        };

        let url = Url::parse(uri).map_err(|e| invalid(e.to_string()))?;
        let file = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default();
        let extension = match file.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
            _ => return Err(invalid("missing file extension".to_string()).into()),
        };

        if AUDIO_EXTENSIONS.contains(&extension.as_str()) {
            Ok(SummaryKind::Audio)
        } else {
            Ok(SummaryKind::Video)
        }
    }
}

impl Client {
    /// Generate a summary page, choosing text, audio or video from `uri`.
    #[instrument(skip(self, ctx))]
    pub async fn summary_ui(
        &self,
        ctx: &RequestContext,
        conversation_id: &str,
        uri: Option<&str>,
    ) -> Result<SummaryUiResult> {
        require_param("conversationId", conversation_id)?;

        let kind = SummaryKind::for_uri(uri)?;
        debug!(?kind, "Selected summary kind");

        let uri = uri.unwrap_or_default().to_string();
        match kind {
            SummaryKind::Text => {
                let request = TextSummaryRequest {
                    name: TEXT_SUMMARY_NAME.to_string(),
                };
                self.text_summary_ui(ctx, conversation_id, &request).await
            }
            SummaryKind::Audio => {
                let request = AudioSummaryRequest {
                    name: AUDIO_SUMMARY_NAME.to_string(),
                    audio_url: uri,
                };
                self.audio_summary_ui(ctx, conversation_id, &request).await
            }
            SummaryKind::Video => {
                let request = VideoSummaryRequest {
                    name: VIDEO_SUMMARY_NAME.to_string(),
                    video_url: uri,
                };
                self.video_summary_ui(ctx, conversation_id, &request).await
            }
        }
    }

    /// Generate a text summary page.
    pub async fn text_summary_ui(
        &self,
        ctx: &RequestContext,
        conversation_id: &str,
        request: &TextSummaryRequest,
    ) -> Result<SummaryUiResult> {
        request.validate()?;
        self.post_experience(ctx, conversation_id, request).await
    }

    /// Generate an audio summary page.
    pub async fn audio_summary_ui(
        &self,
        ctx: &RequestContext,
        conversation_id: &str,
        request: &AudioSummaryRequest,
    ) -> Result<SummaryUiResult> {
        request.validate()?;
        self.post_experience(ctx, conversation_id, request).await
    }

    /// Generate a video summary page.
    pub async fn video_summary_ui(
        &self,
        ctx: &RequestContext,
        conversation_id: &str,
        request: &VideoSummaryRequest,
    ) -> Result<SummaryUiResult> {
        request.validate()?;
        self.post_experience(ctx, conversation_id, request).await
    }

    async fn post_experience<B>(
        &self,
        ctx: &RequestContext,
        conversation_id: &str,
        body: &B,
    ) -> Result<SummaryUiResult>
    where
        B: serde::Serialize + Sync,
    {
        require_param("conversationId", conversation_id)?;

        let url = self.endpoint(&["conversations", conversation_id, "experiences"]);
        debug!(%url, "Creating summary experience");
        self.send(ctx, &ApiRequest::post(url).json(body)?).await
    }
}
