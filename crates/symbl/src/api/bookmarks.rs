//! Bookmark endpoints.

use tracing::{debug, instrument};

use crate::Result;
use crate::client::Client;
use crate::transport::{ApiRequest, RequestContext};
use crate::validation::{Validate, require_param};

use super::types::{
    Bookmark, BookmarkRequest, BookmarkSummaryResult, BookmarksResult, BookmarksSummaryResult,
};

const CONVERSATIONS: &str = "conversations";
const BOOKMARKS: &str = "bookmarks";
const SUMMARY: &str = "summary";

impl Client {
    /// List the bookmarks of a conversation.
    #[instrument(skip(self, ctx))]
    pub async fn get_bookmarks(
        &self,
        ctx: &RequestContext,
        conversation_id: &str,
    ) -> Result<BookmarksResult> {
        require_param("conversationId", conversation_id)?;

        let url = self.endpoint(&[CONVERSATIONS, conversation_id, BOOKMARKS]);
        debug!(%url, "Listing bookmarks");
        self.send(ctx, &ApiRequest::get(url)).await
    }

    /// Fetch one bookmark.
    #[instrument(skip(self, ctx))]
    pub async fn get_bookmark(
        &self,
        ctx: &RequestContext,
        conversation_id: &str,
        bookmark_id: &str,
    ) -> Result<Bookmark> {
        require_param("conversationId", conversation_id)?;
        require_param("bookmarkId", bookmark_id)?;

        let url = self.endpoint(&[CONVERSATIONS, conversation_id, BOOKMARKS, bookmark_id]);
        debug!(%url, "Getting bookmark");
        self.send(ctx, &ApiRequest::get(url)).await
    }

    /// Create a bookmark.
    #[instrument(skip(self, ctx, request))]
    pub async fn create_bookmark(
        &self,
        ctx: &RequestContext,
        conversation_id: &str,
        request: &BookmarkRequest,
    ) -> Result<Bookmark> {
        request.validate()?;
        require_param("conversationId", conversation_id)?;

        let url = self.endpoint(&[CONVERSATIONS, conversation_id, BOOKMARKS]);
        debug!(%url, "Creating bookmark");
        self.send(ctx, &ApiRequest::post(url).json(request)?).await
    }

    /// Replace a bookmark.
    #[instrument(skip(self, ctx, request))]
    pub async fn update_bookmark(
        &self,
        ctx: &RequestContext,
        conversation_id: &str,
        bookmark_id: &str,
        request: &BookmarkRequest,
    ) -> Result<Bookmark> {
        request.validate()?;
        require_param("conversationId", conversation_id)?;
        require_param("bookmarkId", bookmark_id)?;

        let url = self.endpoint(&[CONVERSATIONS, conversation_id, BOOKMARKS, bookmark_id]);
        debug!(%url, "Updating bookmark");
        self.send(ctx, &ApiRequest::put(url).json(request)?).await
    }

    /// Delete a bookmark.
    #[instrument(skip(self, ctx))]
    pub async fn delete_bookmark(
        &self,
        ctx: &RequestContext,
        conversation_id: &str,
        bookmark_id: &str,
    ) -> Result<()> {
        require_param("conversationId", conversation_id)?;
        require_param("bookmarkId", bookmark_id)?;

        let url = self.endpoint(&[CONVERSATIONS, conversation_id, BOOKMARKS, bookmark_id]);
        debug!(%url, "Deleting bookmark");
        self.send_no_response(ctx, &ApiRequest::delete(url)).await
    }

    /// Fetch the generated summary of one bookmark.
    #[instrument(skip(self, ctx))]
    pub async fn get_bookmark_summary(
        &self,
        ctx: &RequestContext,
        conversation_id: &str,
        bookmark_id: &str,
    ) -> Result<BookmarkSummaryResult> {
        require_param("conversationId", conversation_id)?;
        require_param("bookmarkId", bookmark_id)?;

        let url = self.endpoint(&[CONVERSATIONS, conversation_id, SUMMARY, BOOKMARKS, bookmark_id]);
        debug!(%url, "Getting bookmark summary");
        self.send(ctx, &ApiRequest::get(url)).await
    }

    /// Fetch summaries for every bookmark, optionally narrowed by `filters`.
    #[instrument(skip(self, ctx))]
    pub async fn get_bookmarks_summary(
        &self,
        ctx: &RequestContext,
        conversation_id: &str,
        filters: &[&str],
    ) -> Result<BookmarksSummaryResult> {
        require_param("conversationId", conversation_id)?;

        let mut url = self.endpoint(&[CONVERSATIONS, conversation_id, SUMMARY, BOOKMARKS]);
        if !filters.is_empty() {
            let mut query = url.query_pairs_mut();
            for filter in filters {
                query.append_pair("filter", filter);
            }
        }
        debug!(%url, "Getting bookmarks summary");
        self.send(ctx, &ApiRequest::get(url)).await
    }
}
