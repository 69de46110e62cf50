pub mod v2;

use crate::model::TimelinePage;
use async_trait::async_trait;

/// What came back for one page request.
#[derive(Debug)]
pub enum PageResponse {
    Page(TimelinePage),
    /// 429 Too Many Requests
    RateLimited,
    /// Any other non-2xx answer.
    Failed {
        status: u16,
        status_text: String,
        body: String,
    },
}

#[async_trait]
pub trait TwitterClient {
    /// Fetches one page of the user's timeline, continuing from `pagination_token`.
    async fn get_timeline_page(
        &self,
        pagination_token: Option<&str>,
    ) -> anyhow::Result<PageResponse>;
}
