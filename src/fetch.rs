use crate::config::Config;
use crate::report::{self, truncate, BODY_PREVIEW_CHARS};
use crate::twitter::{PageResponse, TwitterClient};
use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The server handed out no further continuation token.
    Exhausted,
    LimitReached,
    RateLimited,
    HttpError { status: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Posts logged.
    pub total: u64,
    /// Page requests issued, including the one that stopped the run.
    pub pages: u64,
    pub stop: StopReason,
}

impl RunSummary {
    pub fn failed(&self) -> bool {
        matches!(self.stop, StopReason::HttpError { .. })
    }
}

/// Walks the user's timeline page by page and logs every post.
///
/// The limit is only checked once a page has been fully logged, so a run can
/// overshoot it by up to one page.
pub async fn fetch_timeline(
    twitter: &'_ dyn TwitterClient,
    config: &Config,
) -> anyhow::Result<RunSummary> {
    log::info!("=== X API fetch start ===");
    log::info!("USER_ID={}", config.user_id);
    if let Some((start, end)) = config.window() {
        log::info!("{}", report::window(start, end));
    }

    let mut next_token: Option<String> = None;
    let mut total = 0;
    let mut page = 0;
    let stop = loop {
        page += 1;
        let response = twitter
            .get_timeline_page(next_token.as_deref())
            .await
            .with_context(|| format!("Unable to fetch page {page}"))?;
        let timeline = match response {
            PageResponse::Page(timeline) => timeline,
            PageResponse::RateLimited => {
                log::warn!("429 Too Many Requests. Stop this run and try later.");
                break StopReason::RateLimited;
            }
            PageResponse::Failed {
                status,
                status_text,
                body,
            } => {
                log::error!(
                    "{} {}: {}",
                    status,
                    status_text,
                    truncate(&body, BODY_PREVIEW_CHARS)
                );
                break StopReason::HttpError { status };
            }
        };

        for error in &timeline.errors {
            log::warn!(
                "API reported: {}: {}",
                error.title.as_deref().unwrap_or("error"),
                error.detail.as_deref().unwrap_or("")
            );
        }
        log::info!("{}", report::page_banner(page, timeline.data.len()));
        for post in &timeline.data {
            total += 1;
            for line in report::post_lines(total, post) {
                log::info!("{}", line);
            }
        }

        match timeline.next_token() {
            None => break StopReason::Exhausted,
            Some(_) if total >= config.limit => {
                log::info!("Reached LIMIT={}.", config.limit);
                break StopReason::LimitReached;
            }
            Some(token) => next_token = Some(token.to_string()),
        }
    };

    log::info!("=== X API fetch done. total={} ===", total);
    Ok(RunSummary {
        total,
        pages: page,
        stop,
    })
}
