//! The user timeline endpoint of Twitter API v2.
// https://developer.twitter.com/en/docs/twitter-api/tweets/timelines/api-reference/get-users-id-tweets

use crate::config::Config;
use crate::model::TimelinePage;
use crate::report::{truncate, BODY_PREVIEW_CHARS};
use crate::twitter::{PageResponse, TwitterClient};
use anyhow::{bail, Context};
use async_trait::async_trait;
use maplit::btreemap;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use url::Url;

/// The server never returns more than this per page.
pub const MAX_RESULTS: &str = "100";
const TWEET_FIELDS: &str = "created_at,public_metrics";

pub struct TwitterClientV2 {
    client: Client,
    config: Config,
}

/// Builds the request URL for one page. Parameters go out in sorted order,
/// so equal inputs always give the same URL.
pub fn timeline_url(config: &Config, pagination_token: Option<&str>) -> Url {
    let mut url = config.api_base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .extend(["2", "users", config.user_id.as_str(), "tweets"]);
    }
    let mut query = btreemap! {
        "max_results" => MAX_RESULTS,
        "tweet.fields" => TWEET_FIELDS,
    };
    if let Some(start_time) = config.start_time.as_deref() {
        query.insert("start_time", start_time);
    }
    if let Some(end_time) = config.end_time.as_deref() {
        query.insert("end_time", end_time);
    }
    if let Some(token) = pagination_token.filter(|t| !t.is_empty()) {
        query.insert("pagination_token", token);
    }
    url.query_pairs_mut().clear().extend_pairs(query);
    url
}

fn deserialize_page(text: &str) -> anyhow::Result<TimelinePage> {
    match serde_json::from_str::<TimelinePage>(text) {
        Ok(page) => Ok(page),
        Err(e) => match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => {
                let pretty =
                    serde_json::to_string_pretty(&value).unwrap_or_else(|_| text.to_string());
                bail!(
                    "Unable to deserialize timeline page due to: {e}\nContents:\n{}",
                    truncate(&pretty, BODY_PREVIEW_CHARS)
                )
            }
            Err(_) => bail!("Invalid JSON: {}", truncate(text, BODY_PREVIEW_CHARS)),
        },
    }
}

impl TwitterClientV2 {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        let value = format!("Bearer {}", config.bearer_token);
        let mut value =
            HeaderValue::from_str(&value).context("Bearer token is not a valid header")?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(Self {
            client: Client::builder()
                .default_headers(headers)
                .build()
                .context("Unable to build HTTP client")?,
            config,
        })
    }
}

#[async_trait]
impl TwitterClient for TwitterClientV2 {
    async fn get_timeline_page(
        &self,
        pagination_token: Option<&str>,
    ) -> anyhow::Result<PageResponse> {
        let url = timeline_url(&self.config, pagination_token);
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Timeline request failed")?;
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Ok(PageResponse::RateLimited);
        }
        let text = response.text().await.context("Bad response text")?;
        if !status.is_success() {
            return Ok(PageResponse::Failed {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: text,
            });
        }
        Ok(PageResponse::Page(deserialize_page(&text)?))
    }
}
