use serde::Deserialize;

/// One page of `GET /2/users/:id/tweets`.
#[derive(Deserialize, Debug, Default)]
pub struct TimelinePage {
    #[serde(default)]
    pub data: Vec<Post>,
    #[serde(default)]
    pub meta: Meta,
    // The API can answer 200 and still report partial errors
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

impl TimelinePage {
    /// The continuation token, if the server handed out a usable one.
    pub fn next_token(&self) -> Option<&str> {
        self.meta.next_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct Meta {
    pub next_token: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub public_metrics: Option<PublicMetrics>,
}

impl Post {
    pub fn metrics(&self) -> PublicMetrics {
        self.public_metrics.clone().unwrap_or_default()
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct PublicMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub quote_count: u64,
    #[serde(default)]
    pub reply_count: u64,
}

#[derive(Deserialize, Debug)]
pub struct ApiError {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}
