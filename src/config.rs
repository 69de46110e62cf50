use crate::Args;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::fmt;
use thiserror::Error;
use url::Url;

pub const DEFAULT_LIMIT: u64 = 100;
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com";

const BEARER_TOKEN_VARS: &[&str] = &["X_BEARER_TOKEN"];
const USER_ID_VARS: &[&str] = &["X_USER_ID", "INPUT_X_USER_ID"];
const START_TIME_VARS: &[&str] = &["INPUT_START_TIME", "START_TIME"];
const END_TIME_VARS: &[&str] = &["INPUT_END_TIME", "END_TIME"];
const LIMIT_VARS: &[&str] = &["INPUT_LIMIT"];
const API_BASE_VARS: &[&str] = &["X_API_BASE"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing X_BEARER_TOKEN or X_USER_ID.")]
    MissingCredentials,
    #[error("Invalid limit: {0:?} (expected a non-negative integer)")]
    InvalidLimit(String),
    #[error("Invalid {name}: {value:?}")]
    InvalidTime {
        name: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Time window is inverted: {start} is after {end}")]
    InvertedWindow { start: String, end: String },
    #[error("Invalid API base URL: {0:?}")]
    InvalidApiBase(String),
}

/// Everything the fetcher needs, resolved once at startup.
#[derive(Clone)]
pub struct Config {
    pub bearer_token: String,
    pub user_id: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub limit: u64,
    pub api_base: Url,
}

impl Config {
    /// Resolves against the process environment.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        Self::resolve(args, |name| std::env::var(name).ok())
    }

    /// Flags win over environment variables; variables are tried in order.
    /// Empty values count as unset.
    pub fn resolve<F>(args: &Args, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = &lookup;
        let bearer_token = pick(None, BEARER_TOKEN_VARS, lookup);
        let user_id = pick(args.user_id.as_deref(), USER_ID_VARS, lookup);
        let (bearer_token, user_id) = match (bearer_token, user_id) {
            (Some(token), Some(user)) => (token, user),
            _ => return Err(ConfigError::MissingCredentials),
        };

        let limit = match pick(args.limit.as_deref(), LIMIT_VARS, lookup) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidLimit(raw))?,
            None => DEFAULT_LIMIT,
        };

        let start_time = pick(args.start_time.as_deref(), START_TIME_VARS, lookup);
        let end_time = pick(args.end_time.as_deref(), END_TIME_VARS, lookup);
        let start = start_time
            .as_deref()
            .map(|v| parse_time("start_time", v))
            .transpose()?;
        let end = end_time
            .as_deref()
            .map(|v| parse_time("end_time", v))
            .transpose()?;
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(ConfigError::InvertedWindow {
                    start: start_time.unwrap_or_default(),
                    end: end_time.unwrap_or_default(),
                });
            }
        }

        let api_base = pick(args.api_base.as_deref(), API_BASE_VARS, lookup)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base = match Url::parse(&api_base) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() => url,
            _ => return Err(ConfigError::InvalidApiBase(api_base)),
        };

        Ok(Self {
            bearer_token,
            user_id,
            start_time,
            end_time,
            limit,
            api_base,
        })
    }

    /// The requested time window, if either bound is set.
    pub fn window(&self) -> Option<(Option<&str>, Option<&str>)> {
        match (self.start_time.as_deref(), self.end_time.as_deref()) {
            (None, None) => None,
            bounds => Some(bounds),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bearer_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("start_time", &self.start_time)
            .field("end_time", &self.end_time)
            .field("limit", &self.limit)
            .field("api_base", &self.api_base.as_str())
            .finish()
    }
}

fn pick<F>(flag: Option<&str>, vars: &[&str], lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    flag.map(str::to_string)
        .into_iter()
        .chain(vars.iter().filter_map(|&name| lookup(name)))
        .find(|v| !v.is_empty())
}

/// RFC 3339, or the same with the seconds left out (`2025-06-01T00:00Z`).
/// Only used for checking; the raw string is what gets sent.
fn parse_time(name: &'static str, value: &str) -> Result<DateTime<Utc>, ConfigError> {
    let rfc3339 = match DateTime::parse_from_rfc3339(value) {
        Ok(time) => return Ok(time.with_timezone(&Utc)),
        Err(e) => e,
    };
    let without_seconds = match value.strip_suffix('Z') {
        Some(naive) => NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M")
            .map(|time| Utc.from_utc_datetime(&time)),
        None => DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%:z")
            .map(|time| time.with_timezone(&Utc)),
    };
    without_seconds.map_err(|_| ConfigError::InvalidTime {
        name,
        value: value.to_string(),
        source: rfc3339,
    })
}
