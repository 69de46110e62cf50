mod config;
mod fetch;
mod logging;
mod model;
mod report;
mod twitter;

use crate::config::Config;
use crate::fetch::{fetch_timeline, RunSummary};
use crate::twitter::v2::TwitterClientV2;
use clap::Parser;

/// Logs a user's posts from the X API, page by page.
///
/// The bearer token is read from X_BEARER_TOKEN. Every flag falls back to
/// its environment variable when omitted.
#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
    /// Numeric id of the user whose posts to fetch [env: X_USER_ID, INPUT_X_USER_ID]
    #[clap(long)]
    user_id: Option<String>,
    /// Only posts created at or after this RFC 3339 time [env: INPUT_START_TIME, START_TIME]
    #[clap(long)]
    start_time: Option<String>,
    /// Only posts created before this RFC 3339 time [env: INPUT_END_TIME, END_TIME]
    #[clap(long)]
    end_time: Option<String>,
    /// Stop paging once this many posts were logged (default 100) [env: INPUT_LIMIT]
    #[clap(long)]
    limit: Option<String>,
    /// API root to talk to (default https://api.twitter.com) [env: X_API_BASE]
    #[clap(long)]
    api_base: Option<String>,
}

#[tokio::main]
async fn main() {
    logging::init().ok();
    let code = match main2().await {
        Ok(summary) => {
            log::debug!(
                "{} posts over {} page requests, stopped: {:?}",
                summary.total,
                summary.pages,
                summary.stop
            );
            if summary.failed() {
                1
            } else {
                0
            }
        }
        Err(e) => {
            log::error!("{:#}", e);
            1
        }
    };
    std::process::exit(code);
}

async fn main2() -> anyhow::Result<RunSummary> {
    let args: Args = Args::parse();
    let config = Config::from_args(&args)?;
    let client = TwitterClientV2::new(config.clone())?;
    fetch_timeline(&client, &config).await
}
