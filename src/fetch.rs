use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::FetchError;
use crate::models::config::FetchConfig;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const BROWSER_ACCEPT: &str = "application/json, text/plain, */*";
const BROWSER_REFERER: &str = "https://leetcode.com/problemset/all/";

pub trait Fetcher {
    fn fetch(&self) -> Result<Vec<Value>, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
    url: String,
    max_retries: u32,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        Self::with_builder(Client::builder(), config)
    }

    fn with_builder(builder: ClientBuilder, config: &FetchConfig) -> Result<Self, FetchError> {
        let client = builder
            .timeout(config.timeout())
            .default_headers(browser_headers())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            url: config.url.clone(),
            max_retries: config.max_retries,
        })
    }

    fn fetch_once(&self) -> Result<Vec<Value>, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(FetchError::Network)?;
        parse_problem_list(&body)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self) -> Result<Vec<Value>, FetchError> {
        info!(url = %self.url, "fetching problems");

        let mut attempt = 0;
        loop {
            match self.fetch_once() {
                Ok(items) => {
                    info!(count = items.len(), "fetched problems");
                    return Ok(items);
                }
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = backoff(attempt);
                    warn!(
                        attempt = attempt + 1,
                        retry_in_secs = delay.as_secs(),
                        "fetch failed: {}",
                        e
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(REFERER, HeaderValue::from_static(BROWSER_REFERER));
    headers
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(1 << attempt.min(5))
}

pub fn parse_problem_list(body: &[u8]) -> Result<Vec<Value>, FetchError> {
    let mut data: Value = serde_json::from_slice(body).map_err(FetchError::Decode)?;

    match data.get_mut("stat_status_pairs").map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(FetchError::MissingPairs),
    }
}
