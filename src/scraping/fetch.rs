use crate::core::config::FetchSettings;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, PRAGMA};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned HTTP {0}")]
    Status(StatusCode),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Request(e) if e.is_timeout())
    }
}

/// A maker page as read off the wire, capped at `FetchSettings::max_body_bytes`.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub final_url: Url,
    pub status_code: u16,
    pub html: String,
    pub bytes_read: usize,
    /// `true` when the page had more bytes than the cap allowed.
    pub truncated: bool,
}

/// Single-shot HTTP GET for maker pages: bot user agent, redirects followed, no caching.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    settings: FetchSettings,
}

impl PageFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .timeout(settings.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// Fetch `url` and return at most `max_body_bytes` of its body.
    ///
    /// Bytes past the cap are never buffered: the body is read chunk by chunk and the
    /// connection is dropped once the cap is reached.
    pub async fn fetch_html(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let mut response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let final_url = response.url().clone();
        let max = self.settings.max_body_bytes;
        let initial = response
            .content_length()
            .map(|n| (n as usize).min(max))
            .unwrap_or(0);
        let mut body: Vec<u8> = Vec::with_capacity(initial);
        let mut truncated = false;

        while let Some(chunk) = response.chunk().await? {
            let remaining = max - body.len();
            if chunk.len() > remaining {
                body.extend_from_slice(&chunk[..remaining]);
                truncated = true;
                break;
            }
            body.extend_from_slice(&chunk);
        }

        debug!(
            "Fetched {} ({} bytes, truncated: {})",
            final_url,
            body.len(),
            truncated
        );

        Ok(FetchedPage {
            final_url,
            status_code: status.as_u16(),
            bytes_read: body.len(),
            html: String::from_utf8_lossy(&body).into_owned(),
            truncated,
        })
    }
}
