//! HTTP GET of the page behind a canonical URL.
//!
//! Uses the curl crate (libcurl). One request per fetch, no retry. The only
//! explicit request header is `User-Agent`; curl's implicit `Accept` is
//! suppressed. Timeouts are left to libcurl unless configured.

mod error;
mod parse;

pub use error::{classify_curl_error, FetchError, NetworkFailure};

use std::str;
use std::time::Duration;

use crate::config::ClipmarkConfig;
use crate::url_model::CanonicalUrl;

/// User agent sent with every page request unless overridden in config.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; OGBot/1.0)";

/// Transport settings for a page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub user_agent: String,
    pub follow_redirects: bool,
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            follow_redirects: true,
            connect_timeout: None,
            timeout: None,
        }
    }
}

impl From<&ClipmarkConfig> for FetchOptions {
    fn from(cfg: &ClipmarkConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            follow_redirects: cfg.follow_redirects,
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// A successfully retrieved page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Final HTTP status (2xx).
    pub status: u32,
    /// `Content-Type` of the final response, if sent.
    pub content_type: Option<String>,
    /// Response body as text; invalid UTF-8 is replaced, nothing else is decoded.
    pub body: String,
}

/// Retrieves raw documents. Implementations block; async callers offload
/// them with `spawn_blocking`.
pub trait PageFetcher: Send + Sync + 'static {
    fn fetch(&self, url: &CanonicalUrl) -> Result<RawDocument, FetchError>;
}

/// [`PageFetcher`] backed by libcurl.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: FetchOptions,
}

impl CurlFetcher {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.opts
    }
}

impl PageFetcher for CurlFetcher {
    fn fetch(&self, url: &CanonicalUrl) -> Result<RawDocument, FetchError> {
        fetch_page(url, &self.opts)
    }
}

/// Performs a single GET and returns the body of a 2xx response.
///
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn fetch_page(url: &CanonicalUrl, opts: &FetchOptions) -> Result<RawDocument, FetchError> {
    let mut headers: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url.as_str())?;
    easy.get(true)?;
    easy.useragent(&opts.user_agent)?;
    if opts.follow_redirects {
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
    }
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }
    if let Some(t) = opts.timeout {
        easy.timeout(t)?;
    }

    // An empty value removes the header curl would otherwise add.
    let mut list = curl::easy::List::new();
    list.append("Accept:")?;
    easy.http_headers(list)?;

    tracing::debug!("GET {}", url);
    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        tracing::warn!("GET {} returned HTTP {}", url, status);
        return Err(FetchError::HttpStatus { status });
    }

    let content_type = parse::content_type(&headers);
    tracing::debug!(
        "GET {} -> {} ({} bytes, {:?})",
        url,
        status,
        body.len(),
        content_type
    );

    Ok(RawDocument {
        status,
        content_type,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}
