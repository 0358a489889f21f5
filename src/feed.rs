//! Feed access: where per-site check histories come from.
//!
//! This module defines the `FeedSource` trait so the poll loop can work with
//! the real HTTP feed or with an in-memory source in tests through the same
//! interface.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

use crate::model::{Site, SiteCheckData};

/// Origin serving `<id>.json` check histories.
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/Tensamin/tensamin.github.io/refs/heads/main/data";

/// Default timeout for a single feed request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with feed requests.
pub const USER_AGENT: &str = concat!("statusboard/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while fetching one site's history.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Base URL or derived document URL is not a valid URL.
    #[error("invalid feed URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Http { url: Url, status: u16 },

    /// Connection, TLS, timeout or body read failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    /// Body is not a valid check history document.
    #[error("malformed document from {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },

    /// Client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Abstraction for check history sources.
///
/// Implementations must be shareable across the per-site worker threads.
pub trait FeedSource: Send + Sync {
    /// Fetches the full check history of `site`.
    fn fetch(&self, site: &Site) -> Result<SiteCheckData, FetchError>;

    /// Human-readable description of the source, used in logs.
    fn describe(&self) -> String;
}

/// Feed served over HTTP as static JSON files.
pub struct HttpFeed {
    client: Client,
    base: Url,
}

impl HttpFeed {
    /// Creates a feed reading from `base` with the given request timeout.
    pub fn new(base: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base = Url::parse(base).map_err(|source| FetchError::InvalidUrl {
            url: base.to_string(),
            source,
        })?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client, base })
    }

    /// Document URL for a site: `{base}/{id}.json`.
    pub fn document_url(&self, site: &Site) -> Result<Url, FetchError> {
        let raw = format!(
            "{}/{}.json",
            self.base.as_str().trim_end_matches('/'),
            site.id
        );
        Url::parse(&raw).map_err(|source| FetchError::InvalidUrl { url: raw, source })
    }
}

impl FeedSource for HttpFeed {
    fn fetch(&self, site: &Site) -> Result<SiteCheckData, FetchError> {
        let url = self.document_url(site)?;

        let response = match self.client.get(url.as_str()).send() {
            Ok(r) => r,
            Err(source) => return Err(FetchError::Transport { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url,
                status: status.as_u16(),
            });
        }

        let body = match response.text() {
            Ok(b) => b,
            Err(source) => return Err(FetchError::Transport { url, source }),
        };

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { url, source })
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}
