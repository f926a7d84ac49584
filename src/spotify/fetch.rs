use std::future::Future;

use reqwest::Client;
use serde_json::Value;

use crate::{error::BackupError, management::TokenManager};

/// Seam between the paginator and the HTTP transport. Production code uses
/// [`SpotifyFetcher`]; tests substitute a canned page map.
pub trait PageFetcher {
    fn fetch_page(
        &mut self,
        url: &str,
    ) -> impl Future<Output = Result<Value, BackupError>> + Send;
}

/// [`PageFetcher`] backed by reqwest with bearer-token auth. The token
/// manager refreshes the access token transparently before each request.
pub struct SpotifyFetcher {
    client: Client,
    token_mgr: TokenManager,
}

impl SpotifyFetcher {
    pub fn new(token_mgr: TokenManager) -> Self {
        Self {
            client: Client::new(),
            token_mgr,
        }
    }
}

impl PageFetcher for SpotifyFetcher {
    async fn fetch_page(&mut self, url: &str) -> Result<Value, BackupError> {
        let token = self.token_mgr.get_valid_token().await;
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        let page = response.json::<Value>().await?;
        Ok(page)
    }
}

/// How an endpoint wraps its paginated payload. Resolved once per resource
/// configuration instead of introspecting every page at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{items: [...], next: ...}` at the top level.
    Bare,
    /// A single-key envelope around the payload, e.g.
    /// `{artists: {items: [...], next: ...}}`.
    Enveloped,
}

impl ResponseShape {
    /// Returns the payload carrying `items`/`next` for a page of this
    /// shape.
    pub fn payload<'a>(&self, page: &'a Value) -> Result<&'a Value, BackupError> {
        match self {
            ResponseShape::Bare => Ok(page),
            ResponseShape::Enveloped => match page.as_object() {
                Some(map) if map.len() == 1 => {
                    // guarded by the length check above
                    Ok(map.values().next().unwrap())
                }
                _ => Err(BackupError::Malformed(
                    "enveloped response does not have exactly one top-level key".to_string(),
                )),
            },
        }
    }
}

/// Fetches a single page and returns the raw payload unmodified.
pub async fn fetch_one<F: PageFetcher>(fetcher: &mut F, url: &str) -> Result<Value, BackupError> {
    fetcher.fetch_page(url).await
}

/// Fetches every page of a paginated resource by following the `next`
/// cursor, returning the raw pages in upstream pagination order.
///
/// The cursor is read from the payload selected by `shape`; pagination
/// terminates when `next` is absent or null. Transport failures propagate
/// immediately, leaving already-fetched pages behind.
pub async fn fetch_all<F: PageFetcher>(
    fetcher: &mut F,
    url: &str,
    shape: ResponseShape,
) -> Result<Vec<Value>, BackupError> {
    let mut pages = Vec::new();
    let mut next_url = Some(url.to_string());

    while let Some(url) = next_url {
        let page = fetcher.fetch_page(&url).await?;
        let payload = shape.payload(&page)?;
        next_url = payload
            .get("next")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        pages.push(page);
    }

    Ok(pages)
}
