use log::{error, info};
use std::fmt;

use crate::models::content::Content;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The server answered with a non-success status.
    Status(u16),
    /// The request never produced a response.
    Transport(String),
    /// The body is not a content document.
    Parse(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Status(code) => write!(f, "HTTP error! status: {}", code),
            LoadError::Transport(e) => write!(f, "Request failed: {}", e),
            LoadError::Parse(e) => write!(f, "Malformed content document: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

/// Raw answer to a content request.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Where the content document comes from. Futures are not `Send`: the page
/// runs on a single thread.
#[allow(async_fn_in_trait)]
pub trait ContentSource {
    async fn fetch(&self) -> Result<Response, LoadError>;
}

/// Fetches the document over HTTP. On wasm32 reqwest delegates to the
/// browser's `fetch`.
pub struct HttpSource {
    client: reqwest::Client,
    url: url::Url,
}

impl HttpSource {
    pub fn new(url: url::Url) -> Self {
        HttpSource {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Resolve `relative` (e.g. `data/content.json`) against the page URL.
    pub fn resolve(page_url: &str, relative: &str) -> Result<Self, LoadError> {
        let base = url::Url::parse(page_url)
            .map_err(|e| LoadError::Transport(format!("Invalid page URL: {}", e)))?;
        let url = base
            .join(relative)
            .map_err(|e| LoadError::Transport(format!("Invalid content URL: {}", e)))?;
        Ok(Self::new(url))
    }

    pub fn url(&self) -> &url::Url {
        &self.url
    }
}

impl ContentSource for HttpSource {
    async fn fetch(&self) -> Result<Response, LoadError> {
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;
        Ok(Response { status, body })
    }
}

/// One attempt per call; no retry, no cache, no timeout.
pub struct ContentLoader<C: ContentSource> {
    source: C,
}

impl<C: ContentSource> ContentLoader<C> {
    pub fn new(source: C) -> Self {
        ContentLoader { source }
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    pub async fn load(&self) -> Result<Content, LoadError> {
        let result = self.fetch_and_parse().await;
        match &result {
            Ok(content) => info!(
                "Loaded content: {} project(s), profile {}",
                content.projects.len(),
                if content.profile.is_some() { "present" } else { "absent" }
            ),
            Err(e) => error!("Failed to load content: {}", e),
        }
        result
    }

    async fn fetch_and_parse(&self) -> Result<Content, LoadError> {
        let resp = self.source.fetch().await?;
        if !resp.is_success() {
            return Err(LoadError::Status(resp.status));
        }
        Content::from_json(&resp.body).map_err(|e| LoadError::Parse(e.to_string()))
    }
}
