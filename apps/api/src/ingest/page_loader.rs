//! Page Loader: fetches a job URL and returns the visible text of its document.
//!
//! Failures are pipeline-fatal: the caller gets `AppError::PageLoad` and the
//! run stops.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::info;

use crate::errors::AppError;

/// Elements whose text never reaches the model.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template", "svg"];

#[async_trait]
pub trait PageLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<String, AppError>;
}

/// Live loader over HTTP.
#[derive(Clone, Default)]
pub struct HttpPageLoader {
    client: Client,
}

impl HttpPageLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageLoader for HttpPageLoader {
    async fn load(&self, url: &str) -> Result<String, AppError> {
        info!("Loading page {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::PageLoad(format!("Failed to fetch {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::PageLoad(format!("{url} returned HTTP {status}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_ascii_lowercase();
        if !content_type.contains("html") {
            return Err(AppError::PageLoad(format!(
                "{url} is not an HTML document (content-type: {content_type})"
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::PageLoad(format!("Failed to read body of {url}: {e}")))?;

        Ok(html_to_text(&html))
    }
}

/// Collects the text nodes under `<body>`, one per line, skipping script-like content.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut out = String::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_TAGS.contains(&el.name()))
        });
        if hidden || text.trim().is_empty() {
            continue;
        }
        out.push_str(text.trim());
        out.push('\n');
    }
    out
}
