//! Encyclopedia lookup through the MediaWiki query API.

use async_trait::async_trait;
use parley_core::util::truncate_preview;
use parley_core::{ContextProvider, ContextSource, ProviderError};
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::http::{endpoint, read_json, request_error};

/// Number of pages summarized per lookup.
pub const DEFAULT_TOP_K: usize = 3;
/// Characters of the lookup kept as prompt context.
pub const DEFAULT_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryPages>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    info: String,
}

#[derive(Debug, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    index: u32,
    #[serde(default)]
    extract: String,
}

pub struct WikipediaLookup {
    client: Client,
    base_url: String,
    top_k: usize,
    preview_chars: usize,
}

impl WikipediaLookup {
    /// Lookup against the Wikipedia of `language` (e.g. `en`).
    pub fn new(language: &str) -> Self {
        info!("Creating WikipediaLookup ({language})");
        Self {
            client: Client::new(),
            base_url: format!("https://{language}.wikipedia.org/w/api.php"),
            top_k: DEFAULT_TOP_K,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    #[must_use]
    pub const fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    /// Summaries of the best matching pages, best match first.
    pub async fn lookup(&self, query: &str) -> Result<String, ProviderError> {
        let limit = self.top_k.to_string();
        let url = endpoint(
            &self.base_url,
            "",
            &[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrlimit", limit.as_str()),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("exlimit", limit.as_str()),
                ("redirects", "1"),
            ],
        )?;

        info!("Looking up Wikipedia: {query}");
        let response = self.client.get(url).send().await.map_err(request_error)?;
        let body = read_json(response).await?;
        let parsed: QueryResponse = serde_json::from_value(body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(ProviderError::Api(format!("{}: {}", error.code, error.info)));
        }

        let mut pages: Vec<Page> = parsed
            .query
            .map(|q| q.pages)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| !p.extract.trim().is_empty())
            .collect();
        if pages.is_empty() {
            return Err(ProviderError::NotFound(query.to_string()));
        }
        pages.sort_by_key(|p| p.index);

        Ok(pages
            .iter()
            .take(self.top_k)
            .map(|p| format!("Page: {}\nSummary: {}", p.title, p.extract.trim()))
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}

#[async_trait]
impl ContextProvider for WikipediaLookup {
    fn source(&self) -> ContextSource {
        ContextSource::Encyclopedia
    }

    async fn fetch(&self, query: &str) -> Result<String, ProviderError> {
        let text = self.lookup(query).await?;
        Ok(truncate_preview(&text, self.preview_chars))
    }
}
