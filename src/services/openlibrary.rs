//! Open Library search client for book identifier resolution.
//!
//! Lookup is best-effort enrichment: any failure degrades to empty
//! identifiers and book creation proceeds without them.

use std::time::Duration;

use serde::Deserialize;

use crate::{
    config::OpenLibraryConfig,
    error::{AppError, AppResult},
};

/// Identifiers resolved from the catalog; both may be absent
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookIdentifiers {
    pub isbn: Option<String>,
    pub cover_edition_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    isbn: Option<Vec<String>>,
    cover_edition_key: Option<String>,
}

#[derive(Clone)]
pub struct OpenLibraryService {
    client: reqwest::Client,
    base_url: String,
}

impl OpenLibraryService {
    pub fn new(config: &OpenLibraryConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve identifiers for a title and optional author.
    ///
    /// Issues a search filtered by title+author, then by title alone when
    /// the first yields nothing usable. Network errors, non-success
    /// statuses, and malformed payloads are soft failures: logged, then
    /// resolved as empty identifiers.
    pub async fn resolve(&self, title: &str, author: Option<&str>) -> BookIdentifiers {
        let mut queries: Vec<Vec<(&str, &str)>> = Vec::new();
        if let Some(author) = author {
            queries.push(vec![("title", title), ("author", author)]);
        }
        queries.push(vec![("title", title)]);

        for params in &queries {
            match self.search(params).await {
                Ok(response) => {
                    if let Some(identifiers) = extract_identifiers(&response.docs) {
                        return identifiers;
                    }
                }
                Err(e) => {
                    tracing::warn!("Open Library search failed: {}", e);
                }
            }
        }

        BookIdentifiers::default()
    }

    async fn search(&self, params: &[(&str, &str)]) -> Result<SearchResponse, reqwest::Error> {
        self.client
            .get(format!("{}/search.json", self.base_url))
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json::<SearchResponse>()
            .await
    }
}

/// Pick the first document (in provider order) that yields a usable
/// identifier: a 13-character ISBN, then a 10-character ISBN, then the
/// cover edition key.
fn extract_identifiers(docs: &[SearchDoc]) -> Option<BookIdentifiers> {
    for doc in docs {
        let isbn = doc.isbn.as_deref().and_then(|isbns| {
            isbns
                .iter()
                .find(|i| i.len() == 13)
                .or_else(|| isbns.iter().find(|i| i.len() == 10))
        });

        if isbn.is_some() || doc.cover_edition_key.is_some() {
            return Some(BookIdentifiers {
                isbn: isbn.cloned(),
                cover_edition_key: doc.cover_edition_key.clone(),
            });
        }
    }

    None
}
