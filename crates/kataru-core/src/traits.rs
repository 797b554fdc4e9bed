//! Trait definitions for the pipeline's external collaborators.
//!
//! The resolver and pipeline are generic over these, so the whole chain can be
//! exercised against in-memory fakes without touching the network.

use std::future::Future;

use crate::error::ServiceError;

/// One catalog search hit together with its full set of title variants.
///
/// Produced fresh per search response; immutable after creation.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub id: u64,
    pub title: String,
    pub title_english: Option<String>,
    pub synonyms: Vec<String>,
}

impl CatalogEntry {
    /// All title variants in scoring order: main, English, then synonyms.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str())
            .chain(self.title_english.as_deref())
            .chain(self.synonyms.iter().map(String::as_str))
    }
}

/// Free-text search against the anime catalog.
pub trait CatalogSearch: Send + Sync {
    fn search(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<CatalogEntry>, ServiceError>> + Send;
}

/// Language-model cleanup of a possibly-garbled title.
///
/// `Ok(None)` means the service had no suggestion to offer; the caller falls
/// back the same way it does on an outright failure.
pub trait TitleSuggest: Send + Sync {
    fn suggest(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Option<String>, ServiceError>> + Send;
}

/// Fetch of one page of the rendered episode listing, as raw HTML.
pub trait EpisodeListing: Send + Sync {
    fn listing_page(
        &self,
        catalog_id: u64,
        slug: &str,
        offset: u32,
    ) -> impl Future<Output = Result<String, ServiceError>> + Send;
}

/// Fetch of a forum thread's posts by thread reference.
pub trait ForumFetch: Send + Sync {
    fn topic_posts(
        &self,
        thread_id: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<serde_json::Value>, ServiceError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_order_is_main_english_synonyms() {
        let entry = CatalogEntry {
            id: 1,
            title: "Sousou no Frieren".into(),
            title_english: Some("Frieren: Beyond Journey's End".into()),
            synonyms: vec!["Frieren".into()],
        };
        let variants: Vec<&str> = entry.variants().collect();
        assert_eq!(
            variants,
            vec![
                "Sousou no Frieren",
                "Frieren: Beyond Journey's End",
                "Frieren"
            ]
        );
    }

    #[test]
    fn missing_english_title_is_skipped() {
        let entry = CatalogEntry {
            id: 2,
            title: "Hunter x Hunter".into(),
            title_english: None,
            synonyms: vec![],
        };
        assert_eq!(entry.variants().count(), 1);
    }
}
