//! Serde models for the MAL v2 API payloads we consume.

use kataru_core::traits::CatalogEntry;
use serde::Deserialize;

/// Response of `GET /anime?q=...`. An absent `data` field means no results.
#[derive(Debug, Deserialize)]
pub struct MalSearchResponse {
    #[serde(default)]
    pub data: Vec<MalSearchNode>,
}

#[derive(Debug, Deserialize)]
pub struct MalSearchNode {
    pub node: MalAnimeNode,
}

#[derive(Debug, Deserialize)]
pub struct MalAnimeNode {
    pub id: u64,
    pub title: String,
    pub alternative_titles: Option<MalAlternativeTitles>,
}

#[derive(Debug, Deserialize)]
pub struct MalAlternativeTitles {
    pub en: Option<String>,
    pub synonyms: Option<Vec<String>>,
}

impl MalAnimeNode {
    pub fn into_catalog_entry(self) -> CatalogEntry {
        let (title_english, synonyms) = match self.alternative_titles {
            Some(alt) => (
                alt.en.filter(|en| !en.is_empty()),
                alt.synonyms.unwrap_or_default(),
            ),
            None => (None, Vec::new()),
        };
        CatalogEntry {
            id: self.id,
            title: self.title,
            title_english,
            synonyms,
        }
    }
}

/// Response of `GET /forum/topic/{id}`. Posts stay opaque JSON; the pipeline
/// only relays them.
#[derive(Debug, Deserialize)]
pub struct ForumTopicResponse {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}
