use std::time::Duration;

use kataru_core::error::ServiceError;
use kataru_core::traits::{CatalogEntry, CatalogSearch, EpisodeListing, ForumFetch};
use reqwest::{Client, Response};
use tracing::{debug, warn};

use super::error::MalError;
use super::types::{ForumTopicResponse, MalSearchResponse};

const API_BASE: &str = "https://api.myanimelist.net/v2";
const SITE_BASE: &str = "https://myanimelist.net";
const CLIENT_ID_HEADER: &str = "X-MAL-CLIENT-ID";

/// Client for both the MAL v2 API and the rendered site pages.
#[derive(Clone)]
pub struct MalClient {
    client_id: String,
    http: Client,
}

impl MalClient {
    pub fn new(client_id: impl Into<String>, timeout: Duration) -> Result<Self, MalError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client_id: client_id.into(),
            http,
        })
    }

    async fn check_response(response: Response) -> Result<Response, MalError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), %message, "MAL API error");
        Err(MalError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Search the anime catalog, alternative titles included.
    pub async fn search_anime(&self, query: &str, limit: u32) -> Result<Vec<CatalogEntry>, MalError> {
        debug!(query, limit, "searching MAL");
        let response = self
            .http
            .get(format!("{API_BASE}/anime"))
            .header(CLIENT_ID_HEADER, &self.client_id)
            .query(&[
                ("q", query),
                ("limit", &limit.to_string()),
                ("fields", "alternative_titles"),
            ])
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        let payload: MalSearchResponse = response
            .json()
            .await
            .map_err(|e| MalError::Parse(e.to_string()))?;
        Ok(payload
            .data
            .into_iter()
            .map(|hit| hit.node.into_catalog_entry())
            .collect())
    }

    /// Fetch one page of the rendered episode listing.
    pub async fn episode_page(&self, anime_id: u64, slug: &str, offset: u32) -> Result<String, MalError> {
        let url = format!("{SITE_BASE}/anime/{anime_id}/{slug}/episode?offset={offset}");
        debug!(%url, "fetching episode listing");
        let response = self.http.get(&url).send().await?;
        let response = Self::check_response(response).await?;
        Ok(response.text().await?)
    }

    /// Fetch the posts of a forum topic.
    pub async fn forum_topic(&self, topic_id: &str, limit: u32) -> Result<Vec<serde_json::Value>, MalError> {
        debug!(topic_id, "fetching forum topic");
        let response = self
            .http
            .get(format!("{API_BASE}/forum/topic/{topic_id}"))
            .header(CLIENT_ID_HEADER, &self.client_id)
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        let payload: ForumTopicResponse = response
            .json()
            .await
            .map_err(|e| MalError::Parse(e.to_string()))?;
        Ok(payload.data)
    }
}

impl CatalogSearch for MalClient {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<CatalogEntry>, ServiceError> {
        self.search_anime(query, limit).await.map_err(Into::into)
    }
}

impl EpisodeListing for MalClient {
    async fn listing_page(
        &self,
        catalog_id: u64,
        slug: &str,
        offset: u32,
    ) -> Result<String, ServiceError> {
        self.episode_page(catalog_id, slug, offset)
            .await
            .map_err(Into::into)
    }
}

impl ForumFetch for MalClient {
    async fn topic_posts(
        &self,
        thread_id: &str,
        limit: u32,
    ) -> Result<Vec<serde_json::Value>, ServiceError> {
        self.forum_topic(thread_id, limit).await.map_err(Into::into)
    }
}
