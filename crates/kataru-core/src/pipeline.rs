//! End-to-end discussion lookup.
//!
//! Chains the three stages: resolve the title to a catalog id, locate the
//! episode's row in the listing and pull its thread reference, then fetch the
//! thread's posts.

use serde::Serialize;
use tracing::{debug, warn};

use crate::episode::{locate_episode, parse_thread_ref};
use crate::error::PipelineError;
use crate::resolver::Resolver;
use crate::traits::{CatalogSearch, EpisodeListing, ForumFetch, TitleSuggest};

const FORUM_PAGE_LIMIT: u32 = 100;

/// A resolved discussion thread and its posts.
#[derive(Debug, Serialize)]
pub struct Discussion {
    pub thread_id: String,
    pub posts: Vec<serde_json::Value>,
}

/// The full title-to-discussion pipeline, generic over its collaborators.
pub struct Pipeline<C, S, L, F> {
    resolver: Resolver<C, S>,
    listing: L,
    forum: F,
}

impl<C, S, L, F> Pipeline<C, S, L, F>
where
    C: CatalogSearch,
    S: TitleSuggest,
    L: EpisodeListing,
    F: ForumFetch,
{
    pub fn new(resolver: Resolver<C, S>, listing: L, forum: F) -> Self {
        Self {
            resolver,
            listing,
            forum,
        }
    }

    /// Look up the discussion thread for one episode of one show.
    pub async fn discussion(
        &self,
        title: &str,
        season: u32,
        episode: u32,
    ) -> Result<Discussion, PipelineError> {
        let catalog_id = self.resolver.resolve(title, season).await?;
        debug!(catalog_id, "title resolved");

        let location = locate_episode(episode).ok_or(PipelineError::ThreadNotFound)?;
        let slug = slugify(title);
        let page = self
            .listing
            .listing_page(catalog_id, &slug, location.page_offset)
            .await
            .map_err(|err| {
                warn!(catalog_id, error = %err, "episode listing fetch failed");
                PipelineError::ThreadNotFound
            })?;

        let thread_id =
            parse_thread_ref(&page, location.row_index).ok_or(PipelineError::ThreadNotFound)?;
        debug!(%thread_id, episode, "discussion thread located");

        let posts = self
            .forum
            .topic_posts(&thread_id, FORUM_PAGE_LIMIT)
            .await
            .map_err(|err| {
                warn!(%thread_id, error = %err, "forum fetch failed");
                PipelineError::ThreadNotFound
            })?;

        Ok(Discussion { thread_id, posts })
    }
}

/// URL path slug for a title: alphanumeric runs kept, everything else
/// collapsed to single underscores.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_sep = true;
    for c in title.trim().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }
    if slug.ends_with('_') {
        slug.pop();
    }
    slug
}
