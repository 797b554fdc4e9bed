//! Title-to-catalog-id resolution.
//!
//! Resolution is a fixed fallback chain: search the catalog, score the hits
//! against the title and its known aliases, and if nothing clears the
//! confidence bar ask the suggestion service for a cleaned-up title and try
//! once more. Every degraded step still produces an answer as long as the
//! catalog returned anything at all.

use tracing::{debug, info, warn};

use crate::alias::AliasDataset;
use crate::error::PipelineError;
use crate::score::score;
use crate::traits::{CatalogEntry, CatalogSearch, TitleSuggest};

/// Minimum score for a match to be accepted without a second opinion.
pub const CONFIDENCE_THRESHOLD: f64 = 0.6;

const PRIMARY_LIMIT: u32 = 100;
const FALLBACK_LIMIT: u32 = 20;

/// Season suffix appended to search queries. Season 1 is implied by the bare
/// title, so only later seasons get a qualifier.
pub fn season_qualifier(season: u32) -> String {
    if season <= 1 {
        String::new()
    } else {
        format!(" {season}")
    }
}

/// Resolves a user-supplied title to a catalog id.
pub struct Resolver<C, S> {
    catalog: C,
    suggest: S,
    aliases: AliasDataset,
}

impl<C: CatalogSearch, S: TitleSuggest> Resolver<C, S> {
    pub fn new(catalog: C, suggest: S, aliases: AliasDataset) -> Self {
        Self {
            catalog,
            suggest,
            aliases,
        }
    }

    /// Resolve `title` (season-qualified) to a catalog id.
    ///
    /// `Err(AnimeNotFound)` only when the primary search itself comes back
    /// empty or fails; past that point some id is always returned, falling
    /// back to the catalog's own first hit when confidence stays low.
    pub async fn resolve(&self, title: &str, season: u32) -> Result<u64, PipelineError> {
        let qualifier = season_qualifier(season);
        let qualified = format!("{}{qualifier}", title.trim());

        let primary = match self.catalog.search(&qualified, PRIMARY_LIMIT).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(query = %qualified, error = %err, "catalog search failed");
                return Err(PipelineError::AnimeNotFound);
            }
        };
        if primary.is_empty() {
            info!(query = %qualified, "catalog search returned no results");
            return Err(PipelineError::AnimeNotFound);
        }

        let (best_id, best_score) = self.best_match(title, &qualifier, &primary);
        if best_score > CONFIDENCE_THRESHOLD {
            debug!(id = best_id, score = best_score, "confident primary match");
            return Ok(best_id);
        }

        let suggestion = match self.suggest.suggest(title).await {
            Ok(Some(s)) if !s.trim().is_empty() => s,
            Ok(_) => {
                info!(query = %qualified, "no suggestion available, keeping first hit");
                return Ok(primary[0].id);
            }
            Err(err) => {
                warn!(error = %err, "suggestion service failed, keeping first hit");
                return Ok(primary[0].id);
            }
        };

        debug!(suggestion = %suggestion, "retrying search with suggested title");
        let requery = format!("{}{qualifier}", suggestion.trim());
        let fallback = match self.catalog.search(&requery, FALLBACK_LIMIT).await {
            Ok(entries) if !entries.is_empty() => entries,
            Ok(_) | Err(_) => {
                info!(query = %requery, "fallback search unusable, keeping first hit");
                return Ok(primary[0].id);
            }
        };

        let (id, s) = self.best_match(&suggestion, &qualifier, &fallback);
        if s > CONFIDENCE_THRESHOLD {
            debug!(id, score = s, "confident fallback match");
            Ok(id)
        } else {
            Ok(fallback[0].id)
        }
    }

    /// Score every candidate name against every variant of every entry.
    ///
    /// Candidates are the title's alias group members when one exists,
    /// otherwise just the title itself, each with the season qualifier
    /// appended. Ties keep the first-encountered entry.
    fn best_match(&self, title: &str, qualifier: &str, entries: &[CatalogEntry]) -> (u64, f64) {
        let candidates: Vec<String> = match self.aliases.find_group(title) {
            Some(group) => group
                .titles()
                .iter()
                .map(|t| format!("{t}{qualifier}"))
                .collect(),
            None => vec![format!("{}{qualifier}", title.trim())],
        };

        let mut best_id = entries[0].id;
        let mut best_score = f64::NEG_INFINITY;
        for candidate in &candidates {
            for entry in entries {
                for variant in entry.variants() {
                    let s = score(candidate, variant);
                    if s > best_score {
                        best_id = entry.id;
                        best_score = s;
                    }
                }
            }
        }
        (best_id, best_score)
    }
}
