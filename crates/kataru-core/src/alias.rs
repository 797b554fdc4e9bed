//! Static alias dataset: known name variants grouped by anime identity.
//!
//! Loaded once at startup and injected into the resolver; read-only for the
//! lifetime of the process. Groups are not validated for overlap; lookup is
//! first-match-wins in dataset order.

use std::path::Path;

use crate::error::ConfigError;
use crate::score::score;

const BUILTIN_ALIASES: &str = include_str!("../data/aliases.json");

/// Minimum fuzzy score for the optional second-pass group selection.
const GROUP_FUZZY_THRESHOLD: f64 = 0.75;

/// A set of strings known to denote the same anime identity.
#[derive(Debug, Clone)]
pub struct AliasGroup {
    titles: Vec<String>,
}

impl AliasGroup {
    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}

/// The full alias dataset, in file order.
#[derive(Debug, Clone)]
pub struct AliasDataset {
    groups: Vec<AliasGroup>,
}

impl AliasDataset {
    /// The dataset shipped with the binary.
    pub fn builtin() -> Self {
        // The embedded asset is validated by tests; a broken build is a bug,
        // not a runtime condition.
        Self::from_json(BUILTIN_ALIASES).expect("embedded alias dataset is valid JSON")
    }

    /// Load a dataset from a user-supplied JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let groups: Vec<Vec<String>> = serde_json::from_str(raw)
            .map_err(|e| ConfigError::Invalid(format!("alias dataset: {e}")))?;
        Ok(Self {
            groups: groups
                .into_iter()
                .map(|titles| AliasGroup { titles })
                .collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Find the group a title belongs to.
    ///
    /// First pass: exact case-insensitive equality against any member of any
    /// group. Only if nothing matches exactly does the fuzzy pass run, taking
    /// the highest-scoring member at or above the threshold; ties keep the
    /// first-encountered group in dataset order.
    pub fn find_group(&self, title: &str) -> Option<&AliasGroup> {
        let needle = title.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        for group in &self.groups {
            if group
                .titles
                .iter()
                .any(|t| t.trim().to_lowercase() == needle)
            {
                return Some(group);
            }
        }

        let mut best: Option<(usize, f64)> = None;
        for (idx, group) in self.groups.iter().enumerate() {
            for member in &group.titles {
                let s = score(title, member);
                if best.map_or(true, |(_, b)| s > b) {
                    best = Some((idx, s));
                }
            }
        }

        match best {
            Some((idx, s)) if s >= GROUP_FUZZY_THRESHOLD => {
                tracing::debug!(title, score = s, "fuzzy alias group match");
                Some(&self.groups[idx])
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> AliasDataset {
        AliasDataset::from_json(
            r#"[
                ["Great Teacher Onizuka", "GTO", "Onizuka"],
                ["Shingeki no Kyojin", "Attack on Titan", "AoT"]
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn builtin_dataset_parses() {
        let ds = AliasDataset::builtin();
        assert!(!ds.is_empty());
        assert!(ds.find_group("GTO").is_some());
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let ds = dataset();
        let group = ds.find_group("gto").unwrap();
        assert!(group.titles().contains(&"Great Teacher Onizuka".to_string()));
    }

    #[test]
    fn fuzzy_match_above_threshold() {
        let ds = dataset();
        // One trailing character away from "Onizuka".
        let group = ds.find_group("Onizukaa").unwrap();
        assert!(group.titles().contains(&"GTO".to_string()));
    }

    #[test]
    fn no_match_below_threshold() {
        let ds = dataset();
        assert!(ds.find_group("zzzznotreal").is_none());
    }

    #[test]
    fn empty_title_matches_nothing() {
        let ds = dataset();
        assert!(ds.find_group("   ").is_none());
    }

    #[test]
    fn exact_match_wins_over_any_fuzzy_candidate() {
        // "Attack on Titan" is an exact member of the second group; the first
        // group must not steal it via fuzzy scoring.
        let ds = dataset();
        let group = ds.find_group("attack on titan").unwrap();
        assert!(group.titles().contains(&"Shingeki no Kyojin".to_string()));
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        assert!(AliasDataset::from_json("{not json").is_err());
    }
}
