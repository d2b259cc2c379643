//! Fuzzy name search over the professional directory.

use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};

use crate::db::Database;
use crate::models::{fold, Professional};

use super::RankingResult;

/// Scores below this are not shown.
const MIN_NAME_SCORE: f64 = 0.5;

/// A directory hit with its match score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectoryMatch {
    pub professional: Professional,
    /// 0.0 - 1.0
    pub score: f64,
}

/// Search professionals by name, best match first.
pub fn search_professionals(db: &Database, query: &str, limit: usize) -> RankingResult<Vec<DirectoryMatch>> {
    let query = fold(query.trim());
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let mut matches: Vec<DirectoryMatch> = db
        .list_professionals()?
        .into_iter()
        .map(|professional| {
            let score = score_name(&query, &professional.name);
            DirectoryMatch { professional, score }
        })
        .filter(|m| m.score >= MIN_NAME_SCORE)
        .collect();

    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches.truncate(limit);
    Ok(matches)
}

/// Score a folded query against a display name.
fn score_name(query: &str, name: &str) -> f64 {
    let name = fold(name);

    // Typing the start of any name part is a full hit
    if name.starts_with(query) || name.split_whitespace().any(|part| part.starts_with(query)) {
        return 1.0;
    }

    let whole = fuzzy_match(query, &name);
    let best_part = name
        .split_whitespace()
        .map(|part| fuzzy_match(query, part))
        .fold(0.0_f64, f64::max);

    whole.max(best_part)
}

/// Jaro-Winkler for typos, Levenshtein for overall similarity.
fn fuzzy_match(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}
