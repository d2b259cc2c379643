//! Candidate ordering and rating filter.
//!
//! Order, most preferred first:
//! 1. COREN active before inactive
//! 2. Already treated this patient before the rest
//! 3. Higher rating first
//!
//! The sort is stable, so full ties keep their input order.

use std::cmp::Ordering;

use crate::config::DEFAULT_MIN_RATING;
use crate::models::{Candidate, CorenStatus};

/// Minimum-rating filter applied before sorting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateFilter {
    pub min_rating: f64,
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self {
            min_rating: DEFAULT_MIN_RATING,
        }
    }
}

impl CandidateFilter {
    pub fn new(min_rating: f64) -> Self {
        Self { min_rating }
    }

    /// NaN ratings never pass.
    pub fn accepts(&self, candidate: &Candidate) -> bool {
        candidate.rating >= self.min_rating
    }
}

fn coren_rank(status: CorenStatus) -> u8 {
    match status {
        CorenStatus::Active => 0,
        CorenStatus::Inactive => 1,
    }
}

/// Three-tier candidate comparator.
pub fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    coren_rank(a.coren_status)
        .cmp(&coren_rank(b.coren_status))
        .then_with(|| b.worked_before().cmp(&a.worked_before()))
        .then_with(|| b.rating.total_cmp(&a.rating))
}

/// Filter by minimum rating, then sort with [`compare_candidates`].
pub fn rank_candidates(candidates: Vec<Candidate>, filter: &CandidateFilter) -> Vec<Candidate> {
    let mut ranked: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| filter.accepts(c))
        .collect();
    ranked.sort_by(compare_candidates);
    ranked
}
