//! Candidate ranking for vacancies.
//!
//! Pipeline: candidacies → tags (history, neighborhood, specialty) → rating filter → ordering

mod directory;
mod order;
mod ranker;

pub use directory::*;
pub use order::*;
pub use ranker::*;

use thiserror::Error;

/// Ranking errors.
#[derive(Error, Debug)]
pub enum RankingError {
    #[error("Database error: {0}")]
    Database(#[from] crate::db::DbError),

    #[error("Slot not found: {0}")]
    SlotNotFound(String),

    #[error("Patient not found: {0}")]
    PatientNotFound(String),
}

pub type RankingResult<T> = Result<T, RankingError>;
