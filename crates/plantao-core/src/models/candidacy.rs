//! Candidacy and ranked-candidate models.

use serde::{Deserialize, Serialize};

use super::professional::{CorenStatus, Professional};

/// Status of a professional's application to a vacancy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CandidacyStatus {
    /// Awaiting a decision
    Applied,
    /// Selected for the shift
    Approved,
    /// Another candidate was selected
    Rejected,
    /// Professional withdrew before a decision
    Withdrawn,
}

impl CandidacyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidacyStatus::Applied => "applied",
            CandidacyStatus::Approved => "approved",
            CandidacyStatus::Rejected => "rejected",
            CandidacyStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "applied" => Some(CandidacyStatus::Applied),
            "approved" => Some(CandidacyStatus::Approved),
            "rejected" => Some(CandidacyStatus::Rejected),
            "withdrawn" => Some(CandidacyStatus::Withdrawn),
            _ => None,
        }
    }
}

/// A professional's application to one published slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidacy {
    pub candidacy_id: String,
    pub slot_id: String,
    pub professional_id: String,
    pub status: CandidacyStatus,
    pub applied_at: String,
    /// Set when approved, rejected or withdrawn
    pub decided_at: Option<String>,
}

impl Candidacy {
    /// Create a fresh application.
    pub fn new(slot_id: String, professional_id: String) -> Self {
        Self {
            candidacy_id: uuid::Uuid::new_v4().to_string(),
            slot_id,
            professional_id,
            status: CandidacyStatus::Applied,
            applied_at: chrono::Utc::now().to_rfc3339(),
            decided_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == CandidacyStatus::Applied
    }
}

/// Compatibility hints shown next to a candidate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityTag {
    /// Has completed a shift for this patient before
    TreatedPatientBefore,
    /// Lives in the patient's neighborhood
    SameNeighborhood,
    /// Has a specialty matching one of the patient's care needs
    SpecialtyMatch,
}

impl CompatibilityTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityTag::TreatedPatientBefore => "treated_patient_before",
            CompatibilityTag::SameNeighborhood => "same_neighborhood",
            CompatibilityTag::SpecialtyMatch => "specialty_match",
        }
    }
}

/// A professional as seen from one vacancy, ready for ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub professional_id: String,
    pub name: String,
    pub rating: f64,
    pub coren_status: CorenStatus,
    pub tags: Vec<CompatibilityTag>,
}

impl Candidate {
    /// Build a candidate from a professional and precomputed tags.
    pub fn from_professional(professional: &Professional, tags: Vec<CompatibilityTag>) -> Self {
        Self {
            professional_id: professional.professional_id.clone(),
            name: professional.name.clone(),
            rating: professional.rating,
            coren_status: professional.coren_status,
            tags,
        }
    }

    pub fn has_tag(&self, tag: CompatibilityTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Shortcut for the "already treated this patient" tag.
    pub fn worked_before(&self) -> bool {
        self.has_tag(CompatibilityTag::TreatedPatientBefore)
    }
}
