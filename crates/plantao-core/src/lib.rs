//! Plantão Core Library
//!
//! Local-first shift coverage for home-care agencies: a weekly board of day
//! and night shifts per patient, ranked candidates for each vacancy and a
//! hash-chained history of every slot change.
//!
//! # Slot lifecycle
//!
//! ```text
//!        publish           approve            check_in           check_out
//! open ─────────▶ pending ─────────▶ filled ───────────▶ active ───────────▶ completed
//!   │                │                  ▲                   ▲          │
//!   └──── assign ────┴──────────────────┘                   │          └── anomaly ──▶ issue
//!   └──── assign (start now) ───────────────────────────────┘
//! ```
//!
//! # Candidate order
//!
//! Active COREN first, then professionals who already treated the patient,
//! then rating descending. Candidates under the minimum rating (default 4.0)
//! are not shown.
//!
//! # Modules
//!
//! - [`db`]: SQLite persistence with compare-and-set slot writes
//! - [`models`]: Domain types (ShiftSlot, Professional, Patient, Candidacy)
//! - [`board`]: Slot state machine, vacancies and the weekly grid
//! - [`ranking`]: Candidate ordering and directory search
//! - [`ledger`]: Tamper-evident slot history
//! - [`export`]: Coverage reports
//! - [`config`]: Board settings

pub mod board;
pub mod config;
pub mod db;
pub mod export;
pub mod ledger;
pub mod models;
pub mod ranking;

// Re-export commonly used types
pub use board::{BoardError, ShiftBoard, SlotAction, TransitionError, WeekGrid};
pub use config::BoardConfig;
pub use db::Database;
pub use ledger::{ChainVerification, SlotLedger};
pub use models::{
    Candidacy, CandidacyStatus, Candidate, CompatibilityTag, CorenStatus, Patient, Professional,
    ShiftSlot, ShiftType, SlotStatus,
};
pub use ranking::{rank_candidates, CandidateFilter, CandidateRanker};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PlantaoError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Not eligible: {0}")]
    Ineligible(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for PlantaoError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => PlantaoError::NotFound(what),
            other => PlantaoError::DatabaseError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for PlantaoError {
    fn from(e: serde_json::Error) -> Self {
        PlantaoError::SerializationError(e.to_string())
    }
}

impl From<BoardError> for PlantaoError {
    fn from(e: BoardError) -> Self {
        match e {
            BoardError::Database(e) => e.into(),
            BoardError::Ledger(e) => e.into(),
            BoardError::Transition(e) => PlantaoError::InvalidTransition(e.to_string()),
            BoardError::SlotNotFound(id)
            | BoardError::PatientNotFound(id)
            | BoardError::ProfessionalNotFound(id) => PlantaoError::NotFound(id),
            BoardError::Ineligible(msg) => PlantaoError::Ineligible(msg),
            BoardError::Conflict(id) => PlantaoError::Conflict(id),
            BoardError::InvalidInput(msg) => PlantaoError::InvalidInput(msg),
        }
    }
}

impl From<ranking::RankingError> for PlantaoError {
    fn from(e: ranking::RankingError) -> Self {
        match e {
            ranking::RankingError::Database(e) => e.into(),
            ranking::RankingError::SlotNotFound(id) | ranking::RankingError::PatientNotFound(id) => {
                PlantaoError::NotFound(id)
            }
        }
    }
}

impl From<ledger::LedgerError> for PlantaoError {
    fn from(e: ledger::LedgerError) -> Self {
        match e {
            ledger::LedgerError::Database(e) => e.into(),
            ledger::LedgerError::Json(e) => e.into(),
        }
    }
}

impl From<config::ConfigError> for PlantaoError {
    fn from(e: config::ConfigError) -> Self {
        PlantaoError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for PlantaoError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PlantaoError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, PlantaoError> {
    models::parse_day_key(value)
        .ok_or_else(|| PlantaoError::InvalidInput(format!("expected YYYY-MM-DD, got '{}'", value)))
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Install a stderr log subscriber. Later calls are no-ops.
///
/// `level` is one of `trace`, `debug`, `info`, `warn`, `error`.
#[uniffi::export]
pub fn init_logging(level: String) -> Result<(), PlantaoError> {
    let level: tracing::Level = level
        .parse()
        .map_err(|_| PlantaoError::InvalidInput(format!("unknown log level '{}'", level)))?;
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
    Ok(())
}

/// Open or create a database at the given path with default settings.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<PlantaoCore>, PlantaoError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(PlantaoCore::new(db, BoardConfig::default())))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<PlantaoCore>, PlantaoError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(PlantaoCore::new(db, BoardConfig::default())))
}

/// Open using `PLANTAO_*` environment settings.
///
/// Without `PLANTAO_DB_PATH` the database lives in memory.
#[uniffi::export]
pub fn open_from_env() -> Result<Arc<PlantaoCore>, PlantaoError> {
    let config = BoardConfig::from_env()?;
    let db = match &config.db_path {
        Some(path) => Database::open(path)?,
        None => Database::open_in_memory()?,
    };
    tracing::info!(db_path = ?config.db_path, min_rating = config.min_rating, "board opened");
    Ok(Arc::new(PlantaoCore::new(db, config)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe board handle for FFI.
#[derive(uniffi::Object)]
pub struct PlantaoCore {
    db: Arc<Mutex<Database>>,
    config: BoardConfig,
}

impl PlantaoCore {
    fn new(db: Database, config: BoardConfig) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            config,
        }
    }

    fn filter(&self) -> CandidateFilter {
        CandidateFilter::new(self.config.min_rating)
    }
}

#[uniffi::export]
impl PlantaoCore {
    // =========================================================================
    // Settings
    // =========================================================================

    /// Minimum rating used when ranking candidates.
    pub fn min_rating(&self) -> f64 {
        self.config.min_rating
    }

    /// How often the host should call [`PlantaoCore::tick`].
    pub fn tick_interval_secs(&self) -> u64 {
        self.config.tick_interval_secs
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a patient.
    pub fn create_patient(
        &self,
        name: String,
        neighborhood: Option<String>,
        care_needs: Vec<String>,
    ) -> Result<FfiPatient, PlantaoError> {
        if name.trim().is_empty() {
            return Err(PlantaoError::InvalidInput("patient name is required".into()));
        }
        let db = self.db.lock()?;
        let mut patient = Patient::new(name.trim().to_string());
        patient.neighborhood = neighborhood;
        patient.care_needs = care_needs;
        db.insert_patient(&patient)?;
        Ok(patient.into())
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, patient_id: String) -> Result<Option<FfiPatient>, PlantaoError> {
        let db = self.db.lock()?;
        Ok(db.get_patient(&patient_id)?.map(|p| p.into()))
    }

    /// All patients, ordered by name.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, PlantaoError> {
        let db = self.db.lock()?;
        Ok(db.list_patients()?.into_iter().map(|p| p.into()).collect())
    }

    /// Replace the free-form clinical summary. Must be valid JSON.
    pub fn set_clinical_summary(&self, patient_id: String, summary_json: String) -> Result<(), PlantaoError> {
        let summary = models::normalize_clinical_summary(&summary_json)
            .map_err(|e| PlantaoError::InvalidInput(format!("clinical summary: {}", e)))?;
        let db = self.db.lock()?;
        if !db.set_patient_clinical_summary(&patient_id, &summary)? {
            return Err(PlantaoError::NotFound(patient_id));
        }
        Ok(())
    }

    // =========================================================================
    // Professional Operations
    // =========================================================================

    /// Add or update a professional.
    pub fn upsert_professional(&self, professional: FfiProfessional) -> Result<FfiProfessional, PlantaoError> {
        let professional = Professional::try_from(professional)?;
        professional.validate().map_err(PlantaoError::InvalidInput)?;
        let db = self.db.lock()?;
        db.upsert_professional(&professional)?;
        Ok(professional.into())
    }

    /// Get a professional by ID.
    pub fn get_professional(&self, professional_id: String) -> Result<Option<FfiProfessional>, PlantaoError> {
        let db = self.db.lock()?;
        Ok(db.get_professional(&professional_id)?.map(|p| p.into()))
    }

    /// All professionals, ordered by name.
    pub fn list_professionals(&self) -> Result<Vec<FfiProfessional>, PlantaoError> {
        let db = self.db.lock()?;
        Ok(db.list_professionals()?.into_iter().map(|p| p.into()).collect())
    }

    /// Record a COREN status change (`active` / `inactive`).
    pub fn set_coren_status(&self, professional_id: String, status: String) -> Result<(), PlantaoError> {
        let status = CorenStatus::parse(&status)
            .ok_or_else(|| PlantaoError::InvalidInput(format!("unknown COREN status '{}'", status)))?;
        let db = self.db.lock()?;
        if !db.set_coren_status(&professional_id, status)? {
            return Err(PlantaoError::NotFound(professional_id));
        }
        tracing::info!(professional_id = %professional_id, coren = status.as_str(), "COREN status updated");
        Ok(())
    }

    /// Fuzzy name search, best match first.
    pub fn search_professionals(&self, query: String, limit: u32) -> Result<Vec<FfiDirectoryMatch>, PlantaoError> {
        let db = self.db.lock()?;
        let matches = ranking::search_professionals(&db, &query, limit as usize)?;
        Ok(matches.into_iter().map(|m| m.into()).collect())
    }

    // =========================================================================
    // Board Operations
    // =========================================================================

    /// One patient's week containing `date` (`YYYY-MM-DD`).
    pub fn week_grid(&self, patient_id: String, date: String) -> Result<FfiWeekGrid, PlantaoError> {
        let date = parse_date(&date)?;
        let db = self.db.lock()?;
        let grid = ShiftBoard::new(&db, self.config.clone()).week_grid(&patient_id, date)?;
        Ok(grid.into())
    }

    /// Every patient's week containing `date`.
    pub fn board_week(&self, date: String) -> Result<Vec<FfiWeekGrid>, PlantaoError> {
        let date = parse_date(&date)?;
        let db = self.db.lock()?;
        let grids = ShiftBoard::new(&db, self.config.clone()).board_week(date)?;
        Ok(grids.into_iter().map(|g| g.into()).collect())
    }

    /// Get a slot by ID.
    pub fn get_slot(&self, slot_id: String) -> Result<FfiSlot, PlantaoError> {
        let db = self.db.lock()?;
        Ok(ShiftBoard::new(&db, self.config.clone()).slot(&slot_id)?.into())
    }

    /// Slots in one status (`open`, `pending`, ...), by date.
    pub fn list_slots_by_status(&self, status: String) -> Result<Vec<FfiSlot>, PlantaoError> {
        let status = SlotStatus::parse(&status)
            .ok_or_else(|| PlantaoError::InvalidInput(format!("unknown slot status '{}'", status)))?;
        let db = self.db.lock()?;
        Ok(db.list_slots_by_status(status)?.into_iter().map(|s| s.into()).collect())
    }

    /// Advertise an open slot.
    pub fn publish(&self, slot_id: String, urgent: bool) -> Result<FfiSlot, PlantaoError> {
        let db = self.db.lock()?;
        Ok(ShiftBoard::new(&db, self.config.clone()).publish(&slot_id, urgent)?.into())
    }

    /// Staff a slot directly.
    pub fn assign(&self, slot_id: String, professional_id: String, start_now: bool) -> Result<FfiSlot, PlantaoError> {
        let db = self.db.lock()?;
        let slot = ShiftBoard::new(&db, self.config.clone()).assign(&slot_id, &professional_id, start_now)?;
        Ok(slot.into())
    }

    /// Apply to a published vacancy.
    pub fn apply_to_vacancy(&self, slot_id: String, professional_id: String) -> Result<FfiCandidacy, PlantaoError> {
        let db = self.db.lock()?;
        let candidacy = ShiftBoard::new(&db, self.config.clone()).apply_to_vacancy(&slot_id, &professional_id)?;
        Ok(candidacy.into())
    }

    /// Withdraw an open application.
    pub fn withdraw(&self, slot_id: String, professional_id: String) -> Result<(), PlantaoError> {
        let db = self.db.lock()?;
        ShiftBoard::new(&db, self.config.clone()).withdraw(&slot_id, &professional_id)?;
        Ok(())
    }

    /// Applications on a slot, oldest first.
    pub fn list_candidacies(&self, slot_id: String) -> Result<Vec<FfiCandidacy>, PlantaoError> {
        let db = self.db.lock()?;
        let candidacies = ShiftBoard::new(&db, self.config.clone()).candidacies(&slot_id)?;
        Ok(candidacies.into_iter().map(|c| c.into()).collect())
    }

    /// Approve one applicant; returns the filled slot.
    pub fn approve(&self, slot_id: String, professional_id: String) -> Result<FfiApproval, PlantaoError> {
        let db = self.db.lock()?;
        let outcome = ShiftBoard::new(&db, self.config.clone()).approve(&slot_id, &professional_id)?;
        Ok(FfiApproval {
            slot: outcome.slot.into(),
            rejected_professional_ids: outcome.rejected,
        })
    }

    /// Start a filled shift.
    pub fn check_in(&self, slot_id: String) -> Result<FfiSlot, PlantaoError> {
        let db = self.db.lock()?;
        Ok(ShiftBoard::new(&db, self.config.clone()).check_in(&slot_id)?.into())
    }

    /// End an active shift.
    pub fn check_out(&self, slot_id: String) -> Result<FfiSlot, PlantaoError> {
        let db = self.db.lock()?;
        Ok(ShiftBoard::new(&db, self.config.clone()).check_out(&slot_id)?.into())
    }

    /// Flag something wrong with a filled or active shift.
    pub fn flag_anomaly(&self, slot_id: String, reason: String) -> Result<FfiSlot, PlantaoError> {
        let db = self.db.lock()?;
        Ok(ShiftBoard::new(&db, self.config.clone()).flag_anomaly(&slot_id, &reason)?.into())
    }

    /// Advance progress of active shifts; returns how many moved.
    pub fn tick(&self) -> Result<u32, PlantaoError> {
        let db = self.db.lock()?;
        Ok(ShiftBoard::new(&db, self.config.clone()).tick()? as u32)
    }

    // =========================================================================
    // Ranking Operations
    // =========================================================================

    /// Applicants of a slot in preference order.
    pub fn rank_candidates(&self, slot_id: String) -> Result<Vec<FfiCandidate>, PlantaoError> {
        let db = self.db.lock()?;
        let ranked = CandidateRanker::new(&db).rank_for_slot(&slot_id, &self.filter())?;
        Ok(ranked.into_iter().map(|c| c.into()).collect())
    }

    /// Every professional in preference order, for direct assignment.
    pub fn rank_pool(&self, slot_id: String) -> Result<Vec<FfiCandidate>, PlantaoError> {
        let db = self.db.lock()?;
        let ranked = CandidateRanker::new(&db).rank_pool_for_slot(&slot_id, &self.filter())?;
        Ok(ranked.into_iter().map(|c| c.into()).collect())
    }

    // =========================================================================
    // Ledger Operations
    // =========================================================================

    /// Recorded events of one slot, oldest first.
    pub fn slot_history(&self, slot_id: String) -> Result<Vec<FfiSlotEvent>, PlantaoError> {
        let db = self.db.lock()?;
        let events = SlotLedger::new(&db).history(&slot_id)?;
        Ok(events.into_iter().map(|e| e.into()).collect())
    }

    /// Check every hash link in the history.
    pub fn verify_chain(&self) -> Result<FfiChainVerification, PlantaoError> {
        let db = self.db.lock()?;
        Ok(SlotLedger::new(&db).verify_chain()?.into())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Coverage between two dates (inclusive) as JSON.
    pub fn export_coverage_json(&self, from: String, to: String) -> Result<String, PlantaoError> {
        let (from, to) = (parse_date(&from)?, parse_date(&to)?);
        let db = self.db.lock()?;
        let report = export::CoverageExporter::new(&db).export_range(from, to)?;
        Ok(report.to_json()?)
    }

    /// Coverage between two dates (inclusive) as CSV.
    pub fn export_coverage_csv(&self, from: String, to: String) -> Result<String, PlantaoError> {
        let (from, to) = (parse_date(&from)?, parse_date(&to)?);
        let db = self.db.lock()?;
        let report = export::CoverageExporter::new(&db).export_range(from, to)?;
        Ok(report.to_csv())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub patient_id: String,
    pub name: String,
    pub neighborhood: Option<String>,
    pub care_needs: Vec<String>,
    pub clinical_summary: Option<String>,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            patient_id: patient.patient_id,
            name: patient.name,
            neighborhood: patient.neighborhood,
            care_needs: patient.care_needs,
            clinical_summary: patient.clinical_summary,
        }
    }
}

/// FFI-safe professional. An empty `professional_id` creates a new record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProfessional {
    pub professional_id: String,
    pub name: String,
    pub role: String,
    pub coren_number: Option<String>,
    pub coren_status: String,
    pub rating: f64,
    pub specialties: Vec<String>,
    pub neighborhood: Option<String>,
    pub phone: Option<String>,
}

impl From<Professional> for FfiProfessional {
    fn from(p: Professional) -> Self {
        Self {
            professional_id: p.professional_id,
            name: p.name,
            role: p.role,
            coren_number: p.coren_number,
            coren_status: p.coren_status.as_str().to_string(),
            rating: p.rating,
            specialties: p.specialties,
            neighborhood: p.neighborhood,
            phone: p.phone,
        }
    }
}

impl TryFrom<FfiProfessional> for Professional {
    type Error = PlantaoError;

    fn try_from(p: FfiProfessional) -> Result<Self, Self::Error> {
        let coren_status = CorenStatus::parse(&p.coren_status)
            .ok_or_else(|| PlantaoError::InvalidInput(format!("unknown COREN status '{}'", p.coren_status)))?;

        let mut professional = Professional::new(p.name, p.role, coren_status, p.rating);
        if !p.professional_id.is_empty() {
            professional.professional_id = p.professional_id;
        }
        professional.coren_number = p.coren_number;
        professional.specialties = p.specialties;
        professional.neighborhood = p.neighborhood;
        professional.phone = p.phone;
        Ok(professional)
    }
}

/// FFI-safe directory hit.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDirectoryMatch {
    pub professional: FfiProfessional,
    pub score: f64,
}

impl From<ranking::DirectoryMatch> for FfiDirectoryMatch {
    fn from(m: ranking::DirectoryMatch) -> Self {
        Self {
            professional: m.professional.into(),
            score: m.score,
        }
    }
}

/// FFI-safe shift slot.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSlot {
    pub slot_id: String,
    pub patient_id: String,
    pub day_key: String,
    pub shift_type: String,
    pub status: String,
    pub professional_id: Option<String>,
    pub check_in_at: Option<String>,
    pub check_out_at: Option<String>,
    pub urgent: bool,
    pub progress: u8,
    pub anomaly: Option<String>,
}

impl From<ShiftSlot> for FfiSlot {
    fn from(slot: ShiftSlot) -> Self {
        Self {
            slot_id: slot.slot_id,
            patient_id: slot.patient_id,
            day_key: slot.day_key,
            shift_type: slot.shift_type.as_str().to_string(),
            status: slot.status.as_str().to_string(),
            professional_id: slot.professional_id,
            check_in_at: slot.check_in_at,
            check_out_at: slot.check_out_at,
            urgent: slot.urgent,
            progress: slot.progress,
            anomaly: slot.anomaly,
        }
    }
}

/// FFI-safe calendar column.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDayCells {
    pub day_key: String,
    pub day: FfiSlot,
    pub night: FfiSlot,
}

/// FFI-safe week grid.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiWeekGrid {
    pub patient_id: String,
    pub patient_name: String,
    pub week_start: String,
    pub days: Vec<FfiDayCells>,
}

impl From<WeekGrid> for FfiWeekGrid {
    fn from(grid: WeekGrid) -> Self {
        Self {
            patient_id: grid.patient_id,
            patient_name: grid.patient_name,
            week_start: grid.week_start,
            days: grid
                .days
                .into_iter()
                .map(|d| FfiDayCells {
                    day_key: d.day_key,
                    day: d.day.into(),
                    night: d.night.into(),
                })
                .collect(),
        }
    }
}

/// FFI-safe candidacy.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCandidacy {
    pub candidacy_id: String,
    pub slot_id: String,
    pub professional_id: String,
    pub status: String,
    pub applied_at: String,
    pub decided_at: Option<String>,
}

impl From<Candidacy> for FfiCandidacy {
    fn from(c: Candidacy) -> Self {
        Self {
            candidacy_id: c.candidacy_id,
            slot_id: c.slot_id,
            professional_id: c.professional_id,
            status: c.status.as_str().to_string(),
            applied_at: c.applied_at,
            decided_at: c.decided_at,
        }
    }
}

/// FFI-safe approval result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiApproval {
    pub slot: FfiSlot,
    pub rejected_professional_ids: Vec<String>,
}

/// FFI-safe ranked candidate.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCandidate {
    pub professional_id: String,
    pub name: String,
    pub rating: f64,
    pub coren_status: String,
    pub tags: Vec<String>,
}

impl From<Candidate> for FfiCandidate {
    fn from(c: Candidate) -> Self {
        Self {
            professional_id: c.professional_id,
            name: c.name,
            rating: c.rating,
            coren_status: c.coren_status.as_str().to_string(),
            tags: c.tags.iter().map(|t| t.as_str().to_string()).collect(),
        }
    }
}

/// FFI-safe ledger event.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSlotEvent {
    pub sequence: i64,
    pub event_id: String,
    pub slot_id: String,
    pub action: String,
    pub from_status: String,
    pub to_status: String,
    pub professional_id: Option<String>,
    pub note: Option<String>,
    pub recorded_at: String,
    pub hash: String,
}

impl From<db::SlotEvent> for FfiSlotEvent {
    fn from(e: db::SlotEvent) -> Self {
        Self {
            sequence: e.sequence,
            event_id: e.event_id,
            slot_id: e.slot_id,
            action: e.action,
            from_status: e.from_status,
            to_status: e.to_status,
            professional_id: e.professional_id,
            note: e.note,
            recorded_at: e.recorded_at,
            hash: e.hash,
        }
    }
}

/// FFI-safe chain check result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiChainVerification {
    pub is_valid: bool,
    pub event_count: u32,
    pub broken_at: Option<String>,
    pub head_hash: Option<String>,
}

impl From<ChainVerification> for FfiChainVerification {
    fn from(v: ChainVerification) -> Self {
        Self {
            is_valid: v.is_valid,
            event_count: v.event_count,
            broken_at: v.broken_at,
            head_hash: v.head_hash,
        }
    }
}
