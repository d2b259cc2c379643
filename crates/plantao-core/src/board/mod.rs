//! Shift board: slot lifecycle, vacancies and the weekly grid.
//!
//! Every status change runs in one SQLite write transaction: load the slot,
//! apply the action, write it back only if the stored status is unchanged, then
//! append to the ledger. Handles on the same file queue on the write lock, so a
//! second approval sees the slot already `filled`. A handle that cannot get
//! the lock within the busy timeout fails with [`BoardError::Conflict`].

mod grid;
mod transitions;

pub use grid::*;
pub use transitions::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::BoardConfig;
use crate::db::Database;
use crate::ledger::{LedgerEntry, SlotLedger};
use crate::models::{Candidacy, CandidacyStatus, Patient, Professional, ShiftSlot, ShiftType, SlotStatus};

/// Board errors.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Database error: {0}")]
    Database(#[from] crate::db::DbError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] crate::ledger::LedgerError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("Slot not found: {0}")]
    SlotNotFound(String),

    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error("Professional not found: {0}")]
    ProfessionalNotFound(String),

    #[error("Professional not eligible: {0}")]
    Ineligible(String),

    #[error("Concurrent write on: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<rusqlite::Error> for BoardError {
    fn from(e: rusqlite::Error) -> Self {
        BoardError::Database(e.into())
    }
}

pub type BoardResult<T> = Result<T, BoardError>;

/// Result of approving one applicant.
#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    pub slot: ShiftSlot,
    /// Professionals whose open applications were rejected
    pub rejected: Vec<String>,
}

/// Coordinates slot transitions, candidacies and history.
pub struct ShiftBoard<'a> {
    db: &'a Database,
    config: BoardConfig,
}

impl<'a> ShiftBoard<'a> {
    pub fn new(db: &'a Database, config: BoardConfig) -> Self {
        Self { db, config }
    }

    // =========================================================================
    // Grid
    // =========================================================================

    /// Week grid of one patient for the ISO week containing `date`.
    ///
    /// Missing cells are created as `open`.
    pub fn week_grid(&self, patient_id: &str, date: NaiveDate) -> BoardResult<WeekGrid> {
        let patient = self
            .db
            .get_patient(patient_id)?
            .ok_or_else(|| BoardError::PatientNotFound(patient_id.to_string()))?;

        let (start, days) = week_of(date)?;
        let tx = self.begin(patient_id)?;
        let grid = self.build_grid(&patient, start, &days)?;
        tx.commit()?;
        Ok(grid)
    }

    /// Week grids of every patient, ordered by patient name.
    pub fn board_week(&self, date: NaiveDate) -> BoardResult<Vec<WeekGrid>> {
        let (start, days) = week_of(date)?;
        let tx = self.begin("board")?;
        let grids = self
            .db
            .list_patients()?
            .iter()
            .map(|p| self.build_grid(p, start, &days))
            .collect::<BoardResult<Vec<_>>>()?;
        tx.commit()?;
        Ok(grids)
    }

    fn build_grid(&self, patient: &Patient, start: NaiveDate, days: &[NaiveDate]) -> BoardResult<WeekGrid> {
        let mut grid = WeekGrid::new(patient.patient_id.clone(), patient.name.clone(), start);
        for &day in days {
            let day_slot = self.db.get_or_create_slot(&patient.patient_id, day, ShiftType::Day)?;
            let night_slot = self.db.get_or_create_slot(&patient.patient_id, day, ShiftType::Night)?;
            grid.days.push(DayCells {
                day_key: day_slot.day_key.clone(),
                day: day_slot,
                night: night_slot,
            });
        }
        Ok(grid)
    }

    /// Get a slot by ID.
    pub fn slot(&self, slot_id: &str) -> BoardResult<ShiftSlot> {
        self.db
            .get_slot(slot_id)?
            .ok_or_else(|| BoardError::SlotNotFound(slot_id.to_string()))
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// open → pending.
    pub fn publish(&self, slot_id: &str, urgent: bool) -> BoardResult<ShiftSlot> {
        let note = urgent.then(|| "urgent".to_string());
        self.transition(slot_id, SlotAction::Publish { urgent }, note)
    }

    /// open|pending → filled, or active when `start_now`.
    pub fn assign(&self, slot_id: &str, professional_id: &str, start_now: bool) -> BoardResult<ShiftSlot> {
        self.transition(
            slot_id,
            SlotAction::Assign {
                professional_id: professional_id.to_string(),
                start_now,
            },
            None,
        )
    }

    /// filled → active.
    pub fn check_in(&self, slot_id: &str) -> BoardResult<ShiftSlot> {
        self.transition(slot_id, SlotAction::CheckIn, None)
    }

    /// active → completed, or issue when an anomaly was flagged.
    pub fn check_out(&self, slot_id: &str) -> BoardResult<ShiftSlot> {
        self.transition(slot_id, SlotAction::CheckOut, None)
    }

    /// Flag an anomaly on a filled or active slot.
    pub fn flag_anomaly(&self, slot_id: &str, reason: &str) -> BoardResult<ShiftSlot> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(BoardError::InvalidInput("anomaly reason is required".into()));
        }
        self.transition(
            slot_id,
            SlotAction::FlagAnomaly {
                reason: reason.to_string(),
            },
            Some(reason.to_string()),
        )
    }

    /// pending → filled with one applicant; the other open applications are rejected.
    pub fn approve(&self, slot_id: &str, professional_id: &str) -> BoardResult<ApprovalOutcome> {
        let tx = self.begin(slot_id)?;

        let mut slot = self.slot(slot_id)?;
        let action = SlotAction::Approve {
            professional_id: professional_id.to_string(),
        };
        next_status(slot.status, &action, slot.anomaly.is_some()).map_err(|e| self.rejected(slot_id, e))?;
        self.eligible_professional(professional_id)?;

        let has_application = self
            .db
            .get_candidacy(slot_id, professional_id)?
            .is_some_and(|c| c.is_open());
        if !has_application {
            return Err(BoardError::InvalidInput(format!(
                "professional {} has no open application for slot {}",
                professional_id, slot_id
            )));
        }

        let now = chrono::Utc::now().to_rfc3339();
        let previous = slot.apply(&action, &now).map_err(|e| self.rejected(slot_id, e))?;

        if !self.db.update_slot_if_status(&slot, previous)? {
            tracing::warn!(slot_id, professional_id, "approval lost a race");
            return Err(BoardError::Conflict(slot_id.to_string()));
        }

        if !self
            .db
            .decide_candidacy(slot_id, professional_id, CandidacyStatus::Approved)?
        {
            tracing::warn!(slot_id, professional_id, "application closed during approval");
            return Err(BoardError::Conflict(slot_id.to_string()));
        }
        let rejected = self.db.reject_open_candidacies(slot_id)?;

        SlotLedger::new(self.db).append(LedgerEntry {
            slot_id: slot_id.to_string(),
            action: action.name().to_string(),
            from_status: previous,
            to_status: slot.status,
            professional_id: Some(professional_id.to_string()),
            note: (!rejected.is_empty()).then(|| format!("rejected {}", rejected.len())),
        })?;

        tx.commit()?;

        tracing::info!(
            slot_id,
            professional_id,
            rejected = rejected.len(),
            "vacancy approved"
        );
        Ok(ApprovalOutcome { slot, rejected })
    }

    // =========================================================================
    // Candidacies
    // =========================================================================

    /// Apply to a published vacancy.
    pub fn apply_to_vacancy(&self, slot_id: &str, professional_id: &str) -> BoardResult<Candidacy> {
        let tx = self.begin(slot_id)?;

        let slot = self.slot(slot_id)?;
        if slot.status != SlotStatus::Pending {
            return Err(self.rejected(
                slot_id,
                TransitionError {
                    from: slot.status,
                    action: "apply",
                },
            ));
        }
        self.professional(professional_id)?;

        if self.db.get_candidacy(slot_id, professional_id)?.is_some() {
            return Err(BoardError::InvalidInput(format!(
                "professional {} already applied to slot {}",
                professional_id, slot_id
            )));
        }

        let candidacy = Candidacy::new(slot_id.to_string(), professional_id.to_string());
        self.db.insert_candidacy(&candidacy)?;
        self.record(slot_id, "apply", slot.status, slot.status, Some(professional_id), None)?;

        tx.commit()?;
        tracing::info!(slot_id, professional_id, "candidacy received");
        Ok(candidacy)
    }

    /// Withdraw an open application.
    pub fn withdraw(&self, slot_id: &str, professional_id: &str) -> BoardResult<()> {
        let tx = self.begin(slot_id)?;
        let slot = self.slot(slot_id)?;

        if !self
            .db
            .decide_candidacy(slot_id, professional_id, CandidacyStatus::Withdrawn)?
        {
            return Err(BoardError::InvalidInput(format!(
                "professional {} has no open application for slot {}",
                professional_id, slot_id
            )));
        }
        self.record(slot_id, "withdraw", slot.status, slot.status, Some(professional_id), None)?;

        tx.commit()?;
        tracing::info!(slot_id, professional_id, "candidacy withdrawn");
        Ok(())
    }

    /// Applications on a slot, oldest first.
    pub fn candidacies(&self, slot_id: &str) -> BoardResult<Vec<Candidacy>> {
        self.slot(slot_id)?;
        Ok(self.db.list_candidacies_for_slot(slot_id, None)?)
    }

    // =========================================================================
    // Progress timer
    // =========================================================================

    /// Advance every active slot by the configured step.
    pub fn tick(&self) -> BoardResult<usize> {
        self.tick_by(self.config.progress_step)
    }

    /// Advance every active slot by `step`, capped at 100.
    pub fn tick_by(&self, step: u8) -> BoardResult<usize> {
        let moved = self.db.advance_active_progress(step)?;
        tracing::debug!(step, moved, "progress tick");
        Ok(moved)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn transition(&self, slot_id: &str, action: SlotAction, note: Option<String>) -> BoardResult<ShiftSlot> {
        let tx = self.begin(slot_id)?;

        let mut slot = self.slot(slot_id)?;
        let now = chrono::Utc::now().to_rfc3339();
        let previous = slot.apply(&action, &now).map_err(|e| self.rejected(slot_id, e))?;

        if let SlotAction::Assign { professional_id, .. } = &action {
            self.eligible_professional(professional_id)?;
        }

        if !self.db.update_slot_if_status(&slot, previous)? {
            tracing::warn!(slot_id, action = action.name(), "slot changed concurrently");
            return Err(BoardError::Conflict(slot_id.to_string()));
        }

        self.record(
            slot_id,
            action.name(),
            previous,
            slot.status,
            slot.professional_id.as_deref(),
            note,
        )?;
        tx.commit()?;

        tracing::info!(
            slot_id,
            action = action.name(),
            from = previous.as_str(),
            to = slot.status.as_str(),
            "slot transition"
        );
        Ok(slot)
    }

    /// Take the write lock; a busy database means another handle holds it.
    fn begin(&self, key: &str) -> BoardResult<rusqlite::Transaction<'a>> {
        self.db.begin().map_err(|e| {
            if e.is_busy() {
                tracing::warn!(key, "write lock not available");
                BoardError::Conflict(key.to_string())
            } else {
                BoardError::Database(e)
            }
        })
    }

    fn record(
        &self,
        slot_id: &str,
        action: &str,
        from: SlotStatus,
        to: SlotStatus,
        professional_id: Option<&str>,
        note: Option<String>,
    ) -> BoardResult<()> {
        SlotLedger::new(self.db).append(LedgerEntry {
            slot_id: slot_id.to_string(),
            action: action.to_string(),
            from_status: from,
            to_status: to,
            professional_id: professional_id.map(str::to_string),
            note,
        })?;
        Ok(())
    }

    fn rejected(&self, slot_id: &str, error: TransitionError) -> BoardError {
        tracing::warn!(slot_id, from = error.from.as_str(), action = error.action, "transition rejected");
        BoardError::Transition(error)
    }

    fn professional(&self, professional_id: &str) -> BoardResult<Professional> {
        self.db
            .get_professional(professional_id)?
            .ok_or_else(|| BoardError::ProfessionalNotFound(professional_id.to_string()))
    }

    fn eligible_professional(&self, professional_id: &str) -> BoardResult<Professional> {
        let professional = self.professional(professional_id)?;
        if !professional.is_eligible() {
            return Err(BoardError::Ineligible(format!(
                "{} has an inactive COREN registration",
                professional.name
            )));
        }
        Ok(professional)
    }
}

/// Monday and the seven dates of the week containing `date`.
fn week_of(date: NaiveDate) -> BoardResult<(NaiveDate, Vec<NaiveDate>)> {
    week_start(date)
        .and_then(|start| Some((start, week_days(start)?)))
        .ok_or_else(|| BoardError::InvalidInput(format!("week of {} is outside the calendar", date)))
}
