//! Candidacy database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Candidacy, CandidacyStatus};

const CANDIDACY_COLUMNS: &str =
    "candidacy_id, slot_id, professional_id, status, applied_at, decided_at";

impl Database {
    /// Insert a new candidacy.
    pub fn insert_candidacy(&self, candidacy: &Candidacy) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO candidacies (
                candidacy_id, slot_id, professional_id, status, applied_at, decided_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                candidacy.candidacy_id,
                candidacy.slot_id,
                candidacy.professional_id,
                candidacy.status.as_str(),
                candidacy.applied_at,
                candidacy.decided_at,
            ],
        )?;
        Ok(())
    }

    /// Get the candidacy of a professional for a slot.
    pub fn get_candidacy(&self, slot_id: &str, professional_id: &str) -> DbResult<Option<Candidacy>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {CANDIDACY_COLUMNS} FROM candidacies WHERE slot_id = ?1 AND professional_id = ?2"
                ),
                params![slot_id, professional_id],
                CandidacyRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List candidacies for a slot, oldest application first.
    pub fn list_candidacies_for_slot(
        &self,
        slot_id: &str,
        status: Option<CandidacyStatus>,
    ) -> DbResult<Vec<Candidacy>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {CANDIDACY_COLUMNS} FROM candidacies
            WHERE slot_id = ?1 AND (?2 IS NULL OR status = ?2)
            ORDER BY applied_at, candidacy_id
            "#
        ))?;

        let rows = stmt.query_map(
            params![slot_id, status.map(|s| s.as_str())],
            CandidacyRow::from_row,
        )?;

        let mut candidacies = Vec::new();
        for row in rows {
            candidacies.push(row?.try_into()?);
        }
        Ok(candidacies)
    }

    /// Move one `applied` candidacy to a decided status.
    pub fn decide_candidacy(
        &self,
        slot_id: &str,
        professional_id: &str,
        status: CandidacyStatus,
    ) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE candidacies SET status = ?3, decided_at = ?4
            WHERE slot_id = ?1 AND professional_id = ?2 AND status = 'applied'
            "#,
            params![
                slot_id,
                professional_id,
                status.as_str(),
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Reject every still-open candidacy on a slot.
    ///
    /// Returns the IDs of the professionals rejected.
    pub fn reject_open_candidacies(&self, slot_id: &str) -> DbResult<Vec<String>> {
        let rejected: Vec<String> = self
            .list_candidacies_for_slot(slot_id, Some(CandidacyStatus::Applied))?
            .into_iter()
            .map(|c| c.professional_id)
            .collect();

        self.conn.execute(
            r#"
            UPDATE candidacies SET status = 'rejected', decided_at = ?2
            WHERE slot_id = ?1 AND status = 'applied'
            "#,
            params![slot_id, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(rejected)
    }
}

/// Intermediate row struct for database mapping.
struct CandidacyRow {
    candidacy_id: String,
    slot_id: String,
    professional_id: String,
    status: String,
    applied_at: String,
    decided_at: Option<String>,
}

impl CandidacyRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            candidacy_id: row.get(0)?,
            slot_id: row.get(1)?,
            professional_id: row.get(2)?,
            status: row.get(3)?,
            applied_at: row.get(4)?,
            decided_at: row.get(5)?,
        })
    }
}

impl TryFrom<CandidacyRow> for Candidacy {
    type Error = DbError;

    fn try_from(row: CandidacyRow) -> Result<Self, Self::Error> {
        let status = CandidacyStatus::parse(&row.status)
            .ok_or_else(|| DbError::Constraint(format!("Unknown candidacy status: {}", row.status)))?;

        Ok(Candidacy {
            candidacy_id: row.candidacy_id,
            slot_id: row.slot_id,
            professional_id: row.professional_id,
            status,
            applied_at: row.applied_at,
            decided_at: row.decided_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CorenStatus, Patient, Professional, ShiftType};
    use chrono::NaiveDate;

    fn setup_db() -> (Database, String, Vec<String>) {
        let db = Database::open_in_memory().unwrap();
        let patient = Patient::new("Dona Maria".into());
        db.insert_patient(&patient).unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let slot = db
            .get_or_create_slot(&patient.patient_id, day, ShiftType::Day)
            .unwrap();

        let mut pros = Vec::new();
        for name in ["Ana", "Bruno", "Carla"] {
            let p = Professional::new(name.into(), "técnico".into(), CorenStatus::Active, 4.5);
            db.upsert_professional(&p).unwrap();
            pros.push(p.professional_id);
        }
        (db, slot.slot_id, pros)
    }

    #[test]
    fn test_insert_and_get() {
        let (db, slot_id, pros) = setup_db();

        let c = Candidacy::new(slot_id.clone(), pros[0].clone());
        db.insert_candidacy(&c).unwrap();

        let stored = db.get_candidacy(&slot_id, &pros[0]).unwrap().unwrap();
        assert_eq!(stored.candidacy_id, c.candidacy_id);
        assert!(stored.is_open());
        assert!(db.get_candidacy(&slot_id, &pros[1]).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_application_rejected() {
        let (db, slot_id, pros) = setup_db();

        db.insert_candidacy(&Candidacy::new(slot_id.clone(), pros[0].clone()))
            .unwrap();
        let result = db.insert_candidacy(&Candidacy::new(slot_id, pros[0].clone()));
        assert!(result.is_err());
    }

    #[test]
    fn test_decide_then_reject_rest() {
        let (db, slot_id, pros) = setup_db();
        for pro in &pros {
            db.insert_candidacy(&Candidacy::new(slot_id.clone(), pro.clone()))
                .unwrap();
        }

        assert!(db
            .decide_candidacy(&slot_id, &pros[1], CandidacyStatus::Approved)
            .unwrap());
        // Already decided
        assert!(!db
            .decide_candidacy(&slot_id, &pros[1], CandidacyStatus::Withdrawn)
            .unwrap());

        let mut rejected = db.reject_open_candidacies(&slot_id).unwrap();
        rejected.sort();
        let mut expected = vec![pros[0].clone(), pros[2].clone()];
        expected.sort();
        assert_eq!(rejected, expected);

        let open = db
            .list_candidacies_for_slot(&slot_id, Some(CandidacyStatus::Applied))
            .unwrap();
        assert!(open.is_empty());

        let all = db.list_candidacies_for_slot(&slot_id, None).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|c| c.decided_at.is_some()));
    }
}
