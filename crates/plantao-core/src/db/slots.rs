//! Shift slot database operations.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{day_key, ShiftSlot, ShiftType, SlotStatus};

const SLOT_COLUMNS: &str = r#"
    slot_id, patient_id, day_key, shift_type, status, professional_id,
    check_in_at, check_out_at, urgent, progress, anomaly, created_at, updated_at
"#;

impl Database {
    /// Get the slot for a calendar cell, creating it as `open` if missing.
    pub fn get_or_create_slot(
        &self,
        patient_id: &str,
        day: NaiveDate,
        shift_type: ShiftType,
    ) -> DbResult<ShiftSlot> {
        let fresh = ShiftSlot::new(patient_id.to_string(), day, shift_type);

        self.conn.execute(
            r#"
            INSERT OR IGNORE INTO shift_slots (
                slot_id, patient_id, day_key, shift_type, status, progress, urgent,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, 'open', 0, 0, ?5, ?6)
            "#,
            params![
                fresh.slot_id,
                fresh.patient_id,
                fresh.day_key,
                shift_type.as_str(),
                fresh.created_at,
                fresh.updated_at,
            ],
        )?;

        self.get_slot_by_cell(patient_id, day, shift_type)?
            .ok_or_else(|| DbError::NotFound(format!("slot {} {} {}", patient_id, fresh.day_key, shift_type.as_str())))
    }

    /// Get a slot by ID.
    pub fn get_slot(&self, slot_id: &str) -> DbResult<Option<ShiftSlot>> {
        self.conn
            .query_row(
                &format!("SELECT {SLOT_COLUMNS} FROM shift_slots WHERE slot_id = ?"),
                [slot_id],
                SlotRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Get a slot by its calendar cell.
    pub fn get_slot_by_cell(
        &self,
        patient_id: &str,
        day: NaiveDate,
        shift_type: ShiftType,
    ) -> DbResult<Option<ShiftSlot>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {SLOT_COLUMNS} FROM shift_slots WHERE patient_id = ?1 AND day_key = ?2 AND shift_type = ?3"
                ),
                params![patient_id, day_key(day), shift_type.as_str()],
                SlotRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List slots whose date falls in `[from, to]`, optionally for one patient.
    pub fn list_slots_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        patient_id: Option<&str>,
    ) -> DbResult<Vec<ShiftSlot>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {SLOT_COLUMNS} FROM shift_slots
            WHERE day_key >= ?1 AND day_key <= ?2
              AND (?3 IS NULL OR patient_id = ?3)
            ORDER BY day_key, shift_type, patient_id
            "#
        ))?;

        let rows = stmt.query_map(
            params![day_key(from), day_key(to), patient_id],
            SlotRow::from_row,
        )?;

        let mut slots = Vec::new();
        for row in rows {
            slots.push(row?.try_into()?);
        }
        Ok(slots)
    }

    /// List slots in a given status.
    pub fn list_slots_by_status(&self, status: SlotStatus) -> DbResult<Vec<ShiftSlot>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SLOT_COLUMNS} FROM shift_slots WHERE status = ? ORDER BY day_key, shift_type"
        ))?;

        let rows = stmt.query_map([status.as_str()], SlotRow::from_row)?;

        let mut slots = Vec::new();
        for row in rows {
            slots.push(row?.try_into()?);
        }
        Ok(slots)
    }

    /// Write a slot only if its stored status still equals `expected`.
    ///
    /// Returns `false` when another writer changed the slot first.
    pub fn update_slot_if_status(&self, slot: &ShiftSlot, expected: SlotStatus) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE shift_slots SET
                status = ?3,
                professional_id = ?4,
                check_in_at = ?5,
                check_out_at = ?6,
                urgent = ?7,
                progress = ?8,
                anomaly = ?9,
                updated_at = ?10
            WHERE slot_id = ?1 AND status = ?2
            "#,
            params![
                slot.slot_id,
                expected.as_str(),
                slot.status.as_str(),
                slot.professional_id,
                slot.check_in_at,
                slot.check_out_at,
                slot.urgent,
                slot.progress,
                slot.anomaly,
                slot.updated_at,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Advance progress of every active slot, capped at 100.
    ///
    /// Returns the number of slots that moved.
    pub fn advance_active_progress(&self, step: u8) -> DbResult<usize> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE shift_slots SET
                progress = MIN(100, progress + ?1),
                updated_at = datetime('now')
            WHERE status = 'active' AND progress < 100
            "#,
            [step],
        )?;
        Ok(rows_affected)
    }
}

/// Intermediate row struct for database mapping.
struct SlotRow {
    slot_id: String,
    patient_id: String,
    day_key: String,
    shift_type: String,
    status: String,
    professional_id: Option<String>,
    check_in_at: Option<String>,
    check_out_at: Option<String>,
    urgent: bool,
    progress: u8,
    anomaly: Option<String>,
    created_at: String,
    updated_at: String,
}

impl SlotRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            slot_id: row.get(0)?,
            patient_id: row.get(1)?,
            day_key: row.get(2)?,
            shift_type: row.get(3)?,
            status: row.get(4)?,
            professional_id: row.get(5)?,
            check_in_at: row.get(6)?,
            check_out_at: row.get(7)?,
            urgent: row.get(8)?,
            progress: row.get(9)?,
            anomaly: row.get(10)?,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        })
    }
}

impl TryFrom<SlotRow> for ShiftSlot {
    type Error = DbError;

    fn try_from(row: SlotRow) -> Result<Self, Self::Error> {
        let shift_type = ShiftType::parse(&row.shift_type)
            .ok_or_else(|| DbError::Constraint(format!("Unknown shift type: {}", row.shift_type)))?;
        let status = SlotStatus::parse(&row.status)
            .ok_or_else(|| DbError::Constraint(format!("Unknown slot status: {}", row.status)))?;

        Ok(ShiftSlot {
            slot_id: row.slot_id,
            patient_id: row.patient_id,
            day_key: row.day_key,
            shift_type,
            status,
            professional_id: row.professional_id,
            check_in_at: row.check_in_at,
            check_out_at: row.check_out_at,
            urgent: row.urgent,
            progress: row.progress,
            anomaly: row.anomaly,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
