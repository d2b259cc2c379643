//! Slot ledger database operations.

use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::{Database, DbResult};

/// A stored slot ledger event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotEvent {
    /// Insertion order, assigned by SQLite
    pub sequence: i64,
    pub event_id: String,
    pub slot_id: String,
    pub action: String,
    pub from_status: String,
    pub to_status: String,
    pub professional_id: Option<String>,
    pub note: Option<String>,
    pub recorded_at: String,
    pub prev_hash: String,
    pub hash: String,
}

impl Database {
    /// Append an event. `sequence` on the input is ignored.
    pub fn insert_slot_event(&self, event: &SlotEvent) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO slot_events (
                event_id, slot_id, action, from_status, to_status,
                professional_id, note, recorded_at, prev_hash, hash
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                event.event_id,
                event.slot_id,
                event.action,
                event.from_status,
                event.to_status,
                event.professional_id,
                event.note,
                event.recorded_at,
                event.prev_hash,
                event.hash,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Hash of the most recent event, if any.
    pub fn last_slot_event_hash(&self) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT hash FROM slot_events ORDER BY sequence DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// All events for one slot, in append order.
    pub fn list_slot_events(&self, slot_id: &str) -> DbResult<Vec<SlotEvent>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT sequence, event_id, slot_id, action, from_status, to_status,
                   professional_id, note, recorded_at, prev_hash, hash
            FROM slot_events
            WHERE slot_id = ?
            ORDER BY sequence
            "#,
        )?;

        let rows = stmt.query_map([slot_id], event_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Every event in append order.
    pub fn list_all_slot_events(&self) -> DbResult<Vec<SlotEvent>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT sequence, event_id, slot_id, action, from_status, to_status,
                   professional_id, note, recorded_at, prev_hash, hash
            FROM slot_events
            ORDER BY sequence
            "#,
        )?;

        let rows = stmt.query_map([], event_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Number of events stored.
    pub fn count_slot_events(&self) -> DbResult<u32> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM slot_events", [], |row| row.get(0))?;
        Ok(count as u32)
    }
}

fn event_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SlotEvent> {
    Ok(SlotEvent {
        sequence: row.get(0)?,
        event_id: row.get(1)?,
        slot_id: row.get(2)?,
        action: row.get(3)?,
        from_status: row.get(4)?,
        to_status: row.get(5)?,
        professional_id: row.get(6)?,
        note: row.get(7)?,
        recorded_at: row.get(8)?,
        prev_hash: row.get(9)?,
        hash: row.get(10)?,
    })
}
