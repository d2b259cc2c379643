//! Hash-chained slot history.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::db::{Database, SlotEvent};
use crate::models::SlotStatus;

use super::LedgerResult;

/// What happened to a slot, before it is chained.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub slot_id: String,
    pub action: String,
    pub from_status: SlotStatus,
    pub to_status: SlotStatus,
    pub professional_id: Option<String>,
    pub note: Option<String>,
}

/// Hashed portion of an event. Field order is part of the hash.
#[derive(Serialize)]
struct EventBody<'a> {
    event_id: &'a str,
    slot_id: &'a str,
    action: &'a str,
    from_status: &'a str,
    to_status: &'a str,
    professional_id: Option<&'a str>,
    note: Option<&'a str>,
    recorded_at: &'a str,
}

impl<'a> From<&'a SlotEvent> for EventBody<'a> {
    fn from(event: &'a SlotEvent) -> Self {
        Self {
            event_id: &event.event_id,
            slot_id: &event.slot_id,
            action: &event.action,
            from_status: &event.from_status,
            to_status: &event.to_status,
            professional_id: event.professional_id.as_deref(),
            note: event.note.as_deref(),
            recorded_at: &event.recorded_at,
        }
    }
}

/// Outcome of walking the whole chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainVerification {
    pub is_valid: bool,
    pub event_count: u32,
    /// First event whose link or hash does not check out
    pub broken_at: Option<String>,
    pub head_hash: Option<String>,
}

/// Append-only ledger of slot transitions.
pub struct SlotLedger<'a> {
    db: &'a Database,
}

impl<'a> SlotLedger<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Chain an entry onto the current head and store it.
    pub fn append(&self, entry: LedgerEntry) -> LedgerResult<SlotEvent> {
        let prev_hash = self.db.last_slot_event_hash()?.unwrap_or_default();

        let mut event = SlotEvent {
            sequence: 0,
            event_id: uuid::Uuid::new_v4().to_string(),
            slot_id: entry.slot_id,
            action: entry.action,
            from_status: entry.from_status.as_str().to_string(),
            to_status: entry.to_status.as_str().to_string(),
            professional_id: entry.professional_id,
            note: entry.note,
            recorded_at: chrono::Utc::now().to_rfc3339(),
            prev_hash,
            hash: String::new(),
        };
        event.hash = event_hash(&event)?;
        event.sequence = self.db.insert_slot_event(&event)?;

        Ok(event)
    }

    /// History of one slot.
    pub fn history(&self, slot_id: &str) -> LedgerResult<Vec<SlotEvent>> {
        Ok(self.db.list_slot_events(slot_id)?)
    }

    /// Recompute every link and hash in append order.
    pub fn verify_chain(&self) -> LedgerResult<ChainVerification> {
        let events = self.db.list_all_slot_events()?;
        Ok(verify_events(&events)?)
    }
}

/// Verify an ordered run of events starting from the genesis link.
pub fn verify_events(events: &[SlotEvent]) -> Result<ChainVerification, serde_json::Error> {
    let mut expected_prev = String::new();

    for event in events {
        if event.prev_hash != expected_prev || event_hash(event)? != event.hash {
            return Ok(ChainVerification {
                is_valid: false,
                event_count: events.len() as u32,
                broken_at: Some(event.event_id.clone()),
                head_hash: events.last().map(|e| e.hash.clone()),
            });
        }
        expected_prev = event.hash.clone();
    }

    Ok(ChainVerification {
        is_valid: true,
        event_count: events.len() as u32,
        broken_at: None,
        head_hash: events.last().map(|e| e.hash.clone()),
    })
}

/// Hash of an event: SHA-256 over the previous hash followed by the body JSON.
pub fn event_hash(event: &SlotEvent) -> Result<String, serde_json::Error> {
    let body = serde_json::to_string(&EventBody::from(event))?;
    let mut data = Vec::with_capacity(event.prev_hash.len() + body.len());
    data.extend_from_slice(event.prev_hash.as_bytes());
    data.extend_from_slice(body.as_bytes());
    Ok(hash_data(&data))
}

/// Hash arbitrary data using SHA-256.
pub fn hash_data(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Patient, ShiftType};
    use chrono::NaiveDate;

    fn setup_db() -> (Database, String) {
        let db = Database::open_in_memory().unwrap();
        let patient = Patient::new("Dona Maria".into());
        db.insert_patient(&patient).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let slot = db
            .get_or_create_slot(&patient.patient_id, day, ShiftType::Day)
            .unwrap();
        (db, slot.slot_id)
    }

    fn entry(slot_id: &str, action: &str, from: SlotStatus, to: SlotStatus) -> LedgerEntry {
        LedgerEntry {
            slot_id: slot_id.into(),
            action: action.into(),
            from_status: from,
            to_status: to,
            professional_id: None,
            note: None,
        }
    }

    #[test]
    fn test_append_links_to_previous() {
        let (db, slot_id) = setup_db();
        let ledger = SlotLedger::new(&db);

        let first = ledger
            .append(entry(&slot_id, "publish", SlotStatus::Open, SlotStatus::Pending))
            .unwrap();
        let second = ledger
            .append(entry(&slot_id, "approve", SlotStatus::Pending, SlotStatus::Filled))
            .unwrap();

        assert_eq!(first.prev_hash, "");
        assert_eq!(second.prev_hash, first.hash);
        assert_eq!(first.hash.len(), 64);

        let history = ledger.history(&slot_id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].to_status, "filled");
    }

    #[test]
    fn test_verify_empty_and_valid_chain() {
        let (db, slot_id) = setup_db();
        let ledger = SlotLedger::new(&db);

        let empty = ledger.verify_chain().unwrap();
        assert!(empty.is_valid);
        assert_eq!(empty.event_count, 0);
        assert!(empty.head_hash.is_none());

        for _ in 0..4 {
            ledger
                .append(entry(&slot_id, "tick", SlotStatus::Active, SlotStatus::Active))
                .unwrap();
        }
        let result = ledger.verify_chain().unwrap();
        assert!(result.is_valid);
        assert_eq!(result.event_count, 4);
        assert!(result.broken_at.is_none());
    }

    #[test]
    fn test_tampered_event_detected() {
        let (db, slot_id) = setup_db();
        let ledger = SlotLedger::new(&db);

        ledger
            .append(entry(&slot_id, "publish", SlotStatus::Open, SlotStatus::Pending))
            .unwrap();
        ledger
            .append(entry(&slot_id, "approve", SlotStatus::Pending, SlotStatus::Filled))
            .unwrap();

        let mut events = db.list_all_slot_events().unwrap();
        events[1].to_status = "completed".into();

        let result = verify_events(&events).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.broken_at, Some(events[1].event_id.clone()));
    }

    #[test]
    fn test_broken_link_detected() {
        let (db, slot_id) = setup_db();
        let ledger = SlotLedger::new(&db);

        for _ in 0..3 {
            ledger
                .append(entry(&slot_id, "publish", SlotStatus::Open, SlotStatus::Pending))
                .unwrap();
        }

        let mut events = db.list_all_slot_events().unwrap();
        events.remove(1);

        let result = verify_events(&events).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.broken_at, Some(events[1].event_id.clone()));
    }

    #[test]
    fn test_hash_deterministic() {
        let hash1 = hash_data(b"plantao");
        let hash2 = hash_data(b"plantao");
        assert_eq!(hash1, hash2);

        // SHA-256 produces 64 hex characters
        assert_eq!(hash1.len(), 64);
    }
}
