//! SQLite schema definition.

/// Complete database schema for the shift board.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    patient_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    neighborhood TEXT,
    care_needs TEXT NOT NULL DEFAULT '[]',       -- JSON array of strings
    clinical_summary TEXT,                       -- JSON document
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);

-- ============================================================================
-- Professionals
-- ============================================================================

CREATE TABLE IF NOT EXISTS professionals (
    professional_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    role TEXT NOT NULL,
    coren_number TEXT,
    coren_status TEXT NOT NULL CHECK (coren_status IN ('active', 'inactive')),
    rating REAL NOT NULL DEFAULT 0 CHECK (rating >= 0 AND rating <= 5),
    specialties TEXT NOT NULL DEFAULT '[]',      -- JSON array of strings
    neighborhood TEXT,
    phone TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_professionals_coren ON professionals(coren_status);

-- ============================================================================
-- Shift Slots (one per patient / day / shift type)
-- ============================================================================

CREATE TABLE IF NOT EXISTS shift_slots (
    slot_id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL REFERENCES patients(patient_id),
    day_key TEXT NOT NULL,                       -- YYYY-MM-DD
    shift_type TEXT NOT NULL CHECK (shift_type IN ('day', 'night')),
    status TEXT NOT NULL DEFAULT 'open'
        CHECK (status IN ('open', 'pending', 'filled', 'active', 'completed', 'issue')),
    professional_id TEXT REFERENCES professionals(professional_id),
    check_in_at TEXT,
    check_out_at TEXT,
    urgent INTEGER NOT NULL DEFAULT 0,
    progress INTEGER NOT NULL DEFAULT 0 CHECK (progress >= 0 AND progress <= 100),
    anomaly TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (patient_id, day_key, shift_type)
);

CREATE INDEX IF NOT EXISTS idx_slots_day ON shift_slots(day_key);
CREATE INDEX IF NOT EXISTS idx_slots_status ON shift_slots(status);
CREATE INDEX IF NOT EXISTS idx_slots_professional ON shift_slots(professional_id);

-- ============================================================================
-- Candidacies (applications to published slots)
-- ============================================================================

CREATE TABLE IF NOT EXISTS candidacies (
    candidacy_id TEXT PRIMARY KEY,
    slot_id TEXT NOT NULL REFERENCES shift_slots(slot_id),
    professional_id TEXT NOT NULL REFERENCES professionals(professional_id),
    status TEXT NOT NULL DEFAULT 'applied'
        CHECK (status IN ('applied', 'approved', 'rejected', 'withdrawn')),
    applied_at TEXT NOT NULL DEFAULT (datetime('now')),
    decided_at TEXT,
    UNIQUE (slot_id, professional_id)
);

CREATE INDEX IF NOT EXISTS idx_candidacies_slot ON candidacies(slot_id);

-- ============================================================================
-- Slot Ledger (Append-Only, hash-chained)
-- ============================================================================

CREATE TABLE IF NOT EXISTS slot_events (
    sequence INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id TEXT NOT NULL UNIQUE,
    slot_id TEXT NOT NULL REFERENCES shift_slots(slot_id),
    action TEXT NOT NULL,
    from_status TEXT NOT NULL,
    to_status TEXT NOT NULL,
    professional_id TEXT,
    note TEXT,
    recorded_at TEXT NOT NULL,
    prev_hash TEXT NOT NULL,
    hash TEXT NOT NULL UNIQUE
);

CREATE INDEX IF NOT EXISTS idx_slot_events_slot ON slot_events(slot_id);

-- Ledger rows are immutable once written
CREATE TRIGGER IF NOT EXISTS slot_events_no_update BEFORE UPDATE ON slot_events
BEGIN
    SELECT RAISE(ABORT, 'Ledger events are append-only');
END;

CREATE TRIGGER IF NOT EXISTS slot_events_no_delete BEFORE DELETE ON slot_events
BEGIN
    SELECT RAISE(ABORT, 'Ledger events are append-only');
END;
"#;
