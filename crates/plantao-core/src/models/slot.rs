//! Shift slot models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day or night shift within one calendar date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    Day,
    Night,
}

impl ShiftType {
    pub const ALL: [ShiftType; 2] = [ShiftType::Day, ShiftType::Night];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftType::Day => "day",
            ShiftType::Night => "night",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "day" => Some(ShiftType::Day),
            "night" => Some(ShiftType::Night),
            _ => None,
        }
    }
}

/// Coverage status of a shift slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// No one assigned, not yet advertised
    Open,
    /// Published as a vacancy, accepting candidacies
    Pending,
    /// A professional is confirmed for the shift
    Filled,
    /// Shift in progress (checked in)
    Active,
    /// Checked out without anomalies
    Completed,
    /// Checked out with an anomaly flagged
    Issue,
}

impl SlotStatus {
    pub const ALL: [SlotStatus; 6] = [
        SlotStatus::Open,
        SlotStatus::Pending,
        SlotStatus::Filled,
        SlotStatus::Active,
        SlotStatus::Completed,
        SlotStatus::Issue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Open => "open",
            SlotStatus::Pending => "pending",
            SlotStatus::Filled => "filled",
            SlotStatus::Active => "active",
            SlotStatus::Completed => "completed",
            SlotStatus::Issue => "issue",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(SlotStatus::Open),
            "pending" => Some(SlotStatus::Pending),
            "filled" => Some(SlotStatus::Filled),
            "active" => Some(SlotStatus::Active),
            "completed" => Some(SlotStatus::Completed),
            "issue" => Some(SlotStatus::Issue),
            _ => None,
        }
    }

    /// Whether a professional is attached to the slot in this status.
    pub fn is_covered(&self) -> bool {
        matches!(
            self,
            SlotStatus::Filled | SlotStatus::Active | SlotStatus::Completed | SlotStatus::Issue
        )
    }

    /// Terminal statuses accept no further actions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SlotStatus::Completed | SlotStatus::Issue)
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single day-or-night staffing unit for one patient on one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShiftSlot {
    /// Surrogate key (UUID)
    pub slot_id: String,
    /// Patient the shift covers
    pub patient_id: String,
    /// Calendar date, `YYYY-MM-DD`
    pub day_key: String,
    pub shift_type: ShiftType,
    pub status: SlotStatus,
    /// Assigned or approved professional
    pub professional_id: Option<String>,
    pub check_in_at: Option<String>,
    pub check_out_at: Option<String>,
    /// Vacancy flagged as urgent when published
    pub urgent: bool,
    /// In-shift progress, 0-100
    pub progress: u8,
    /// Anomaly reason; its presence turns a check-out into `Issue`
    pub anomaly: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ShiftSlot {
    /// Create an open slot for a calendar cell.
    pub fn new(patient_id: String, day: NaiveDate, shift_type: ShiftType) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            slot_id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            day_key: day_key(day),
            shift_type,
            status: SlotStatus::Open,
            professional_id: None,
            check_in_at: None,
            check_out_at: None,
            urgent: false,
            progress: 0,
            anomaly: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Parse the slot date.
    pub fn date(&self) -> Option<NaiveDate> {
        parse_day_key(&self.day_key)
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Format a date as a slot day key.
pub fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` day key.
pub fn parse_day_key(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
