//! Coverage report over a date range.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::{Database, DbResult};
use crate::models::{day_key, ShiftSlot, SlotStatus};

/// Slot counts per status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatusCounts {
    pub open: u32,
    pub pending: u32,
    pub filled: u32,
    pub active: u32,
    pub completed: u32,
    pub issue: u32,
}

impl StatusCounts {
    fn add(&mut self, status: SlotStatus) {
        let counter = match status {
            SlotStatus::Open => &mut self.open,
            SlotStatus::Pending => &mut self.pending,
            SlotStatus::Filled => &mut self.filled,
            SlotStatus::Active => &mut self.active,
            SlotStatus::Completed => &mut self.completed,
            SlotStatus::Issue => &mut self.issue,
        };
        *counter += 1;
    }

    pub fn total(&self) -> u32 {
        self.open + self.pending + self.covered()
    }

    /// Slots with someone assigned.
    pub fn covered(&self) -> u32 {
        self.filled + self.active + self.completed + self.issue
    }

    /// Covered share of all slots; 0 when there are none.
    pub fn fill_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.covered() as f64 / total as f64,
        }
    }
}

/// Coverage of one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientCoverage {
    pub patient_id: String,
    pub patient_name: String,
    pub counts: StatusCounts,
    pub fill_rate: f64,
    /// Urgent slots still open or published
    pub urgent_uncovered: u32,
}

/// Coverage over an inclusive date range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageReport {
    /// `YYYY-MM-DD`
    pub from: String,
    /// `YYYY-MM-DD`, inclusive
    pub to: String,
    pub generated_at: String,
    pub totals: StatusCounts,
    pub fill_rate: f64,
    pub urgent_uncovered: u32,
    /// Ordered by patient name
    pub patients: Vec<PatientCoverage>,
}

impl CoverageReport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV, one row per patient.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str("from,to,patient_id,patient_name,open,pending,filled,active,completed,issue,fill_rate,urgent_uncovered\n");

        for p in &self.patients {
            let c = &p.counts;
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{:.4},{}\n",
                self.from,
                self.to,
                escape_csv(&p.patient_id),
                escape_csv(&p.patient_name),
                c.open,
                c.pending,
                c.filled,
                c.active,
                c.completed,
                c.issue,
                p.fill_rate,
                p.urgent_uncovered,
            ));
        }

        csv
    }
}

fn is_urgent_uncovered(slot: &ShiftSlot) -> bool {
    slot.urgent && !slot.status.is_covered()
}

/// Builds coverage reports from stored slots.
pub struct CoverageExporter<'a> {
    db: &'a Database,
}

impl<'a> CoverageExporter<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Report every stored slot dated within `[from, to]`.
    ///
    /// Only slots that exist are counted; grid cells never viewed are not
    /// created here.
    pub fn export_range(&self, from: NaiveDate, to: NaiveDate) -> DbResult<CoverageReport> {
        let slots = self.db.list_slots_between(from, to, None)?;

        let mut totals = StatusCounts::default();
        let mut urgent_uncovered = 0;
        let mut per_patient: BTreeMap<&str, (StatusCounts, u32)> = BTreeMap::new();

        for slot in &slots {
            totals.add(slot.status);
            let entry = per_patient.entry(slot.patient_id.as_str()).or_default();
            entry.0.add(slot.status);
            if is_urgent_uncovered(slot) {
                urgent_uncovered += 1;
                entry.1 += 1;
            }
        }

        let mut patients = Vec::with_capacity(per_patient.len());
        for (patient_id, (counts, urgent)) in per_patient {
            let patient_name = self
                .db
                .get_patient(patient_id)?
                .map(|p| p.name)
                .unwrap_or_default();
            patients.push(PatientCoverage {
                patient_id: patient_id.to_string(),
                patient_name,
                fill_rate: counts.fill_rate(),
                counts,
                urgent_uncovered: urgent,
            });
        }
        patients.sort_by(|a, b| a.patient_name.cmp(&b.patient_name));

        tracing::debug!(from = %from, to = %to, slots = slots.len(), "coverage report built");

        Ok(CoverageReport {
            from: day_key(from),
            to: day_key(to),
            generated_at: chrono::Utc::now().to_rfc3339(),
            fill_rate: totals.fill_rate(),
            totals,
            urgent_uncovered,
            patients,
        })
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
