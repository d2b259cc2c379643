//! Weekly day/night grid per patient.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{day_key, ShiftSlot, SlotStatus};

/// Monday of the ISO week containing `date`, `None` before the calendar's first Monday.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(date.weekday().num_days_from_monday() as u64))
}

/// The seven dates of the week beginning at `start`, `None` past the calendar's end.
pub fn week_days(start: NaiveDate) -> Option<Vec<NaiveDate>> {
    (0..7)
        .map(|offset| start.checked_add_days(Days::new(offset)))
        .collect()
}

/// One calendar column: the day and night slots of a date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayCells {
    pub day_key: String,
    pub day: ShiftSlot,
    pub night: ShiftSlot,
}

/// A patient's week on the board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekGrid {
    pub patient_id: String,
    pub patient_name: String,
    /// Monday, `YYYY-MM-DD`
    pub week_start: String,
    pub days: Vec<DayCells>,
}

impl WeekGrid {
    pub fn new(patient_id: String, patient_name: String, start: NaiveDate) -> Self {
        Self {
            patient_id,
            patient_name,
            week_start: day_key(start),
            days: Vec::with_capacity(7),
        }
    }

    /// Every slot in the grid, day before night, Monday first.
    pub fn slots(&self) -> impl Iterator<Item = &ShiftSlot> {
        self.days.iter().flat_map(|d| [&d.day, &d.night])
    }

    /// Number of slots in a status.
    pub fn count(&self, status: SlotStatus) -> usize {
        self.slots().filter(|s| s.status == status).count()
    }

    /// Slots still needing someone (open or published).
    pub fn uncovered(&self) -> usize {
        self.slots().filter(|s| !s.status.is_covered()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2024-03-07 is a Thursday
        assert_eq!(week_start(date(2024, 3, 7)), Some(date(2024, 3, 4)));
        // Monday maps to itself
        assert_eq!(week_start(date(2024, 3, 4)), Some(date(2024, 3, 4)));
        // Sunday belongs to the week that started six days earlier
        assert_eq!(week_start(date(2024, 3, 10)), Some(date(2024, 3, 4)));
        // Across a year boundary
        assert_eq!(week_start(date(2025, 1, 1)), Some(date(2024, 12, 30)));
    }

    #[test]
    fn test_week_days() {
        let days = week_days(date(2024, 2, 26)).unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[3], date(2024, 2, 29));
        assert_eq!(days[6], date(2024, 3, 3));
    }

    #[test]
    fn test_week_at_calendar_edges() {
        // No day after the last representable date
        assert_eq!(week_days(NaiveDate::MAX), None);
        assert_eq!(week_start(NaiveDate::MAX).and_then(week_days), None);

        let first_monday = week_start(NaiveDate::MIN + Days::new(7)).unwrap();
        assert!(week_days(first_monday).is_some());
    }

    #[test]
    fn test_grid_counts() {
        let start = date(2024, 3, 4);
        let mut grid = WeekGrid::new("p1".into(), "Dona Maria".into(), start);
        for day in week_days(start).unwrap() {
            let mut night = ShiftSlot::new("p1".into(), day, ShiftType::Night);
            night.status = SlotStatus::Filled;
            grid.days.push(DayCells {
                day_key: day_key(day),
                day: ShiftSlot::new("p1".into(), day, ShiftType::Day),
                night,
            });
        }

        assert_eq!(grid.slots().count(), 14);
        assert_eq!(grid.count(SlotStatus::Filled), 7);
        assert_eq!(grid.uncovered(), 7);
        assert_eq!(grid.week_start, "2024-03-04");
    }
}
