//! Shift slot state machine.
//!
//! ```text
//! open ──publish──▶ pending ──approve──▶ filled ──check_in──▶ active ──check_out──▶ completed
//!   │                  │                   ▲                    ▲           │
//!   └──────assign──────┴───────────────────┘                    │           └─(anomaly)─▶ issue
//!   └──────assign(start_now)─────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::models::{ShiftSlot, SlotStatus};

/// A user action on a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotAction {
    /// Advertise the vacancy to candidates
    Publish { urgent: bool },
    /// Directly staff the slot, optionally starting it right away
    Assign {
        professional_id: String,
        start_now: bool,
    },
    /// Pick one applicant for a published vacancy
    Approve { professional_id: String },
    CheckIn,
    CheckOut,
    /// Mark something wrong with the shift; check-out then ends in `Issue`
    FlagAnomaly { reason: String },
}

impl SlotAction {
    pub fn name(&self) -> &'static str {
        match self {
            SlotAction::Publish { .. } => "publish",
            SlotAction::Assign { .. } => "assign",
            SlotAction::Approve { .. } => "approve",
            SlotAction::CheckIn => "check_in",
            SlotAction::CheckOut => "check_out",
            SlotAction::FlagAnomaly { .. } => "flag_anomaly",
        }
    }
}

/// An action that is not allowed from the slot's current status.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot {action} a slot that is {from}")]
pub struct TransitionError {
    pub from: SlotStatus,
    pub action: &'static str,
}

/// Status reached by applying `action` to a slot in `current`.
pub fn next_status(
    current: SlotStatus,
    action: &SlotAction,
    has_anomaly: bool,
) -> Result<SlotStatus, TransitionError> {
    use SlotStatus::*;

    if current.is_terminal() {
        return Err(TransitionError {
            from: current,
            action: action.name(),
        });
    }

    let next = match (current, action) {
        (Open, SlotAction::Publish { .. }) => Some(Pending),
        (Open | Pending, SlotAction::Assign { start_now, .. }) => {
            Some(if *start_now { Active } else { Filled })
        }
        (Pending, SlotAction::Approve { .. }) => Some(Filled),
        (Filled, SlotAction::CheckIn) => Some(Active),
        (Active, SlotAction::CheckOut) => Some(if has_anomaly { Issue } else { Completed }),
        (Filled | Active, SlotAction::FlagAnomaly { .. }) => Some(current),
        _ => None,
    };

    next.ok_or(TransitionError {
        from: current,
        action: action.name(),
    })
}

impl ShiftSlot {
    /// Apply an action in place, stamping timestamps with `now`.
    ///
    /// Returns the status the slot had before. On error the slot is unchanged.
    pub fn apply(&mut self, action: &SlotAction, now: &str) -> Result<SlotStatus, TransitionError> {
        let previous = self.status;
        let next = next_status(previous, action, self.anomaly.is_some())?;

        match action {
            SlotAction::Publish { urgent } => {
                self.urgent = *urgent;
            }
            SlotAction::Assign {
                professional_id,
                start_now,
            } => {
                self.professional_id = Some(professional_id.clone());
                if *start_now {
                    self.check_in_at = Some(now.to_string());
                    self.progress = 0;
                }
            }
            SlotAction::Approve { professional_id } => {
                self.professional_id = Some(professional_id.clone());
            }
            SlotAction::CheckIn => {
                self.check_in_at = Some(now.to_string());
                self.progress = 0;
            }
            SlotAction::CheckOut => {
                self.check_out_at = Some(now.to_string());
                if next == SlotStatus::Completed {
                    self.progress = 100;
                }
            }
            SlotAction::FlagAnomaly { reason } => {
                self.anomaly = Some(reason.clone());
            }
        }

        self.status = next;
        self.updated_at = now.to_string();
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftType;
    use chrono::NaiveDate;

    const NOW: &str = "2024-03-04T07:00:00+00:00";

    fn slot_in(status: SlotStatus) -> ShiftSlot {
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let mut slot = ShiftSlot::new("patient-1".into(), day, ShiftType::Day);
        slot.status = status;
        slot
    }

    fn all_actions() -> Vec<SlotAction> {
        vec![
            SlotAction::Publish { urgent: false },
            SlotAction::Assign {
                professional_id: "pro-1".into(),
                start_now: false,
            },
            SlotAction::Assign {
                professional_id: "pro-1".into(),
                start_now: true,
            },
            SlotAction::Approve {
                professional_id: "pro-1".into(),
            },
            SlotAction::CheckIn,
            SlotAction::CheckOut,
            SlotAction::FlagAnomaly {
                reason: "late".into(),
            },
        ]
    }

    #[test]
    fn test_transition_table() {
        use SlotStatus::*;

        for status in SlotStatus::ALL {
            for action in all_actions() {
                let expected = match (status, &action) {
                    (Open, SlotAction::Publish { .. }) => Some(Pending),
                    (Open | Pending, SlotAction::Assign { start_now: false, .. }) => Some(Filled),
                    (Open | Pending, SlotAction::Assign { start_now: true, .. }) => Some(Active),
                    (Pending, SlotAction::Approve { .. }) => Some(Filled),
                    (Filled, SlotAction::CheckIn) => Some(Active),
                    (Active, SlotAction::CheckOut) => Some(Completed),
                    (Filled, SlotAction::FlagAnomaly { .. }) => Some(Filled),
                    (Active, SlotAction::FlagAnomaly { .. }) => Some(Active),
                    _ => None,
                };

                let result = next_status(status, &action, false);
                match expected {
                    Some(next) => assert_eq!(result, Ok(next), "{:?} + {}", status, action.name()),
                    None => assert_eq!(
                        result,
                        Err(TransitionError {
                            from: status,
                            action: action.name()
                        }),
                        "{:?} + {} should be rejected",
                        status,
                        action.name()
                    ),
                }
            }
        }
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for status in [SlotStatus::Completed, SlotStatus::Issue] {
            for action in all_actions() {
                assert!(next_status(status, &action, false).is_err());
                assert!(next_status(status, &action, true).is_err());
            }
        }
    }

    #[test]
    fn test_publish_sets_urgency() {
        let mut slot = slot_in(SlotStatus::Open);
        let previous = slot.apply(&SlotAction::Publish { urgent: true }, NOW).unwrap();

        assert_eq!(previous, SlotStatus::Open);
        assert_eq!(slot.status, SlotStatus::Pending);
        assert!(slot.urgent);
        assert_eq!(slot.updated_at, NOW);
    }

    #[test]
    fn test_assign_start_now_checks_in() {
        let mut slot = slot_in(SlotStatus::Open);
        slot.apply(
            &SlotAction::Assign {
                professional_id: "pro-1".into(),
                start_now: true,
            },
            NOW,
        )
        .unwrap();

        assert_eq!(slot.status, SlotStatus::Active);
        assert_eq!(slot.professional_id, Some("pro-1".into()));
        assert_eq!(slot.check_in_at, Some(NOW.into()));
        assert_eq!(slot.progress, 0);
    }

    #[test]
    fn test_full_happy_path() {
        let mut slot = slot_in(SlotStatus::Open);
        slot.apply(&SlotAction::Publish { urgent: false }, NOW).unwrap();
        slot.apply(
            &SlotAction::Approve {
                professional_id: "pro-2".into(),
            },
            NOW,
        )
        .unwrap();
        assert_eq!(slot.status, SlotStatus::Filled);

        slot.apply(&SlotAction::CheckIn, NOW).unwrap();
        assert_eq!(slot.status, SlotStatus::Active);
        assert_eq!(slot.check_in_at, Some(NOW.into()));

        slot.progress = 40;
        slot.apply(&SlotAction::CheckOut, "2024-03-04T19:00:00+00:00").unwrap();
        assert_eq!(slot.status, SlotStatus::Completed);
        assert_eq!(slot.progress, 100);
        assert_eq!(slot.check_out_at, Some("2024-03-04T19:00:00+00:00".into()));
    }

    #[test]
    fn test_anomaly_turns_check_out_into_issue() {
        let mut slot = slot_in(SlotStatus::Active);
        slot.progress = 60;

        slot.apply(
            &SlotAction::FlagAnomaly {
                reason: "professional left early".into(),
            },
            NOW,
        )
        .unwrap();
        assert_eq!(slot.status, SlotStatus::Active);

        slot.apply(&SlotAction::CheckOut, NOW).unwrap();
        assert_eq!(slot.status, SlotStatus::Issue);
        assert_eq!(slot.progress, 60);
        assert_eq!(slot.anomaly, Some("professional left early".into()));
    }

    #[test]
    fn test_rejected_action_leaves_slot_untouched() {
        let mut slot = slot_in(SlotStatus::Filled);
        let before = slot.clone();

        let err = slot.apply(&SlotAction::CheckOut, NOW).unwrap_err();
        assert_eq!(err.from, SlotStatus::Filled);
        assert_eq!(err.action, "check_out");
        assert_eq!(err.to_string(), "cannot check_out a slot that is filled");
        assert_eq!(slot, before);
    }
}
