//! Conversation session types for the diagnostic intake bot.
//!
//! A `Session` tracks one user's progress through the multi-step
//! diagnostic submission flow. Sessions are keyed by the messenger
//! user id and live in the session store for the lifetime of a flow.

use serde::{Deserialize, Serialize};

use crate::diagnostic::{DiagnosticDraft, DiagnosticType};

/// Discrete stage of the diagnostic-collection flow.
///
/// Steps advance strictly forward within one flow; `/start` and
/// `/cancel` are the only ways to jump back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Idle,
    AwaitingMechanic,
    AwaitingCarNumber,
    AwaitingMileage,
    AwaitingType,
}

impl Default for Step {
    fn default() -> Self {
        Step::Idle
    }
}

/// Per-user conversational progress record.
///
/// Fields are populated monotonically along the step sequence: `mechanic`
/// at the transition into `AwaitingCarNumber`, `car_number` into
/// `AwaitingMileage`, `mileage` into `AwaitingType`, and
/// `diagnostic_type` at completion. A field is never read before its
/// owning step has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub step: Step,
    pub mechanic: Option<String>,
    pub car_number: Option<String>,
    pub mileage: Option<i64>,
    pub diagnostic_type: Option<DiagnosticType>,
}

impl Session {
    /// A fresh session at the start of the flow (mechanic selection).
    pub fn started() -> Self {
        Session {
            step: Step::AwaitingMechanic,
            ..Session::default()
        }
    }

    /// Assemble the repository draft once all fields are collected.
    ///
    /// Returns `None` while any field owned by an earlier step is still
    /// missing, so an out-of-order button press can never produce a
    /// partial write.
    pub fn draft(&self, diagnostic_type: DiagnosticType) -> Option<DiagnosticDraft> {
        Some(DiagnosticDraft {
            mechanic: self.mechanic.clone()?,
            car_number: self.car_number.clone()?,
            mileage: self.mileage?,
            diagnostic_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_idle() {
        let session = Session::default();
        assert_eq!(session.step, Step::Idle);
        assert!(session.mechanic.is_none());
        assert!(session.car_number.is_none());
        assert!(session.mileage.is_none());
        assert!(session.diagnostic_type.is_none());
    }

    #[test]
    fn test_started_clears_fields() {
        let session = Session::started();
        assert_eq!(session.step, Step::AwaitingMechanic);
        assert!(session.mechanic.is_none());
    }

    #[test]
    fn test_draft_requires_all_fields() {
        let mut session = Session::started();
        assert!(session.draft(DiagnosticType::Dhch).is_none());

        session.mechanic = Some("Костенко В.Ю.".to_string());
        session.car_number = Some("A159BK124".to_string());
        assert!(session.draft(DiagnosticType::Dhch).is_none());

        session.mileage = Some(150_000);
        let draft = session.draft(DiagnosticType::Dhch).unwrap();
        assert_eq!(draft.mechanic, "Костенко В.Ю.");
        assert_eq!(draft.car_number, "A159BK124");
        assert_eq!(draft.mileage, 150_000);
        assert_eq!(draft.diagnostic_type, DiagnosticType::Dhch);
    }
}
