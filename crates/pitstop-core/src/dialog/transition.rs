//! Pure transition function for the intake flow.
//!
//! `transition` maps `(Session, Event)` to a `Turn` without touching
//! any store, repository, or network. The dialog service owns the side
//! effects; everything here is unit-testable in isolation.

use pitstop_types::diagnostic::{DiagnosticDraft, DiagnosticType};
use pitstop_types::session::{Session, Step};
use pitstop_types::wire::Reply;

use super::event::{Command, Event};
use super::texts;

/// Minimum length of a normalized car number.
const MIN_CAR_NUMBER_LEN: usize = 5;

/// Outcome of one conversation turn.
///
/// At most one reply, at most one session mutation, at most one
/// repository write. When `write` is present the session is *parked*:
/// the dialog service attempts the write, resets the session on success,
/// and keeps the parked state on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub session: Session,
    pub reply: Option<Reply>,
    pub write: Option<DiagnosticDraft>,
}

impl Turn {
    fn reply(session: Session, reply: Reply) -> Self {
        Turn {
            session,
            reply: Some(reply),
            write: None,
        }
    }
}

/// Advance a session by one inbound event.
pub fn transition(session: &Session, event: &Event) -> Turn {
    match event {
        Event::Text { text } => match Command::parse(text) {
            Some(command) => apply_command(session, command),
            None => handle_text(session, text),
        },
        Event::Button { payload } => handle_button(session, payload),
    }
}

/// Global commands; both text and the `start` button payload land here.
fn apply_command(session: &Session, command: Command) -> Turn {
    match command {
        Command::Start => Turn::reply(Session::started(), texts::greeting()),
        Command::Help => Turn::reply(session.clone(), texts::help()),
        Command::Cancel => Turn::reply(Session::default(), texts::cancelled()),
    }
}

fn handle_text(session: &Session, text: &str) -> Turn {
    match session.step {
        Step::Idle => Turn::reply(session.clone(), texts::idle_hint()),
        Step::AwaitingCarNumber => {
            let normalized = normalize_car_number(text);
            if normalized.chars().count() >= MIN_CAR_NUMBER_LEN {
                let reply = texts::car_number_accepted(&normalized);
                let session = Session {
                    step: Step::AwaitingMileage,
                    car_number: Some(normalized),
                    ..session.clone()
                };
                Turn::reply(session, reply)
            } else {
                Turn::reply(session.clone(), texts::car_number_too_short())
            }
        }
        Step::AwaitingMileage => match extract_mileage(text) {
            Some(mileage) => {
                let session = Session {
                    step: Step::AwaitingType,
                    mileage: Some(mileage),
                    ..session.clone()
                };
                Turn::reply(session, texts::mileage_accepted(mileage))
            }
            None => Turn::reply(session.clone(), texts::mileage_invalid()),
        },
        // Mechanic and type are chosen via buttons; free text here is noise.
        Step::AwaitingMechanic | Step::AwaitingType => {
            Turn::reply(session.clone(), texts::not_understood())
        }
    }
}

fn handle_button(session: &Session, payload: &str) -> Turn {
    if payload == "start" {
        return apply_command(session, Command::Start);
    }
    if let Some(name) = payload.strip_prefix("mechanic:") {
        if name.is_empty() {
            return Turn::reply(session.clone(), texts::not_understood());
        }
        let reply = texts::mechanic_selected(name);
        let session = Session {
            step: Step::AwaitingCarNumber,
            mechanic: Some(name.to_string()),
            ..session.clone()
        };
        return Turn::reply(session, reply);
    }
    if let Some(code) = payload.strip_prefix("type:") {
        return match code.parse::<DiagnosticType>() {
            Ok(diagnostic_type) => complete(session, diagnostic_type),
            Err(_) => Turn::reply(session.clone(), texts::not_understood()),
        };
    }
    Turn::reply(session.clone(), texts::not_understood())
}

/// Type selection: park the session and emit the repository write.
///
/// A press with earlier fields still missing produces no write -- the
/// fallback reply keeps the monotonic-fields invariant intact.
fn complete(session: &Session, diagnostic_type: DiagnosticType) -> Turn {
    match session.draft(diagnostic_type) {
        Some(draft) => {
            let parked = Session {
                step: Step::AwaitingType,
                diagnostic_type: Some(diagnostic_type),
                ..session.clone()
            };
            Turn {
                session: parked,
                reply: None,
                write: Some(draft),
            }
        }
        None => Turn::reply(session.clone(), texts::not_understood()),
    }
}

/// Normalize a car number: uppercase, strip whitespace and hyphens.
///
/// Idempotent: normalizing a normalized value yields the same value.
pub fn normalize_car_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Read a positive mileage from free text by keeping its digits.
///
/// `"150 000 km"` -> 150000. Returns `None` for digit-free text, zero,
/// or values too large for i64.
pub fn extract_mileage(raw: &str) -> Option<i64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    match digits.parse::<i64>() {
        Ok(mileage) if mileage > 0 => Some(mileage),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Event {
        Event::Text {
            text: s.to_string(),
        }
    }

    fn button(p: &str) -> Event {
        Event::Button {
            payload: p.to_string(),
        }
    }

    fn mid_flow_session() -> Session {
        Session {
            step: Step::AwaitingMileage,
            mechanic: Some("Костенко В.Ю.".to_string()),
            car_number: Some("A159BK124".to_string()),
            mileage: None,
            diagnostic_type: None,
        }
    }

    fn complete_session() -> Session {
        Session {
            step: Step::AwaitingType,
            mechanic: Some("Костенко В.Ю.".to_string()),
            car_number: Some("A159BK124".to_string()),
            mileage: Some(150_000),
            diagnostic_type: None,
        }
    }

    #[test]
    fn test_start_resets_from_any_step() {
        for event in [text("/start"), text("начать"), text("СТАРТ"), button("start")] {
            let turn = transition(&mid_flow_session(), &event);
            assert_eq!(turn.session.step, Step::AwaitingMechanic);
            assert!(turn.session.mechanic.is_none());
            assert!(turn.session.car_number.is_none());
            assert!(turn.write.is_none());
            let reply = turn.reply.unwrap();
            assert_eq!(reply.buttons.len(), 4);
        }
    }

    #[test]
    fn test_start_button_matches_start_command() {
        let via_text = transition(&mid_flow_session(), &text("/start"));
        let via_button = transition(&mid_flow_session(), &button("start"));
        assert_eq!(via_text, via_button);
    }

    #[test]
    fn test_help_leaves_session_untouched() {
        let session = mid_flow_session();
        let turn = transition(&session, &text("/help"));
        assert_eq!(turn.session, session);
        assert!(turn.reply.unwrap().text.contains("/cancel"));
    }

    #[test]
    fn test_cancel_resets_with_single_start_button() {
        let turn = transition(&complete_session(), &text("отмена"));
        assert_eq!(turn.session, Session::default());
        let reply = turn.reply.unwrap();
        assert_eq!(reply.buttons.len(), 1);
        assert_eq!(reply.buttons[0][0].payload, "start");
    }

    #[test]
    fn test_idle_text_prompts_start() {
        let turn = transition(&Session::default(), &text("привет"));
        assert_eq!(turn.session, Session::default());
        assert!(turn.reply.unwrap().text.contains("/start"));
    }

    #[test]
    fn test_mechanic_button_advances() {
        let turn = transition(&Session::started(), &button("mechanic:Иванюта Д.И."));
        assert_eq!(turn.session.step, Step::AwaitingCarNumber);
        assert_eq!(turn.session.mechanic.as_deref(), Some("Иванюта Д.И."));
        assert!(turn.reply.unwrap().text.contains("Иванюта Д.И."));
    }

    #[test]
    fn test_text_during_mechanic_step_falls_through() {
        let turn = transition(&Session::started(), &text("Иванюта"));
        assert_eq!(turn.session, Session::started());
        assert!(turn.reply.unwrap().text.contains("/help"));
    }

    #[test]
    fn test_car_number_normalization() {
        assert_eq!(normalize_car_number("a 159-bk 124"), "A159BK124");
        // Idempotent on already-normalized input.
        assert_eq!(normalize_car_number("A159BK124"), "A159BK124");
        // Cyrillic plates uppercase too.
        assert_eq!(normalize_car_number("а 159 вк"), "А159ВК");
    }

    #[test]
    fn test_car_number_accepted_at_min_length() {
        let session = Session {
            step: Step::AwaitingCarNumber,
            mechanic: Some("Костенко В.Ю.".to_string()),
            ..Session::default()
        };
        let turn = transition(&session, &text("a 159-bk 124"));
        assert_eq!(turn.session.step, Step::AwaitingMileage);
        assert_eq!(turn.session.car_number.as_deref(), Some("A159BK124"));
        assert!(turn.reply.unwrap().text.contains("A159BK124"));
    }

    #[test]
    fn test_short_car_number_reprompts_in_place() {
        let session = Session {
            step: Step::AwaitingCarNumber,
            mechanic: Some("Костенко В.Ю.".to_string()),
            ..Session::default()
        };
        let turn = transition(&session, &text("a-1 2"));
        assert_eq!(turn.session, session);
        assert!(turn.reply.unwrap().text.contains("минимум 5"));
    }

    #[test]
    fn test_mileage_extraction() {
        assert_eq!(extract_mileage("150 000 km"), Some(150_000));
        assert_eq!(extract_mileage("150000"), Some(150_000));
        assert_eq!(extract_mileage("abc"), None);
        assert_eq!(extract_mileage("0"), None);
        assert_eq!(extract_mileage(""), None);
    }

    #[test]
    fn test_valid_mileage_advances_to_type_menu() {
        let turn = transition(&mid_flow_session(), &text("150 000 km"));
        assert_eq!(turn.session.step, Step::AwaitingType);
        assert_eq!(turn.session.mileage, Some(150_000));
        let reply = turn.reply.unwrap();
        assert_eq!(reply.buttons.len(), 3);
    }

    #[test]
    fn test_invalid_mileage_reprompts_in_place() {
        for input in ["abc", "0", "ноль"] {
            let turn = transition(&mid_flow_session(), &text(input));
            assert_eq!(turn.session, mid_flow_session());
            assert!(turn.reply.unwrap().text.contains("цифрами"));
        }
    }

    #[test]
    fn test_type_button_emits_write_and_parks() {
        let turn = transition(&complete_session(), &button("type:dhch"));
        assert!(turn.reply.is_none());
        let draft = turn.write.unwrap();
        assert_eq!(draft.mechanic, "Костенко В.Ю.");
        assert_eq!(draft.car_number, "A159BK124");
        assert_eq!(draft.mileage, 150_000);
        assert_eq!(draft.diagnostic_type, DiagnosticType::Dhch);
        assert_eq!(turn.session.step, Step::AwaitingType);
        assert_eq!(turn.session.diagnostic_type, Some(DiagnosticType::Dhch));
    }

    #[test]
    fn test_type_button_without_collected_fields_is_rejected() {
        let turn = transition(&Session::started(), &button("type:des"));
        assert!(turn.write.is_none());
        assert_eq!(turn.session, Session::started());
        assert!(turn.reply.unwrap().text.contains("/help"));
    }

    #[test]
    fn test_unknown_type_code_is_rejected() {
        let turn = transition(&complete_session(), &button("type:express"));
        assert!(turn.write.is_none());
        assert_eq!(turn.session, complete_session());
    }

    #[test]
    fn test_unknown_payload_falls_through() {
        let turn = transition(&mid_flow_session(), &button("noise"));
        assert_eq!(turn.session, mid_flow_session());
        assert!(turn.reply.unwrap().text.contains("/help"));
    }

    #[test]
    fn test_empty_mechanic_payload_is_rejected() {
        let turn = transition(&Session::started(), &button("mechanic:"));
        assert_eq!(turn.session, Session::started());
        assert!(turn.write.is_none());
    }
}
