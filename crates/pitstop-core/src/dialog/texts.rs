//! User-facing message texts and keyboards for the intake flow.
//!
//! All texts are Russian, matching the production bot. Builders return
//! transport-free `Reply` values; the gateway renders them.

use pitstop_types::diagnostic::{Diagnostic, DiagnosticType};
use pitstop_types::wire::{Button, Reply};

/// Mechanics offered in the selection menu, one button per row.
pub const MECHANICS: [&str; 4] = [
    "Подкорытов С.А.",
    "Костенко В.Ю.",
    "Иванюта Д.И.",
    "Загороднюк Н.Д.",
];

/// Diagnostic types offered in the type menu, one button per row.
const TYPE_MENU: [DiagnosticType; 3] = [
    DiagnosticType::FiveMin,
    DiagnosticType::Dhch,
    DiagnosticType::Des,
];

fn mechanic_menu() -> Vec<Vec<Button>> {
    MECHANICS
        .iter()
        .map(|name| vec![Button::callback(*name, format!("mechanic:{name}"))])
        .collect()
}

fn type_menu() -> Vec<Vec<Button>> {
    TYPE_MENU
        .iter()
        .map(|t| vec![Button::callback(t.label(), format!("type:{}", t.code()))])
        .collect()
}

fn start_button(label: &str) -> Vec<Vec<Button>> {
    vec![vec![Button::callback(label, "start")]]
}

/// Greeting with the mechanic-selection menu (`/start` and the `start`
/// button both land here).
pub fn greeting() -> Reply {
    Reply::with_buttons(
        "👋 Привет! Я бот диагностики HEVSR.\n\nВыберите механика для диагностики:",
        mechanic_menu(),
    )
}

/// Static help text; leaves the session untouched.
pub fn help() -> Reply {
    Reply::text(
        "📋 Доступные команды:\n\n\
         /start - Начать новую диагностику\n\
         /cancel - Отменить текущую операцию\n\
         /help - Показать помощь\n\n\
         Бот проведёт вас через все этапы диагностики!",
    )
}

/// Cancellation confirmation with a single start button.
pub fn cancelled() -> Reply {
    Reply::with_buttons(
        "✅ Операция отменена.\n\nВведите /start для новой диагностики.",
        start_button("Начать диагностику"),
    )
}

/// Idle hint shown for plain text outside a flow.
pub fn idle_hint() -> Reply {
    Reply::with_buttons(
        "Введите /start для начала диагностики или /help для помощи.",
        start_button("Начать диагностику"),
    )
}

/// Confirmation after mechanic selection, prompting for the car number.
pub fn mechanic_selected(name: &str) -> Reply {
    Reply::text(format!(
        "✅ Механик {name} выбран!\n\nВведите госномер автомобиля.\n\nНапример: A159BK124"
    ))
}

/// Confirmation after a valid car number, prompting for mileage.
pub fn car_number_accepted(number: &str) -> Reply {
    Reply::text(format!(
        "✅ Госномер {number} принят!\n\nТеперь введите пробег автомобиля (в км).\n\nНапример: 150000"
    ))
}

/// Re-prompt when the normalized car number is too short.
pub fn car_number_too_short() -> Reply {
    Reply::text(
        "⚠️ Госномер слишком короткий.\n\n\
         Введите корректный госномер (минимум 5 символов).\n\n\
         Например: A159BK124",
    )
}

/// Confirmation after a valid mileage, with the diagnostic-type menu.
pub fn mileage_accepted(mileage: i64) -> Reply {
    Reply::with_buttons(
        format!(
            "✅ Пробег {} км принят!\n\nТеперь выберите тип диагностики:",
            format_mileage(mileage)
        ),
        type_menu(),
    )
}

/// Re-prompt when no positive mileage could be read from the text.
pub fn mileage_invalid() -> Reply {
    Reply::text("⚠️ Пожалуйста, введите пробег цифрами.\n\nНапример: 150000")
}

/// Completion summary with the persisted record's id and a restart button.
pub fn completion_summary(diagnostic: &Diagnostic) -> Reply {
    Reply::with_buttons(
        format!(
            "✅ Диагностика №{} сохранена!\n\n\
             📋 Сводка:\n\
             ━━━━━━━━━━━━━━━━\n\
             👤 Механик: {}\n\
             🚗 Госномер: {}\n\
             🛣 Пробег: {} км\n\
             🔧 Тип: {}\n\
             ━━━━━━━━━━━━━━━━\n\n\
             Диагностика завершена!",
            diagnostic.id,
            diagnostic.mechanic,
            diagnostic.car_number,
            format_mileage(diagnostic.mileage),
            diagnostic.diagnostic_type.label(),
        ),
        start_button("Начать новую диагностику"),
    )
}

/// Persistence-failure notice with a retry button.
///
/// The button restarts the flow; a repeated type press on the surviving
/// session re-attempts the save with the already collected fields.
pub fn save_failed() -> Reply {
    Reply::with_buttons(
        "❌ Ошибка сохранения в базу данных. Попробуйте ещё раз.",
        start_button("Попробовать снова"),
    )
}

/// Generic fallback for unrecognized input.
pub fn not_understood() -> Reply {
    Reply::text("Не понял команду. Используйте /help для справки.")
}

/// Render a mileage with spaces as thousands separators: 150000 -> "150 000".
pub fn format_mileage(mileage: i64) -> String {
    let digits = mileage.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mileage_groups_thousands() {
        assert_eq!(format_mileage(0), "0");
        assert_eq!(format_mileage(999), "999");
        assert_eq!(format_mileage(1_000), "1 000");
        assert_eq!(format_mileage(150_000), "150 000");
        assert_eq!(format_mileage(1_234_567), "1 234 567");
    }

    #[test]
    fn test_greeting_menu_lists_all_mechanics() {
        let reply = greeting();
        assert_eq!(reply.buttons.len(), 4);
        for (row, name) in reply.buttons.iter().zip(MECHANICS) {
            assert_eq!(row.len(), 1);
            assert_eq!(row[0].text, name);
            assert_eq!(row[0].payload, format!("mechanic:{name}"));
        }
    }

    #[test]
    fn test_type_menu_payloads() {
        let reply = mileage_accepted(150_000);
        let payloads: Vec<&str> = reply
            .buttons
            .iter()
            .map(|row| row[0].payload.as_str())
            .collect();
        assert_eq!(payloads, ["type:5min", "type:dhch", "type:des"]);
        assert!(reply.text.contains("150 000"));
    }

    #[test]
    fn test_cancel_reply_has_single_start_button() {
        let reply = cancelled();
        assert_eq!(reply.buttons.len(), 1);
        assert_eq!(reply.buttons[0].len(), 1);
        assert_eq!(reply.buttons[0][0].payload, "start");
    }
}
