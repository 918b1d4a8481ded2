//! Diagnostic record types.
//!
//! A `DiagnosticDraft` is what the conversation flow hands to the
//! repository; a `Diagnostic` is the persisted row with its generated
//! id and timestamp. REST payloads use camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Kind of diagnostic performed.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (diagnostic_type IN ('5min', 'dhch', 'des'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticType {
    #[serde(rename = "5min")]
    FiveMin,
    #[serde(rename = "dhch")]
    Dhch,
    #[serde(rename = "des")]
    Des,
}

impl DiagnosticType {
    /// Wire code used in button payloads and the database.
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticType::FiveMin => "5min",
            DiagnosticType::Dhch => "dhch",
            DiagnosticType::Des => "des",
        }
    }

    /// Human-readable label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticType::FiveMin => "5-ти минутка",
            DiagnosticType::Dhch => "ДХЧ",
            DiagnosticType::Des => "ДЭС",
        }
    }
}

impl fmt::Display for DiagnosticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DiagnosticType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5min" => Ok(DiagnosticType::FiveMin),
            "dhch" => Ok(DiagnosticType::Dhch),
            "des" => Ok(DiagnosticType::Des),
            other => Err(format!("invalid diagnostic type: '{other}'")),
        }
    }
}

/// A completed submission awaiting persistence (write-only artifact).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticDraft {
    pub mechanic: String,
    pub car_number: String,
    pub mileage: i64,
    pub diagnostic_type: DiagnosticType,
}

/// A persisted diagnostic record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub id: i64,
    pub mechanic: String,
    pub car_number: String,
    pub mileage: i64,
    pub diagnostic_type: DiagnosticType,
    pub created_at: DateTime<Utc>,
}
