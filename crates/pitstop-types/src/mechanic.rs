//! Mechanic roster types for the admin panel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A mechanic managed through the admin CRUD surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mechanic {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a mechanic.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMechanicRequest {
    pub name: String,
}
