//! Mechanic repository trait definition.

use pitstop_types::error::RepositoryError;
use pitstop_types::mechanic::Mechanic;

/// Repository trait for the mechanic roster.
///
/// Implementations live in pitstop-infra (e.g. `SqliteMechanicRepository`).
pub trait MechanicRepository: Send + Sync {
    /// Add a mechanic to the roster.
    fn create(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Mechanic, RepositoryError>> + Send;

    /// List all mechanics ordered by name.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Mechanic>, RepositoryError>> + Send;

    /// Remove a mechanic by id. `NotFound` when it does not exist.
    fn delete(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
