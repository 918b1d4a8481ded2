//! Diagnostic repository trait definition.

use std::sync::Arc;

use pitstop_types::diagnostic::{Diagnostic, DiagnosticDraft};
use pitstop_types::error::RepositoryError;

/// Repository trait for diagnostic record persistence.
///
/// Implementations live in pitstop-infra (e.g. `SqliteDiagnosticRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
///
/// `save` failures are recoverable from the conversation flow's point of
/// view: the dialog service reports them to the user and keeps the
/// session parked instead of propagating.
pub trait DiagnosticRepository: Send + Sync {
    /// Persist a completed draft. Returns the stored record with its
    /// generated id and timestamp.
    fn save(
        &self,
        draft: &DiagnosticDraft,
    ) -> impl std::future::Future<Output = Result<Diagnostic, RepositoryError>> + Send;

    /// List records, newest first, up to `limit`.
    fn list(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Diagnostic>, RepositoryError>> + Send;

    /// Get a record by id.
    fn get(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Diagnostic>, RepositoryError>> + Send;

    /// Delete a record by id. `NotFound` when it does not exist.
    fn delete(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

impl<T: DiagnosticRepository> DiagnosticRepository for Arc<T> {
    fn save(
        &self,
        draft: &DiagnosticDraft,
    ) -> impl std::future::Future<Output = Result<Diagnostic, RepositoryError>> + Send {
        T::save(self, draft)
    }

    fn list(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Diagnostic>, RepositoryError>> + Send {
        T::list(self, limit)
    }

    fn get(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Diagnostic>, RepositoryError>> + Send
    {
        T::get(self, id)
    }

    fn delete(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send {
        T::delete(self, id)
    }
}
