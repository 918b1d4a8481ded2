//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API
//! and the webhook. The dialog service is generic over its ports, but
//! AppState pins it to the concrete infra implementations.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use pitstop_core::dialog::DialogService;
use pitstop_infra::gateway::MaxGateway;
use pitstop_infra::session::InMemorySessionStore;
use pitstop_infra::sqlite::diagnostic::SqliteDiagnosticRepository;
use pitstop_infra::sqlite::mechanic::SqliteMechanicRepository;
use pitstop_infra::sqlite::pool::DatabasePool;
use pitstop_types::error::AuthError;

use crate::config::ServeArgs;

/// Concrete type alias for the dialog service pinned to infra implementations.
pub type ConcreteDialogService =
    DialogService<Arc<InMemorySessionStore>, SqliteDiagnosticRepository, MaxGateway>;

/// Admin panel credentials, checked on `POST /api/v1/auth/login`.
pub struct AdminCredentials {
    username: Option<String>,
    password: Option<SecretString>,
}

impl AdminCredentials {
    pub fn new(username: Option<String>, password: Option<SecretString>) -> Self {
        Self { username, password }
    }

    /// Verify a login attempt against the configured credentials.
    pub fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let (Some(expected_username), Some(expected_password)) =
            (self.username.as_deref(), self.password.as_ref())
        else {
            return Err(AuthError::MissingCredentials);
        };
        if username == expected_username && password == expected_password.expose_secret() {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub dialog: Arc<ConcreteDialogService>,
    pub diagnostics: Arc<SqliteDiagnosticRepository>,
    pub mechanics: Arc<SqliteMechanicRepository>,
    pub sessions: Arc<InMemorySessionStore>,
    pub db_pool: DatabasePool,
    pub admin: Arc<AdminCredentials>,
}

impl AppState {
    /// Initialize the application state: connect to the DB, wire services.
    pub async fn init(args: &ServeArgs) -> anyhow::Result<Self> {
        let data_dir = match &args.data_dir {
            Some(dir) => dir.clone(),
            None => {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                std::path::PathBuf::from(home).join(".pitstop")
            }
        };

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        // Initialize database
        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("pitstop.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        // Session store shared between the dialog service and the sweeper
        let sessions = Arc::new(InMemorySessionStore::new(Duration::from_secs(
            args.session_ttl_secs,
        )));

        // Outbound message gateway
        let token = match &args.bot_token {
            Some(token) => SecretString::from(token.clone()),
            None => {
                warn!("bot token not configured; outbound messages will be rejected by the platform");
                SecretString::from(String::new())
            }
        };
        let mut gateway = MaxGateway::new(token);
        if let Some(base_url) = &args.bot_api_url {
            gateway = gateway.with_base_url(base_url.clone());
        }

        // Wire the dialog service with its own repository instance
        let dialog = DialogService::new(
            sessions.clone(),
            SqliteDiagnosticRepository::new(db_pool.clone()),
            gateway,
        );

        let admin = AdminCredentials::new(
            args.admin_username.clone(),
            args.admin_password.clone().map(SecretString::from),
        );

        Ok(Self {
            dialog: Arc::new(dialog),
            diagnostics: Arc::new(SqliteDiagnosticRepository::new(db_pool.clone())),
            mechanics: Arc::new(SqliteMechanicRepository::new(db_pool.clone())),
            sessions,
            db_pool,
            admin: Arc::new(admin),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_exact_match() {
        let admin = AdminCredentials::new(
            Some("admin".to_string()),
            Some(SecretString::from("s3cret".to_string())),
        );
        assert!(admin.verify("admin", "s3cret").is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let admin = AdminCredentials::new(
            Some("admin".to_string()),
            Some(SecretString::from("s3cret".to_string())),
        );
        assert!(matches!(
            admin.verify("admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            admin.verify("root", "s3cret"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_unconfigured_is_distinct_error() {
        let admin = AdminCredentials::new(None, None);
        assert!(matches!(
            admin.verify("admin", "s3cret"),
            Err(AuthError::MissingCredentials)
        ));
    }
}
