//! HTTP/REST API layer for Pitstop.
//!
//! Axum-based REST API at `/api/v1/` with token authentication and CORS
//! support, plus the bot webhook at `/webhook`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
