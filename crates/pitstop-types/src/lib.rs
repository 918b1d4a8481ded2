//! Shared domain types for Pitstop.
//!
//! This crate contains the types used across the Pitstop backend:
//! conversation sessions, diagnostic records, mechanics, the Max
//! messenger wire format, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod diagnostic;
pub mod error;
pub mod mechanic;
pub mod session;
pub mod wire;
