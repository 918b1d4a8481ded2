//! Conversation logic and port trait definitions for Pitstop.
//!
//! This crate holds the diagnostic-intake state machine and the "ports"
//! (session store, repositories, message gateway) that the
//! infrastructure layer implements. It depends only on `pitstop-types`
//! -- never on `pitstop-infra` or any database/IO crate.

pub mod dialog;
pub mod gateway;
pub mod repository;
pub mod session;
