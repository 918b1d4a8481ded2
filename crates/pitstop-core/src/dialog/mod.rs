//! Diagnostic-intake conversation flow.
//!
//! The flow walks a user through four steps (mechanic, car number,
//! mileage, diagnostic type) via buttoned messages. `transition` is a
//! pure function over `(Session, Event)`; `DialogService` wires it to
//! the session store, the diagnostic repository, and the message
//! gateway.

pub mod event;
pub mod service;
pub mod texts;
pub mod transition;

pub use event::{Command, Event};
pub use service::DialogService;
pub use transition::{transition, Turn};
