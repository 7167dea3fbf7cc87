//! Diagnostic values: advisory [`Warning`]s and the fatal [`InvalidEmail`].

mod reason;
mod warning;

pub use reason::{InvalidEmail, Reason};
pub use warning::{Warning, WarningKind};
