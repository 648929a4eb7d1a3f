//! User-facing messages.
//!
//! All text printed by commands is a [`Message`] variant rendered through its
//! `Display` implementation, and printed with the `msg_*` macros.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
