//! Lenswork Pipeline - host-facing capture integration
//!
//! Glue between an embedding application and `lenswork-core`: the
//! per-capture [`Transaction`], the [`CaptureHost`] callback surface, and
//! [`submit_correction`], which assembles the orientation context and
//! runs the corrector on a background worker so full-resolution image
//! work never lands on the caller's thread.
//!
//! The host resolves its [`lenswork_core::DeviceProfile`] once at startup
//! (however it loads its quirk table) and passes it in by `Arc`; nothing
//! in this crate holds global state.

mod task;
mod transaction;

pub use task::{submit_correction, CaptureHost};
pub use transaction::Transaction;
