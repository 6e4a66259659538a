//! Leadflow in-process event bus.
//!
//! Building blocks for the CRM-wide event system:
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`CrmEvent`] -- the canonical domain event envelope.

pub mod bus;

pub use bus::{CrmEvent, EventBus};
