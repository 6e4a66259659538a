//! Lead assignment and idle-sweep engine.
//!
//! One [`AssignmentEngine`] lives for the whole process (shared via `Arc`
//! inside [`crate::state::AppState`]). It owns the round-robin cursor and
//! serializes sweeps, so concurrent HTTP requests cannot race the rotation.

mod assignment;

pub use assignment::{AssignmentEngine, NewLeadSubmission, SweepFailure, SweepReport};
