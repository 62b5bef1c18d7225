//! Core types and error definitions for the growth-plan workspace.
//!
//! This crate provides the data model shared by the generator, the report
//! store and the orchestrator.
//!
//! # Main types
//!
//! - [`GrowthError`] — Unified error enum for all growth-plan subsystems.
//! - [`GrowthResult`] — Convenience alias for `Result<T, GrowthError>`.
//! - [`TaskOutcome`] — The result of running one task: payload or failure reason.
//! - [`Report`] — The aggregated growth plan, one slot per configured task.
//! - [`Tally`] — Success/failure counts over a report's slots.

/// Error type shared by every crate.
pub mod error;
/// Per-task execution outcomes.
pub mod outcome;
/// The aggregated report model.
pub mod report;

pub use error::{GrowthError, GrowthResult};
pub use outcome::{OutcomeStatus, ResourceUsage, SlotState, TaskOutcome};
pub use report::{InputFingerprint, Report, ReportSource, Tally, TaskError, TaskMetrics};
