//! Fan-out orchestration of schema-validated generation tasks.
//!
//! Runs every registered task concurrently over one transcript, waits for all
//! of them, and merges the outcomes into a single growth-plan [`Report`].
//! Individual task failures are values inside the report, never errors of the
//! run. A stored report can later have exactly one task re-run and merged back.
//!
//! # Main types
//!
//! - [`GrowthEngine`] — Top-level facade exposing `generate` and `rerun_task`.
//! - [`TaskRegistry`] — Ordered, read-only table of [`TaskSpec`]s.
//! - [`TaskRunner`] — Runs one task under its timeout and packages the outcome.
//! - [`FanOutScheduler`] — Join-all over every registered task.
//! - [`Section`] — Typed view over the default tasks' payloads.
//!
//! [`Report`]: growth_core::Report

/// Merge fan-out outcomes into a report.
pub mod aggregator;
/// The engine facade.
pub mod engine;
/// Transcript admission rules.
pub mod input;
/// The default five-task registry.
pub mod profiles;
/// Prompt text for the default tasks.
pub mod prompts;
/// Task registry.
pub mod registry;
/// Selective re-run of one task.
pub mod rerun;
/// Single-task execution.
pub mod runner;
/// Concurrent fan-out.
pub mod scheduler;
/// Output schemas for the default tasks.
pub mod schemas;
/// Typed payload decoding.
pub mod sections;
/// Task definitions and budgets.
pub mod types;

pub use aggregator::assemble;
pub use engine::GrowthEngine;
pub use input::TranscriptPolicy;
pub use profiles::{default_registry, default_specs, DEFAULT_MODEL, DEFAULT_TASKS};
pub use registry::TaskRegistry;
pub use rerun::{merge_outcome, rerun, RerunOutcome};
pub use runner::TaskRunner;
pub use scheduler::FanOutScheduler;
pub use sections::Section;
pub use types::{TaskBudget, TaskSpec, INPUT_PLACEHOLDER};
