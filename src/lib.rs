//! Agentdash activity core
//!
//! Deterministic, seed-driven generation of the activity data the agent
//! dashboard renders: multi-step execution traces, a flat audit-event
//! feed, and the static trigger catalog, plus the pure filter and
//! summary functions the views query them through.
//!
//! Everything is computed in memory from integer seeds: no I/O, no
//! ambient randomness, no mutation after generation.

pub mod cron;
pub mod filters;
pub mod generator;
pub mod seed;
pub mod templates;
pub mod triggers;
pub mod types;

pub use cron::humanize_cron;
pub use filters::{
    ActivitySummary, DateRange, EventFilter, ParseDateRangeError, TraceFilter, activity_summary,
    filter_events, filter_traces,
};
pub use generator::{
    ActivityDataset, GeneratorConfig, activity_events, dataset, execution_traces,
};
pub use triggers::{active_triggers, triggers, triggers_by_agent, triggers_by_type};
pub use types::{
    ActivityEvent, AgentProfile, AgentTrigger, EventDetails, EventMetadata, ExecutionStatus,
    ExecutionTrace, StepKind, StepStatus, StepTemplate, TokenUsage, TraceStep, TriggerConfig,
    TriggerType,
};
