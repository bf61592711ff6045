//! Data types for the generated activity dataset
//!
//! These shapes are the contract between the generator core and the
//! dashboard views that render it. They serialize to the snake_case JSON
//! the frontend consumes; nothing here is mutated after generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ═══════════════════════════════════════════════════════════════════════════
// Step Kind / Status
// ═══════════════════════════════════════════════════════════════════════════

/// What a pipeline step does.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Entry point that started the run (webhook fire, schedule tick, ...).
    Trigger,
    /// Call into an external integration.
    ApiCall,
    /// Model invocation; the only kind that carries token usage.
    LlmCall,
    /// Branch decision inside the pipeline.
    Conditional,
}

/// Terminal status of a generated step.
///
/// `Running` exists for the dashboard's live-execution views; the
/// generator only emits historical traces and never produces it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Failed,
    Skipped,
    Running,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Completed => write!(f, "completed"),
            StepStatus::Failed => write!(f, "failed"),
            StepStatus::Skipped => write!(f, "skipped"),
            StepStatus::Running => write!(f, "running"),
        }
    }
}

/// Overall status of a trace. Failed iff any step failed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Completed,
    Failed,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStatus::Completed => write!(f, "completed"),
            ExecutionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// How an execution was started.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Manual,
    Scheduled,
    Webhook,
    Api,
}

impl TriggerType {
    /// The full roster the assembler draws from.
    pub const ALL: [TriggerType; 4] = [
        TriggerType::Manual,
        TriggerType::Scheduled,
        TriggerType::Webhook,
        TriggerType::Api,
    ];
}

impl std::fmt::Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerType::Manual => write!(f, "manual"),
            TriggerType::Scheduled => write!(f, "scheduled"),
            TriggerType::Webhook => write!(f, "webhook"),
            TriggerType::Api => write!(f, "api"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Step Template
// ═══════════════════════════════════════════════════════════════════════════

/// Design-time blueprint for one pipeline step.
///
/// Templates are static data: the materializer turns them into concrete
/// [`TraceStep`]s with jittered timing and injected failures. Payloads
/// are display fixtures, never executed.
#[derive(Debug, Clone)]
pub struct StepTemplate {
    /// Human-readable step name.
    pub name: &'static str,

    /// Step kind.
    pub kind: StepKind,

    /// Integration this step talks to, if any.
    pub integration: Option<&'static str>,

    /// Model this step invokes (llm_call steps only).
    pub model: Option<&'static str>,

    /// Nominal duration before jitter, in milliseconds.
    pub base_duration_ms: u64,

    /// Nominal cost in USD.
    pub base_cost: f64,

    /// Example input payload.
    pub input: Option<Value>,

    /// Example output payload. For llm_call steps this carries a `usage`
    /// object the materializer lifts into [`TraceStep::tokens`].
    pub output: Option<Value>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Trace Step
// ═══════════════════════════════════════════════════════════════════════════

/// Token accounting for a model-call step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
}

/// One materialized unit of work inside a trace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraceStep {
    /// Step identifier, unique within the trace.
    pub id: String,

    /// Human-readable step name.
    pub name: String,

    /// Step kind.
    pub kind: StepKind,

    /// Terminal status.
    pub status: StepStatus,

    /// Start offset relative to the trace start, in milliseconds.
    pub start_offset_ms: u64,

    /// Wall-clock duration in milliseconds. Always 0 for skipped steps.
    pub duration_ms: u64,

    /// Step cost in USD.
    pub cost: f64,

    /// Integration this step talked to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration: Option<String>,

    /// Model this step invoked, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Input payload. Absent for skipped steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,

    /// Output payload. Absent for skipped and failed steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    /// Error message if status == Failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Token usage for completed llm_call steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenUsage>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Execution Trace
// ═══════════════════════════════════════════════════════════════════════════

/// One simulated end-to-end run of an agent's pipeline.
///
/// Aggregates (`duration_ms`, `total_cost`, step counts) are derived from
/// the steps by the assembler and never set independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionTrace {
    /// Unique execution identifier, derived from the seed.
    pub id: String,

    /// Subject agent id.
    pub agent_id: String,

    /// Subject agent display name.
    pub agent_name: String,

    /// Overall status.
    pub status: ExecutionStatus,

    /// Actor that started the run.
    pub triggered_by: String,

    /// How the run was started.
    pub trigger_type: TriggerType,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run finished (= started_at + duration).
    pub completed_at: DateTime<Utc>,

    /// End-to-end duration: max over steps of offset + duration, in ms.
    pub duration_ms: u64,

    /// Sum of step costs in USD.
    pub total_cost: f64,

    /// Number of steps in the pipeline.
    pub total_steps: usize,

    /// Steps that completed. Skipped steps count in neither bucket.
    pub successful_steps: usize,

    /// Steps that failed (0 or 1 per trace).
    pub failed_steps: usize,

    /// The materialized pipeline.
    pub steps: Vec<TraceStep>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Activity Event
// ═══════════════════════════════════════════════════════════════════════════

/// Origin metadata attached to roughly half of all events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventMetadata {
    pub ip: String,
    pub region: String,
}

/// Type-conditioned detail payload of an [`ActivityEvent`].
///
/// One variant per event type; the wire shape is `"type"` plus a
/// `"details"` object, matching what the activity feed renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details", rename_all = "snake_case")]
pub enum EventDetails {
    ExecutionStarted {
        trigger: TriggerType,
    },
    ExecutionCompleted {
        duration_ms: u64,
        total_cost: f64,
        steps_completed: usize,
    },
    ExecutionFailed {
        error: String,
        step_failed: String,
    },
    ToolCalled {
        integration: String,
        tool: String,
        latency_ms: u64,
    },
    AgentCreated {
        version: String,
    },
    AgentUpdated {
        field_changed: String,
    },
    IntegrationConnected {
        integration: String,
    },
    ErrorOccurred {
        error: String,
        severity: String,
    },
}

impl EventDetails {
    /// The event type discriminant as it appears on the wire.
    pub fn type_name(&self) -> &'static str {
        match self {
            EventDetails::ExecutionStarted { .. } => "execution_started",
            EventDetails::ExecutionCompleted { .. } => "execution_completed",
            EventDetails::ExecutionFailed { .. } => "execution_failed",
            EventDetails::ToolCalled { .. } => "tool_called",
            EventDetails::AgentCreated { .. } => "agent_created",
            EventDetails::AgentUpdated { .. } => "agent_updated",
            EventDetails::IntegrationConnected { .. } => "integration_connected",
            EventDetails::ErrorOccurred { .. } => "error_occurred",
        }
    }

    /// Whether events of this type correlate to an execution record.
    pub fn is_execution_related(&self) -> bool {
        matches!(
            self,
            EventDetails::ExecutionStarted { .. }
                | EventDetails::ExecutionCompleted { .. }
                | EventDetails::ExecutionFailed { .. }
                | EventDetails::ToolCalled { .. }
        )
    }
}

/// One flat audit-feed entry. Independent of any trace pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityEvent {
    /// Unique event identifier, derived from the seed.
    pub id: String,

    /// When the event happened.
    pub timestamp: DateTime<Utc>,

    /// Subject agent id, if the event concerns an agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,

    /// Subject agent display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,

    /// Correlated execution id. Present only for execution-related and
    /// tool-call event types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_id: Option<String>,

    /// Actor identifier.
    pub actor_id: String,

    /// Actor display name.
    pub actor_name: String,

    /// Event type plus its type-conditioned payload.
    #[serde(flatten)]
    pub details: EventDetails,

    /// Request-origin metadata, attached with ~50% probability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Agent Trigger
// ═══════════════════════════════════════════════════════════════════════════

/// Type-specific trigger configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerConfig {
    Webhook {
        webhook_id: String,
        url: String,
        auth_type: String,
    },
    Scheduled {
        cron: String,
        timezone: String,
        next_run: DateTime<Utc>,
        last_run: Option<DateTime<Utc>>,
    },
    Api {
        endpoint: String,
        method: String,
        requires_auth: bool,
    },
}

impl TriggerConfig {
    /// The trigger type this config belongs to.
    pub fn trigger_type(&self) -> TriggerType {
        match self {
            TriggerConfig::Webhook { .. } => TriggerType::Webhook,
            TriggerConfig::Scheduled { .. } => TriggerType::Scheduled,
            TriggerConfig::Api { .. } => TriggerType::Api,
        }
    }
}

/// A configured trigger attached to an agent.
///
/// Fixtures only: built once at first access and never mutated by this
/// core. Any toggling happens in the UI layer's own state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentTrigger {
    /// Trigger identifier.
    pub id: String,

    /// Owning agent id.
    pub agent_id: String,

    /// Owning agent display name.
    pub agent_name: String,

    /// Whether the trigger is currently enabled.
    pub enabled: bool,

    /// When the trigger was created.
    pub created_at: DateTime<Utc>,

    /// Type-specific configuration.
    #[serde(flatten)]
    pub config: TriggerConfig,

    /// Last time the trigger fired, if ever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_triggered: Option<DateTime<Utc>>,

    /// Cumulative fire count.
    pub trigger_count: u64,
}

impl AgentTrigger {
    /// The trigger type, read from the config union.
    pub fn trigger_type(&self) -> TriggerType {
        self.config.trigger_type()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Agent Profile
// ═══════════════════════════════════════════════════════════════════════════

/// One entry in the subject roster shared by the generators and the
/// trigger fixtures.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AgentProfile {
    pub id: &'static str,
    pub name: &'static str,
}
