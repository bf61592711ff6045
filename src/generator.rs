//! Deterministic trace and event generation
//!
//! Everything here is pure computation over the template catalog and the
//! seed helpers: the same [`GeneratorConfig`] always produces the same
//! dataset, byte for byte. Simulated failures are data on the records,
//! never `Err`; nothing in this module can actually fail.

use std::sync::OnceLock;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::seed::{
    self, chance, event_seed, field_seed, pick_index, step_seed, trace_seed, unit_in,
};
use crate::templates::{ACTORS, AGENTS, templates_for};
use crate::types::{
    ActivityEvent, AgentProfile, EventDetails, EventMetadata, ExecutionStatus, ExecutionTrace,
    StepKind, StepStatus, StepTemplate, TokenUsage, TraceStep, TriggerType,
};

// ═══════════════════════════════════════════════════════════════════════════
// Field offsets
// ═══════════════════════════════════════════════════════════════════════════

/// Named per-field seed offsets. Record-level and step-level draws use
/// disjoint namespaces; new draws get the next free constant here instead
/// of a bare literal at the call site.
mod field {
    // Trace / event record level
    pub const SUBJECT: u64 = 0;
    pub const ACTOR: u64 = 1;
    pub const HOURS_AGO: u64 = 2;
    pub const FAILURE: u64 = 3;
    pub const TRIGGER_TYPE: u64 = 4;
    pub const FAILURE_INDEX: u64 = 5;
    pub const EVENT_TYPE: u64 = 6;
    pub const METADATA: u64 = 7;
    pub const EXEC_REF: u64 = 8;
    pub const DETAIL_A: u64 = 9;
    pub const DETAIL_B: u64 = 10;
    pub const DETAIL_C: u64 = 11;
    pub const METADATA_IP: u64 = 12;
    pub const METADATA_REGION: u64 = 13;

    // Step level, relative to the step sub-seed. The first step's
    // sub-seed equals the record seed, so these start past the
    // record-level block to keep the ranges disjoint.
    pub const JITTER: u64 = 20;
    pub const GAP: u64 = 21;
    pub const ERROR_MSG: u64 = 22;
}

// ═══════════════════════════════════════════════════════════════════════════
// Generator Config
// ═══════════════════════════════════════════════════════════════════════════

/// Knobs for one dataset build.
///
/// `reference_time` anchors every hours-ago draw; two builds with the
/// same config (including the same reference time) are identical.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// How many execution traces to generate.
    pub trace_count: usize,
    /// How many activity events to generate.
    pub event_count: usize,
    /// Base seed for the trace stream.
    pub trace_seed_base: u64,
    /// Base seed for the event stream. Must not overlap the trace stream.
    pub event_seed_base: u64,
    /// Probability that a trace is marked for failure injection.
    pub failure_probability: f64,
    /// Lookback window for timestamps, in hours.
    pub lookback_hours: f64,
    /// "Now" for the generated history.
    pub reference_time: DateTime<Utc>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            trace_count: 25,
            event_count: 60,
            trace_seed_base: seed::TRACE_SEED_BASE,
            event_seed_base: seed::EVENT_SEED_BASE,
            failure_probability: 0.12,
            lookback_hours: 168.0,
            reference_time: Utc::now(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Step Materializer
// ═══════════════════════════════════════════════════════════════════════════

/// Expand a template list into concrete timed steps.
///
/// When `force_failure` is set, one step in `[1, len-1]` fails and every
/// step after it is skipped with zero duration, zero cost, and no
/// payload. Pipelines
/// shorter than two steps are never force-failed: the entry trigger is
/// modeled as always succeeding, and there is nothing after it to fail.
pub fn materialize_steps(
    templates: &[StepTemplate],
    seed: u64,
    force_failure: bool,
) -> Vec<TraceStep> {
    let failure_index = if force_failure && templates.len() >= 2 {
        Some(1 + pick_index(field_seed(seed, field::FAILURE_INDEX), templates.len() - 1))
    } else {
        None
    };

    let mut steps = Vec::with_capacity(templates.len());
    let mut offset_ms: u64 = 0;

    for (i, template) in templates.iter().enumerate() {
        let sub_seed = step_seed(seed, i);

        let status = match failure_index {
            Some(f) if i == f => StepStatus::Failed,
            Some(f) if i > f => StepStatus::Skipped,
            _ => StepStatus::Completed,
        };

        // A skipped step never ran, so it contributes neither time nor
        // spend to the trace totals.
        let (duration_ms, cost) = if status == StepStatus::Skipped {
            (0, 0.0)
        } else {
            let jitter = unit_in(field_seed(sub_seed, field::JITTER), 0.8, 1.2);
            ((template.base_duration_ms as f64 * jitter).round() as u64, template.base_cost)
        };

        let (input, output, error) = match status {
            StepStatus::Skipped => (None, None, None),
            StepStatus::Failed => (
                template.input.clone(),
                None,
                Some(synthesize_error(template, field_seed(sub_seed, field::ERROR_MSG))),
            ),
            _ => (template.input.clone(), template.output.clone(), None),
        };

        let tokens = if template.kind == StepKind::LlmCall && status == StepStatus::Completed {
            extract_tokens(output.as_ref())
        } else {
            None
        };

        steps.push(TraceStep {
            id: format!("step-{}", i + 1),
            name: template.name.to_string(),
            kind: template.kind,
            status,
            start_offset_ms: offset_ms,
            duration_ms,
            cost,
            integration: template.integration.map(str::to_string),
            model: template.model.map(str::to_string),
            input,
            output,
            error,
            tokens,
        });

        // Next step starts after this one plus a small hand-off gap, so
        // trace timelines are reproducible but not uniform.
        let gap_ms = unit_in(field_seed(sub_seed, field::GAP), 0.0, 50.0) as u64;
        offset_ms += duration_ms + gap_ms;
    }

    steps
}

/// Lift token counts out of an llm_call output payload's `usage` object.
fn extract_tokens(output: Option<&serde_json::Value>) -> Option<TokenUsage> {
    let usage = output?.get("usage")?;
    Some(TokenUsage {
        input: usage.get("input_tokens")?.as_u64()?,
        output: usage.get("output_tokens")?.as_u64()?,
    })
}

/// Pick a failure message appropriate to the step's kind and integration.
fn synthesize_error(template: &StepTemplate, seed: u64) -> String {
    let service = template.integration.unwrap_or("upstream service");
    match template.kind {
        StepKind::ApiCall => {
            let pool = [
                format!("{service} API request timed out after 30000ms"),
                format!("{service} returned 503 Service Unavailable"),
                format!("Rate limit exceeded on {service} API (retry-after: 120s)"),
                format!("{service} rejected the request: authentication token expired"),
            ];
            pool[pick_index(seed, pool.len())].clone()
        }
        StepKind::LlmCall => {
            let model = template.model.unwrap_or("model");
            let pool = [
                format!("{model} provider returned 529 Overloaded"),
                format!("Context window exceeded for {model}"),
                "Model call timed out waiting for first token".to_string(),
                "Model response failed JSON schema validation".to_string(),
            ];
            pool[pick_index(seed, pool.len())].clone()
        }
        StepKind::Conditional => {
            let pool = [
                "Branch expression referenced a missing field".to_string(),
                "Type mismatch while evaluating branch expression".to_string(),
            ];
            pool[pick_index(seed, pool.len())].clone()
        }
        StepKind::Trigger => {
            format!("{service} trigger payload failed schema validation")
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trace Assembler
// ═══════════════════════════════════════════════════════════════════════════

/// Assemble one trace for an already-chosen subject, or `None` when the
/// subject has no modeled pipeline.
pub fn assemble_trace(
    agent: AgentProfile,
    seed: u64,
    config: &GeneratorConfig,
) -> Option<ExecutionTrace> {
    let templates = templates_for(agent.id);
    if templates.is_empty() {
        debug!(agent_id = %agent.id, "no pipeline modeled, skipping subject");
        return None;
    }

    let (_, actor_name) = ACTORS[pick_index(field_seed(seed, field::ACTOR), ACTORS.len())];
    let hours_ago = unit_in(field_seed(seed, field::HOURS_AGO), 0.0, config.lookback_hours);
    let force_failure = chance(field_seed(seed, field::FAILURE), config.failure_probability);
    let trigger_type =
        TriggerType::ALL[pick_index(field_seed(seed, field::TRIGGER_TYPE), TriggerType::ALL.len())];

    let steps = materialize_steps(&templates, seed, force_failure);

    let duration_ms = steps
        .iter()
        .map(|s| s.start_offset_ms + s.duration_ms)
        .max()
        .unwrap_or(0);
    let total_cost: f64 = steps.iter().map(|s| s.cost).sum();
    let successful_steps = steps.iter().filter(|s| s.status == StepStatus::Completed).count();
    let failed_steps = steps.iter().filter(|s| s.status == StepStatus::Failed).count();
    let status = if failed_steps > 0 {
        ExecutionStatus::Failed
    } else {
        ExecutionStatus::Completed
    };

    let started_at =
        config.reference_time - Duration::milliseconds((hours_ago * 3_600_000.0) as i64);
    let completed_at = started_at + Duration::milliseconds(duration_ms as i64);

    Some(ExecutionTrace {
        id: format!("exec-{seed}"),
        agent_id: agent.id.to_string(),
        agent_name: agent.name.to_string(),
        status,
        triggered_by: actor_name.to_string(),
        trigger_type,
        started_at,
        completed_at,
        duration_ms,
        total_cost,
        total_steps: steps.len(),
        successful_steps,
        failed_steps,
        steps,
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Batch Generators
// ═══════════════════════════════════════════════════════════════════════════

/// Generate the trace batch, newest first.
pub fn generate_traces(config: &GeneratorConfig) -> Vec<ExecutionTrace> {
    let mut traces: Vec<ExecutionTrace> = (0..config.trace_count)
        .filter_map(|i| {
            let seed = trace_seed(config.trace_seed_base, i);
            let agent = AGENTS[pick_index(field_seed(seed, field::SUBJECT), AGENTS.len())];
            assemble_trace(agent, seed, config)
        })
        .collect();

    traces.sort_by(|a, b| b.started_at.cmp(&a.started_at));

    info!(
        count = traces.len(),
        failed = traces.iter().filter(|t| t.status == ExecutionStatus::Failed).count(),
        "generated execution traces"
    );
    traces
}

/// Generate the flat event batch, newest first. Events are independent
/// of one another and of the trace pipeline.
pub fn generate_events(config: &GeneratorConfig) -> Vec<ActivityEvent> {
    let mut events: Vec<ActivityEvent> = (0..config.event_count)
        .map(|i| build_event(event_seed(config.event_seed_base, i), config))
        .collect();

    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    info!(count = events.len(), "generated activity events");
    events
}

fn build_event(seed: u64, config: &GeneratorConfig) -> ActivityEvent {
    let hours_ago = unit_in(field_seed(seed, field::HOURS_AGO), 0.0, config.lookback_hours);
    let timestamp =
        config.reference_time - Duration::milliseconds((hours_ago * 3_600_000.0) as i64);
    let (actor_id, actor_name) =
        ACTORS[pick_index(field_seed(seed, field::ACTOR), ACTORS.len())];
    let agent = AGENTS[pick_index(field_seed(seed, field::SUBJECT), AGENTS.len())];

    let details = build_details(seed, agent);

    // Execution-related events point at a real trace from the batch; the
    // trace stream emits one record per seed, so every reference resolves.
    // An empty trace batch leaves nothing to reference.
    let execution_id = (config.trace_count > 0 && details.is_execution_related()).then(|| {
        let idx = pick_index(field_seed(seed, field::EXEC_REF), config.trace_count);
        format!("exec-{}", trace_seed(config.trace_seed_base, idx))
    });

    // Platform-level integration events have no agent subject.
    let (agent_id, agent_name) = match &details {
        EventDetails::IntegrationConnected { .. } => (None, None),
        _ => (Some(agent.id.to_string()), Some(agent.name.to_string())),
    };

    let metadata = chance(field_seed(seed, field::METADATA), 0.5).then(|| {
        let ips = ["203.0.113.42", "198.51.100.17", "192.0.2.201", "203.0.113.9"];
        let regions = ["us-east-1", "us-west-2", "eu-west-1", "ap-southeast-2"];
        EventMetadata {
            ip: ips[pick_index(field_seed(seed, field::METADATA_IP), ips.len())].to_string(),
            region: regions
                [pick_index(field_seed(seed, field::METADATA_REGION), regions.len())]
            .to_string(),
        }
    });

    ActivityEvent {
        id: format!("evt-{seed}"),
        timestamp,
        agent_id,
        agent_name,
        execution_id,
        actor_id: actor_id.to_string(),
        actor_name: actor_name.to_string(),
        details,
        metadata,
    }
}

/// Build the type-conditioned detail payload for one event.
fn build_details(seed: u64, agent: AgentProfile) -> EventDetails {
    let a = field_seed(seed, field::DETAIL_A);
    let b = field_seed(seed, field::DETAIL_B);
    let c = field_seed(seed, field::DETAIL_C);

    match pick_index(field_seed(seed, field::EVENT_TYPE), 8) {
        0 => EventDetails::ExecutionStarted {
            trigger: TriggerType::ALL[pick_index(a, TriggerType::ALL.len())],
        },
        1 => EventDetails::ExecutionCompleted {
            duration_ms: unit_in(a, 800.0, 18_000.0) as u64,
            total_cost: round3(unit_in(b, 0.001, 0.08)),
            steps_completed: 3 + pick_index(c, 6),
        },
        2 => {
            // Name a real non-trigger step from the subject's pipeline.
            let templates = templates_for(agent.id);
            let step_failed = if templates.len() >= 2 {
                templates[1 + pick_index(b, templates.len() - 1)].name.to_string()
            } else {
                "unknown".to_string()
            };
            EventDetails::ExecutionFailed {
                error: pick_str(
                    a,
                    &[
                        "Downstream API returned 503 Service Unavailable",
                        "Model call timed out waiting for first token",
                        "Rate limit exceeded (retry-after: 120s)",
                        "Authentication token expired mid-run",
                    ],
                ),
                step_failed,
            }
        }
        3 => {
            let tools = [
                ("slack", "chat.postMessage"),
                ("zendesk", "tickets.update"),
                ("salesforce", "soql.query"),
                ("stripe", "invoices.list"),
                ("notion", "pages.create"),
                ("hubspot", "tasks.create"),
            ];
            let (integration, tool) = tools[pick_index(a, tools.len())];
            EventDetails::ToolCalled {
                integration: integration.to_string(),
                tool: tool.to_string(),
                latency_ms: unit_in(b, 80.0, 2_500.0) as u64,
            }
        }
        4 => EventDetails::AgentCreated {
            version: format!("{}.{}.0", 1 + pick_index(a, 2), pick_index(b, 10)),
        },
        5 => EventDetails::AgentUpdated {
            field_changed: pick_str(
                a,
                &[
                    "system_prompt",
                    "model",
                    "temperature",
                    "retry_policy",
                    "step: Notify Channel added",
                ],
            ),
        },
        6 => EventDetails::IntegrationConnected {
            integration: pick_str(
                a,
                &["slack", "zendesk", "salesforce", "snowflake", "notion", "hubspot"],
            ),
        },
        _ => EventDetails::ErrorOccurred {
            error: pick_str(
                a,
                &[
                    "Webhook signature verification failed",
                    "Credential refresh failed for connected account",
                    "Execution queue backlog exceeded threshold",
                    "Unhandled payload shape from upstream webhook",
                ],
            ),
            severity: pick_str(b, &["warning", "error", "critical"]),
        },
    }
}

fn pick_str(seed: u64, pool: &[&str]) -> String {
    pool[pick_index(seed, pool.len())].to_string()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

// ═══════════════════════════════════════════════════════════════════════════
// Dataset
// ═══════════════════════════════════════════════════════════════════════════

/// The session-constant generated collections.
#[derive(Debug, Clone)]
pub struct ActivityDataset {
    pub traces: Vec<ExecutionTrace>,
    pub events: Vec<ActivityEvent>,
}

impl ActivityDataset {
    /// Run both generators once. Pure: the same config yields the same
    /// dataset.
    pub fn build(config: &GeneratorConfig) -> Self {
        Self {
            traces: generate_traces(config),
            events: generate_events(config),
        }
    }
}

static DATASET: OnceLock<ActivityDataset> = OnceLock::new();

/// The memoized default dataset. Built on first access with
/// `GeneratorConfig::default()` and immutable for the session.
pub fn dataset() -> &'static ActivityDataset {
    DATASET.get_or_init(|| ActivityDataset::build(&GeneratorConfig::default()))
}

/// All generated execution traces, newest first.
pub fn execution_traces() -> &'static [ExecutionTrace] {
    &dataset().traces
}

/// All generated activity events, newest first.
pub fn activity_events() -> &'static [ActivityEvent] {
    &dataset().events
}
