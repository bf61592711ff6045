//! Tests for the generated activity dataset
//!
//! - Determinism: same config, same dataset, byte for byte
//! - Step-status partition and aggregate consistency per trace
//! - Timeline monotonicity and newest-first sort order
//! - Filter composability and summary aggregates
//! - Cron humanizer reference examples

use std::sync::Once;

use agentdash_core::*;
use chrono::{TimeZone, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static TRACING: Once = Once::new();

/// Route generator log output through the test harness, once per binary.
fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "agentdash_core=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}

fn fixed_config() -> GeneratorConfig {
    init_tracing();
    GeneratorConfig {
        reference_time: Utc
            .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
            .single()
            .unwrap(),
        ..GeneratorConfig::default()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Determinism
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_same_config_yields_identical_dataset() {
    let config = fixed_config();
    let first = ActivityDataset::build(&config);
    let second = ActivityDataset::build(&config);

    assert_eq!(first.traces, second.traces);
    assert_eq!(first.events, second.events);
}

#[test]
fn test_disjoint_seed_bases_decorrelate_streams() {
    let config = fixed_config();
    let shifted = GeneratorConfig {
        event_seed_base: 9000,
        ..fixed_config()
    };

    let base = ActivityDataset::build(&config);
    let moved = ActivityDataset::build(&shifted);
    assert_ne!(base.events, moved.events);
    // Traces draw from their own stream and are untouched.
    assert_eq!(base.traces, moved.traces);
}

// ═══════════════════════════════════════════════════════════════════════════
// Step-status partition
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_steps_partition_into_resolved_prefix_and_skipped_suffix() {
    let dataset = ActivityDataset::build(&fixed_config());

    for trace in &dataset.traces {
        let failed: Vec<usize> = trace
            .steps
            .iter()
            .enumerate()
            .filter(|(_, s)| s.status == StepStatus::Failed)
            .map(|(i, _)| i)
            .collect();
        assert!(failed.len() <= 1, "{}: multiple failed steps", trace.id);

        let first_skipped = trace
            .steps
            .iter()
            .position(|s| s.status == StepStatus::Skipped);

        if let Some(skip_start) = first_skipped {
            // Skips only follow a failure, immediately after it.
            let fail_at = failed[0];
            assert_eq!(skip_start, fail_at + 1, "{}", trace.id);
            for step in &trace.steps[skip_start..] {
                assert_eq!(step.status, StepStatus::Skipped, "{}", trace.id);
            }
        }

        for step in &trace.steps {
            match step.status {
                StepStatus::Completed => {
                    assert!(step.error.is_none());
                    assert!(step.output.is_some() || step.input.is_none());
                }
                StepStatus::Failed => {
                    assert!(step.error.is_some(), "{}: failed without error", trace.id);
                    assert!(step.output.is_none());
                }
                StepStatus::Skipped => {
                    assert_eq!(step.duration_ms, 0);
                    assert_eq!(step.cost, 0.0);
                    assert!(step.input.is_none());
                    assert!(step.output.is_none());
                    assert!(step.error.is_none());
                }
                StepStatus::Running => panic!("{}: generator emitted running", trace.id),
            }
        }
    }
}

#[test]
fn test_skipped_steps_carry_no_duration_or_cost() {
    let templates = templates::templates_for("agent-001");
    let mut saw_skipped = false;

    for seed in 0..20 {
        let steps = generator::materialize_steps(&templates, seed, true);
        let fail_at = steps
            .iter()
            .position(|s| s.status == StepStatus::Failed)
            .expect("forced failure missing");
        for step in &steps[fail_at + 1..] {
            saw_skipped = true;
            assert_eq!(step.status, StepStatus::Skipped);
            assert_eq!(step.duration_ms, 0, "seed {seed}: {}", step.name);
            assert_eq!(step.cost, 0.0, "seed {seed}: {} billed", step.name);
        }
    }
    // 20 seeds over a 7-step pipeline cannot all fail on the last step.
    assert!(saw_skipped);
}

#[test]
fn test_first_step_never_fails() {
    let dataset = ActivityDataset::build(&fixed_config());
    for trace in &dataset.traces {
        assert_ne!(trace.steps[0].status, StepStatus::Failed, "{}", trace.id);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Aggregate consistency
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_trace_aggregates_derive_from_steps() {
    let dataset = ActivityDataset::build(&fixed_config());

    for trace in &dataset.traces {
        let max_end = trace
            .steps
            .iter()
            .map(|s| s.start_offset_ms + s.duration_ms)
            .max()
            .unwrap();
        assert_eq!(trace.duration_ms, max_end, "{}", trace.id);

        let cost: f64 = trace.steps.iter().map(|s| s.cost).sum();
        assert!((trace.total_cost - cost).abs() < 1e-12, "{}", trace.id);

        let completed = trace
            .steps
            .iter()
            .filter(|s| s.status == StepStatus::Completed)
            .count();
        let failed = trace
            .steps
            .iter()
            .filter(|s| s.status == StepStatus::Failed)
            .count();
        assert_eq!(trace.successful_steps, completed);
        assert_eq!(trace.failed_steps, failed);
        assert_eq!(trace.total_steps, trace.steps.len());
        assert!(trace.successful_steps + trace.failed_steps <= trace.total_steps);

        let expected_status = if failed > 0 {
            ExecutionStatus::Failed
        } else {
            ExecutionStatus::Completed
        };
        assert_eq!(trace.status, expected_status, "{}", trace.id);

        assert_eq!(
            trace.completed_at - trace.started_at,
            chrono::Duration::milliseconds(trace.duration_ms as i64),
        );
    }
}

#[test]
fn test_offsets_are_monotonic_with_gaps() {
    let dataset = ActivityDataset::build(&fixed_config());
    for trace in &dataset.traces {
        for pair in trace.steps.windows(2) {
            assert!(
                pair[1].start_offset_ms >= pair[0].start_offset_ms + pair[0].duration_ms,
                "{}: overlapping steps",
                trace.id
            );
        }
    }
}

#[test]
fn test_tokens_only_on_completed_llm_steps() {
    let dataset = ActivityDataset::build(&fixed_config());
    for trace in &dataset.traces {
        for step in &trace.steps {
            if step.tokens.is_some() {
                assert_eq!(step.kind, StepKind::LlmCall);
                assert_eq!(step.status, StepStatus::Completed);
            }
            if step.kind == StepKind::LlmCall && step.status == StepStatus::Completed {
                assert!(step.tokens.is_some(), "{}: {} lost usage", trace.id, step.name);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Sort order and reference scenario
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_collections_sorted_newest_first() {
    let dataset = ActivityDataset::build(&fixed_config());
    for pair in dataset.traces.windows(2) {
        assert!(pair[0].started_at >= pair[1].started_at);
    }
    for pair in dataset.events.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }
}

#[test]
fn test_reference_batch_shape() {
    let dataset = ActivityDataset::build(&fixed_config());
    // Every roster agent has a pipeline, so no slot is skipped.
    assert_eq!(dataset.traces.len(), 25);
    assert_eq!(dataset.events.len(), 60);

    for trace in &dataset.traces {
        let expected = templates::templates_for(&trace.agent_id).len();
        assert_eq!(trace.total_steps, expected, "{}", trace.id);
    }
}

#[test]
fn test_failure_rate_tracks_probability() {
    let config = GeneratorConfig {
        trace_count: 200,
        ..fixed_config()
    };
    let traces = generator::generate_traces(&config);
    let failed = traces
        .iter()
        .filter(|t| t.status == ExecutionStatus::Failed)
        .count();
    let rate = failed as f64 / traces.len() as f64;
    assert!((0.04..=0.25).contains(&rate), "failure rate {rate}");
}

#[test]
fn test_memoized_accessors_return_one_stable_dataset() {
    let traces = execution_traces();
    let events = activity_events();
    assert_eq!(traces.len(), 25);
    assert_eq!(events.len(), 60);

    // Same build every access, not a re-generation.
    assert!(std::ptr::eq(traces, execution_traces()));
    assert!(std::ptr::eq(events, activity_events()));
    assert!(std::ptr::eq(dataset(), dataset()));
}

// ═══════════════════════════════════════════════════════════════════════════
// Events
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_execution_ids_correlate_only_for_execution_events() {
    let dataset = ActivityDataset::build(&fixed_config());
    let trace_ids: Vec<&str> = dataset.traces.iter().map(|t| t.id.as_str()).collect();

    for event in &dataset.events {
        if event.details.is_execution_related() {
            let exec_id = event.execution_id.as_deref().expect("missing execution_id");
            assert!(trace_ids.contains(&exec_id), "{}: dangling {exec_id}", event.id);
        } else {
            assert!(event.execution_id.is_none(), "{}", event.id);
        }
    }
}

#[test]
fn test_events_survive_an_empty_trace_batch() {
    let config = GeneratorConfig {
        trace_count: 0,
        ..fixed_config()
    };
    let dataset = ActivityDataset::build(&config);
    assert!(dataset.traces.is_empty());
    assert_eq!(dataset.events.len(), 60);

    // Nothing to correlate against, so no event may claim an execution.
    for event in &dataset.events {
        assert!(event.execution_id.is_none(), "{}: dangling reference", event.id);
    }
}

#[test]
fn test_metadata_attaches_to_roughly_half() {
    let config = GeneratorConfig {
        event_count: 400,
        ..fixed_config()
    };
    let events = generator::generate_events(&config);
    let with_meta = events.iter().filter(|e| e.metadata.is_some()).count();
    let share = with_meta as f64 / events.len() as f64;
    assert!((0.38..=0.62).contains(&share), "metadata share {share}");
}

#[test]
fn test_event_wire_shape() {
    let dataset = ActivityDataset::build(&fixed_config());
    let event = &dataset.events[0];
    let value = serde_json::to_value(event).unwrap();

    assert!(value.get("type").is_some());
    assert!(value.get("details").is_some());
    assert_eq!(value["type"].as_str().unwrap(), event.details.type_name());
}

// ═══════════════════════════════════════════════════════════════════════════
// Filters and summary
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_filters_compose_like_a_single_combined_filter() {
    let config = fixed_config();
    let dataset = ActivityDataset::build(&config);
    let now = config.reference_time;

    let by_status = TraceFilter {
        status: Some(ExecutionStatus::Completed),
        ..TraceFilter::default()
    };
    let by_agent = TraceFilter {
        agent_id: Some("agent-001".to_string()),
        ..TraceFilter::default()
    };
    let combined = TraceFilter {
        status: Some(ExecutionStatus::Completed),
        agent_id: Some("agent-001".to_string()),
        ..TraceFilter::default()
    };

    let sequential = filter_traces(&filter_traces(&dataset.traces, &by_status, now), &by_agent, now);
    let at_once = filter_traces(&dataset.traces, &combined, now);
    assert_eq!(sequential, at_once);

    // Re-filtering with the same predicate is a no-op.
    assert_eq!(filter_traces(&at_once, &combined, now), at_once);
}

#[test]
fn test_trace_search_is_case_insensitive() {
    let config = fixed_config();
    let dataset = ActivityDataset::build(&config);

    let filter = TraceFilter {
        search: Some("SUPPORT TICKET".to_string()),
        ..TraceFilter::default()
    };
    let hits = filter_traces(&dataset.traces, &filter, config.reference_time);
    assert!(hits.iter().all(|t| t.agent_name == "Support Ticket Triage"));
    let direct = dataset
        .traces
        .iter()
        .filter(|t| t.agent_name == "Support Ticket Triage")
        .count();
    assert_eq!(hits.len(), direct);

    // Every id carries the exec- prefix, so this matches the whole batch.
    let by_id = TraceFilter {
        search: Some("EXEC-".to_string()),
        ..TraceFilter::default()
    };
    assert_eq!(
        filter_traces(&dataset.traces, &by_id, config.reference_time).len(),
        dataset.traces.len()
    );
}

#[test]
fn test_event_search_reaches_into_details() {
    let config = fixed_config();
    let dataset = ActivityDataset::build(&config);

    // Type names match even when no display field contains the text.
    let filter = EventFilter {
        search: Some("tool_called".to_string()),
        ..EventFilter::default()
    };
    let hits = filter_events(&dataset.events, &filter, config.reference_time);
    assert!(
        hits.iter()
            .all(|e| e.details.type_name() == "tool_called")
    );

    let by_type = EventFilter {
        event_type: Some("tool_called".to_string()),
        ..EventFilter::default()
    };
    assert_eq!(
        hits.len(),
        filter_events(&dataset.events, &by_type, config.reference_time).len()
    );
}

#[test]
fn test_summary_over_the_full_window() {
    let config = fixed_config();
    let dataset = ActivityDataset::build(&config);
    let summary = activity_summary(
        &dataset.traces,
        &dataset.events,
        DateRange::Last7Days,
        config.reference_time,
    );

    // The lookback window is exactly one week, so everything is inside.
    assert_eq!(summary.total_executions, 25);
    assert_eq!(summary.total_events, 60);
    assert_eq!(
        summary.completed_executions + summary.failed_executions,
        summary.total_executions
    );
    assert!((0.0..=100.0).contains(&summary.success_rate));
    assert_eq!(summary.success_rate, (summary.success_rate * 10.0).round() / 10.0);
    assert!(summary.avg_duration_ms > 0);
    assert!(summary.total_cost > 0.0);
}

#[test]
fn test_summary_of_empty_window_is_zeroed() {
    let config = fixed_config();
    let dataset = ActivityDataset::build(&config);
    // Anchor "now" far in the future so the window is empty.
    let future = config.reference_time + chrono::Duration::days(365);
    let summary =
        activity_summary(&dataset.traces, &dataset.events, DateRange::Last7Days, future);

    assert_eq!(summary.total_executions, 0);
    assert_eq!(summary.success_rate, 0.0);
    assert_eq!(summary.avg_duration_ms, 0);
    assert_eq!(summary.total_cost, 0.0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Cron humanizer reference examples
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cron_reference_examples() {
    assert_eq!(humanize_cron("0 8 * * 1"), "Every Monday at 8:00");
    assert_eq!(humanize_cron("30 14 * * *"), "Daily at 14:30");
    assert_eq!(humanize_cron("0 9 15 * *"), "Monthly on day 15 at 9:00");
    assert_eq!(humanize_cron("*/5 * * * *"), "*/5 * * * *");
}
