//! Query and summary layer over the generated collections
//!
//! Pure predicate filters with AND semantics: a record survives when it
//! matches every populated field of the filter. Nothing here mutates the
//! dataset; callers get fresh vectors and can re-filter freely.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::types::{ActivityEvent, EventDetails, ExecutionStatus, ExecutionTrace};

// ═══════════════════════════════════════════════════════════════════════════
// Date Range
// ═══════════════════════════════════════════════════════════════════════════

/// Named lookback windows the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Last7Days,
    Last14Days,
    Last30Days,
}

impl DateRange {
    pub fn days(self) -> i64 {
        match self {
            DateRange::Last7Days => 7,
            DateRange::Last14Days => 14,
            DateRange::Last30Days => 30,
        }
    }

    /// Records at or after this instant fall inside the window.
    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.days())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateRange::Last7Days => "7d",
            DateRange::Last14Days => "14d",
            DateRange::Last30Days => "30d",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized date range '{0}', expected 7d, 14d, or 30d")]
pub struct ParseDateRangeError(String);

impl FromStr for DateRange {
    type Err = ParseDateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(DateRange::Last7Days),
            "14d" => Ok(DateRange::Last14Days),
            "30d" => Ok(DateRange::Last30Days),
            other => Err(ParseDateRangeError(other.to_string())),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trace Filter
// ═══════════════════════════════════════════════════════════════════════════

/// Filter over execution traces. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TraceFilter {
    pub agent_id: Option<String>,
    pub status: Option<ExecutionStatus>,
    pub date_range: Option<DateRange>,
    /// Case-insensitive substring over agent name, actor, and ids.
    pub search: Option<String>,
}

/// Apply a [`TraceFilter`] with AND semantics. `now` anchors the date
/// range so calls against the session-constant dataset stay testable.
pub fn filter_traces(
    traces: &[ExecutionTrace],
    filter: &TraceFilter,
    now: DateTime<Utc>,
) -> Vec<ExecutionTrace> {
    let needle = filter.search.as_deref().map(str::to_lowercase);
    traces
        .iter()
        .filter(|t| filter.agent_id.as_deref().is_none_or(|id| t.agent_id == id))
        .filter(|t| filter.status.is_none_or(|s| t.status == s))
        .filter(|t| {
            filter
                .date_range
                .is_none_or(|r| t.started_at >= r.cutoff(now))
        })
        .filter(|t| {
            needle.as_deref().is_none_or(|q| {
                t.agent_name.to_lowercase().contains(q)
                    || t.triggered_by.to_lowercase().contains(q)
                    || t.id.to_lowercase().contains(q)
                    || t.agent_id.to_lowercase().contains(q)
            })
        })
        .cloned()
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Event Filter
// ═══════════════════════════════════════════════════════════════════════════

/// Filter over activity events. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub agent_id: Option<String>,
    /// Wire-format event type, e.g. `"execution_failed"`.
    pub event_type: Option<String>,
    pub date_range: Option<DateRange>,
    /// Case-insensitive substring over actor, agent name, id, event type,
    /// and a JSON dump of the details payload.
    pub search: Option<String>,
}

/// Apply an [`EventFilter`] with AND semantics.
pub fn filter_events(
    events: &[ActivityEvent],
    filter: &EventFilter,
    now: DateTime<Utc>,
) -> Vec<ActivityEvent> {
    let needle = filter.search.as_deref().map(str::to_lowercase);
    events
        .iter()
        .filter(|e| {
            filter
                .agent_id
                .as_deref()
                .is_none_or(|id| e.agent_id.as_deref() == Some(id))
        })
        .filter(|e| {
            filter
                .event_type
                .as_deref()
                .is_none_or(|ty| e.details.type_name() == ty)
        })
        .filter(|e| {
            filter
                .date_range
                .is_none_or(|r| e.timestamp >= r.cutoff(now))
        })
        .filter(|e| {
            needle.as_deref().is_none_or(|q| {
                let details_dump = serde_json::to_string(&e.details)
                    .unwrap_or_default()
                    .to_lowercase();
                e.actor_name.to_lowercase().contains(q)
                    || e.agent_name.as_deref().unwrap_or("").to_lowercase().contains(q)
                    || e.id.to_lowercase().contains(q)
                    || e.details.type_name().contains(q)
                    || details_dump.contains(q)
            })
        })
        .cloned()
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Summary
// ═══════════════════════════════════════════════════════════════════════════

/// Aggregates over one lookback window, shaped for the overview cards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivitySummary {
    pub total_executions: usize,
    pub completed_executions: usize,
    pub failed_executions: usize,
    /// Percentage of completed executions, rounded to 1 decimal.
    pub success_rate: f64,
    pub avg_duration_ms: u64,
    /// Summed execution cost in USD, rounded to 3 decimals.
    pub total_cost: f64,
    pub total_events: usize,
    /// Events carrying an error payload (execution_failed, error_occurred).
    pub error_events: usize,
}

/// Summarize traces and events inside the given window.
pub fn activity_summary(
    traces: &[ExecutionTrace],
    events: &[ActivityEvent],
    range: DateRange,
    now: DateTime<Utc>,
) -> ActivitySummary {
    let cutoff = range.cutoff(now);
    let window: Vec<&ExecutionTrace> =
        traces.iter().filter(|t| t.started_at >= cutoff).collect();

    let total_executions = window.len();
    let completed_executions = window
        .iter()
        .filter(|t| t.status == ExecutionStatus::Completed)
        .count();
    let failed_executions = total_executions - completed_executions;

    let success_rate = if total_executions == 0 {
        0.0
    } else {
        let pct = completed_executions as f64 / total_executions as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    };

    let avg_duration_ms = if total_executions == 0 {
        0
    } else {
        window.iter().map(|t| t.duration_ms).sum::<u64>() / total_executions as u64
    };

    let total_cost = {
        let sum: f64 = window.iter().map(|t| t.total_cost).sum();
        (sum * 1000.0).round() / 1000.0
    };

    let in_window: Vec<&ActivityEvent> =
        events.iter().filter(|e| e.timestamp >= cutoff).collect();
    let error_events = in_window
        .iter()
        .filter(|e| {
            matches!(
                e.details,
                EventDetails::ExecutionFailed { .. } | EventDetails::ErrorOccurred { .. }
            )
        })
        .count();

    ActivitySummary {
        total_executions,
        completed_executions,
        failed_executions,
        success_rate,
        avg_duration_ms,
        total_cost,
        total_events: in_window.len(),
        error_events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_range_round_trips() {
        for (s, range) in [
            ("7d", DateRange::Last7Days),
            ("14d", DateRange::Last14Days),
            ("30d", DateRange::Last30Days),
        ] {
            assert_eq!(s.parse::<DateRange>().unwrap(), range);
            assert_eq!(range.as_str(), s);
        }
        assert!("90d".parse::<DateRange>().is_err());
    }
}
