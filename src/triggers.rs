//! Agent trigger fixtures and lookups
//!
//! Triggers are static catalog data, not generator output: built once at
//! first access, never mutated here. The UI layer keeps its own local
//! state for enable/disable toggles.

use std::sync::OnceLock;

use chrono::{DateTime, TimeZone, Utc};

use crate::cron::humanize_cron;
use crate::types::{AgentTrigger, TriggerConfig, TriggerType};

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("valid fixture timestamp")
}

// ═══════════════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════════════

fn build_triggers() -> Vec<AgentTrigger> {
    vec![
        AgentTrigger {
            id: "trig-001".to_string(),
            agent_id: "agent-001".to_string(),
            agent_name: "Support Ticket Triage".to_string(),
            enabled: true,
            created_at: ts(2024, 2, 12, 15, 4),
            config: TriggerConfig::Webhook {
                webhook_id: "wh_8f31a2".to_string(),
                url: "https://hooks.agentdash.dev/wh_8f31a2".to_string(),
                auth_type: "hmac_sha256".to_string(),
            },
            last_triggered: Some(ts(2024, 6, 14, 18, 22)),
            trigger_count: 4812,
        },
        AgentTrigger {
            id: "trig-002".to_string(),
            agent_id: "agent-002".to_string(),
            agent_name: "Lead Enrichment".to_string(),
            enabled: true,
            created_at: ts(2024, 3, 4, 10, 41),
            config: TriggerConfig::Api {
                endpoint: "/v1/agents/lead-enrichment/run".to_string(),
                method: "POST".to_string(),
                requires_auth: true,
            },
            last_triggered: Some(ts(2024, 6, 14, 17, 3)),
            trigger_count: 1276,
        },
        AgentTrigger {
            id: "trig-003".to_string(),
            agent_id: "agent-003".to_string(),
            agent_name: "Invoice Processing".to_string(),
            enabled: true,
            created_at: ts(2024, 1, 29, 8, 15),
            config: TriggerConfig::Webhook {
                webhook_id: "wh_c07d9e".to_string(),
                url: "https://hooks.agentdash.dev/wh_c07d9e".to_string(),
                auth_type: "bearer".to_string(),
            },
            last_triggered: Some(ts(2024, 6, 13, 9, 48)),
            trigger_count: 893,
        },
        AgentTrigger {
            id: "trig-004".to_string(),
            agent_id: "agent-004".to_string(),
            agent_name: "Content Moderation".to_string(),
            enabled: false,
            created_at: ts(2024, 4, 18, 13, 27),
            config: TriggerConfig::Webhook {
                webhook_id: "wh_44b1f0".to_string(),
                url: "https://hooks.agentdash.dev/wh_44b1f0".to_string(),
                auth_type: "hmac_sha256".to_string(),
            },
            last_triggered: Some(ts(2024, 6, 1, 22, 10)),
            trigger_count: 15204,
        },
        AgentTrigger {
            id: "trig-005".to_string(),
            agent_id: "agent-005".to_string(),
            agent_name: "Weekly Metrics Digest".to_string(),
            enabled: true,
            created_at: ts(2024, 2, 26, 16, 58),
            config: TriggerConfig::Scheduled {
                cron: "0 8 * * 1".to_string(),
                timezone: "America/New_York".to_string(),
                next_run: ts(2024, 6, 17, 12, 0),
                last_run: Some(ts(2024, 6, 10, 12, 0)),
            },
            last_triggered: Some(ts(2024, 6, 10, 12, 0)),
            trigger_count: 16,
        },
        AgentTrigger {
            id: "trig-006".to_string(),
            agent_id: "agent-006".to_string(),
            agent_name: "Churn Risk Monitor".to_string(),
            enabled: true,
            created_at: ts(2024, 3, 22, 11, 9),
            config: TriggerConfig::Scheduled {
                cron: "30 14 * * *".to_string(),
                timezone: "UTC".to_string(),
                next_run: ts(2024, 6, 15, 14, 30),
                last_run: Some(ts(2024, 6, 14, 14, 30)),
            },
            last_triggered: Some(ts(2024, 6, 14, 14, 30)),
            trigger_count: 84,
        },
        AgentTrigger {
            id: "trig-007".to_string(),
            agent_id: "agent-006".to_string(),
            agent_name: "Churn Risk Monitor".to_string(),
            enabled: true,
            created_at: ts(2024, 5, 7, 9, 33),
            config: TriggerConfig::Api {
                endpoint: "/v1/agents/churn-risk/run".to_string(),
                method: "POST".to_string(),
                requires_auth: true,
            },
            last_triggered: None,
            trigger_count: 0,
        },
        AgentTrigger {
            id: "trig-008".to_string(),
            agent_id: "agent-007".to_string(),
            agent_name: "Meeting Notes Assistant".to_string(),
            enabled: true,
            created_at: ts(2024, 4, 2, 14, 46),
            config: TriggerConfig::Webhook {
                webhook_id: "wh_9a6c53".to_string(),
                url: "https://hooks.agentdash.dev/wh_9a6c53".to_string(),
                auth_type: "bearer".to_string(),
            },
            last_triggered: Some(ts(2024, 6, 14, 20, 5)),
            trigger_count: 341,
        },
        AgentTrigger {
            id: "trig-009".to_string(),
            agent_id: "agent-003".to_string(),
            agent_name: "Invoice Processing".to_string(),
            enabled: false,
            created_at: ts(2024, 5, 20, 7, 52),
            config: TriggerConfig::Scheduled {
                cron: "0 9 15 * *".to_string(),
                timezone: "UTC".to_string(),
                next_run: ts(2024, 7, 15, 9, 0),
                last_run: Some(ts(2024, 6, 15, 9, 0)),
            },
            last_triggered: Some(ts(2024, 6, 15, 9, 0)),
            trigger_count: 4,
        },
    ]
}

static TRIGGERS: OnceLock<Vec<AgentTrigger>> = OnceLock::new();

// ═══════════════════════════════════════════════════════════════════════════
// Lookups
// ═══════════════════════════════════════════════════════════════════════════

/// The full trigger catalog.
pub fn triggers() -> &'static [AgentTrigger] {
    TRIGGERS.get_or_init(build_triggers)
}

/// Triggers owned by one agent.
pub fn triggers_by_agent(agent_id: &str) -> Vec<&'static AgentTrigger> {
    triggers().iter().filter(|t| t.agent_id == agent_id).collect()
}

/// Triggers of one type across all agents.
pub fn triggers_by_type(trigger_type: TriggerType) -> Vec<&'static AgentTrigger> {
    triggers()
        .iter()
        .filter(|t| t.trigger_type() == trigger_type)
        .collect()
}

/// Currently enabled triggers.
pub fn active_triggers() -> Vec<&'static AgentTrigger> {
    triggers().iter().filter(|t| t.enabled).collect()
}

impl AgentTrigger {
    /// Human-readable schedule for scheduled triggers, `None` otherwise.
    pub fn schedule_description(&self) -> Option<String> {
        match &self.config {
            TriggerConfig::Scheduled { cron, .. } => Some(humanize_cron(cron)),
            _ => None,
        }
    }
}
