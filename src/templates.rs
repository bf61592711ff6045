//! Agent roster and step template catalog
//!
//! Each roster agent owns an ordered pipeline of step blueprints the
//! materializer expands into concrete trace steps. Payloads here are
//! display fixtures modeled on real integration traffic; they are never
//! sent anywhere. Adding an agent means adding a profile and a template
//! list; nothing else in the core changes.

use serde_json::json;

use crate::types::{AgentProfile, StepKind, StepTemplate};

// ═══════════════════════════════════════════════════════════════════════════
// Rosters
// ═══════════════════════════════════════════════════════════════════════════

/// Subject roster shared by the trace generator, the event generator,
/// and the trigger fixtures.
pub const AGENTS: [AgentProfile; 7] = [
    AgentProfile { id: "agent-001", name: "Support Ticket Triage" },
    AgentProfile { id: "agent-002", name: "Lead Enrichment" },
    AgentProfile { id: "agent-003", name: "Invoice Processing" },
    AgentProfile { id: "agent-004", name: "Content Moderation" },
    AgentProfile { id: "agent-005", name: "Weekly Metrics Digest" },
    AgentProfile { id: "agent-006", name: "Churn Risk Monitor" },
    AgentProfile { id: "agent-007", name: "Meeting Notes Assistant" },
];

/// Actor roster. Human operators plus the platform's own service
/// identities, the way they show up in the audit feed.
pub const ACTORS: [(&str, &str); 5] = [
    ("user-001", "Sarah Chen"),
    ("user-002", "Marcus Webb"),
    ("user-003", "Priya Nair"),
    ("svc-scheduler", "Scheduler"),
    ("svc-api", "API Gateway"),
];

/// Look up an agent profile by id.
pub fn agent_by_id(agent_id: &str) -> Option<AgentProfile> {
    AGENTS.iter().copied().find(|a| a.id == agent_id)
}

/// Ordered step templates for an agent, empty when the agent has no
/// modeled pipeline. Callers treat empty as "nothing to generate",
/// never as an error.
pub fn templates_for(agent_id: &str) -> Vec<StepTemplate> {
    match agent_id {
        "agent-001" => support_ticket_triage(),
        "agent-002" => lead_enrichment(),
        "agent-003" => invoice_processing(),
        "agent-004" => content_moderation(),
        "agent-005" => weekly_metrics_digest(),
        "agent-006" => churn_risk_monitor(),
        "agent-007" => meeting_notes_assistant(),
        _ => Vec::new(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// agent-001 · Support Ticket Triage
// ═══════════════════════════════════════════════════════════════════════════

fn support_ticket_triage() -> Vec<StepTemplate> {
    vec![
        StepTemplate {
            name: "Webhook Received",
            kind: StepKind::Trigger,
            integration: None,
            model: None,
            base_duration_ms: 95,
            base_cost: 0.0,
            input: None,
            output: Some(json!({
                "event": "ticket.created",
                "ticket_id": 48213,
                "source": "zendesk",
            })),
        },
        StepTemplate {
            name: "Fetch Ticket",
            kind: StepKind::ApiCall,
            integration: Some("zendesk"),
            model: None,
            base_duration_ms: 340,
            base_cost: 0.0001,
            input: Some(json!({
                "method": "GET",
                "path": "/api/v2/tickets/48213",
            })),
            output: Some(json!({
                "ticket": {
                    "id": 48213,
                    "subject": "Export to CSV fails with 500 on large workspaces",
                    "requester": "kim.alvarez@northwindlabs.com",
                    "priority": null,
                    "tags": ["export", "self-serve"],
                },
            })),
        },
        StepTemplate {
            name: "Classify Intent",
            kind: StepKind::LlmCall,
            integration: None,
            model: Some("gpt-4o-mini"),
            base_duration_ms: 1450,
            base_cost: 0.0021,
            input: Some(json!({
                "system": "Classify the support ticket into one of: bug, billing, how_to, feature_request, account.",
                "ticket_subject": "Export to CSV fails with 500 on large workspaces",
            })),
            output: Some(json!({
                "intent": "bug",
                "confidence": 0.94,
                "suggested_team": "platform",
                "usage": { "input_tokens": 412, "output_tokens": 38 },
            })),
        },
        StepTemplate {
            name: "Check Priority",
            kind: StepKind::Conditional,
            integration: None,
            model: None,
            base_duration_ms: 12,
            base_cost: 0.0,
            input: Some(json!({
                "expression": "intent == 'bug' && plan in ['scale', 'enterprise']",
            })),
            output: Some(json!({ "matched": true, "branch": "escalate" })),
        },
        StepTemplate {
            name: "Draft Reply",
            kind: StepKind::LlmCall,
            integration: None,
            model: Some("gpt-4o"),
            base_duration_ms: 3200,
            base_cost: 0.0164,
            input: Some(json!({
                "system": "Draft an empathetic first response. Do not promise timelines.",
                "intent": "bug",
                "ticket_id": 48213,
            })),
            output: Some(json!({
                "draft": "Hi Kim, thanks for flagging this - I've reproduced the failure on large workspaces and routed it to our platform team...",
                "usage": { "input_tokens": 980, "output_tokens": 214 },
            })),
        },
        StepTemplate {
            name: "Update Ticket",
            kind: StepKind::ApiCall,
            integration: Some("zendesk"),
            model: None,
            base_duration_ms: 410,
            base_cost: 0.0001,
            input: Some(json!({
                "method": "PUT",
                "path": "/api/v2/tickets/48213",
                "body": { "priority": "high", "assignee_group": "platform", "comment": { "public": false } },
            })),
            output: Some(json!({ "ticket": { "id": 48213, "priority": "high" } })),
        },
        StepTemplate {
            name: "Notify Channel",
            kind: StepKind::ApiCall,
            integration: Some("slack"),
            model: None,
            base_duration_ms: 260,
            base_cost: 0.0001,
            input: Some(json!({
                "channel": "#support-escalations",
                "text": "Ticket #48213 escalated to platform (bug, scale plan).",
            })),
            output: Some(json!({ "ok": true, "ts": "1718041123.000200" })),
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
// agent-002 · Lead Enrichment
// ═══════════════════════════════════════════════════════════════════════════

fn lead_enrichment() -> Vec<StepTemplate> {
    vec![
        StepTemplate {
            name: "API Request Received",
            kind: StepKind::Trigger,
            integration: None,
            model: None,
            base_duration_ms: 45,
            base_cost: 0.0,
            input: None,
            output: Some(json!({
                "endpoint": "/v1/agents/lead-enrichment/run",
                "lead_email": "j.okafor@meridianhealth.io",
            })),
        },
        StepTemplate {
            name: "Fetch Lead",
            kind: StepKind::ApiCall,
            integration: Some("salesforce"),
            model: None,
            base_duration_ms: 520,
            base_cost: 0.0002,
            input: Some(json!({
                "soql": "SELECT Id, Company, Title FROM Lead WHERE Email = 'j.okafor@meridianhealth.io'",
            })),
            output: Some(json!({
                "records": [{ "Id": "00Q5e00000Fz", "Company": "Meridian Health", "Title": "VP Operations" }],
            })),
        },
        StepTemplate {
            name: "Enrich Company",
            kind: StepKind::ApiCall,
            integration: Some("clearbit"),
            model: None,
            base_duration_ms: 880,
            base_cost: 0.0008,
            input: Some(json!({ "domain": "meridianhealth.io" })),
            output: Some(json!({
                "company": {
                    "name": "Meridian Health",
                    "employees": 1400,
                    "industry": "Healthcare",
                    "funding_total_usd": 86000000,
                },
            })),
        },
        StepTemplate {
            name: "Score Lead",
            kind: StepKind::LlmCall,
            integration: None,
            model: Some("gpt-4o-mini"),
            base_duration_ms: 1650,
            base_cost: 0.0026,
            input: Some(json!({
                "system": "Score this lead 0-100 against our ICP: B2B, 200+ employees, ops or data buyer.",
                "company": "Meridian Health",
                "title": "VP Operations",
            })),
            output: Some(json!({
                "score": 87,
                "rationale": "Strong ICP match: healthcare ops buyer at 1400-person company.",
                "usage": { "input_tokens": 356, "output_tokens": 61 },
            })),
        },
        StepTemplate {
            name: "Update CRM",
            kind: StepKind::ApiCall,
            integration: Some("salesforce"),
            model: None,
            base_duration_ms: 610,
            base_cost: 0.0002,
            input: Some(json!({
                "object": "Lead",
                "id": "00Q5e00000Fz",
                "fields": { "Lead_Score__c": 87, "Enriched__c": true },
            })),
            output: Some(json!({ "success": true, "id": "00Q5e00000Fz" })),
        },
        StepTemplate {
            name: "Route To Owner",
            kind: StepKind::Conditional,
            integration: None,
            model: None,
            base_duration_ms: 10,
            base_cost: 0.0,
            input: Some(json!({ "expression": "score >= 80" })),
            output: Some(json!({ "matched": true, "branch": "assign_ae" })),
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
// agent-003 · Invoice Processing
// ═══════════════════════════════════════════════════════════════════════════

fn invoice_processing() -> Vec<StepTemplate> {
    vec![
        StepTemplate {
            name: "Email Received",
            kind: StepKind::Trigger,
            integration: Some("gmail"),
            model: None,
            base_duration_ms: 110,
            base_cost: 0.0,
            input: None,
            output: Some(json!({
                "message_id": "18f2c9a77b2d01aa",
                "from": "billing@atlasfreight.com",
                "subject": "Invoice INV-2024-0713",
                "attachments": ["INV-2024-0713.pdf"],
            })),
        },
        StepTemplate {
            name: "Download Attachment",
            kind: StepKind::ApiCall,
            integration: Some("gmail"),
            model: None,
            base_duration_ms: 430,
            base_cost: 0.0001,
            input: Some(json!({
                "message_id": "18f2c9a77b2d01aa",
                "attachment": "INV-2024-0713.pdf",
            })),
            output: Some(json!({ "bytes": 184320, "content_type": "application/pdf" })),
        },
        StepTemplate {
            name: "Extract Invoice Fields",
            kind: StepKind::LlmCall,
            integration: None,
            model: Some("claude-sonnet-4"),
            base_duration_ms: 4100,
            base_cost: 0.0232,
            input: Some(json!({
                "system": "Extract vendor, invoice number, line items, currency, and total from the attached invoice.",
                "document": "INV-2024-0713.pdf",
            })),
            output: Some(json!({
                "vendor": "Atlas Freight LLC",
                "invoice_number": "INV-2024-0713",
                "currency": "USD",
                "line_items": [
                    { "description": "LTL shipping - June", "amount": 2840.00 },
                    { "description": "Fuel surcharge", "amount": 312.40 },
                ],
                "total": 3152.40,
                "usage": { "input_tokens": 2210, "output_tokens": 187 },
            })),
        },
        StepTemplate {
            name: "Validate Totals",
            kind: StepKind::Conditional,
            integration: None,
            model: None,
            base_duration_ms: 14,
            base_cost: 0.0,
            input: Some(json!({ "expression": "sum(line_items.amount) == total" })),
            output: Some(json!({ "matched": true, "branch": "approved_path" })),
        },
        StepTemplate {
            name: "Match Purchase Order",
            kind: StepKind::ApiCall,
            integration: Some("netsuite"),
            model: None,
            base_duration_ms: 960,
            base_cost: 0.0004,
            input: Some(json!({ "vendor": "Atlas Freight LLC", "amount": 3152.40 })),
            output: Some(json!({ "po_number": "PO-8841", "match": "exact" })),
        },
        StepTemplate {
            name: "Create Bill",
            kind: StepKind::ApiCall,
            integration: Some("quickbooks"),
            model: None,
            base_duration_ms: 740,
            base_cost: 0.0003,
            input: Some(json!({
                "vendor": "Atlas Freight LLC",
                "po_number": "PO-8841",
                "total": 3152.40,
                "due_date": "2024-07-28",
            })),
            output: Some(json!({ "bill_id": "B-20419", "status": "pending_approval" })),
        },
        StepTemplate {
            name: "Request Approval",
            kind: StepKind::ApiCall,
            integration: Some("slack"),
            model: None,
            base_duration_ms: 290,
            base_cost: 0.0001,
            input: Some(json!({
                "channel": "#ap-approvals",
                "text": "Bill B-20419 ($3,152.40, Atlas Freight) matched PO-8841 and needs approval.",
            })),
            output: Some(json!({ "ok": true, "ts": "1718044982.001100" })),
        },
        StepTemplate {
            name: "Archive Document",
            kind: StepKind::ApiCall,
            integration: Some("google-drive"),
            model: None,
            base_duration_ms: 380,
            base_cost: 0.0001,
            input: Some(json!({
                "folder": "AP/2024/07",
                "file": "INV-2024-0713.pdf",
            })),
            output: Some(json!({ "file_id": "1qXz8vKp3m", "archived": true })),
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
// agent-004 · Content Moderation
// ═══════════════════════════════════════════════════════════════════════════

fn content_moderation() -> Vec<StepTemplate> {
    vec![
        StepTemplate {
            name: "Webhook Received",
            kind: StepKind::Trigger,
            integration: None,
            model: None,
            base_duration_ms: 60,
            base_cost: 0.0,
            input: None,
            output: Some(json!({
                "event": "post.flagged",
                "post_id": "p_93k2d",
                "reports": 3,
            })),
        },
        StepTemplate {
            name: "Fetch Post",
            kind: StepKind::ApiCall,
            integration: Some("contentful"),
            model: None,
            base_duration_ms: 310,
            base_cost: 0.0001,
            input: Some(json!({ "post_id": "p_93k2d" })),
            output: Some(json!({
                "post": {
                    "id": "p_93k2d",
                    "author": "u_55120",
                    "body": "Selling my conference ticket, DM for payment link...",
                },
            })),
        },
        StepTemplate {
            name: "Moderate Content",
            kind: StepKind::LlmCall,
            integration: None,
            model: Some("gpt-4o-mini"),
            base_duration_ms: 1250,
            base_cost: 0.0018,
            input: Some(json!({
                "system": "Label the post against policy: spam, scam, harassment, none.",
                "post_id": "p_93k2d",
            })),
            output: Some(json!({
                "label": "scam",
                "confidence": 0.81,
                "usage": { "input_tokens": 288, "output_tokens": 24 },
            })),
        },
        StepTemplate {
            name: "Policy Decision",
            kind: StepKind::Conditional,
            integration: None,
            model: None,
            base_duration_ms: 9,
            base_cost: 0.0,
            input: Some(json!({ "expression": "label != 'none' && confidence >= 0.75" })),
            output: Some(json!({ "matched": true, "branch": "remove_and_notify" })),
        },
        StepTemplate {
            name: "Apply Action",
            kind: StepKind::ApiCall,
            integration: Some("contentful"),
            model: None,
            base_duration_ms: 450,
            base_cost: 0.0001,
            input: Some(json!({
                "post_id": "p_93k2d",
                "action": "unpublish",
                "reason": "scam",
            })),
            output: Some(json!({ "post_id": "p_93k2d", "status": "unpublished" })),
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
// agent-005 · Weekly Metrics Digest
// ═══════════════════════════════════════════════════════════════════════════

fn weekly_metrics_digest() -> Vec<StepTemplate> {
    vec![
        StepTemplate {
            name: "Scheduled Run",
            kind: StepKind::Trigger,
            integration: None,
            model: None,
            base_duration_ms: 30,
            base_cost: 0.0,
            input: None,
            output: Some(json!({ "cron": "0 8 * * 1", "timezone": "America/New_York" })),
        },
        StepTemplate {
            name: "Pull Usage Metrics",
            kind: StepKind::ApiCall,
            integration: Some("snowflake"),
            model: None,
            base_duration_ms: 2400,
            base_cost: 0.0012,
            input: Some(json!({
                "query": "SELECT day, active_workspaces, executions FROM metrics.daily WHERE day >= DATEADD(day, -7, CURRENT_DATE)",
            })),
            output: Some(json!({
                "rows": 7,
                "totals": { "active_workspaces": 1921, "executions": 48230 },
            })),
        },
        StepTemplate {
            name: "Pull Billing Totals",
            kind: StepKind::ApiCall,
            integration: Some("stripe"),
            model: None,
            base_duration_ms: 690,
            base_cost: 0.0002,
            input: Some(json!({ "endpoint": "/v1/invoices", "period": "last_7_days" })),
            output: Some(json!({ "invoiced_usd": 68240.00, "new_subscriptions": 31 })),
        },
        StepTemplate {
            name: "Write Executive Summary",
            kind: StepKind::LlmCall,
            integration: None,
            model: Some("gpt-4o"),
            base_duration_ms: 5200,
            base_cost: 0.0312,
            input: Some(json!({
                "system": "Write a five-bullet weekly digest for the leadership channel. Lead with week-over-week changes.",
                "metrics": { "executions": 48230, "invoiced_usd": 68240.00 },
            })),
            output: Some(json!({
                "summary": "Executions up 9% WoW to 48.2k; invoiced revenue $68.2k across 31 new subscriptions...",
                "usage": { "input_tokens": 1740, "output_tokens": 402 },
            })),
        },
        StepTemplate {
            name: "Post Digest",
            kind: StepKind::ApiCall,
            integration: Some("slack"),
            model: None,
            base_duration_ms: 270,
            base_cost: 0.0001,
            input: Some(json!({ "channel": "#leadership", "blocks": 6 })),
            output: Some(json!({ "ok": true, "ts": "1718259600.000400" })),
        },
        StepTemplate {
            name: "Archive Report",
            kind: StepKind::ApiCall,
            integration: Some("notion"),
            model: None,
            base_duration_ms: 520,
            base_cost: 0.0002,
            input: Some(json!({
                "database": "Weekly Digests",
                "title": "Metrics digest - week of Jun 10",
            })),
            output: Some(json!({ "page_id": "a6b1c9d2-e3f4", "url": "https://notion.so/a6b1c9d2e3f4" })),
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
// agent-006 · Churn Risk Monitor
// ═══════════════════════════════════════════════════════════════════════════

fn churn_risk_monitor() -> Vec<StepTemplate> {
    vec![
        StepTemplate {
            name: "Scheduled Run",
            kind: StepKind::Trigger,
            integration: None,
            model: None,
            base_duration_ms: 25,
            base_cost: 0.0,
            input: None,
            output: Some(json!({ "cron": "30 14 * * *", "timezone": "UTC" })),
        },
        StepTemplate {
            name: "Fetch Usage Signals",
            kind: StepKind::ApiCall,
            integration: Some("amplitude"),
            model: None,
            base_duration_ms: 1150,
            base_cost: 0.0005,
            input: Some(json!({
                "cohort": "paying_accounts",
                "signals": ["weekly_active_seats", "feature_breadth", "last_admin_login"],
            })),
            output: Some(json!({
                "accounts_scanned": 412,
                "declining": [
                    { "account_id": "acct-2291", "weekly_active_seats_delta": -0.46 },
                ],
            })),
        },
        StepTemplate {
            name: "Score Churn Risk",
            kind: StepKind::LlmCall,
            integration: None,
            model: Some("gpt-4o-mini"),
            base_duration_ms: 1900,
            base_cost: 0.0034,
            input: Some(json!({
                "system": "Given usage deltas and account context, assign churn risk low/medium/high with a one-line reason.",
                "account_id": "acct-2291",
            })),
            output: Some(json!({
                "risk": "high",
                "reason": "Active seats nearly halved in 3 weeks and no admin login in 12 days.",
                "usage": { "input_tokens": 505, "output_tokens": 47 },
            })),
        },
        StepTemplate {
            name: "Threshold Gate",
            kind: StepKind::Conditional,
            integration: None,
            model: None,
            base_duration_ms: 8,
            base_cost: 0.0,
            input: Some(json!({ "expression": "risk == 'high'" })),
            output: Some(json!({ "matched": true, "branch": "open_save_play" })),
        },
        StepTemplate {
            name: "Create Save Task",
            kind: StepKind::ApiCall,
            integration: Some("hubspot"),
            model: None,
            base_duration_ms: 560,
            base_cost: 0.0002,
            input: Some(json!({
                "object": "task",
                "account_id": "acct-2291",
                "title": "Churn save play: usage down 46%",
                "owner": "csm-queue",
            })),
            output: Some(json!({ "task_id": "t-60412", "queued": true })),
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
// agent-007 · Meeting Notes Assistant
// ═══════════════════════════════════════════════════════════════════════════

fn meeting_notes_assistant() -> Vec<StepTemplate> {
    vec![
        StepTemplate {
            name: "Recording Ready",
            kind: StepKind::Trigger,
            integration: Some("zoom"),
            model: None,
            base_duration_ms: 80,
            base_cost: 0.0,
            input: None,
            output: Some(json!({
                "event": "recording.completed",
                "meeting_id": "871 2243 9981",
                "duration_minutes": 42,
            })),
        },
        StepTemplate {
            name: "Fetch Transcript",
            kind: StepKind::ApiCall,
            integration: Some("zoom"),
            model: None,
            base_duration_ms: 1300,
            base_cost: 0.0004,
            input: Some(json!({ "meeting_id": "871 2243 9981", "format": "vtt" })),
            output: Some(json!({ "words": 6120, "speakers": 4 })),
        },
        StepTemplate {
            name: "Summarize Action Items",
            kind: StepKind::LlmCall,
            integration: None,
            model: Some("claude-sonnet-4"),
            base_duration_ms: 6800,
            base_cost: 0.0415,
            input: Some(json!({
                "system": "Summarize the meeting into decisions and owner-assigned action items.",
                "transcript_words": 6120,
            })),
            output: Some(json!({
                "decisions": ["Ship usage-based pricing behind a flag in July"],
                "action_items": [
                    { "owner": "Priya", "item": "Draft migration comms", "due": "2024-06-21" },
                    { "owner": "Marcus", "item": "Load-test metering pipeline", "due": "2024-06-25" },
                ],
                "usage": { "input_tokens": 7642, "output_tokens": 356 },
            })),
        },
        StepTemplate {
            name: "Post Notes",
            kind: StepKind::ApiCall,
            integration: Some("notion"),
            model: None,
            base_duration_ms: 610,
            base_cost: 0.0002,
            input: Some(json!({
                "database": "Meeting Notes",
                "title": "Pricing sync - Jun 14",
            })),
            output: Some(json!({ "page_id": "f2a7b0c1-d9e8", "url": "https://notion.so/f2a7b0c1d9e8" })),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_roster_agent_has_a_pipeline() {
        for agent in AGENTS {
            let templates = templates_for(agent.id);
            assert!(
                (4..=8).contains(&templates.len()),
                "{} has {} steps",
                agent.id,
                templates.len()
            );
            assert_eq!(templates[0].kind, StepKind::Trigger, "{}", agent.id);
        }
    }

    #[test]
    fn unknown_agent_yields_empty_list() {
        assert!(templates_for("agent-999").is_empty());
    }

    #[test]
    fn llm_steps_carry_usage_fixtures() {
        for agent in AGENTS {
            for template in templates_for(agent.id) {
                if template.kind == StepKind::LlmCall {
                    let usage = template
                        .output
                        .as_ref()
                        .and_then(|o| o.get("usage"))
                        .unwrap_or_else(|| panic!("{}: {} lacks usage", agent.id, template.name));
                    assert!(usage.get("input_tokens").is_some());
                    assert!(usage.get("output_tokens").is_some());
                }
            }
        }
    }
}
