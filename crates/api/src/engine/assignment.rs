//! The assignment engine: glue between the pure decision logic in
//! `leadflow-core` and the repositories in `leadflow-db`.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use leadflow_core::assignment::{Assignee, AssignmentError, AssignmentOverride, AssignmentPolicy};
use leadflow_core::lead::Program;
use leadflow_core::roster::AgentSnapshot;
use leadflow_core::sweep::{plan_sweep, Reassignment};
use leadflow_core::types::DbId;
use leadflow_db::models::lead::{CreateLead, Lead};
use leadflow_db::repositories::{LeadRepo, SalesPersonRepo};
use leadflow_db::DbPool;
use leadflow_events::{CrmEvent, EventBus};

use crate::error::{AppError, AppResult};

/// A validated lead submission, ready for an assignment decision.
///
/// Built by the handlers after request validation; the engine fills in the
/// assignee and persists the row.
#[derive(Debug)]
pub struct NewLeadSubmission {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub program: Program,
    pub override_: AssignmentOverride,
    /// Display name of the admin who entered the lead, when entered manually.
    pub admin_submitter: Option<String>,
    /// Acting account id, for event attribution. `None` for the public form.
    pub actor_id: Option<DbId>,
}

/// One lead the sweep planned to move but could not.
#[derive(Debug, Serialize)]
pub struct SweepFailure {
    pub lead_id: DbId,
    pub error: String,
}

/// Outcome of one idle-lead sweep run.
#[derive(Debug, Serialize)]
pub struct SweepReport {
    /// Ownership changes that were applied.
    pub reassignments: Vec<Reassignment>,
    /// Planned changes that failed to apply. The sweep continues past
    /// individual failures.
    pub failures: Vec<SweepFailure>,
    /// Human-readable summary for operator dashboards.
    pub message: String,
}

/// Process-lifetime assignment engine.
///
/// The round-robin cursor lives inside the policy mutex; it resets when the
/// process restarts, which is acceptable because the rotation only needs to
/// be fair over a running session, not across deployments.
pub struct AssignmentEngine {
    pool: DbPool,
    events: Arc<EventBus>,
    policy: Mutex<AssignmentPolicy>,
    /// Serializes sweep runs; overlapping sweeps would double-move leads.
    sweep_guard: Mutex<()>,
    specialist_name: String,
}

impl AssignmentEngine {
    pub fn new(pool: DbPool, events: Arc<EventBus>, specialist_name: impl Into<String>) -> Self {
        let specialist_name = specialist_name.into();
        Self {
            pool,
            events,
            policy: Mutex::new(AssignmentPolicy::new(specialist_name.clone())),
            sweep_guard: Mutex::new(()),
            specialist_name,
        }
    }

    /// Submit one new lead: decide the assignee and persist the row.
    ///
    /// The duplicate-phone check runs before the assignment decision, so a
    /// rejected duplicate never advances the round-robin cursor. The policy
    /// lock is held across the insert to keep the cursor consistent with the
    /// order rows actually land in.
    pub async fn submit_lead(&self, submission: NewLeadSubmission) -> AppResult<Lead> {
        let mut policy = self.policy.lock().await;

        let duplicate_of = LeadRepo::find_by_phone(&self.pool, &submission.phone)
            .await?
            .map(|existing| existing.id);
        let roster = match duplicate_of {
            Some(existing_id) => {
                tracing::info!(
                    phone = %submission.phone,
                    existing_lead_id = existing_id,
                    "Rejected duplicate lead submission"
                );
                Vec::new()
            }
            None => SalesPersonRepo::list_roster(&self.pool).await?,
        };
        let assignee = decide_assignment(
            &mut policy,
            duplicate_of,
            &roster,
            submission.program,
            &submission.override_,
            &submission.phone,
        )?;

        let input = CreateLead {
            first_name: submission.first_name,
            last_name: submission.last_name,
            phone: submission.phone,
            birth_date: submission.birth_date,
            address: submission.address,
            program_id: submission.program.id(),
            assigned_sales_id: Some(assignee.id),
            assigned_sales_name: assignee.name.clone(),
            admin_submitter: submission.admin_submitter.unwrap_or_default(),
        };
        let lead = LeadRepo::create(&self.pool, &input).await?;
        drop(policy);

        tracing::info!(
            lead_id = lead.id,
            program = submission.program.slug(),
            assignee = %assignee.name,
            "Lead created and assigned"
        );

        let mut event = CrmEvent::new("lead.assigned")
            .with_source("lead", lead.id)
            .with_payload(serde_json::json!({
                "assignee_id": assignee.id,
                "assignee_name": assignee.name,
                "program": submission.program.slug(),
            }));
        if let Some(actor) = submission.actor_id {
            event = event.with_actor(actor);
        }
        self.events.publish(event);

        Ok(lead)
    }

    /// Run one idle-lead sweep: plan against a fresh snapshot, then apply
    /// the reassignments best-effort.
    ///
    /// Only one sweep runs at a time; a second caller waits for the first to
    /// finish and then plans against the post-sweep state (finding nothing
    /// stale left to move).
    pub async fn run_idle_sweep(&self) -> AppResult<SweepReport> {
        let _guard = self.sweep_guard.lock().await;

        let roster = SalesPersonRepo::list_roster(&self.pool).await?;
        let rows = LeadRepo::list(&self.pool).await?;

        let mut leads = Vec::with_capacity(rows.len());
        for row in &rows {
            match row.to_sweep_lead() {
                Some(lead) => leads.push(lead),
                None => {
                    tracing::warn!(lead_id = row.id, "Skipping lead with unknown lookup ids");
                }
            }
        }

        let plan = plan_sweep(&leads, &roster, &self.specialist_name, Utc::now())
            .map_err(AppError::Sweep)?;

        let mut reassignments = Vec::new();
        let mut failures = Vec::new();

        for item in plan {
            match LeadRepo::reassign(&self.pool, item.lead_id, item.new_agent_id, &item.new_agent)
                .await
            {
                Ok(true) => {
                    self.events.publish(
                        CrmEvent::new("lead.reassigned")
                            .with_source("lead", item.lead_id)
                            .with_payload(serde_json::json!({
                                "from": item.old_agent,
                                "to": item.new_agent,
                            })),
                    );
                    reassignments.push(item);
                }
                Ok(false) => {
                    // Deleted between planning and applying.
                    failures.push(SweepFailure {
                        lead_id: item.lead_id,
                        error: "lead no longer exists".to_string(),
                    });
                }
                Err(e) => {
                    tracing::error!(lead_id = item.lead_id, error = %e, "Sweep reassignment failed");
                    failures.push(SweepFailure {
                        lead_id: item.lead_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        let message = if reassignments.is_empty() && failures.is_empty() {
            "No idle leads to redistribute".to_string()
        } else {
            format!(
                "Redistributed {} idle lead(s), {} failure(s)",
                reassignments.len(),
                failures.len()
            )
        };

        tracing::info!(
            reassigned = reassignments.len(),
            failed = failures.len(),
            "Idle-lead sweep finished"
        );

        self.events.publish(CrmEvent::new("sweep.completed").with_payload(serde_json::json!({
            "reassigned": reassignments.len(),
            "failed": failures.len(),
        })));

        Ok(SweepReport {
            reassignments,
            failures,
            message,
        })
    }
}

/// Decision step for one submission: reject a phone number already in the
/// book, otherwise let the policy choose.
///
/// A duplicate returns before the policy is consulted, so it has no side
/// effect on the round-robin cursor. `duplicate_of` is the id of the lead
/// already holding the phone, if any.
fn decide_assignment(
    policy: &mut AssignmentPolicy,
    duplicate_of: Option<DbId>,
    roster: &[AgentSnapshot],
    program: Program,
    override_: &AssignmentOverride,
    phone: &str,
) -> Result<Assignee, AssignmentError> {
    if duplicate_of.is_some() {
        return Err(AssignmentError::DuplicatePhone(phone.to_string()));
    }
    policy.decide(roster, program, override_)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<AgentSnapshot> {
        vec![
            AgentSnapshot::new(1, "Alice", true),
            AgentSnapshot::new(2, "Bob", true),
        ]
    }

    #[test]
    fn test_duplicate_phone_rejected_without_moving_cursor() {
        let mut policy = AssignmentPolicy::new("Nat");
        let err = decide_assignment(
            &mut policy,
            Some(42),
            &roster(),
            Program::General,
            &AssignmentOverride::None,
            "0812345678",
        )
        .unwrap_err();

        assert_eq!(err, AssignmentError::DuplicatePhone("0812345678".into()));
        assert_eq!(policy.cursor(), 0);
    }

    #[test]
    fn test_duplicate_does_not_perturb_the_rotation() {
        // Alice -> (duplicate rejected) -> Bob, never Alice twice.
        let mut policy = AssignmentPolicy::new("Nat");
        let roster = roster();

        let first = decide_assignment(
            &mut policy,
            None,
            &roster,
            Program::General,
            &AssignmentOverride::None,
            "0810000001",
        )
        .unwrap();
        assert_eq!(first.name, "Alice");

        let dup = decide_assignment(
            &mut policy,
            Some(7),
            &roster,
            Program::General,
            &AssignmentOverride::None,
            "0810000001",
        );
        assert!(dup.is_err());
        assert_eq!(policy.cursor(), 1);

        let second = decide_assignment(
            &mut policy,
            None,
            &roster,
            Program::General,
            &AssignmentOverride::None,
            "0810000002",
        )
        .unwrap();
        assert_eq!(second.name, "Bob");
    }

    #[test]
    fn test_duplicate_wins_over_manual_override() {
        let mut policy = AssignmentPolicy::new("Nat");
        let err = decide_assignment(
            &mut policy,
            Some(42),
            &roster(),
            Program::General,
            &AssignmentOverride::ByAgentId(1),
            "0812345678",
        )
        .unwrap_err();
        assert!(matches!(err, AssignmentError::DuplicatePhone(_)));
    }
}
