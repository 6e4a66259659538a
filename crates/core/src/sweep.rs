//! Idle-lead sweep planner: reclaims leads stuck in `Uncalled` past the
//! staleness threshold and redistributes them across online salespeople.
//!
//! This is the planning half only -- it is pure and deterministic. The
//! engine fetches the full lead set and a roster snapshot, calls
//! [`plan_sweep`], then applies the resulting reassignments best-effort.
//!
//! The sweep's rotating cursor is local to one invocation and independent
//! of the assignment policy's round-robin cursor. The two serve different
//! fairness domains (incoming distribution vs. backlog redistribution) and
//! must never be merged.

use chrono::Duration;
use serde::Serialize;

use crate::lead::{CallStatus, Program};
use crate::roster::AgentSnapshot;
use crate::types::{DbId, Timestamp};

/// Leads still `Uncalled` this long after creation are considered abandoned.
pub const IDLE_THRESHOLD_HOURS: i64 = 24;

/// The sweep-relevant projection of a lead row.
#[derive(Debug, Clone)]
pub struct SweepLead {
    pub id: DbId,
    pub program: Program,
    pub status: CallStatus,
    pub created_at: Timestamp,
    pub assigned_sales_id: Option<DbId>,
    pub assigned_sales_name: String,
}

/// One planned ownership change. `old_agent` is always different from
/// `new_agent` -- the planner removes the current owner from every
/// per-lead receiving pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reassignment {
    pub lead_id: DbId,
    pub old_agent: String,
    pub new_agent: String,
    pub new_agent_id: DbId,
}

/// Why a sweep refused to run. No changes are made on failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SweepError {
    /// Redistribution needs at least two online non-specialist agents,
    /// otherwise a lead could only go back to its current owner.
    #[error("cannot sweep idle leads: not enough salespeople online ({online} available)")]
    InsufficientAgents { online: usize },
}

/// Plan the reassignment of every idle lead.
///
/// Candidates are leads in `Uncalled` status created more than
/// [`IDLE_THRESHOLD_HOURS`] before `now`, excluding the reserved program
/// (the specialist's backlog is never redistributed). Candidates are
/// processed oldest-created-first so repeated sweeps are deterministic.
///
/// The receiving pool is every online roster member except the specialist.
/// Each candidate's pool additionally excludes its current owner, so a
/// reassignment always moves the lead. Leads whose per-lead pool is empty
/// are skipped.
pub fn plan_sweep(
    leads: &[SweepLead],
    roster: &[AgentSnapshot],
    specialist_name: &str,
    now: Timestamp,
) -> Result<Vec<Reassignment>, SweepError> {
    let pool: Vec<&AgentSnapshot> = roster
        .iter()
        .filter(|a| a.online && a.name != specialist_name)
        .collect();

    if pool.len() <= 1 {
        return Err(SweepError::InsufficientAgents { online: pool.len() });
    }

    let threshold = now - Duration::hours(IDLE_THRESHOLD_HOURS);

    let mut candidates: Vec<&SweepLead> = leads
        .iter()
        .filter(|l| {
            l.status == CallStatus::Uncalled
                && l.created_at < threshold
                && l.program != Program::RESERVED
        })
        .collect();
    candidates.sort_by_key(|l| (l.created_at, l.id));

    let mut cursor: u64 = 0;
    let mut plan = Vec::new();

    for lead in candidates {
        let sub_pool: Vec<&&AgentSnapshot> = pool
            .iter()
            .filter(|a| match lead.assigned_sales_id {
                Some(owner_id) => a.id != owner_id,
                None => a.name != lead.assigned_sales_name,
            })
            .collect();

        if sub_pool.is_empty() {
            continue;
        }

        let receiver = sub_pool[(cursor % sub_pool.len() as u64) as usize];
        cursor += 1;

        plan.push(Reassignment {
            lead_id: lead.id,
            old_agent: lead.assigned_sales_name.clone(),
            new_agent: receiver.name.clone(),
            new_agent_id: receiver.id,
        });
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const SPECIALIST: &str = "Nat";

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    /// A lead created `hours_ago` hours before `now()`.
    fn lead(
        id: DbId,
        program: Program,
        status: CallStatus,
        hours_ago: i64,
        owner_id: DbId,
        owner: &str,
    ) -> SweepLead {
        SweepLead {
            id,
            program,
            status,
            created_at: now() - Duration::hours(hours_ago),
            assigned_sales_id: Some(owner_id),
            assigned_sales_name: owner.to_string(),
        }
    }

    fn roster() -> Vec<AgentSnapshot> {
        vec![
            AgentSnapshot::new(1, "Alice", true),
            AgentSnapshot::new(2, "Bob", true),
            AgentSnapshot::new(3, "Charlie", true),
            AgentSnapshot::new(4, SPECIALIST, true),
        ]
    }

    #[test]
    fn test_sweep_never_reassigns_to_current_owner() {
        let leads: Vec<SweepLead> = (0..6)
            .map(|i| {
                lead(
                    i,
                    Program::General,
                    CallStatus::Uncalled,
                    30 + i,
                    1 + (i % 3),
                    ["Alice", "Bob", "Charlie"][(i % 3) as usize],
                )
            })
            .collect();

        let plan = plan_sweep(&leads, &roster(), SPECIALIST, now()).unwrap();
        assert_eq!(plan.len(), 6);
        for r in &plan {
            assert_ne!(r.old_agent, r.new_agent, "lead {} did not move", r.lead_id);
        }
    }

    #[test]
    fn test_reserved_program_never_swept() {
        let leads = vec![
            lead(1, Program::FixFaceLock, CallStatus::Uncalled, 100, 4, SPECIALIST),
            lead(2, Program::General, CallStatus::Uncalled, 100, 1, "Alice"),
        ];

        let plan = plan_sweep(&leads, &roster(), SPECIALIST, now()).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].lead_id, 2);
    }

    #[test]
    fn test_fresh_and_progressed_leads_not_swept() {
        let leads = vec![
            // Too fresh: created 2 hours ago.
            lead(1, Program::General, CallStatus::Uncalled, 2, 1, "Alice"),
            // Already worked: contacted.
            lead(2, Program::General, CallStatus::Contacted, 100, 1, "Alice"),
            // Exactly at the threshold boundary is NOT stale (strictly older).
            lead(3, Program::General, CallStatus::Uncalled, IDLE_THRESHOLD_HOURS, 1, "Alice"),
            // Stale.
            lead(4, Program::General, CallStatus::Uncalled, 25, 1, "Alice"),
        ];

        let plan = plan_sweep(&leads, &roster(), SPECIALIST, now()).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].lead_id, 4);
    }

    #[test]
    fn test_sweep_aborts_with_one_online_agent() {
        let roster = vec![
            AgentSnapshot::new(1, "Alice", true),
            AgentSnapshot::new(2, "Bob", false),
            AgentSnapshot::new(4, SPECIALIST, true),
        ];
        let leads = vec![lead(1, Program::General, CallStatus::Uncalled, 48, 2, "Bob")];

        let err = plan_sweep(&leads, &roster, SPECIALIST, now()).unwrap_err();
        assert_eq!(err, SweepError::InsufficientAgents { online: 1 });
    }

    #[test]
    fn test_sweep_aborts_with_zero_online_agents() {
        let roster = vec![AgentSnapshot::new(1, "Alice", false)];
        let err = plan_sweep(&[], &roster, SPECIALIST, now()).unwrap_err();
        assert_eq!(err, SweepError::InsufficientAgents { online: 0 });
    }

    #[test]
    fn test_specialist_not_in_receiving_pool() {
        // Only Alice, Bob, and the specialist online: receivers must always
        // be Alice or Bob.
        let roster = vec![
            AgentSnapshot::new(1, "Alice", true),
            AgentSnapshot::new(2, "Bob", true),
            AgentSnapshot::new(4, SPECIALIST, true),
        ];
        let leads: Vec<SweepLead> = (0..4)
            .map(|i| lead(i, Program::General, CallStatus::Uncalled, 30, 1, "Alice"))
            .collect();

        let plan = plan_sweep(&leads, &roster, SPECIALIST, now()).unwrap();
        assert_eq!(plan.len(), 4);
        for r in &plan {
            assert_eq!(r.new_agent, "Bob");
        }
    }

    #[test]
    fn test_candidates_processed_oldest_first() {
        let leads = vec![
            lead(10, Program::General, CallStatus::Uncalled, 30, 1, "Alice"),
            lead(11, Program::General, CallStatus::Uncalled, 90, 1, "Alice"),
            lead(12, Program::General, CallStatus::Uncalled, 60, 1, "Alice"),
        ];

        let plan = plan_sweep(&leads, &roster(), SPECIALIST, now()).unwrap();
        let order: Vec<DbId> = plan.iter().map(|r| r.lead_id).collect();
        assert_eq!(order, [11, 12, 10]);
    }

    #[test]
    fn test_rotation_distributes_across_receivers() {
        // All leads owned by Alice; receivers rotate over Bob and Charlie.
        let leads: Vec<SweepLead> = (0..4)
            .map(|i| lead(i, Program::General, CallStatus::Uncalled, 30 + i, 1, "Alice"))
            .collect();

        let plan = plan_sweep(&leads, &roster(), SPECIALIST, now()).unwrap();
        let receivers: Vec<&str> = plan.iter().map(|r| r.new_agent.as_str()).collect();
        assert_eq!(receivers, ["Bob", "Charlie", "Bob", "Charlie"]);
    }

    #[test]
    fn test_sweep_cursor_is_per_invocation() {
        let leads = vec![lead(1, Program::General, CallStatus::Uncalled, 30, 1, "Alice")];

        let first = plan_sweep(&leads, &roster(), SPECIALIST, now()).unwrap();
        let second = plan_sweep(&leads, &roster(), SPECIALIST, now()).unwrap();
        // A fresh invocation starts its rotation from the beginning.
        assert_eq!(first, second);
    }

    #[test]
    fn test_unassigned_lead_matched_by_name_fallback() {
        // Manual assignments may carry only a denormalized name. The owner
        // exclusion then falls back to name matching.
        let leads = vec![SweepLead {
            id: 1,
            program: Program::General,
            status: CallStatus::Uncalled,
            created_at: now() - Duration::hours(48),
            assigned_sales_id: None,
            assigned_sales_name: "Bob".to_string(),
        }];

        let plan = plan_sweep(&leads, &roster(), SPECIALIST, now()).unwrap();
        assert_eq!(plan.len(), 1);
        assert_ne!(plan[0].new_agent, "Bob");
    }
}
