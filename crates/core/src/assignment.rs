//! Assignment policy: decides which salesperson receives a new lead.
//!
//! Rules are evaluated in priority order; the first matching rule wins:
//!
//! 1. An explicit override (manual assignment by id or name) resolves
//!    against the roster without consulting availability.
//! 2. A lead in the reserved program goes to the named specialist, and only
//!    when that specialist is online.
//! 3. Everything else round-robins across the online, non-specialist pool.
//!
//! The round-robin cursor is owned by the [`AssignmentPolicy`] instance.
//! It is process-lifetime state, never persisted, and advances exactly one
//! position per successful round-robin assignment -- override and
//! specialist assignments leave it untouched. Callers that share a policy
//! across tasks must serialize access (the engine wraps it in a mutex).

use serde::Serialize;

use crate::lead::Program;
use crate::roster::AgentSnapshot;
use crate::types::DbId;

/// How the caller wants the assignee chosen.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AssignmentOverride {
    /// No override: the policy decides (reserved rule, then round-robin).
    #[default]
    None,
    /// Manual assignment to a specific roster member by id.
    ByAgentId(DbId),
    /// Manual assignment by display name. Ids are the source of truth;
    /// when names collide the first roster match (creation order) wins.
    ByAgentName(String),
}

/// The chosen salesperson for a lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignee {
    pub id: DbId,
    pub name: String,
}

/// Why an assignment decision failed. The lead is never created on failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssignmentError {
    /// A lead with the same phone number already exists. Raised by the
    /// engine's pre-insert check, before the cursor can move.
    #[error("duplicate phone number: a lead with phone {0} already exists")]
    DuplicatePhone(String),

    /// The reserved program's sole eligible agent is not online.
    #[error("cannot assign this lead: specialist \"{specialist}\" is offline")]
    SpecialistOffline { specialist: String },

    /// The round-robin pool is empty.
    #[error("no salesperson is online to receive this lead")]
    NoAvailableAgent,

    /// An explicit override did not resolve to a current roster member.
    #[error("assignee \"{0}\" does not match any roster member")]
    UnknownAssignee(String),
}

/// Stateful assignment decision function.
///
/// Holds the name of the reserved-program specialist and the round-robin
/// cursor. Construct once per process and reuse for every submission.
#[derive(Debug)]
pub struct AssignmentPolicy {
    specialist_name: String,
    cursor: u64,
}

impl AssignmentPolicy {
    /// Create a policy with the cursor at its initial position.
    pub fn new(specialist_name: impl Into<String>) -> Self {
        Self {
            specialist_name: specialist_name.into(),
            cursor: 0,
        }
    }

    /// The roster member name that exclusively receives reserved-program leads.
    pub fn specialist_name(&self) -> &str {
        &self.specialist_name
    }

    /// Current round-robin cursor position (monotonic, process-lifetime).
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Decide the assignee for one newly submitted lead.
    ///
    /// `roster` must be a fresh snapshot in roster order. The cursor
    /// advances only when the round-robin rule produces the assignment.
    pub fn decide(
        &mut self,
        roster: &[AgentSnapshot],
        program: Program,
        override_: &AssignmentOverride,
    ) -> Result<Assignee, AssignmentError> {
        match override_ {
            AssignmentOverride::ByAgentId(id) => roster
                .iter()
                .find(|a| a.id == *id)
                .map(to_assignee)
                .ok_or_else(|| AssignmentError::UnknownAssignee(id.to_string())),

            AssignmentOverride::ByAgentName(name) => roster
                .iter()
                .find(|a| a.name == *name)
                .map(to_assignee)
                .ok_or_else(|| AssignmentError::UnknownAssignee(name.clone())),

            AssignmentOverride::None if program == Program::RESERVED => {
                match roster.iter().find(|a| a.name == self.specialist_name) {
                    Some(specialist) if specialist.online => Ok(to_assignee(specialist)),
                    _ => Err(AssignmentError::SpecialistOffline {
                        specialist: self.specialist_name.clone(),
                    }),
                }
            }

            AssignmentOverride::None => {
                let pool: Vec<&AgentSnapshot> = roster
                    .iter()
                    .filter(|a| a.online && a.name != self.specialist_name)
                    .collect();

                if pool.is_empty() {
                    return Err(AssignmentError::NoAvailableAgent);
                }

                let chosen = pool[(self.cursor % pool.len() as u64) as usize];
                self.cursor += 1;
                Ok(to_assignee(chosen))
            }
        }
    }
}

fn to_assignee(agent: &AgentSnapshot) -> Assignee {
    Assignee {
        id: agent.id,
        name: agent.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECIALIST: &str = "Nat";

    fn roster() -> Vec<AgentSnapshot> {
        vec![
            AgentSnapshot::new(1, "Alice", true),
            AgentSnapshot::new(2, "Bob", true),
            AgentSnapshot::new(3, "Charlie", false),
            AgentSnapshot::new(4, SPECIALIST, true),
        ]
    }

    #[test]
    fn test_round_robin_fairness_over_full_cycle() {
        // Two eligible agents (Alice, Bob) -> two sequential submissions
        // must hit each exactly once, in roster order.
        let mut policy = AssignmentPolicy::new(SPECIALIST);
        let roster = roster();

        let first = policy
            .decide(&roster, Program::General, &AssignmentOverride::None)
            .unwrap();
        let second = policy
            .decide(&roster, Program::General, &AssignmentOverride::None)
            .unwrap();

        assert_eq!(first.name, "Alice");
        assert_eq!(second.name, "Bob");
        assert_eq!(policy.cursor(), 2);
    }

    #[test]
    fn test_round_robin_wraps_and_skips_offline() {
        // End-to-end scenario: Alice(online), Bob(online), Charlie(offline).
        let mut policy = AssignmentPolicy::new(SPECIALIST);
        let roster = vec![
            AgentSnapshot::new(1, "Alice", true),
            AgentSnapshot::new(2, "Bob", true),
            AgentSnapshot::new(3, "Charlie", false),
        ];

        let picks: Vec<String> = (0..3)
            .map(|_| {
                policy
                    .decide(&roster, Program::General, &AssignmentOverride::None)
                    .unwrap()
                    .name
            })
            .collect();

        assert_eq!(picks, ["Alice", "Bob", "Alice"]);
        assert_eq!(policy.cursor(), 3);
    }

    #[test]
    fn test_specialist_receives_reserved_program_when_online() {
        let mut policy = AssignmentPolicy::new(SPECIALIST);
        let assignee = policy
            .decide(&roster(), Program::FixFaceLock, &AssignmentOverride::None)
            .unwrap();
        assert_eq!(assignee.name, SPECIALIST);
        assert_eq!(assignee.id, 4);
        // Special-rule assignments never move the round-robin cursor.
        assert_eq!(policy.cursor(), 0);
    }

    #[test]
    fn test_reserved_program_rejected_when_specialist_offline() {
        let mut policy = AssignmentPolicy::new(SPECIALIST);
        let mut roster = roster();
        roster[3].online = false;

        let err = policy
            .decide(&roster, Program::FixFaceLock, &AssignmentOverride::None)
            .unwrap_err();
        assert_eq!(
            err,
            AssignmentError::SpecialistOffline {
                specialist: SPECIALIST.to_string()
            }
        );
    }

    #[test]
    fn test_reserved_program_rejected_when_specialist_missing() {
        // Specialist not on the roster at all: same rejection, never a
        // silent fall-through to the general pool.
        let mut policy = AssignmentPolicy::new(SPECIALIST);
        let roster = vec![
            AgentSnapshot::new(1, "Alice", true),
            AgentSnapshot::new(2, "Bob", true),
        ];

        let err = policy
            .decide(&roster, Program::FixFaceLock, &AssignmentOverride::None)
            .unwrap_err();
        assert!(matches!(err, AssignmentError::SpecialistOffline { .. }));
    }

    #[test]
    fn test_specialist_excluded_from_round_robin_pool() {
        let mut policy = AssignmentPolicy::new(SPECIALIST);
        let roster = roster();

        for _ in 0..10 {
            let assignee = policy
                .decide(&roster, Program::Premium, &AssignmentOverride::None)
                .unwrap();
            assert_ne!(assignee.name, SPECIALIST);
        }
    }

    #[test]
    fn test_no_available_agent_when_pool_empty() {
        let mut policy = AssignmentPolicy::new(SPECIALIST);
        // Only the specialist is online.
        let roster = vec![
            AgentSnapshot::new(1, "Alice", false),
            AgentSnapshot::new(4, SPECIALIST, true),
        ];

        let err = policy
            .decide(&roster, Program::General, &AssignmentOverride::None)
            .unwrap_err();
        assert_eq!(err, AssignmentError::NoAvailableAgent);
        assert_eq!(policy.cursor(), 0);
    }

    #[test]
    fn test_override_by_id_ignores_availability() {
        let mut policy = AssignmentPolicy::new(SPECIALIST);
        let assignee = policy
            .decide(&roster(), Program::General, &AssignmentOverride::ByAgentId(3))
            .unwrap();
        // Charlie is offline but an explicit override still resolves.
        assert_eq!(assignee.name, "Charlie");
        assert_eq!(policy.cursor(), 0);
    }

    #[test]
    fn test_override_by_name_resolves_first_match() {
        let mut policy = AssignmentPolicy::new(SPECIALIST);
        let roster = vec![
            AgentSnapshot::new(1, "Alice", true),
            AgentSnapshot::new(2, "Alice", true),
        ];
        let assignee = policy
            .decide(
                &roster,
                Program::General,
                &AssignmentOverride::ByAgentName("Alice".into()),
            )
            .unwrap();
        assert_eq!(assignee.id, 1);
    }

    #[test]
    fn test_override_with_unknown_name_fails() {
        let mut policy = AssignmentPolicy::new(SPECIALIST);
        let err = policy
            .decide(
                &roster(),
                Program::General,
                &AssignmentOverride::ByAgentName("Mallory".into()),
            )
            .unwrap_err();
        assert_eq!(err, AssignmentError::UnknownAssignee("Mallory".into()));
    }

    #[test]
    fn test_cursor_position_unaffected_by_interleaved_special_rules() {
        // Tie-break rule: the cursor advances exactly one position per
        // successful round-robin assignment regardless of how many
        // special-rule assignments happened in between.
        let mut policy = AssignmentPolicy::new(SPECIALIST);
        let roster = roster();

        let a = policy
            .decide(&roster, Program::General, &AssignmentOverride::None)
            .unwrap();
        policy
            .decide(&roster, Program::FixFaceLock, &AssignmentOverride::None)
            .unwrap();
        policy
            .decide(&roster, Program::General, &AssignmentOverride::ByAgentId(3))
            .unwrap();
        let b = policy
            .decide(&roster, Program::General, &AssignmentOverride::None)
            .unwrap();

        assert_eq!(a.name, "Alice");
        assert_eq!(b.name, "Bob");
        assert_eq!(policy.cursor(), 2);
    }

    #[test]
    fn test_failed_round_robin_does_not_advance_cursor() {
        let mut policy = AssignmentPolicy::new(SPECIALIST);
        let empty_roster: Vec<AgentSnapshot> = vec![];

        let _ = policy.decide(&empty_roster, Program::General, &AssignmentOverride::None);
        assert_eq!(policy.cursor(), 0);

        // Once agents come online the rotation starts from position 0.
        let assignee = policy
            .decide(&roster(), Program::General, &AssignmentOverride::None)
            .unwrap();
        assert_eq!(assignee.name, "Alice");
    }
}
