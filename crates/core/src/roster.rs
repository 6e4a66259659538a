//! Roster snapshot types consumed by the assignment policy and sweep planner.
//!
//! The roster itself lives in the database (`sales_persons` table); the
//! engine re-reads it at the start of every decision and hands the policy a
//! plain snapshot, so none of the decision logic holds stale state.

use crate::lead::LookupId;
use crate::types::DbId;

/// Availability status of a roster member, toggled by the salesperson.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStatus {
    Online = 1,
    Offline = 2,
}

impl AgentStatus {
    /// Return the database lookup ID.
    pub fn id(self) -> LookupId {
        self as LookupId
    }

    /// Resolve a database lookup ID back to the enum.
    pub fn from_id(id: LookupId) -> Option<Self> {
        match id {
            1 => Some(AgentStatus::Online),
            2 => Some(AgentStatus::Offline),
            _ => None,
        }
    }

    /// Stable wire identifier used in API payloads.
    pub fn slug(self) -> &'static str {
        match self {
            AgentStatus::Online => "online",
            AgentStatus::Offline => "offline",
        }
    }

    /// Parse a wire identifier produced by [`AgentStatus::slug`].
    pub fn parse(s: &str) -> Option<AgentStatus> {
        match s {
            "online" => Some(AgentStatus::Online),
            "offline" => Some(AgentStatus::Offline),
            _ => None,
        }
    }
}

/// One roster member as seen by the decision logic.
///
/// Snapshots are taken in roster order (creation-time ascending), which is
/// the order the round-robin rotation cycles through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSnapshot {
    pub id: DbId,
    pub name: String,
    pub online: bool,
}

impl AgentSnapshot {
    pub fn new(id: DbId, name: impl Into<String>, online: bool) -> Self {
        Self {
            id,
            name: name.into(),
            online,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_slug_round_trip() {
        assert_eq!(AgentStatus::parse("online"), Some(AgentStatus::Online));
        assert_eq!(AgentStatus::parse("offline"), Some(AgentStatus::Offline));
        assert_eq!(AgentStatus::parse("away"), None);
        assert_eq!(AgentStatus::Online.slug(), "online");
    }

    #[test]
    fn test_status_id_round_trip() {
        assert_eq!(AgentStatus::from_id(AgentStatus::Online.id()), Some(AgentStatus::Online));
        assert_eq!(AgentStatus::from_id(AgentStatus::Offline.id()), Some(AgentStatus::Offline));
        assert_eq!(AgentStatus::from_id(0), None);
    }
}
