//! Lead classification enums mapping to SMALLINT lookup columns.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_kinds` / `*_statuses` database table.

/// Lookup ID type matching SMALLINT/SMALLSERIAL in the database.
pub type LookupId = i16;

macro_rules! define_lookup_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database lookup ID.
            pub fn id(self) -> LookupId {
                self as LookupId
            }

            /// Resolve a database lookup ID back to the enum.
            pub fn from_id(id: LookupId) -> Option<Self> {
                match id {
                    $( x if x == $name::$variant as LookupId => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for LookupId {
            fn from(value: $name) -> Self {
                value as LookupId
            }
        }
    };
}

define_lookup_enum! {
    /// Program of interest for a lead.
    Program {
        General = 1,
        Premium = 2,
        FixFaceLock = 3,
        Consultation = 4,
    }
}

define_lookup_enum! {
    /// Call workflow status. `Uncalled` is the only initial state;
    /// `ClosedWon` / `ClosedLost` are terminal.
    CallStatus {
        Uncalled = 1,
        Contacted = 2,
        FollowUp = 3,
        Appointment = 4,
        Quotation = 5,
        Negotiation = 6,
        ClosedWon = 7,
        ClosedLost = 8,
    }
}

impl Program {
    /// Program restricted to a single named specialist (spelled out in
    /// server configuration). Leads in this program bypass the round-robin
    /// rotation entirely.
    pub const RESERVED: Program = Program::FixFaceLock;

    /// Stable wire identifier used in API payloads.
    pub fn slug(self) -> &'static str {
        match self {
            Program::General => "general",
            Program::Premium => "premium",
            Program::FixFaceLock => "fix_face_lock",
            Program::Consultation => "consultation",
        }
    }

    /// Parse a wire identifier produced by [`Program::slug`].
    pub fn parse(s: &str) -> Option<Program> {
        match s {
            "general" => Some(Program::General),
            "premium" => Some(Program::Premium),
            "fix_face_lock" => Some(Program::FixFaceLock),
            "consultation" => Some(Program::Consultation),
            _ => None,
        }
    }
}

impl CallStatus {
    /// The status every newly created lead starts in.
    pub const INITIAL: CallStatus = CallStatus::Uncalled;

    /// Whether no further workflow transition happens from this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, CallStatus::ClosedWon | CallStatus::ClosedLost)
    }

    /// Stable wire identifier used in API payloads.
    pub fn slug(self) -> &'static str {
        match self {
            CallStatus::Uncalled => "uncalled",
            CallStatus::Contacted => "contacted",
            CallStatus::FollowUp => "follow_up",
            CallStatus::Appointment => "appointment",
            CallStatus::Quotation => "quotation",
            CallStatus::Negotiation => "negotiation",
            CallStatus::ClosedWon => "closed_won",
            CallStatus::ClosedLost => "closed_lost",
        }
    }

    /// Parse a wire identifier produced by [`CallStatus::slug`].
    pub fn parse(s: &str) -> Option<CallStatus> {
        match s {
            "uncalled" => Some(CallStatus::Uncalled),
            "contacted" => Some(CallStatus::Contacted),
            "follow_up" => Some(CallStatus::FollowUp),
            "appointment" => Some(CallStatus::Appointment),
            "quotation" => Some(CallStatus::Quotation),
            "negotiation" => Some(CallStatus::Negotiation),
            "closed_won" => Some(CallStatus::ClosedWon),
            "closed_lost" => Some(CallStatus::ClosedLost),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ids_round_trip() {
        for p in [
            Program::General,
            Program::Premium,
            Program::FixFaceLock,
            Program::Consultation,
        ] {
            assert_eq!(Program::from_id(p.id()), Some(p));
        }
        for s in [
            CallStatus::Uncalled,
            CallStatus::Contacted,
            CallStatus::FollowUp,
            CallStatus::Appointment,
            CallStatus::Quotation,
            CallStatus::Negotiation,
            CallStatus::ClosedWon,
            CallStatus::ClosedLost,
        ] {
            assert_eq!(CallStatus::from_id(s.id()), Some(s));
        }
    }

    #[test]
    fn test_unknown_lookup_id_is_none() {
        assert_eq!(Program::from_id(0), None);
        assert_eq!(Program::from_id(99), None);
        assert_eq!(CallStatus::from_id(0), None);
        assert_eq!(CallStatus::from_id(99), None);
    }

    #[test]
    fn test_slug_round_trip() {
        for p in [
            Program::General,
            Program::Premium,
            Program::FixFaceLock,
            Program::Consultation,
        ] {
            assert_eq!(Program::parse(p.slug()), Some(p));
        }
        assert_eq!(Program::parse("Fix Face Lock"), None);
    }

    #[test]
    fn test_only_closed_statuses_are_terminal() {
        assert!(CallStatus::ClosedWon.is_terminal());
        assert!(CallStatus::ClosedLost.is_terminal());
        for s in [
            CallStatus::Uncalled,
            CallStatus::Contacted,
            CallStatus::FollowUp,
            CallStatus::Appointment,
            CallStatus::Quotation,
            CallStatus::Negotiation,
        ] {
            assert!(!s.is_terminal());
        }
    }

    #[test]
    fn test_initial_status_is_uncalled() {
        assert_eq!(CallStatus::INITIAL, CallStatus::Uncalled);
    }

    #[test]
    fn test_reserved_program_is_fix_face_lock() {
        assert_eq!(Program::RESERVED, Program::FixFaceLock);
    }
}
