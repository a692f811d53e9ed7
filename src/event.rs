//! AMI event and response kinds

use crate::definitions::EventDefinition;
use std::fmt;

/// Error returned when parsing an unknown event kind name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEventKindError(pub String);

impl fmt::Display for ParseEventKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event kind: {}", self.0)
    }
}

impl std::error::Error for ParseEventKindError {}

define_wire_enum! {
    error_type: ParseEventKindError,
    /// The closed set of AMI events and responses this crate normalizes.
    ///
    /// Variant names are the wire names carried in the `Event:` header.
    /// Each variant has exactly one [`EventDefinition`], see
    /// [`EventKind::definition`].
    pub enum EventKind {
        DbGetResponse => "DBGetResponse",
        FullyBooted => "FullyBooted",
        Hangup => "Hangup",
        ParkedCall => "ParkedCall",
        ParkedCallsComplete => "ParkedCallsComplete",
        PeerEntry => "PeerEntry",
        PeerlistComplete => "PeerlistComplete",
        QueueEntry => "QueueEntry",
        QueueMember => "QueueMember",
        QueueMemberAdded => "QueueMemberAdded",
        QueueMemberPaused => "QueueMemberPaused",
        QueueMemberRemoved => "QueueMemberRemoved",
        QueueParams => "QueueParams",
        QueueStatusComplete => "QueueStatusComplete",
        Status => "Status",
        StatusComplete => "StatusComplete",
        UserEvent => "UserEvent",
        VarSet => "VarSet",
    }
}

impl EventKind {
    /// Static field table for this kind.
    pub fn definition(self) -> &'static EventDefinition {
        crate::registry::definition(self)
    }

    /// `true` for the kinds that terminate an action's event list
    /// (`ParkedCallsComplete`, `PeerlistComplete`, ...).
    pub fn is_list_complete(self) -> bool {
        matches!(
            self,
            EventKind::ParkedCallsComplete
                | EventKind::PeerlistComplete
                | EventKind::QueueStatusComplete
                | EventKind::StatusComplete
        )
    }
}
