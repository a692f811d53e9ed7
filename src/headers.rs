//! Typed header names for the AMI events this crate decodes.

/// Error returned when parsing an unrecognized header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHeaderNameError(pub String);

impl std::fmt::Display for ParseHeaderNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown header name: {}", self.0)
    }
}

impl std::error::Error for ParseHeaderNameError {}

define_wire_enum! {
    error_type: ParseHeaderNameError,
    /// Header names that appear on the events in [`EventKind`](crate::EventKind).
    ///
    /// Wire casing is Asterisk's own and is not uniform (`Uniqueid`,
    /// `IPport`, `Cause-txt`). Use with
    /// [`NormalizedMessage::header()`](crate::NormalizedMessage::header) for
    /// type-safe lookups.
    pub enum HeaderName {
        Event => "Event",
        Response => "Response",
        ActionId => "ActionID",
        Abandoned => "Abandoned",
        Account => "Account",
        Acl => "ACL",
        CallerId => "CallerID",
        CallerIdName => "CallerIDName",
        CallerIdNum => "CallerIDNum",
        Calls => "Calls",
        CallsTaken => "CallsTaken",
        Cause => "Cause",
        CauseTxt => "Cause-txt",
        ChanObjectType => "ChanObjectType",
        Channel => "Channel",
        ChannelType => "ChannelType",
        Completed => "Completed",
        Context => "Context",
        Dynamic => "Dynamic",
        Exten => "Exten",
        Extension => "Extension",
        Family => "Family",
        From => "From",
        Holdtime => "Holdtime",
        IpAddress => "IPaddress",
        IpPort => "IPport",
        Key => "Key",
        LastCall => "LastCall",
        Link => "Link",
        Location => "Location",
        Max => "Max",
        MemberName => "MemberName",
        Membership => "Membership",
        Natsupport => "Natsupport",
        ObjectName => "ObjectName",
        Paused => "Paused",
        Penalty => "Penalty",
        Position => "Position",
        Priority => "Priority",
        Queue => "Queue",
        RealtimeDevice => "RealtimeDevice",
        Seconds => "Seconds",
        ServiceLevel => "ServiceLevel",
        ServiceLevelPerf => "ServiceLevelPerf",
        State => "State",
        Status => "Status",
        Timeout => "Timeout",
        UniqueId => "Uniqueid",
        Val => "Val",
        Value => "Value",
        Variable => "Variable",
        VideoSupport => "VideoSupport",
        Wait => "Wait",
        Weight => "Weight",
    }
}
