//! Per-kind field tables and the `process` transform.
//!
//! Each [`EventDefinition`] lists the headers its kind is documented to
//! carry and, for the few that need it, the [`Coercion`] that types them.
//! Everything else passes through as a string. Coerced fields are listed
//! in the order their policies run, which is also the order in which
//! defaulted keys are appended to the output.

use crate::coerce::Coercion;
use crate::config::DecodeOptions;
use crate::constants::YES_TOKEN;
use crate::event::EventKind;
use crate::headers::{HeaderName, HeaderName as H};
use crate::message::{Headers, NormalizedMessage, RawMessage};
use crate::value::HeaderValue;
use tracing::debug;
use self::FieldSpec as F;

/// Whether a header is always sent for its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    Required,
    Optional,
}

/// One documented header of an event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    header: HeaderName,
    presence: Presence,
    coercion: Option<Coercion>,
}

impl FieldSpec {
    const fn required(header: HeaderName) -> Self {
        Self {
            header,
            presence: Presence::Required,
            coercion: None,
        }
    }

    const fn optional(header: HeaderName) -> Self {
        Self {
            header,
            presence: Presence::Optional,
            coercion: None,
        }
    }

    const fn coerce(mut self, coercion: Coercion) -> Self {
        self.coercion = Some(coercion);
        self
    }

    /// Wire name of the header.
    pub fn name(&self) -> &'static str {
        self.header
            .as_str()
    }

    /// Typed header name.
    pub fn header(&self) -> HeaderName {
        self.header
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    /// Policy applied by `process`, `None` for pass-through.
    pub fn coercion(&self) -> Option<Coercion> {
        self.coercion
    }
}

/// Static schema for one [`EventKind`].
#[derive(Debug)]
pub struct EventDefinition {
    kind: EventKind,
    summary: &'static str,
    fields: &'static [FieldSpec],
    open_fields: bool,
}

impl EventDefinition {
    /// Kind this table describes.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// One-line description of what the message means.
    pub fn describe(&self) -> &'static str {
        self.summary
    }

    /// Documented fields, coerced ones last.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// `true` if the kind carries caller-defined headers beyond its table
    /// (`UserEvent`).
    pub fn accepts_arbitrary_fields(&self) -> bool {
        self.open_fields
    }

    /// Documented field by wire name (case-sensitive).
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.name() == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields
            .iter()
            .filter(|f| f.is_required())
            .map(FieldSpec::name)
    }

    pub fn optional_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields
            .iter()
            .filter(|f| !f.is_required())
            .map(FieldSpec::name)
    }

    /// Fields with a coercion policy, in application order.
    pub fn coerced_fields(&self) -> impl Iterator<Item = (&'static str, Coercion)> {
        self.fields
            .iter()
            .filter_map(|f| {
                f.coercion
                    .map(|c| (f.name(), c))
            })
    }

    /// Required fields absent from `raw`. Diagnostic only; `process`
    /// never rejects a message.
    pub fn missing_required(&self, raw: &RawMessage) -> Vec<&'static str> {
        self.required_fields()
            .filter(|name| {
                raw.header(name)
                    .is_none()
            })
            .collect()
    }

    /// Normalize `raw` with default options.
    pub fn process(&self, raw: &RawMessage) -> NormalizedMessage {
        self.process_with(raw, &DecodeOptions::default())
    }

    /// Normalize `raw`: every header is copied as a string, then each
    /// coerced field is replaced in place (or appended, if its policy
    /// defaults an absent key). The body is copied unchanged.
    pub fn process_with(&self, raw: &RawMessage, options: &DecodeOptions) -> NormalizedMessage {
        let missing = self.missing_required(raw);
        if !missing.is_empty() {
            debug!(kind = %self.kind, ?missing, "required fields absent");
        }

        let mut headers: Headers<HeaderValue> = Headers::with_capacity(
            raw.headers()
                .len()
                + self
                    .fields
                    .len(),
        );
        for (k, v) in raw
            .headers()
            .iter()
        {
            headers.insert(k, HeaderValue::Str(v.clone()));
        }

        for (name, coercion) in self.coerced_fields() {
            if let Some(value) = coercion.apply(name, raw.header(name), options) {
                headers.insert(name, value);
            }
        }

        NormalizedMessage::new(
            self.kind,
            raw.name()
                .to_string(),
            headers,
            raw.body()
                .to_vec(),
        )
    }
}

const YES: Coercion = Coercion::BoolEquals(YES_TOKEN);

pub(crate) static DB_GET_RESPONSE: EventDefinition = EventDefinition {
    kind: EventKind::DbGetResponse,
    summary: "Provides the value requested from the Asterisk database.",
    fields: &[
        F::required(H::Family),
        F::required(H::Key),
        F::required(H::Val),
    ],
    open_fields: false,
};

pub(crate) static FULLY_BOOTED: EventDefinition = EventDefinition {
    kind: EventKind::FullyBooted,
    summary: "Indicates that Asterisk is online.",
    fields: &[F::required(H::Status)],
    open_fields: false,
};

pub(crate) static HANGUP: EventDefinition = EventDefinition {
    kind: EventKind::Hangup,
    summary: "Indicates that a channel has been hung up.",
    fields: &[
        F::required(H::CauseTxt),
        F::required(H::Channel),
        F::required(H::UniqueId),
        F::required(H::Cause).coerce(Coercion::IntOrNone),
    ],
    open_fields: false,
};

pub(crate) static PARKED_CALL: EventDefinition = EventDefinition {
    kind: EventKind::ParkedCall,
    summary: "Describes a parked call.",
    fields: &[
        F::required(H::ActionId),
        F::required(H::CallerId),
        F::optional(H::CallerIdName),
        F::required(H::Channel),
        F::required(H::Exten),
        F::required(H::From),
        F::optional(H::Timeout).coerce(Coercion::OptionalInt),
    ],
    open_fields: false,
};

pub(crate) static PARKED_CALLS_COMPLETE: EventDefinition = EventDefinition {
    kind: EventKind::ParkedCallsComplete,
    summary: "Indicates that all parked calls have been listed.",
    fields: &[F::required(H::ActionId)],
    open_fields: false,
};

pub(crate) static PEER_ENTRY: EventDefinition = EventDefinition {
    kind: EventKind::PeerEntry,
    summary: "Describes a peer.",
    fields: &[
        F::required(H::ActionId),
        F::required(H::ChannelType),
        F::required(H::ObjectName),
        F::required(H::ChanObjectType),
        F::optional(H::IpAddress),
        F::required(H::Status),
        F::optional(H::IpPort).coerce(Coercion::OptionalInt),
        F::required(H::Dynamic).coerce(YES),
        F::required(H::Natsupport).coerce(YES),
        F::required(H::VideoSupport).coerce(YES),
        F::required(H::Acl).coerce(YES),
        F::required(H::RealtimeDevice).coerce(YES),
    ],
    open_fields: false,
};

pub(crate) static PEERLIST_COMPLETE: EventDefinition = EventDefinition {
    kind: EventKind::PeerlistComplete,
    summary: "Indicates that all peers have been listed.",
    fields: &[F::required(H::ActionId)],
    open_fields: false,
};

pub(crate) static QUEUE_ENTRY: EventDefinition = EventDefinition {
    kind: EventKind::QueueEntry,
    summary: "Indicates that a call is waiting to be answered.",
    fields: &[
        F::optional(H::ActionId),
        F::required(H::Channel),
        F::required(H::CallerId),
        F::optional(H::CallerIdName),
        F::required(H::Queue),
        F::required(H::Position).coerce(Coercion::IntOrSentinel),
        F::required(H::Wait).coerce(Coercion::IntOrSentinel),
    ],
    open_fields: false,
};

pub(crate) static QUEUE_MEMBER: EventDefinition = EventDefinition {
    kind: EventKind::QueueMember,
    summary: "Describes a member of a queue.",
    fields: &[
        F::optional(H::ActionId),
        F::required(H::Location),
        F::optional(H::MemberName),
        F::required(H::Membership),
        F::required(H::Queue),
        F::required(H::CallsTaken).coerce(Coercion::IntOrSentinel),
        F::required(H::LastCall).coerce(Coercion::IntOrSentinel),
        F::required(H::Penalty).coerce(Coercion::IntOrSentinel),
        F::required(H::Status).coerce(Coercion::IntOrSentinel),
        F::required(H::Paused).coerce(Coercion::PausedFlag),
    ],
    open_fields: false,
};

pub(crate) static QUEUE_MEMBER_ADDED: EventDefinition = EventDefinition {
    kind: EventKind::QueueMemberAdded,
    summary: "Indicates that a member was added to a queue.",
    fields: &[
        F::required(H::Location),
        F::optional(H::MemberName),
        F::required(H::Membership),
        F::required(H::Queue),
        F::required(H::CallsTaken).coerce(Coercion::IntOrSentinel),
        F::required(H::LastCall).coerce(Coercion::IntOrSentinel),
        F::required(H::Penalty).coerce(Coercion::IntOrSentinel),
        F::required(H::Status).coerce(Coercion::IntOrSentinel),
        F::required(H::Paused).coerce(Coercion::PausedFlag),
    ],
    open_fields: false,
};

pub(crate) static QUEUE_MEMBER_PAUSED: EventDefinition = EventDefinition {
    kind: EventKind::QueueMemberPaused,
    summary: "Indicates that the pause-state of a queue member was changed.",
    fields: &[
        F::required(H::Location),
        F::optional(H::MemberName),
        F::required(H::Queue),
        F::required(H::Paused).coerce(Coercion::PausedFlag),
    ],
    open_fields: false,
};

pub(crate) static QUEUE_MEMBER_REMOVED: EventDefinition = EventDefinition {
    kind: EventKind::QueueMemberRemoved,
    summary: "Indicates that a member was removed from a queue.",
    fields: &[
        F::required(H::Location),
        F::optional(H::MemberName),
        F::required(H::Queue),
    ],
    open_fields: false,
};

pub(crate) static QUEUE_PARAMS: EventDefinition = EventDefinition {
    kind: EventKind::QueueParams,
    summary: "Describes the attributes of a queue.",
    fields: &[
        F::optional(H::ActionId),
        F::required(H::Queue),
        F::required(H::Abandoned).coerce(Coercion::IntOrSentinel),
        F::required(H::Calls).coerce(Coercion::IntOrSentinel),
        F::required(H::Completed).coerce(Coercion::IntOrSentinel),
        F::required(H::Holdtime).coerce(Coercion::IntOrSentinel),
        F::required(H::Max).coerce(Coercion::IntOrSentinel),
        F::required(H::ServiceLevel).coerce(Coercion::FloatOrSentinel),
        F::required(H::ServiceLevelPerf).coerce(Coercion::FloatOrSentinel),
        F::required(H::Weight).coerce(Coercion::FloatOrSentinel),
    ],
    open_fields: false,
};

pub(crate) static QUEUE_STATUS_COMPLETE: EventDefinition = EventDefinition {
    kind: EventKind::QueueStatusComplete,
    summary: "Indicates that a QueueStatus request has completed.",
    fields: &[F::required(H::ActionId)],
    open_fields: false,
};

pub(crate) static STATUS: EventDefinition = EventDefinition {
    kind: EventKind::Status,
    summary: "Describes the current status of a channel.",
    fields: &[
        F::required(H::Account),
        F::required(H::ActionId),
        F::required(H::Channel),
        F::required(H::CallerId),
        F::required(H::CallerIdNum),
        F::optional(H::CallerIdName),
        F::required(H::Context),
        F::required(H::Extension),
        F::required(H::Link),
        F::required(H::Priority),
        F::required(H::State),
        F::required(H::UniqueId),
        F::required(H::Seconds).coerce(Coercion::IntOrSentinel),
    ],
    open_fields: false,
};

pub(crate) static STATUS_COMPLETE: EventDefinition = EventDefinition {
    kind: EventKind::StatusComplete,
    summary: "Indicates that all requested channel information has been provided.",
    fields: &[F::required(H::ActionId)],
    open_fields: false,
};

pub(crate) static USER_EVENT: EventDefinition = EventDefinition {
    kind: EventKind::UserEvent,
    summary: "Generated in response to the UserEvent request.",
    fields: &[F::required(H::ActionId)],
    open_fields: true,
};

pub(crate) static VAR_SET: EventDefinition = EventDefinition {
    kind: EventKind::VarSet,
    summary: "Emitted when a variable is set, either globally or on a channel.",
    fields: &[
        F::optional(H::Channel),
        F::required(H::UniqueId),
        F::required(H::Value),
        F::required(H::Variable),
    ],
    open_fields: false,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PausedCoercion;

    fn coerced(def: &EventDefinition) -> Vec<(&'static str, Coercion)> {
        def.coerced_fields()
            .collect()
    }

    #[test]
    fn test_hangup_table() {
        assert_eq!(coerced(&HANGUP), vec![("Cause", Coercion::IntOrNone)]);
        assert!(HANGUP
            .field("Cause-txt")
            .is_some());
    }

    #[test]
    fn test_peer_entry_table() {
        assert_eq!(
            coerced(&PEER_ENTRY),
            vec![
                ("IPport", Coercion::OptionalInt),
                ("Dynamic", YES),
                ("Natsupport", YES),
                ("VideoSupport", YES),
                ("ACL", YES),
                ("RealtimeDevice", YES),
            ]
        );
    }

    #[test]
    fn test_queue_params_table() {
        let fields = coerced(&QUEUE_PARAMS);
        let ints: Vec<_> = fields
            .iter()
            .filter(|(_, c)| *c == Coercion::IntOrSentinel)
            .map(|(n, _)| *n)
            .collect();
        let floats: Vec<_> = fields
            .iter()
            .filter(|(_, c)| *c == Coercion::FloatOrSentinel)
            .map(|(n, _)| *n)
            .collect();
        assert_eq!(ints, vec!["Abandoned", "Calls", "Completed", "Holdtime", "Max"]);
        assert_eq!(floats, vec!["ServiceLevel", "ServiceLevelPerf", "Weight"]);
    }

    #[test]
    fn test_queue_member_family_share_policies() {
        assert_eq!(coerced(&QUEUE_MEMBER), coerced(&QUEUE_MEMBER_ADDED));
        assert_eq!(
            coerced(&QUEUE_MEMBER_PAUSED),
            vec![("Paused", Coercion::PausedFlag)]
        );
    }

    #[test]
    fn test_pass_through_kinds_have_no_coercions() {
        for def in [
            &DB_GET_RESPONSE,
            &FULLY_BOOTED,
            &PARKED_CALLS_COMPLETE,
            &PEERLIST_COMPLETE,
            &QUEUE_MEMBER_REMOVED,
            &QUEUE_STATUS_COMPLETE,
            &STATUS_COMPLETE,
            &USER_EVENT,
            &VAR_SET,
        ] {
            assert!(coerced(def).is_empty(), "{} coerces fields", def.kind());
        }
    }

    #[test]
    fn test_required_and_optional_split() {
        assert_eq!(
            VAR_SET
                .optional_fields()
                .collect::<Vec<_>>(),
            vec!["Channel"]
        );
        assert_eq!(
            VAR_SET
                .required_fields()
                .collect::<Vec<_>>(),
            vec!["Uniqueid", "Value", "Variable"]
        );
    }

    #[test]
    fn test_missing_required_is_diagnostic_only() {
        let raw = RawMessage::new("Hangup").with_header("Channel", "SIP/100-1");
        assert_eq!(
            HANGUP.missing_required(&raw),
            vec!["Cause-txt", "Uniqueid", "Cause"]
        );
        let out = HANGUP.process(&raw);
        assert_eq!(out.header("Cause"), Some(&HeaderValue::NoValue));
        assert_eq!(out.str("Channel"), Some("SIP/100-1"));
    }

    #[test]
    fn test_process_replaces_in_place_and_appends_defaults() {
        let raw = RawMessage::new("QueueEntry")
            .with_header("Queue", "support")
            .with_header("Wait", "15")
            .with_header("Channel", "SIP/200-2");
        let out = QUEUE_ENTRY.process(&raw);
        assert_eq!(
            out.headers()
                .keys()
                .collect::<Vec<_>>(),
            vec!["Queue", "Wait", "Channel", "Position"]
        );
        assert_eq!(out.int("Wait"), Some(15));
        assert_eq!(out.int("Position"), Some(-1));
    }

    #[test]
    fn test_process_does_not_touch_input() {
        let raw = RawMessage::new("Status")
            .with_header("Seconds", "9")
            .with_body(["tail"]);
        let before = raw.clone();
        let out = STATUS.process(&raw);
        assert_eq!(raw, before);
        assert_eq!(out.int("Seconds"), Some(9));
        assert_eq!(out.body(), raw.body());
    }

    #[test]
    fn test_process_with_strict_paused() {
        let raw = RawMessage::new("QueueMemberPaused")
            .with_header("Queue", "support")
            .with_header("Location", "SIP/300");
        let legacy = QUEUE_MEMBER_PAUSED.process(&raw);
        let strict = QUEUE_MEMBER_PAUSED
            .process_with(&raw, &DecodeOptions::default().with_paused(PausedCoercion::Strict));
        assert_eq!(legacy.header("Paused"), Some(&HeaderValue::NoValue));
        assert_eq!(strict.bool("Paused"), Some(false));
    }

    #[test]
    fn test_user_event_is_open() {
        assert!(USER_EVENT.accepts_arbitrary_fields());
        assert!(!STATUS.accepts_arbitrary_fields());
        let raw = RawMessage::new("UserEvent")
            .with_header("ActionID", "7")
            .with_header("X-Anything", "42");
        let out = USER_EVENT.process(&raw);
        assert_eq!(out.str("X-Anything"), Some("42"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(FULLY_BOOTED.describe(), "Indicates that Asterisk is online.");
    }
}
