//! Wire name to [`EventDefinition`] lookup and the decode entry points.
//!
//! The set of kinds is closed: [`definition`] is an exhaustive match, so a
//! new [`EventKind`] variant without a table fails to compile.

use crate::config::DecodeOptions;
use crate::definitions::{self, EventDefinition};
use crate::error::{AmiError, AmiResult};
use crate::event::EventKind;
use crate::message::{NormalizedMessage, RawMessage};
use tracing::debug;

/// Field table for `kind`.
pub fn definition(kind: EventKind) -> &'static EventDefinition {
    match kind {
        EventKind::DbGetResponse => &definitions::DB_GET_RESPONSE,
        EventKind::FullyBooted => &definitions::FULLY_BOOTED,
        EventKind::Hangup => &definitions::HANGUP,
        EventKind::ParkedCall => &definitions::PARKED_CALL,
        EventKind::ParkedCallsComplete => &definitions::PARKED_CALLS_COMPLETE,
        EventKind::PeerEntry => &definitions::PEER_ENTRY,
        EventKind::PeerlistComplete => &definitions::PEERLIST_COMPLETE,
        EventKind::QueueEntry => &definitions::QUEUE_ENTRY,
        EventKind::QueueMember => &definitions::QUEUE_MEMBER,
        EventKind::QueueMemberAdded => &definitions::QUEUE_MEMBER_ADDED,
        EventKind::QueueMemberPaused => &definitions::QUEUE_MEMBER_PAUSED,
        EventKind::QueueMemberRemoved => &definitions::QUEUE_MEMBER_REMOVED,
        EventKind::QueueParams => &definitions::QUEUE_PARAMS,
        EventKind::QueueStatusComplete => &definitions::QUEUE_STATUS_COMPLETE,
        EventKind::Status => &definitions::STATUS,
        EventKind::StatusComplete => &definitions::STATUS_COMPLETE,
        EventKind::UserEvent => &definitions::USER_EVENT,
        EventKind::VarSet => &definitions::VAR_SET,
    }
}

/// Every definition, in [`EventKind::ALL`] order.
pub fn definitions() -> impl Iterator<Item = &'static EventDefinition> {
    EventKind::ALL
        .iter()
        .map(|k| definition(*k))
}

/// Look up the definition for a wire name.
///
/// The name must match the kind's wire spelling exactly. Fails with [`AmiError::UnknownEvent`] for names outside the closed set;
/// what to do with those is the caller's decision (see
/// [`RawMessage::passthrough`]).
pub fn lookup(name: &str) -> AmiResult<&'static EventDefinition> {
    match EventKind::from_wire(name) {
        Some(kind) => Ok(definition(kind)),
        None => {
            debug!(name, "no definition for event");
            Err(AmiError::unknown_event(name))
        }
    }
}

/// Look up `raw`'s kind and normalize it with default options.
///
/// ```
/// use asterisk_ami_events::{registry, HeaderValue, RawMessage};
///
/// let raw = RawMessage::new("Hangup")
///     .with_header("Channel", "SIP/100-1")
///     .with_header("Cause", "16");
/// let msg = registry::decode(&raw).unwrap();
/// assert_eq!(msg.header("Cause"), Some(&HeaderValue::Int(16)));
/// ```
pub fn decode(raw: &RawMessage) -> AmiResult<NormalizedMessage> {
    decode_with(raw, &DecodeOptions::default())
}

/// Look up `raw`'s kind and normalize it with `options`.
pub fn decode_with(raw: &RawMessage, options: &DecodeOptions) -> AmiResult<NormalizedMessage> {
    let def = lookup(raw.name())?;
    Ok(def.process_with(raw, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::HeaderValue;

    #[test]
    fn test_every_kind_has_its_own_table() {
        let mut seen = std::collections::HashSet::new();
        for def in definitions() {
            assert!(seen.insert(def.kind()), "duplicate table for {}", def.kind());
            assert_eq!(definition(def.kind()).kind(), def.kind());
        }
        assert_eq!(seen.len(), EventKind::ALL.len());
    }

    #[test]
    fn test_lookup_known() {
        let def = lookup("QueueParams").unwrap();
        assert_eq!(def.kind(), EventKind::QueueParams);
    }

    #[test]
    fn test_lookup_unknown() {
        let err = lookup("Newchannel").unwrap_err();
        assert_eq!(
            err,
            AmiError::UnknownEvent {
                name: "Newchannel".into()
            }
        );
    }

    #[test]
    fn test_decode_unknown_leaves_passthrough_to_caller() {
        let raw = RawMessage::new("Newchannel").with_header("Channel", "SIP/1");
        assert!(decode(&raw)
            .unwrap_err()
            .is_unknown_event());
        let (headers, _) = raw.passthrough();
        assert_eq!(headers.get("Channel"), Some(&HeaderValue::Str("SIP/1".into())));
    }

    #[test]
    fn test_decode_with_options() {
        let raw = RawMessage::new("QueueMember").with_header("Paused", "");
        let legacy = decode(&raw).unwrap();
        let strict = decode_with(&raw, &DecodeOptions::strict()).unwrap();
        assert_eq!(legacy.header("Paused"), Some(&HeaderValue::Str(String::new())));
        assert_eq!(strict.bool("Paused"), Some(false));
    }

    #[test]
    fn test_lookup_requires_exact_wire_name() {
        for name in ["HANGUP", "hangup", "queuemember", "DbGetResponse", " Hangup"] {
            let err = lookup(name).unwrap_err();
            assert!(err.is_unknown_event(), "{name} resolved to a definition");
        }
        let raw = RawMessage::new("fullybooted").with_header("Status", "Fully Booted");
        assert!(decode(&raw)
            .unwrap_err()
            .is_unknown_event());
    }

    #[test]
    fn test_decode_keeps_wire_name() {
        let raw = RawMessage::new("FullyBooted").with_header("Status", "Fully Booted");
        let msg = decode(&raw).unwrap();
        assert_eq!(msg.kind(), EventKind::FullyBooted);
        assert_eq!(msg.name(), "FullyBooted");
    }
}
