//! Header block decoding.
//!
//! Splits one already-framed AMI message into a [`RawMessage`]. Reading
//! the socket and finding where one message ends is the transport's job.

use crate::constants::{HEADER_EVENT, HEADER_RESPONSE, HEADER_SEPARATOR};
use crate::error::{AmiError, AmiResult};
use crate::message::{Headers, RawMessage};

/// Parse a `Key: Value` block and its optional body.
///
/// Lines may end in `\n` or `\r\n`. Leading blank lines are skipped; the
/// first blank line after a header ends the block and everything after it
/// is body. A repeated key keeps its first position and its last value.
/// The name comes from `Event`, or `Response` for action replies.
///
/// ```
/// use asterisk_ami_events::protocol::parse_block;
///
/// let raw = parse_block("Event: Hangup\r\nChannel: SIP/100-1\r\nCause: 16\r\n\r\n").unwrap();
/// assert_eq!(raw.name(), "Hangup");
/// assert_eq!(raw.header("Cause"), Some("16"));
/// ```
pub fn parse_block(text: &str) -> AmiResult<RawMessage> {
    let mut headers: Headers<String> = Headers::new();
    let mut body = Vec::new();
    let mut lines = text.lines();

    for line in lines.by_ref() {
        let line = line.trim();
        if line.is_empty() {
            if headers.is_empty() {
                continue;
            }
            break;
        }
        let (key, value) = parse_header_line(line)?;
        headers.insert(key, value.to_string());
    }

    for line in lines {
        body.push(line.to_string());
    }
    if body
        .last()
        .is_some_and(|l| l.is_empty())
    {
        body.pop();
    }

    let name = headers
        .get(HEADER_EVENT)
        .or_else(|| headers.get(HEADER_RESPONSE))
        .cloned()
        .ok_or(AmiError::MissingEventName)?;

    Ok(RawMessage::from_parts(name, headers, body))
}

/// Split one header line on its first `:`, trimming both sides.
fn parse_header_line(line: &str) -> AmiResult<(&str, &str)> {
    match line.split_once(HEADER_SEPARATOR) {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(AmiError::InvalidHeader {
            header: line.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers() {
        let raw = parse_block(
            "Event: QueueMember\r\nQueue: support\r\nLocation: SIP/300\r\nPaused: 0\r\n\r\n",
        )
        .unwrap();
        assert_eq!(raw.name(), "QueueMember");
        assert_eq!(
            raw.headers()
                .keys()
                .collect::<Vec<_>>(),
            vec!["Event", "Queue", "Location", "Paused"]
        );
        assert!(raw
            .body()
            .is_empty());
    }

    #[test]
    fn test_parse_lf_only() {
        let raw = parse_block("Event: FullyBooted\nStatus: Fully Booted\n\n").unwrap();
        assert_eq!(raw.header("Status"), Some("Fully Booted"));
    }

    #[test]
    fn test_response_name_fallback() {
        let raw = parse_block("Response: Success\r\nActionID: 1\r\n\r\n").unwrap();
        assert_eq!(raw.name(), "Success");
        assert_eq!(raw.action_id(), Some("1"));
    }

    #[test]
    fn test_value_containing_colons() {
        let raw = parse_block("Event: VarSet\r\nValue: sip:100@example.com:5060\r\n\r\n").unwrap();
        assert_eq!(raw.header("Value"), Some("sip:100@example.com:5060"));
    }

    #[test]
    fn test_empty_value_kept() {
        let raw = parse_block("Event: QueueMemberPaused\r\nPaused:\r\n\r\n").unwrap();
        assert_eq!(raw.header("Paused"), Some(""));
    }

    #[test]
    fn test_duplicate_key_last_wins_first_position() {
        let raw = parse_block("Event: UserEvent\r\nX: 1\r\nY: 2\r\nX: 3\r\n\r\n").unwrap();
        assert_eq!(raw.header("X"), Some("3"));
        assert_eq!(
            raw.headers()
                .keys()
                .collect::<Vec<_>>(),
            vec!["Event", "X", "Y"]
        );
    }

    #[test]
    fn test_body_after_blank_line() {
        let raw = parse_block(
            "Event: UserEvent\r\nActionID: 9\r\n\r\nfirst line\r\n\r\nthird line\r\n",
        )
        .unwrap();
        assert_eq!(raw.body(), &["first line", "", "third line"]);
    }

    #[test]
    fn test_leading_blank_lines_skipped() {
        let raw = parse_block("\r\n\r\nEvent: FullyBooted\r\n\r\n").unwrap();
        assert_eq!(raw.name(), "FullyBooted");
    }

    #[test]
    fn test_missing_event_name() {
        let err = parse_block("Channel: SIP/100-1\r\n\r\n").unwrap_err();
        assert_eq!(err, AmiError::MissingEventName);
    }

    #[test]
    fn test_invalid_header_line() {
        let err = parse_block("Event: Hangup\r\nnot a header\r\n\r\n").unwrap_err();
        assert_eq!(
            err,
            AmiError::InvalidHeader {
                header: "not a header".into()
            }
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = parse_block("Event: Hangup\r\n: orphan\r\n\r\n").unwrap_err();
        assert!(matches!(err, AmiError::InvalidHeader { .. }));
    }

    #[test]
    fn test_wire_format_round_trip() {
        let text = "Event: Status\r\nChannel: SIP/100-1\r\nSeconds: 12\r\n\r\n";
        let raw = parse_block(text).unwrap();
        assert_eq!(raw.to_wire_format(), text);
        assert_eq!(parse_block(&raw.to_wire_format()).unwrap(), raw);
    }
}
