//! Raw and normalized AMI messages.

use crate::constants::{HEADER_ACTION_ID, HEADER_EVENT, HEADER_RESPONSE, LINE_TERMINATOR};
use crate::event::EventKind;
use crate::value::HeaderValue;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Ordered header mapping. Keys are unique and keep wire order.
///
/// Entries live in a `Vec`; `index` maps each key to its slot so that
/// lookups and inserts stay constant-time on large `UserEvent` blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Headers<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Headers<V> {
    /// Empty mapping.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Empty mapping with room for `n` headers.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
            index: HashMap::with_capacity(n),
        }
    }

    /// Look up a header by name (case-sensitive).
    pub fn get(&self, name: &str) -> Option<&V> {
        let pos = *self
            .index
            .get(name)?;
        self.entries
            .get(pos)
            .map(|(_, v)| v)
    }

    /// `true` if the header is present.
    pub fn contains_key(&self, name: &str) -> bool {
        self.index
            .contains_key(name)
    }

    /// Set or overwrite a header, returning the previous value.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        if let Some(&pos) = self
            .index
            .get(&name)
        {
            if let Some((_, slot)) = self
                .entries
                .get_mut(pos)
            {
                return Some(std::mem::replace(slot, value));
            }
        }
        self.index
            .insert(name.clone(), self.entries.len());
        self.entries
            .push((name, value));
        None
    }

    /// Remove a header, returning its value if it existed.
    ///
    /// Later headers shift down one slot, so this is linear in their count.
    pub fn remove(&mut self, name: &str) -> Option<V> {
        let pos = self
            .index
            .remove(name)?;
        let (_, value) = self
            .entries
            .remove(pos);
        for (k, _) in &self.entries[pos..] {
            if let Some(slot) = self
                .index
                .get_mut(k)
            {
                *slot -= 1;
            }
        }
        Some(value)
    }

    /// Iterate `(name, value)` pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Header names in wire order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|(k, _)| k.as_str())
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.entries
            .len()
    }

    /// `true` if there are no headers.
    pub fn is_empty(&self) -> bool {
        self.entries
            .is_empty()
    }
}

impl<V> Default for Headers<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Headers<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.insert(k, v);
        }
        headers
    }
}

impl<V> IntoIterator for Headers<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .into_iter()
    }
}

impl<V: Serialize> Serialize for Headers<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// One wire message as handed over by the frame decoder: a name, its raw
/// string headers, and the body lines that followed the header block.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct RawMessage {
    name: String,
    headers: Headers<String>,
    body: Vec<String>,
}

impl RawMessage {
    /// Message with the given event name and no headers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// Message assembled from already-split parts.
    pub fn from_parts(name: impl Into<String>, headers: Headers<String>, body: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            body,
        }
    }

    /// Builder-style [`set_header`](Self::set_header).
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Builder-style [`set_body`](Self::set_body).
    pub fn with_body<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_body(
            lines
                .into_iter()
                .map(Into::into)
                .collect(),
        );
        self
    }

    /// Event or response name used for registry lookup.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a header by name (case-sensitive).
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers
            .get(name.as_ref())
            .map(|s| s.as_str())
    }

    /// All headers in wire order.
    pub fn headers(&self) -> &Headers<String> {
        &self.headers
    }

    /// Set or overwrite a header.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers
            .insert(name, value.into());
    }

    /// Body lines following the header block.
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Replace the body.
    pub fn set_body(&mut self, lines: Vec<String>) {
        self.body = lines;
    }

    /// `ActionID` header, present when the message answers an action.
    pub fn action_id(&self) -> Option<&str> {
        self.header(HEADER_ACTION_ID)
    }

    /// Identity normalization: every header becomes [`HeaderValue::Str`]
    /// and the body is copied unchanged.
    ///
    /// This is what a dispatcher falls back to for names outside the
    /// registry.
    pub fn passthrough(&self) -> (Headers<HeaderValue>, Vec<String>) {
        let headers = self
            .headers
            .iter()
            .map(|(k, v)| (k, HeaderValue::Str(v.clone())))
            .collect();
        (headers, self.body.clone())
    }

    /// Serialize back to AMI wire format (CRLF line endings).
    ///
    /// An `Event:` line carrying the name is emitted first unless the
    /// headers already contain `Event` or `Response`. The block ends with a
    /// blank line; body lines, if any, follow it.
    ///
    /// ```
    /// use asterisk_ami_events::RawMessage;
    ///
    /// let msg = RawMessage::new("FullyBooted").with_header("Status", "Fully Booted");
    /// assert_eq!(
    ///     msg.to_wire_format(),
    ///     "Event: FullyBooted\r\nStatus: Fully Booted\r\n\r\n"
    /// );
    /// ```
    pub fn to_wire_format(&self) -> String {
        use std::fmt::Write;
        let mut out = String::new();

        if !self
            .headers
            .contains_key(HEADER_EVENT)
            && !self
                .headers
                .contains_key(HEADER_RESPONSE)
        {
            let _ = write!(out, "{}: {}{}", HEADER_EVENT, self.name, LINE_TERMINATOR);
        }
        for (k, v) in self
            .headers
            .iter()
        {
            let _ = write!(out, "{}: {}{}", k, v, LINE_TERMINATOR);
        }
        out.push_str(LINE_TERMINATOR);
        for line in &self.body {
            out.push_str(line);
            out.push_str(LINE_TERMINATOR);
        }
        out
    }
}

/// A message after its kind's coercion policies have run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NormalizedMessage {
    #[serde(skip)]
    kind: EventKind,
    name: String,
    headers: Headers<HeaderValue>,
    body: Vec<String>,
}

impl NormalizedMessage {
    pub(crate) fn new(
        kind: EventKind,
        name: String,
        headers: Headers<HeaderValue>,
        body: Vec<String>,
    ) -> Self {
        Self {
            kind,
            name,
            headers,
            body,
        }
    }

    /// Kind that produced this message.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Name as it appeared on the wire.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a typed header by name (case-sensitive).
    pub fn header(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.headers
            .get(name.as_ref())
    }

    /// All typed headers in wire order, with defaulted keys appended.
    pub fn headers(&self) -> &Headers<HeaderValue> {
        &self.headers
    }

    /// Body lines, unchanged from the raw message.
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Integer header, `None` if absent or not an integer.
    pub fn int(&self, name: impl AsRef<str>) -> Option<i64> {
        self.header(name)?
            .as_int()
    }

    /// Float header, `None` if absent or not a float.
    pub fn float(&self, name: impl AsRef<str>) -> Option<f64> {
        self.header(name)?
            .as_float()
    }

    /// Bool header, `None` if absent or not a bool.
    pub fn bool(&self, name: impl AsRef<str>) -> Option<bool> {
        self.header(name)?
            .as_bool()
    }

    /// Pass-through string header, `None` if absent or coerced.
    pub fn str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.header(name)?
            .as_str()
    }

    /// `ActionID` header, present when the message answers an action.
    pub fn action_id(&self) -> Option<&str> {
        self.str(HEADER_ACTION_ID)
    }

    /// Split into `(headers, body)`.
    pub fn into_parts(self) -> (Headers<HeaderValue>, Vec<String>) {
        (self.headers, self.body)
    }
}

impl fmt::Display for NormalizedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (k, v) in self
            .headers
            .iter()
        {
            write!(f, " {}={}", k, v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_insert_keeps_position() {
        let mut h: Headers<String> = Headers::new();
        h.insert("A", "1".into());
        h.insert("B", "2".into());
        let prev = h.insert("A", "3".into());
        assert_eq!(prev, Some("1".to_string()));
        assert_eq!(
            h.keys()
                .collect::<Vec<_>>(),
            vec!["A", "B"]
        );
        assert_eq!(h.get("A"), Some(&"3".to_string()));
    }

    #[test]
    fn test_headers_remove_then_lookup_later_keys() {
        let mut h: Headers<i64> = (0..100)
            .map(|i| (format!("H{i}"), i))
            .collect();
        assert_eq!(h.remove("H10"), Some(10));
        assert_eq!(h.get("H11"), Some(&11));
        assert_eq!(h.get("H99"), Some(&99));
        h.insert("H50", -50);
        assert_eq!(
            h.keys()
                .nth(49),
            Some("H50")
        );
        assert_eq!(h.get("H50"), Some(&-50));
        h.insert("H10", 10);
        assert_eq!(
            h.keys()
                .last(),
            Some("H10")
        );
    }

    #[test]
    fn test_headers_case_sensitive() {
        let h: Headers<&str> = [("Uniqueid", "x1")]
            .into_iter()
            .collect();
        assert!(h.contains_key("Uniqueid"));
        assert!(!h.contains_key("UniqueID"));
    }

    #[test]
    fn test_headers_remove() {
        let mut h: Headers<i64> = [("A", 1), ("B", 2), ("C", 3)]
            .into_iter()
            .collect();
        assert_eq!(h.remove("B"), Some(2));
        assert_eq!(h.remove("B"), None);
        assert_eq!(
            h.keys()
                .collect::<Vec<_>>(),
            vec!["A", "C"]
        );
    }

    #[test]
    fn test_headers_serialize_in_wire_order() {
        let h: Headers<HeaderValue> = [
            ("Zeta", HeaderValue::Int(1)),
            ("Alpha", HeaderValue::NoValue),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            serde_json::to_string(&h).unwrap(),
            r#"{"Zeta":1,"Alpha":null}"#
        );
    }

    #[test]
    fn test_raw_message_accessors() {
        let msg = RawMessage::new("Status")
            .with_header("ActionID", "42")
            .with_header("Channel", "SIP/100-1")
            .with_body(["line one", "line two"]);
        assert_eq!(msg.name(), "Status");
        assert_eq!(msg.action_id(), Some("42"));
        assert_eq!(msg.header("Channel"), Some("SIP/100-1"));
        assert_eq!(msg.header("Seconds"), None);
        assert_eq!(msg.body(), &["line one", "line two"]);
    }

    #[test]
    fn test_passthrough_is_identity() {
        let msg = RawMessage::new("Newchannel")
            .with_header("Channel", "SIP/100-1")
            .with_header("Seconds", "12")
            .with_body(["x"]);
        let (headers, body) = msg.passthrough();
        assert_eq!(
            headers.get("Seconds"),
            Some(&HeaderValue::Str("12".into()))
        );
        assert_eq!(headers.len(), 2);
        assert_eq!(body, vec!["x".to_string()]);
    }

    #[test]
    fn test_normalized_display_uses_plain_values() {
        let headers: Headers<HeaderValue> = [
            ("Queue", HeaderValue::Str("support".into())),
            ("Calls", HeaderValue::Int(3)),
            ("Paused", HeaderValue::Bool(true)),
            ("Weight", HeaderValue::NoValue),
        ]
        .into_iter()
        .collect();
        let msg = NormalizedMessage::new(
            EventKind::QueueParams,
            "QueueParams".into(),
            headers,
            Vec::new(),
        );
        assert_eq!(
            msg.to_string(),
            "QueueParams Queue=support Calls=3 Paused=true Weight="
        );
    }

    #[test]
    fn test_to_wire_format_keeps_existing_event_header() {
        let msg = RawMessage::new("VarSet")
            .with_header("Event", "VarSet")
            .with_header("Variable", "FOO");
        assert_eq!(
            msg.to_wire_format(),
            "Event: VarSet\r\nVariable: FOO\r\n\r\n"
        );
    }

    #[test]
    fn test_to_wire_format_with_body() {
        let msg = RawMessage::new("UserEvent")
            .with_header("Event", "UserEvent")
            .with_body(["first", "second"]);
        assert_eq!(
            msg.to_wire_format(),
            "Event: UserEvent\r\n\r\nfirst\r\nsecond\r\n"
        );
    }
}
