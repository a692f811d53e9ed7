//! Protocol constants and fallback values

/// Integer sentinel substituted when a numeric field is absent or unparsable.
pub const INT_SENTINEL: i64 = -1;

/// Float sentinel substituted when a fractional field is absent or unparsable.
pub const FLOAT_SENTINEL: f64 = -1.0;

/// Token Asterisk uses for affirmative `yes`/`no` flags (peer listings).
pub const YES_TOKEN: &str = "yes";

/// Token Asterisk uses for affirmative `1`/`0` flags (queue members).
pub const ONE_TOKEN: &str = "1";

/// Header carrying the event name on unsolicited events.
pub const HEADER_EVENT: &str = "Event";

/// Header carrying the status on action responses (`Success`, `Error`, `Follows`).
pub const HEADER_RESPONSE: &str = "Response";

/// Correlation header echoed back on action responses and their event lists.
pub const HEADER_ACTION_ID: &str = "ActionID";

/// Separator between a header key and its value.
pub const HEADER_SEPARATOR: char = ':';

/// Line terminator Asterisk writes on the wire. A blank line ends a header block.
pub const LINE_TERMINATOR: &str = "\r\n";
