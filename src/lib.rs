//! Typed event taxonomy and header normalization for the Asterisk Manager
//! Interface (AMI)
//!
//! AMI messages are blocks of `Key: Value` lines whose values are all
//! strings. This crate knows a closed set of event and response kinds
//! ([`EventKind`]), the headers each one documents, and how the numeric and
//! boolean ones are typed. Normalization never fails: an unparsable or
//! absent field gets the fallback value AMI clients have always produced
//! for it (`-1`, [`HeaderValue::NoValue`], or `false`, depending on the
//! field).
//!
//! # Architecture
//!
//! - [`coerce`]: the reusable coercion policies
//! - [`EventDefinition`]: per-kind field tables and `process`
//! - [`registry`]: wire name to definition lookup and [`decode`](registry::decode)
//! - [`protocol`]: splits one framed text block into a [`RawMessage`]
//!
//! Sockets, login, framing of the byte stream and action/response
//! correlation are left to the caller.
//!
//! # Examples
//!
//! ## Decoding a block
//!
//! ```rust
//! use asterisk_ami_events::{protocol, registry, EventKind, HeaderValue};
//!
//! let raw = protocol::parse_block(
//!     "Event: QueueParams\r\nQueue: support\r\nCalls: 3\r\nServiceLevel: n/a\r\n\r\n",
//! )?;
//! let msg = registry::decode(&raw)?;
//!
//! assert_eq!(msg.kind(), EventKind::QueueParams);
//! assert_eq!(msg.int("Calls"), Some(3));
//! assert_eq!(msg.float("ServiceLevel"), Some(-1.0));
//! // Absent counters default to the sentinel.
//! assert_eq!(msg.int("Abandoned"), Some(-1));
//! assert_eq!(msg.header("Queue"), Some(&HeaderValue::Str("support".into())));
//! # Ok::<(), asterisk_ami_events::AmiError>(())
//! ```
//!
//! ## Unknown kinds
//!
//! ```rust
//! use asterisk_ami_events::{registry, RawMessage};
//!
//! let raw = RawMessage::new("Newchannel").with_header("Channel", "SIP/100-1");
//! let (headers, body) = match registry::decode(&raw) {
//!     Ok(msg) => msg.into_parts(),
//!     Err(e) if e.is_unknown_event() => raw.passthrough(),
//!     Err(e) => return Err(e),
//! };
//! assert_eq!(headers.len(), 1);
//! assert!(body.is_empty());
//! # Ok::<(), asterisk_ami_events::AmiError>(())
//! ```
//!
//! ## The `Paused` quirk
//!
//! Queue-member events historically report an absent `Paused` header as
//! "no value" rather than `false`. That is preserved by default;
//! [`PausedCoercion::Strict`] opts out.
//!
//! ```rust
//! use asterisk_ami_events::{registry, DecodeOptions, HeaderValue, RawMessage};
//!
//! let raw = RawMessage::new("QueueMember").with_header("Queue", "support");
//! let legacy = registry::decode(&raw)?;
//! let strict = registry::decode_with(&raw, &DecodeOptions::strict())?;
//!
//! assert_eq!(legacy.header("Paused"), Some(&HeaderValue::NoValue));
//! assert_eq!(strict.bool("Paused"), Some(false));
//! # Ok::<(), asterisk_ami_events::AmiError>(())
//! ```

#[macro_use]
mod macros;

pub mod coerce;
pub mod config;
pub mod constants;
pub mod definitions;
pub mod error;
pub mod event;
pub mod headers;
pub mod message;
pub mod protocol;
pub mod registry;
pub mod value;

pub use coerce::Coercion;
pub use config::{DecodeOptions, PausedCoercion};
pub use definitions::{EventDefinition, FieldSpec, Presence};
pub use error::{AmiError, AmiResult};
pub use event::{EventKind, ParseEventKindError};
pub use headers::{HeaderName, ParseHeaderNameError};
pub use message::{Headers, NormalizedMessage, RawMessage};
pub use value::{Coerced, HeaderValue};
