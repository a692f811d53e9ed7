//! Decoder configuration

use serde::{Deserialize, Serialize};

/// How the `Paused` flag on queue-member events is coerced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum PausedCoercion {
    /// Short-circuit on the raw value before comparing against `"1"`.
    ///
    /// An absent `Paused` header becomes [`HeaderValue::NoValue`] and an
    /// empty one stays `Str("")`; only a non-empty value becomes a bool.
    /// Downstream consumers written against older clients branch on this.
    ///
    /// [`HeaderValue::NoValue`]: crate::HeaderValue::NoValue
    #[default]
    Legacy,
    /// Always produce a strict bool, `true` only for `"1"`.
    Strict,
}

/// Options for [`EventDefinition::process_with`](crate::EventDefinition::process_with)
/// and [`decode_with`](crate::registry::decode_with).
///
/// ```
/// use asterisk_ami_events::{DecodeOptions, PausedCoercion};
///
/// let opts: DecodeOptions = serde_json::from_str(r#"{"paused": "strict"}"#).unwrap();
/// assert_eq!(opts.paused, PausedCoercion::Strict);
///
/// let defaults: DecodeOptions = serde_json::from_str("{}").unwrap();
/// assert_eq!(defaults, DecodeOptions::default());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct DecodeOptions {
    /// Coercion applied to `Paused`. Default: [`PausedCoercion::Legacy`].
    pub paused: PausedCoercion,
}

impl DecodeOptions {
    /// Options with every known quirk replaced by its strict equivalent.
    pub fn strict() -> Self {
        Self {
            paused: PausedCoercion::Strict,
        }
    }

    /// Override the `Paused` coercion.
    pub fn with_paused(mut self, paused: PausedCoercion) -> Self {
        self.paused = paused;
        self
    }
}
