/// Generates a non-exhaustive enum mapping Rust variants to AMI wire-format strings.
///
/// Produces: enum definition + `ALL` + `as_str()` + `from_wire()` + `Display` +
/// `AsRef<str>` + `FromStr`.
/// The error type must be defined separately as a tuple struct holding the
/// rejected input (matching `ParseEventKindError`, `ParseHeaderNameError`).
///
/// `from_wire()` matches the exact wire spelling only. `FromStr` tries an
/// exact match first, then falls back to an ASCII case-insensitive match
/// for names typed by hand.
///
/// # Example
///
/// ```ignore
/// define_wire_enum! {
///     error_type: ParseMyEnumError,
///     /// Doc comment for the enum.
///     pub enum MyEnum {
///         Foo => "Foo",
///         BarBaz => "Bar-Baz",
///     }
/// }
/// ```
macro_rules! define_wire_enum {
    (
        error_type: $Err:ident,
        $(#[$enum_meta:meta])*
        $vis:vis enum $Name:ident {
            $(
                $(#[$var_meta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        #[allow(missing_docs)]
        $vis enum $Name {
            $(
                $(#[$var_meta])*
                $variant,
            )+
        }

        impl $Name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$Name] = &[ $( $Name::$variant, )+ ];

            /// Wire-format name string.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $Name::$variant => $wire, )+
                }
            }

            /// Variant whose wire name is exactly `s`.
            pub fn from_wire(s: &str) -> Option<$Name> {
                match s {
                    $( $wire => Some($Name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl std::str::FromStr for $Name {
            type Err = $Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Some(v) = $Name::from_wire(s) {
                    return Ok(v);
                }
                $(
                    if s.eq_ignore_ascii_case($wire) {
                        return Ok($Name::$variant);
                    }
                )+
                Err($Err(s.to_string()))
            }
        }
    };
}
