//! Macro for implementing Display and FromStr for string-backed enums
//!
//! Used for configuration selectors and error categories that are read from
//! environment variables and written to logs. Parsing is case-insensitive and
//! output is always the canonical lowercase form.
//!
//! # Example
//!
//! ```rust
//! use housewatch_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum DeliveryChannel {
//!     Console,
//!     Remote,
//! }
//!
//! impl_domain_status_conversions!(DeliveryChannel {
//!     Console => "console",
//!     Remote => "remote",
//! });
//!
//! assert_eq!("REMOTE".parse::<DeliveryChannel>(), Ok(DeliveryChannel::Remote));
//! assert_eq!(DeliveryChannel::Console.to_string(), "console");
//! ```

/// Implements Display and FromStr traits for status enums
///
/// This macro generates:
/// - Display trait: converts enum variants to lowercase strings
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
///
/// # Features
///
/// - Case-insensitive parsing (e.g., "NOOP", "noop", "Noop" all work)
/// - Consistent lowercase string output
/// - Descriptive error messages with enum name
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
