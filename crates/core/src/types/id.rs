//! Newtype IDs for type-safe entity references.
//!
//! Every record in Keizok is identified by a string of the form
//! `mock-<milliseconds since epoch>`. Use the `define_id!` macro to create
//! wrappers that prevent accidentally mixing IDs from different entity types.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Prefix carried by every generated ID.
pub const MOCK_ID_PREFIX: &str = "mock-";

static LAST_ISSUED_MS: AtomicI64 = AtomicI64::new(0);

/// Errors that can occur when parsing an ID.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input string is empty or whitespace.
    #[error("id cannot be empty")]
    Empty,
}

/// Returns the millisecond stamp for the next generated ID.
///
/// The value tracks the wall clock but never repeats within a process: two
/// calls in the same millisecond yield consecutive values.
#[must_use]
pub fn next_mock_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ISSUED_MS.load(Ordering::Acquire);
    loop {
        let next = now.max(last.saturating_add(1));
        match LAST_ISSUED_MS.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `new()`, `generate()`, `as_str()`, `into_inner()`
/// - `Display`, `FromStr`, `AsRef<str>`
///
/// # Example
///
/// ```rust
/// # use keizok_core::define_id;
/// define_id!(WidgetId);
///
/// let id = WidgetId::generate();
/// assert!(id.as_str().starts_with("mock-"));
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing ID value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Issue a fresh `mock-<ms>` ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(format!(
                    "{}{}",
                    $crate::types::id::MOCK_ID_PREFIX,
                    $crate::types::id::next_mock_millis()
                ))
            }

            /// Get the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err($crate::types::id::IdError::Empty);
                }
                Ok(Self(trimmed.to_owned()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(UserId);
define_id!(EcSiteId);
define_id!(ContentId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_has_mock_prefix() {
        let id = EcSiteId::generate();
        let stamp = id.as_str().strip_prefix(MOCK_ID_PREFIX).unwrap();
        assert!(stamp.parse::<i64>().is_ok());
    }

    #[test]
    fn test_generate_never_repeats() {
        let ids: Vec<ContentId> = (0..200).map(|_| ContentId::generate()).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_next_mock_millis_is_increasing() {
        let a = next_mock_millis();
        let b = next_mock_millis();
        assert!(b > a);
    }

    #[test]
    fn test_from_str_rejects_blank() {
        assert_eq!("  ".parse::<UserId>(), Err(IdError::Empty));
        assert_eq!(
            " mock-user-123 ".parse::<UserId>().unwrap().as_str(),
            "mock-user-123"
        );
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = UserId::new("mock-user-123");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"mock-user-123\""
        );
    }
}
