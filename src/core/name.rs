//! Identifiers for states and events.
//!
//! Both are thin string newtypes. They borrow as `str`, so maps keyed by
//! them can be queried with plain string slices.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Watcher target meaning "every state". Reserved; no state may use it.
pub const WILDCARD: &str = "*";

macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a name from anything string-like.
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// Borrow the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(&self.0, f)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(name.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl From<&$name> for $name {
            fn from(name: &$name) -> Self {
                name.clone()
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

name_type! {
    /// Name of a declared state. Unique within a machine.
    StateName
}

name_type! {
    /// Name of an event. Only meaningful relative to a source state.
    EventName
}

impl StateName {
    /// Whether this is the reserved wildcard name.
    pub fn is_wildcard(&self) -> bool {
        self.0 == WILDCARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn names_compare_with_str() {
        let state = StateName::from("idle");
        assert_eq!(state, "idle");
        assert_eq!(state.as_str(), "idle");
        assert_eq!(state.to_string(), "idle");
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(EventName::from("EDIT"), 1);
        assert_eq!(map.get("EDIT"), Some(&1));
        assert_eq!(map.get("SAVE"), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&StateName::new("saving")).unwrap();
        assert_eq!(json, "\"saving\"");
        let back: StateName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, "saving");
    }

    #[test]
    fn wildcard_is_detected() {
        assert!(StateName::from(WILDCARD).is_wildcard());
        assert!(!StateName::from("idle").is_wildcard());
    }
}
