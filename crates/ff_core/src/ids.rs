//! Opaque identifier newtypes: `LocaleTag`, `PlatformTag`, `StableId`.
//!
//! Equality and hashing for all three depend only on the canonical
//! representation (spec.md §3's identifier-primitives invariant): construct
//! once via `new`/`from_str`-style constructors, then treat as an immutable
//! value type.

use crate::errors::CoreError;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn non_blank(s: &str) -> bool {
    !s.trim().is_empty()
}

macro_rules! def_opaque_tag {
    ($name:ident, $err:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            /// Construct from an arbitrary non-blank string. The string is
            /// kept verbatim (locale/platform tags are opaque; no casing
            /// rules apply to them per spec.md §3).
            pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
                let s = s.into();
                if non_blank(&s) {
                    Ok(Self(s))
                } else {
                    Err($err)
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

def_opaque_tag!(
    LocaleTag,
    CoreError::BlankTag,
    "Opaque stable locale identifier (e.g. `\"en_US\"`). Equality is string equality."
);
def_opaque_tag!(
    PlatformTag,
    CoreError::BlankTag,
    "Opaque stable platform identifier (e.g. `\"IOS\"`). Equality is string equality."
);

/// Canonical hex-safe identifier derived from an arbitrary non-blank
/// caller-supplied id by ASCII-lowercasing it (spec.md §3: "locale-
/// independent"; we lowercase byte-wise rather than via a locale-aware
/// case fold, which is exactly what "locale-independent" rules out).
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StableId(String);

impl StableId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CoreError> {
        let raw = raw.as_ref();
        if !non_blank(raw) {
            return Err(CoreError::BlankStableId);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StableId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
