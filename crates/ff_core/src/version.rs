//! `Version` and `VersionRange` — spec.md §3.

use crate::errors::CoreError;
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `(major, minor, patch)` with lexicographic total order.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let (Some(maj), Some(min), Some(pat), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CoreError::InvalidVersion);
        };
        let major = maj.parse().map_err(|_| CoreError::InvalidVersion)?;
        let minor = min.parse().map_err(|_| CoreError::InvalidVersion)?;
        let patch = pat.parse().map_err(|_| CoreError::InvalidVersion)?;
        Ok(Self { major, minor, patch })
    }
}

/// Tagged union of the four range shapes a rule can target.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum VersionRange {
    Unbounded,
    LeftBound { min: Version },
    RightBound { max: Version },
    FullyBound { min: Version, max: Version },
}

impl Default for VersionRange {
    fn default() -> Self {
        VersionRange::Unbounded
    }
}

impl VersionRange {
    /// `FullyBound` fails with `InvalidRange` if `min > max`; the other
    /// three shapes cannot be malformed.
    pub fn fully_bound(min: Version, max: Version) -> Result<Self, CoreError> {
        if min > max {
            Err(CoreError::InvalidRange)
        } else {
            Ok(VersionRange::FullyBound { min, max })
        }
    }

    pub fn contains(&self, v: Version) -> bool {
        match self {
            VersionRange::Unbounded => true,
            VersionRange::LeftBound { min } => *min <= v,
            VersionRange::RightBound { max } => v <= *max,
            VersionRange::FullyBound { min, max } => *min <= v && v <= *max,
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRange::Unbounded => f.write_str("*"),
            VersionRange::LeftBound { min } => write!(f, ">={min}"),
            VersionRange::RightBound { max } => write!(f, "<={max}"),
            VersionRange::FullyBound { min, max } => write!(f, "{min}..={max}"),
        }
    }
}
