//! Version triples and dotted-version ordering.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A fully resolved release identity: `major.minor.patch`.
///
/// Field order matters: the derived `Ord` compares major, then minor, then
/// patch, which is the numeric ordering of releases.
///
/// # Example
///
/// ```
/// use bvm_schema::VersionTriple;
///
/// let v = VersionTriple::new(4, 2, 3);
/// assert_eq!(v.to_string(), "4.2.3");
/// assert_eq!(v.series(), "4.2");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct VersionTriple {
    /// Major release number.
    pub major: u32,
    /// Minor release number.
    pub minor: u32,
    /// Patch release number.
    pub patch: u32,
}

impl VersionTriple {
    /// Build a triple from its three components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The `major.minor` release line this version belongs to.
    pub fn series(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Compare two dotted version strings component by component.
///
/// Numeric components compare as numbers, so `"4.10"` sorts after `"4.9"`.
/// A numeric component sorts before a non-numeric one; two non-numeric
/// components fall back to string comparison. A shorter version that is a
/// prefix of a longer one sorts first.
///
/// ```
/// use std::cmp::Ordering;
/// use bvm_schema::compare_dotted;
///
/// assert_eq!(compare_dotted("4.10", "4.9"), Ordering::Greater);
/// assert_eq!(compare_dotted("3.6", "3.6"), Ordering::Equal);
/// ```
pub fn compare_dotted(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}
