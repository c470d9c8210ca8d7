//! Release lines from the milestone catalog.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::version::compare_dotted;

/// Title suffix marking a long-term-support milestone.
pub const LTS_SUFFIX: &str = " LTS";

/// A `major.minor` release line as published by the milestone catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseLine {
    /// Version number with any ` LTS` suffix removed, e.g. `"4.2"`.
    pub version_number: String,
    /// Whether the milestone title carried the ` LTS` suffix.
    pub is_lts: bool,
    /// Whether the milestone's due date has passed (or it has none).
    pub released: bool,
    /// Release directory URL, present only for released lines.
    pub link: Option<String>,
}

impl ReleaseLine {
    /// The leading two numeric components of the version number.
    ///
    /// Returns `None` when either component is missing or not a number.
    ///
    /// ```
    /// use bvm_schema::ReleaseLine;
    ///
    /// let line = ReleaseLine {
    ///     version_number: "4.2".into(),
    ///     is_lts: true,
    ///     released: true,
    ///     link: None,
    /// };
    /// assert_eq!(line.major_minor(), Some((4, 2)));
    /// ```
    pub fn major_minor(&self) -> Option<(u32, u32)> {
        let mut parts = self.version_number.split('.');
        let major = parts.next()?.trim().parse().ok()?;
        let minor = parts.next()?.trim().parse().ok()?;
        Some((major, minor))
    }

    /// Numeric ordering by version number, used for display and "latest".
    pub fn cmp_version(&self, other: &Self) -> Ordering {
        compare_dotted(&self.version_number, &other.version_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(v: &str) -> ReleaseLine {
        ReleaseLine {
            version_number: v.to_string(),
            is_lts: false,
            released: true,
            link: None,
        }
    }

    #[test]
    fn major_minor_parses_leading_components() {
        assert_eq!(line("3.6").major_minor(), Some((3, 6)));
        assert_eq!(line("4.10.1").major_minor(), Some((4, 10)));
        assert_eq!(line("5").major_minor(), None);
        assert_eq!(line("next").major_minor(), None);
    }

    #[test]
    fn sorting_by_cmp_version_is_numeric() {
        let mut lines = vec![line("4.10"), line("4.2"), line("2.93")];
        lines.sort_by(ReleaseLine::cmp_version);
        let order: Vec<_> = lines.iter().map(|l| l.version_number.as_str()).collect();
        assert_eq!(order, vec!["2.93", "4.2", "4.10"]);
    }
}
