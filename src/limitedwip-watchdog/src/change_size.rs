//! Change size values.

use std::fmt;
use std::ops::Add;

use limitedwip_common::PathMatchers;
use serde::{Deserialize, Serialize};

/// Number of changed lines, possibly estimated.
///
/// `value` is never negative except for [`ChangeSize::NA`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeSize {
    pub value: i32,
    pub is_approximate: bool,
}

impl ChangeSize {
    /// Size is unknown, e.g. there is no active change list.
    pub const NA: ChangeSize = ChangeSize {
        value: -1,
        is_approximate: false,
    };

    pub const EMPTY: ChangeSize = ChangeSize {
        value: 0,
        is_approximate: false,
    };

    /// Zero lines, without having looked at the content.
    pub const APPROXIMATELY_EMPTY: ChangeSize = ChangeSize {
        value: 0,
        is_approximate: true,
    };

    pub const fn new(value: i32) -> Self {
        Self {
            value,
            is_approximate: false,
        }
    }

    pub const fn approximate(value: i32) -> Self {
        Self {
            value,
            is_approximate: true,
        }
    }

    pub fn is_na(&self) -> bool {
        *self == Self::NA
    }

    /// True if the size is known and above `max_lines`.
    pub fn exceeds(&self, max_lines: u32) -> bool {
        i64::from(self.value) > i64::from(max_lines)
    }
}

impl Add for ChangeSize {
    type Output = ChangeSize;

    fn add(self, other: ChangeSize) -> ChangeSize {
        ChangeSize {
            value: self.value.saturating_add(other.value),
            is_approximate: self.is_approximate || other.is_approximate,
        }
    }
}

impl fmt::Display for ChangeSize {
    /// Toolbar form: `-` when unknown, `≈` prefix when estimated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_na() {
            f.write_str("-")
        } else if self.is_approximate {
            write!(f, "≈{}", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// Change sizes of individual files in the change list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSizesWithPath {
    entries: Vec<(String, ChangeSize)>,
    available: bool,
}

impl ChangeSizesWithPath {
    pub fn new(entries: Vec<(String, ChangeSize)>) -> Self {
        Self {
            entries,
            available: true,
        }
    }

    /// No change list to measure; totals to [`ChangeSize::NA`].
    pub fn not_available() -> Self {
        Self {
            entries: Vec::new(),
            available: false,
        }
    }

    pub fn single(path: impl Into<String>, size: ChangeSize) -> Self {
        Self::new(vec![(path.into(), size)])
    }

    pub fn entries(&self) -> &[(String, ChangeSize)] {
        &self.entries
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn total(&self) -> ChangeSize {
        if !self.available {
            return ChangeSize::NA;
        }
        self.entries
            .iter()
            .fold(ChangeSize::EMPTY, |total, (_, size)| total + *size)
    }

    /// Total size ignoring paths that match `exclusions`.
    pub fn total_excluding(&self, exclusions: &PathMatchers) -> ChangeSize {
        if !self.available {
            return ChangeSize::NA;
        }
        self.entries
            .iter()
            .filter(|(path, _)| !exclusions.matches(path))
            .fold(ChangeSize::EMPTY, |total, (_, size)| total + *size)
    }
}

impl FromIterator<(String, ChangeSize)> for ChangeSizesWithPath {
    fn from_iter<T: IntoIterator<Item = (String, ChangeSize)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
