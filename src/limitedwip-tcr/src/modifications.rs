use std::collections::BTreeMap;

/// Per-file modification counters of the change list.
///
/// Any edit bumps a counter, even one that restores the previous content,
/// so equal fingerprints mean nothing was touched in between.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeListModifications(BTreeMap<String, u64>);

impl ChangeListModifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, count: u64) -> Self {
        self.0.insert(path.into(), count);
        self
    }

    pub fn get(&self, path: &str) -> Option<u64> {
        self.0.get(path).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(path, count)| (path.as_str(), *count))
    }
}

impl FromIterator<(String, u64)> for ChangeListModifications {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, u64>> for ChangeListModifications {
    fn from(value: BTreeMap<String, u64>) -> Self {
        Self(value)
    }
}
