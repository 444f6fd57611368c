//! Line-diff based change size calculation.
//!
//! Sizes are cached per document and invalidated explicitly when the
//! document changes. Estimated sizes are never cached so they get
//! recalculated on the next run.

use std::collections::HashMap;

use similar::{Algorithm, DiffTag, TextDiff};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::change_size::{ChangeSize, ChangeSizesWithPath};

/// Files larger than this are not diffed.
pub const DEFAULT_MAX_DIFF_BYTES: usize = 1024 * 1024;

/// Stable identity of an open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// One side of a file change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// The file does not exist on this side (added or deleted file).
    Missing,
    Text(String),
    Binary,
    /// Content not loaded yet.
    Placeholder,
}

impl Revision {
    fn text(&self) -> &str {
        match self {
            Revision::Text(text) => text,
            _ => "",
        }
    }
}

/// A changed file in the change list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub document: Option<DocumentId>,
    pub before: Revision,
    pub after: Revision,
}

/// Change sizes keyed by document.
#[derive(Debug, Default)]
pub struct ChangeSizeCache {
    sizes: HashMap<DocumentId, ChangeSize>,
}

impl ChangeSizeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, document: DocumentId) -> Option<ChangeSize> {
        self.sizes.get(&document).copied()
    }

    /// Store an exact size. Approximate sizes are ignored.
    pub fn put(&mut self, document: DocumentId, size: ChangeSize) {
        if !size.is_approximate {
            self.sizes.insert(document, size);
        }
    }

    pub fn invalidate(&mut self, document: DocumentId) {
        self.sizes.remove(&document);
    }

    pub fn clear(&mut self) {
        self.sizes.clear();
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Calculates the size of the change list and keeps the latest result.
#[derive(Debug)]
pub struct ChangeSizeCalculator {
    cache: ChangeSizeCache,
    current: ChangeSizesWithPath,
    max_diff_bytes: usize,
    calculating: bool,
}

impl Default for ChangeSizeCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeSizeCalculator {
    pub fn new() -> Self {
        Self {
            cache: ChangeSizeCache::new(),
            current: ChangeSizesWithPath::not_available(),
            max_diff_bytes: DEFAULT_MAX_DIFF_BYTES,
            calculating: false,
        }
    }

    pub fn with_max_diff_bytes(mut self, max_diff_bytes: usize) -> Self {
        self.max_diff_bytes = max_diff_bytes;
        self
    }

    /// Latest calculated sizes; not available before the first calculation.
    pub fn current_change_sizes(&self) -> &ChangeSizesWithPath {
        &self.current
    }

    pub fn is_calculating(&self) -> bool {
        self.calculating
    }

    pub fn invalidate(&mut self, document: DocumentId) {
        self.cache.invalidate(document);
    }

    pub fn cache(&self) -> &ChangeSizeCache {
        &self.cache
    }

    /// Calculate on the calling thread and store the result.
    pub fn calculate(&mut self, changes: &[FileChange]) -> &ChangeSizesWithPath {
        if let Some(pending) = self.begin(changes) {
            let result = pending.run();
            self.complete(result);
        }
        &self.current
    }

    /// Start a calculation whose diffing may run elsewhere, e.g. through
    /// [`PendingCalculation::spawn`]. Returns `None` if a calculation is
    /// already running or everything was answered from the cache.
    pub fn begin(&mut self, changes: &[FileChange]) -> Option<PendingCalculation> {
        if self.calculating {
            debug!("Change size calculation already running");
            return None;
        }

        let mut cached = Vec::new();
        let mut to_diff = Vec::new();
        for change in changes {
            match change.document.and_then(|document| self.cache.get(document)) {
                Some(size) => cached.push((change.path.clone(), size)),
                None => to_diff.push(change.clone()),
            }
        }

        if to_diff.is_empty() {
            self.current = ChangeSizesWithPath::new(cached);
            return None;
        }

        self.calculating = true;
        Some(PendingCalculation {
            cached,
            to_diff,
            max_diff_bytes: self.max_diff_bytes,
        })
    }

    /// Store the result of a calculation started with [`Self::begin`].
    pub fn complete(&mut self, result: CalculationResult) {
        let mut entries = result.cached;
        for (change, size) in result.computed {
            if let Some(document) = change.document {
                self.cache.put(document, size);
            }
            entries.push((change.path, size));
        }
        self.current = ChangeSizesWithPath::new(entries);
        self.calculating = false;
    }

    /// Give up on a calculation whose result was lost.
    pub fn abandon(&mut self) {
        warn!("Change size calculation was abandoned");
        self.calculating = false;
    }
}

/// Changes that still need diffing.
#[derive(Debug)]
pub struct PendingCalculation {
    cached: Vec<(String, ChangeSize)>,
    to_diff: Vec<FileChange>,
    max_diff_bytes: usize,
}

/// Output of [`PendingCalculation::run`].
#[derive(Debug)]
pub struct CalculationResult {
    cached: Vec<(String, ChangeSize)>,
    computed: Vec<(FileChange, ChangeSize)>,
}

impl PendingCalculation {
    pub fn files_to_diff(&self) -> usize {
        self.to_diff.len()
    }

    pub fn run(self) -> CalculationResult {
        let max_diff_bytes = self.max_diff_bytes;
        let computed = self
            .to_diff
            .into_iter()
            .map(|change| {
                let size = change_size_of(&change, max_diff_bytes);
                (change, size)
            })
            .collect();
        CalculationResult {
            cached: self.cached,
            computed,
        }
    }

    /// Run on the blocking thread pool.
    pub fn spawn(self) -> JoinHandle<CalculationResult> {
        tokio::task::spawn_blocking(move || self.run())
    }
}

/// Number of changed lines in one file.
///
/// Whitespace and blank lines are ignored. A replaced block counts its new
/// lines, a deleted block its old lines. Placeholder, binary and oversized
/// content is not diffed and yields an approximate zero.
pub fn change_size_of(change: &FileChange, max_diff_bytes: usize) -> ChangeSize {
    let (before, after) = (&change.before, &change.after);
    if matches!(before, Revision::Placeholder) || matches!(after, Revision::Placeholder) {
        return ChangeSize::APPROXIMATELY_EMPTY;
    }
    if matches!(before, Revision::Binary) || matches!(after, Revision::Binary) {
        return ChangeSize::APPROXIMATELY_EMPTY;
    }
    let (before, after) = (before.text(), after.text());
    if before.len() > max_diff_bytes || after.len() > max_diff_bytes {
        debug!(path = %change.path, "File too big to diff");
        return ChangeSize::APPROXIMATELY_EMPTY;
    }

    let old_lines = significant_lines(before);
    let new_lines = significant_lines(after);
    let old: Vec<&str> = old_lines.iter().map(String::as_str).collect();
    let new: Vec<&str> = new_lines.iter().map(String::as_str).collect();

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(&old, &new);

    let mut lines = 0usize;
    for op in diff.ops() {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        lines += match tag {
            DiffTag::Equal => 0,
            DiffTag::Delete => old_range.len(),
            DiffTag::Insert | DiffTag::Replace => new_range.len(),
        };
    }
    ChangeSize::new(i32::try_from(lines).unwrap_or(i32::MAX))
}

fn significant_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .lines()
        .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|line| !line.is_empty())
        .collect()
}
