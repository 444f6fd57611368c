//! In-memory model of the default change list.
//!
//! Tracks the committed and current content of every file the host has
//! seen, a per-file modification counter, the commit dialog and whether the
//! last commit has been pushed. VCS side effects that the engines need to
//! hear about are queued as [`WorkspaceRequest`]s for the session.

use std::collections::{BTreeMap, VecDeque};

use limitedwip_common::{CommitMessageSource, RevertFilter};
use limitedwip_tcr::ChangeListModifications;
use limitedwip_watchdog::{ChangeSizeCalculator, ChangeSizesWithPath, DocumentId, FileChange, Revision};
use tracing::debug;

use crate::action::{CommitKind, Feature, IdeAction};

/// Name of the change list until the host renames it.
pub const DEFAULT_CHANGE_LIST_NAME: &str = "Changes";

/// Follow-up work for the session, handled after the current event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceRequest {
    Commit { feature: Feature, kind: CommitKind },
    RolledBack { all_changes: bool },
}

#[derive(Debug)]
struct TrackedFile {
    document: DocumentId,
    /// Content at the last commit, `None` if not committed.
    base: Option<String>,
    /// Current content, `None` if deleted.
    current: Option<String>,
    binary: bool,
    is_test: bool,
    modification_count: u64,
}

impl TrackedFile {
    fn is_changed(&self) -> bool {
        self.base != self.current
    }

    fn revision(content: &Option<String>, binary: bool) -> Revision {
        match content {
            None => Revision::Missing,
            Some(_) if binary => Revision::Binary,
            Some(text) => Revision::Text(text.clone()),
        }
    }
}

#[derive(Debug)]
pub struct Workspace {
    files: BTreeMap<String, TrackedFile>,
    next_document: u64,
    calculator: ChangeSizeCalculator,
    change_list_name: String,
    last_commit_message: Option<String>,
    commit_dialog_open: bool,
    last_commit_only_on_current_branch: bool,
    actions: Vec<IdeAction>,
    requests: VecDeque<WorkspaceRequest>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_calculator(ChangeSizeCalculator::new())
    }

    pub fn with_calculator(calculator: ChangeSizeCalculator) -> Self {
        Self {
            files: BTreeMap::new(),
            next_document: 0,
            calculator,
            change_list_name: DEFAULT_CHANGE_LIST_NAME.to_string(),
            last_commit_message: None,
            commit_dialog_open: false,
            last_commit_only_on_current_branch: false,
            actions: Vec::new(),
            requests: VecDeque::new(),
        }
    }

    pub fn edit(&mut self, path: &str, content: String, is_test: bool, binary: bool) {
        let file = self.file_mut(path);
        file.current = Some(content);
        file.is_test |= is_test;
        file.binary = binary;
        file.modification_count += 1;
        let document = file.document;
        self.calculator.invalidate(document);
    }

    /// Append `count` distinct generated lines.
    pub fn append_lines(&mut self, path: &str, count: usize, is_test: bool) {
        let file = self.file_mut(path);
        let mut content = file.current.take().unwrap_or_default();
        let first = content.lines().count() + 1;
        for n in first..first + count {
            content.push_str(&format!("{path}:{n}\n"));
        }
        file.current = Some(content);
        file.is_test |= is_test;
        file.modification_count += 1;
        let document = file.document;
        self.calculator.invalidate(document);
    }

    pub fn delete(&mut self, path: &str) {
        let Some(file) = self.files.get_mut(path) else {
            debug!(path, "Ignoring delete of unknown file");
            return;
        };
        if file.current.take().is_some() {
            file.modification_count += 1;
            let document = file.document;
            self.calculator.invalidate(document);
        }
    }

    pub fn content(&self, path: &str) -> Option<&str> {
        self.files.get(path).and_then(|f| f.current.as_deref())
    }

    pub fn has_changes(&self) -> bool {
        self.files.values().any(TrackedFile::is_changed)
    }

    pub fn changed_paths(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter(|(_, file)| file.is_changed())
            .map(|(path, _)| path.as_str())
            .collect()
    }

    /// Modification counters of the changed files.
    pub fn modifications(&self) -> ChangeListModifications {
        self.files
            .iter()
            .filter(|(_, file)| file.is_changed())
            .map(|(path, file)| (path.clone(), file.modification_count))
            .collect()
    }

    pub fn file_changes(&self) -> Vec<FileChange> {
        self.files
            .iter()
            .filter(|(_, file)| file.is_changed())
            .map(|(path, file)| FileChange {
                path: path.clone(),
                document: Some(file.document),
                before: TrackedFile::revision(&file.base, file.binary),
                after: TrackedFile::revision(&file.current, file.binary),
            })
            .collect()
    }

    pub fn recalculate_change_sizes(&mut self) {
        let changes = self.file_changes();
        self.calculator.calculate(&changes);
    }

    pub fn change_sizes(&self) -> ChangeSizesWithPath {
        self.calculator.current_change_sizes().clone()
    }

    /// Roll back the changed files selected by `filter`. Returns the number
    /// of reverted files.
    pub fn revert(&mut self, filter: RevertFilter<'_>) -> usize {
        let mut reverted = 0;
        for (path, file) in self.files.iter_mut() {
            if !file.is_changed() || !filter.should_revert(path, file.is_test) {
                continue;
            }
            file.current = file.base.clone();
            file.modification_count += 1;
            self.calculator.invalidate(file.document);
            reverted += 1;
        }
        if reverted > 0 {
            debug!(files = reverted, "Reverted changes");
            let all_changes = !self.has_changes();
            self.requests
                .push_back(WorkspaceRequest::RolledBack { all_changes });
        }
        reverted
    }

    pub fn change_list_name(&self) -> &str {
        &self.change_list_name
    }

    pub fn rename_change_list(&mut self, name: String) {
        self.change_list_name = name;
    }

    pub fn last_commit_message(&self) -> Option<&str> {
        self.last_commit_message.as_deref()
    }

    /// Message for a commit nobody typed a message for.
    pub fn commit_message(&self, source: CommitMessageSource) -> String {
        match source {
            CommitMessageSource::LastCommit => {
                self.last_commit_message.clone().unwrap_or_default()
            }
            CommitMessageSource::ChangeListName => self.change_list_name.clone(),
        }
    }

    /// Commit every changed file. Returns the number of committed files.
    pub fn commit(&mut self, kind: CommitKind, message: String) -> usize {
        let mut committed = 0;
        for file in self.files.values_mut().filter(|file| file.is_changed()) {
            file.base = file.current.clone();
            self.calculator.invalidate(file.document);
            committed += 1;
        }
        self.commit_dialog_open = false;
        if committed == 0 {
            self.record(IdeAction::NothingToCommit);
            return 0;
        }

        self.last_commit_only_on_current_branch = true;
        self.last_commit_message = Some(message.clone());
        self.record(IdeAction::Committed {
            files: committed,
            kind,
            message,
        });
        if kind == CommitKind::CommitAndPush {
            self.push();
        }
        committed
    }

    pub fn push(&mut self) {
        self.last_commit_only_on_current_branch = false;
        self.record(IdeAction::Pushed);
    }

    pub fn last_commit_exists_only_on_current_branch(&self) -> bool {
        self.last_commit_only_on_current_branch
    }

    pub fn open_commit_dialog(&mut self) {
        self.commit_dialog_open = true;
    }

    pub fn close_commit_dialog(&mut self) {
        self.commit_dialog_open = false;
    }

    pub fn is_commit_dialog_open(&self) -> bool {
        self.commit_dialog_open
    }

    pub fn record(&mut self, action: IdeAction) {
        self.actions.push(action);
    }

    pub fn drain_actions(&mut self) -> Vec<IdeAction> {
        std::mem::take(&mut self.actions)
    }

    pub fn request(&mut self, request: WorkspaceRequest) {
        self.requests.push_back(request);
    }

    pub fn next_request(&mut self) -> Option<WorkspaceRequest> {
        self.requests.pop_front()
    }

    fn file_mut(&mut self, path: &str) -> &mut TrackedFile {
        let next_document = &mut self.next_document;
        self.files.entry(path.to_string()).or_insert_with(|| {
            let document = DocumentId(*next_document);
            *next_document += 1;
            TrackedFile {
                document,
                base: None,
                current: None,
                binary: false,
                is_test: false,
                modification_count: 0,
            }
        })
    }
}
