//! Recording collaborator for engine tests.

use limitedwip_common::PathMatchers;

use crate::ide::TcrIde;
use crate::settings::TcrSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    OpenCommitDialog,
    Commit,
    Amend,
    CommitAndPush,
    Revert { tests: bool, files: String },
    NotifyReverted,
    CommitCancelled,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingIde {
    pub(crate) calls: Vec<Call>,
    pub(crate) files_to_revert: usize,
    pub(crate) last_commit_only_on_current_branch: bool,
    /// Every settings snapshot the engine announced, oldest first.
    pub(crate) settings_updates: Vec<TcrSettings>,
}

impl RecordingIde {
    pub(crate) fn reverting(files_to_revert: usize) -> Self {
        Self {
            files_to_revert,
            ..Default::default()
        }
    }

    pub(crate) fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl TcrIde for RecordingIde {
    fn on_settings_update(&mut self, settings: &TcrSettings) {
        self.settings_updates.push(settings.clone());
    }

    fn open_commit_dialog(&mut self) {
        self.calls.push(Call::OpenCommitDialog);
    }

    fn commit_without_dialog(&mut self) {
        self.calls.push(Call::Commit);
    }

    fn amend_commit_without_dialog(&mut self) {
        self.calls.push(Call::Amend);
    }

    fn commit_without_dialog_and_push(&mut self) {
        self.calls.push(Call::CommitAndPush);
    }

    fn revert_current_change_list(
        &mut self,
        do_not_revert_tests: bool,
        do_not_revert_files: &PathMatchers,
    ) -> usize {
        self.calls.push(Call::Revert {
            tests: do_not_revert_tests,
            files: do_not_revert_files.to_string(),
        });
        self.files_to_revert
    }

    fn last_commit_exists_only_on_current_branch(&self) -> bool {
        self.last_commit_only_on_current_branch
    }

    fn notify_that_changes_were_reverted(&mut self) {
        self.calls.push(Call::NotifyReverted);
    }

    fn notify_that_commit_was_cancelled(&mut self) {
        self.calls.push(Call::CommitCancelled);
    }
}
