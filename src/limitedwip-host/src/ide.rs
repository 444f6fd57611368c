//! Collaborator adapters backed by the shared [`Workspace`].

use std::cell::RefCell;
use std::rc::Rc;

use limitedwip_autorevert::{AutoRevertIde, AutoRevertSettings};
use limitedwip_common::{PathMatchers, RevertFilter};
use limitedwip_tcr::{TcrIde, TcrSettings};
use limitedwip_watchdog::{ChangeSize, ChangeSizesWithPath, WatchdogIde, WatchdogSettings};
use tracing::debug;

use crate::action::{CommitKind, Feature, IdeAction};
use crate::workspace::{Workspace, WorkspaceRequest};

/// Implements every collaborator trait on top of one [`Workspace`].
///
/// Each engine gets its own instance so recorded actions carry the
/// [`Feature`] they were made for. Commits are not performed inline: they
/// are queued on the workspace and run by the session once the engine call
/// has returned, since a commit notifies the engines again.
#[derive(Debug)]
pub struct WorkspaceIde {
    workspace: Rc<RefCell<Workspace>>,
    feature: Feature,
    toolbar_visible: bool,
    too_big_shown: bool,
}

impl WorkspaceIde {
    pub fn new(workspace: Rc<RefCell<Workspace>>, feature: Feature) -> Self {
        Self {
            workspace,
            feature,
            toolbar_visible: true,
            too_big_shown: false,
        }
    }

    pub fn feature(&self) -> Feature {
        self.feature
    }

    fn record(&self, action: IdeAction) {
        self.workspace.borrow_mut().record(action);
    }

    fn request_commit(&self, kind: CommitKind) {
        let mut workspace = self.workspace.borrow_mut();
        workspace.record(IdeAction::CommitRequested {
            feature: self.feature,
            kind,
        });
        workspace.request(WorkspaceRequest::Commit {
            feature: self.feature,
            kind,
        });
    }

    fn revert(&self, filter: RevertFilter<'_>) -> usize {
        let mut workspace = self.workspace.borrow_mut();
        let files = workspace.revert(filter);
        if files > 0 {
            workspace.record(IdeAction::ChangesReverted {
                feature: self.feature,
                files,
            });
        }
        files
    }

    fn commit_cancelled(&self) {
        self.record(IdeAction::CommitCancelled {
            feature: self.feature,
        });
    }

    fn changes_reverted_notification(&self) {
        self.record(IdeAction::RevertNotification {
            feature: self.feature,
        });
    }

    fn settings_applied(&mut self, toolbar_visible: bool) {
        self.toolbar_visible = toolbar_visible;
        self.record(IdeAction::SettingsApplied {
            feature: self.feature,
        });
    }
}

impl AutoRevertIde for WorkspaceIde {
    fn revert_current_change_list(&mut self) -> usize {
        self.revert(RevertFilter::all())
    }

    fn is_commit_dialog_open(&self) -> bool {
        self.workspace.borrow().is_commit_dialog_open()
    }

    fn show_time_till_revert(&mut self, seconds: i64) {
        if self.toolbar_visible {
            self.record(IdeAction::TimeTillRevert { seconds });
        }
    }

    fn show_auto_revert_paused(&mut self) {
        self.record(IdeAction::AutoRevertPaused);
    }

    fn show_auto_revert_stopped(&mut self) {
        self.record(IdeAction::AutoRevertStopped);
    }

    fn notify_that_changes_were_reverted(&mut self) {
        self.changes_reverted_notification();
    }

    fn on_settings_update(&mut self, settings: &AutoRevertSettings) {
        self.settings_applied(settings.show_timer_in_toolbar);
    }
}

impl WatchdogIde for WorkspaceIde {
    fn calculate_current_change_list_size_in_lines(&mut self) {
        self.workspace.borrow_mut().recalculate_change_sizes();
    }

    fn current_change_list_size_in_lines(&self) -> ChangeSizesWithPath {
        self.workspace.borrow().change_sizes()
    }

    fn show_notification_that_change_size_is_too_big(&mut self, size: ChangeSize, max_lines: u32) {
        self.too_big_shown = true;
        self.record(IdeAction::ChangeSizeTooBig { size, max_lines });
    }

    fn on_change_size_within_limit(&mut self) {
        if self.too_big_shown {
            self.too_big_shown = false;
            self.record(IdeAction::ChangeSizeNotificationDismissed);
        }
    }

    fn show_current_change_list_size(&mut self, size: ChangeSize, max_lines: u32) {
        if self.toolbar_visible {
            self.record(IdeAction::ChangeSize { size, max_lines });
        }
    }

    fn show_notifications_skipped_until_commit(&mut self, skipped: bool) {
        self.record(IdeAction::NotificationsSkippedUntilCommit { skipped });
    }

    fn notify_that_commit_was_cancelled(&mut self) {
        self.commit_cancelled();
    }

    fn commit_without_dialog(&mut self) {
        self.request_commit(CommitKind::Commit);
    }

    fn on_settings_update(&mut self, settings: &WatchdogSettings) {
        self.settings_applied(settings.show_remaining_changes_in_toolbar);
    }
}

impl TcrIde for WorkspaceIde {
    fn on_settings_update(&mut self, _settings: &TcrSettings) {
        self.record(IdeAction::SettingsApplied {
            feature: self.feature,
        });
    }

    fn open_commit_dialog(&mut self) {
        let mut workspace = self.workspace.borrow_mut();
        workspace.open_commit_dialog();
        workspace.record(IdeAction::CommitDialogOpened {
            feature: self.feature,
        });
    }

    fn commit_without_dialog(&mut self) {
        self.request_commit(CommitKind::Commit);
    }

    fn amend_commit_without_dialog(&mut self) {
        self.request_commit(CommitKind::Amend);
    }

    fn commit_without_dialog_and_push(&mut self) {
        self.request_commit(CommitKind::CommitAndPush);
    }

    fn revert_current_change_list(
        &mut self,
        do_not_revert_tests: bool,
        do_not_revert_files: &PathMatchers,
    ) -> usize {
        let filter = RevertFilter::new(do_not_revert_tests, do_not_revert_files);
        if !filter.reverts_everything() {
            debug!(
                do_not_revert_tests,
                do_not_revert_files = %do_not_revert_files,
                "Reverting with filter"
            );
        }
        self.revert(filter)
    }

    fn last_commit_exists_only_on_current_branch(&self) -> bool {
        self.workspace
            .borrow()
            .last_commit_exists_only_on_current_branch()
    }

    fn notify_that_changes_were_reverted(&mut self) {
        self.changes_reverted_notification();
    }

    fn notify_that_commit_was_cancelled(&mut self) {
        self.commit_cancelled();
    }
}
