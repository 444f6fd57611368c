//! Commit gate shared by [`crate::Tcr`] and [`crate::Limbo`].

use tracing::debug;

use crate::ide::TcrIde;
use crate::modifications::ChangeListModifications;
use crate::settings::TcrSettings;

#[derive(Debug, Default)]
pub(crate) struct CommitGate {
    allowed_to_commit: bool,
    allow_one_commit_without_checks: bool,
    tested_modifications: Option<ChangeListModifications>,
}

impl CommitGate {
    pub(crate) fn on_test_passed(&mut self, modifications: ChangeListModifications) {
        self.allowed_to_commit = true;
        self.tested_modifications = Some(modifications);
    }

    /// Revert the change list and close the gate.
    pub(crate) fn on_test_failed<I: TcrIde>(&mut self, ide: &mut I, settings: &TcrSettings) {
        let reverted = ide.revert_current_change_list(
            settings.do_not_revert_tests,
            &settings.do_not_revert_files,
        );
        debug!(files = reverted, "Test failed, change list reverted");
        if reverted > 0 && settings.notify_on_revert {
            ide.notify_that_changes_were_reverted();
        }
        self.allowed_to_commit = false;
    }

    pub(crate) fn allow_one_commit_without_checks(&mut self) {
        self.allow_one_commit_without_checks = true;
    }

    pub(crate) fn is_commit_allowed<I: TcrIde>(
        &mut self,
        ide: &mut I,
        settings: &TcrSettings,
        modifications: &ChangeListModifications,
    ) -> bool {
        if self.allow_one_commit_without_checks || settings.disabled() {
            return true;
        }
        if self.tested_modifications.as_ref() != Some(modifications) {
            self.allowed_to_commit = false;
        }
        if !self.allowed_to_commit {
            debug!("Commit blocked, change list was not tested");
            ide.notify_that_commit_was_cancelled();
        }
        self.allowed_to_commit
    }

    pub(crate) fn on_successful_commit(&mut self) {
        self.allowed_to_commit = false;
        self.allow_one_commit_without_checks = false;
    }
}
