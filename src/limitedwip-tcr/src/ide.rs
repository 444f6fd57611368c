use limitedwip_common::PathMatchers;

use crate::settings::TcrSettings;

/// The editor side of TCR.
///
/// Commit actions are asynchronous. Their outcome reaches the engine later
/// as `on_successful_commit`.
pub trait TcrIde {
    /// Called on construction and on every settings change.
    fn on_settings_update(&mut self, settings: &TcrSettings);

    fn open_commit_dialog(&mut self);

    fn commit_without_dialog(&mut self);

    fn amend_commit_without_dialog(&mut self);

    fn commit_without_dialog_and_push(&mut self);

    /// Roll back the change list, keeping test sources and/or matching
    /// files if asked to. Returns the number of reverted files; failures
    /// are reported as 0.
    fn revert_current_change_list(
        &mut self,
        do_not_revert_tests: bool,
        do_not_revert_files: &PathMatchers,
    ) -> usize;

    /// True if the last commit is not reachable from any other branch.
    fn last_commit_exists_only_on_current_branch(&self) -> bool;

    fn notify_that_changes_were_reverted(&mut self);

    /// Commit was refused; the notification offers a force-commit link.
    fn notify_that_commit_was_cancelled(&mut self);
}
