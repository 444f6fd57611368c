use crate::settings::AutoRevertSettings;

/// The editor side of auto-revert: UI updates and the VCS rollback.
///
/// Implementations must not call back into the engine.
pub trait AutoRevertIde {
    /// Roll back every change in the current change list and return the
    /// number of reverted files. Failures are reported as 0.
    fn revert_current_change_list(&mut self) -> usize;

    /// Whether the commit dialog is showing. A revert is postponed while
    /// it is.
    fn is_commit_dialog_open(&self) -> bool;

    fn show_time_till_revert(&mut self, seconds: i64);

    fn show_auto_revert_paused(&mut self);

    fn show_auto_revert_stopped(&mut self);

    fn notify_that_changes_were_reverted(&mut self);

    fn on_settings_update(&mut self, settings: &AutoRevertSettings);
}
