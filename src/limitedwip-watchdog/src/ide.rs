use crate::change_size::{ChangeSize, ChangeSizesWithPath};
use crate::settings::WatchdogSettings;

/// The editor side of the watchdog.
pub trait WatchdogIde {
    /// Ask for the change size to be recalculated. The result may only be
    /// visible through [`WatchdogIde::current_change_list_size_in_lines`]
    /// on a later tick.
    fn calculate_current_change_list_size_in_lines(&mut self);

    /// Latest known per-file change sizes.
    fn current_change_list_size_in_lines(&self) -> ChangeSizesWithPath;

    fn show_notification_that_change_size_is_too_big(&mut self, size: ChangeSize, max_lines: u32);

    /// Called on every tick the size is within the limit, and after a
    /// commit. Used to dismiss the "too big" notification.
    fn on_change_size_within_limit(&mut self);

    /// Toolbar update.
    fn show_current_change_list_size(&mut self, size: ChangeSize, max_lines: u32);

    fn show_notifications_skipped_until_commit(&mut self, skipped: bool);

    /// Commit was refused; the notification offers a force-commit link.
    fn notify_that_commit_was_cancelled(&mut self);

    fn commit_without_dialog(&mut self);

    fn on_settings_update(&mut self, settings: &WatchdogSettings);
}
