//! Change size watchdog state machine.

use tracing::debug;

use crate::change_size::{ChangeSize, ChangeSizesWithPath};
use crate::ide::WatchdogIde;
use crate::settings::WatchdogSettings;

/// Warns when the current change list is above the size threshold.
pub struct Watchdog<I: WatchdogIde> {
    ide: I,
    settings: WatchdogSettings,
    /// Tick of the last "too big" notification, `None` until the first one
    /// or after a settings update.
    last_notification_time: Option<u64>,
    skip_notifications_until_commit: bool,
    allow_one_commit_without_checks: bool,
}

impl<I: WatchdogIde> Watchdog<I> {
    pub fn new(mut ide: I, settings: WatchdogSettings) -> Self {
        ide.on_settings_update(&settings);
        Self {
            ide,
            settings,
            last_notification_time: None,
            skip_notifications_until_commit: false,
            allow_one_commit_without_checks: false,
        }
    }

    pub fn settings(&self) -> &WatchdogSettings {
        &self.settings
    }

    pub fn is_skipping_notifications(&self) -> bool {
        self.skip_notifications_until_commit
    }

    pub fn ide(&self) -> &I {
        &self.ide
    }

    pub fn ide_mut(&mut self) -> &mut I {
        &mut self.ide
    }

    pub fn on_timer(&mut self, seconds: u64) {
        if !self.settings.enabled {
            return;
        }

        self.ide.calculate_current_change_list_size_in_lines();
        let size = self.current_size();
        let max_lines = self.settings.max_lines_in_change;
        let exceeded_threshold = size.exceeds(max_lines);

        if exceeded_threshold
            && self.is_time_to_notify(seconds)
            && !self.skip_notifications_until_commit
        {
            debug!(size = %size, max_lines, "Change size is above threshold");
            self.ide
                .show_notification_that_change_size_is_too_big(size, max_lines);
            self.last_notification_time = Some(seconds);
        }
        if !exceeded_threshold {
            self.ide.on_change_size_within_limit();
        }

        self.ide.show_current_change_list_size(size, max_lines);
    }

    pub fn on_settings_update(&mut self, settings: WatchdogSettings) {
        self.ide.on_settings_update(&settings);
        self.last_notification_time = None;
        let threshold_changed = settings.max_lines_in_change != self.settings.max_lines_in_change;
        self.settings = settings;
        if threshold_changed {
            let size = self.current_size();
            self.ide
                .show_current_change_list_size(size, self.settings.max_lines_in_change);
        }
    }

    pub fn on_commit(&mut self) {
        self.ide.on_change_size_within_limit();
        self.allow_one_commit_without_checks = false;
        if self.skip_notifications_until_commit {
            self.skip_notifications_until_commit(false);
        }
    }

    pub fn skip_notifications_until_commit(&mut self, value: bool) {
        self.skip_notifications_until_commit = value;
        debug!(skip = value, "Watchdog notifications skipped until commit");
        self.ide.show_notifications_skipped_until_commit(value);
    }

    pub fn toggle_skip_notifications_until_commit(&mut self) {
        self.skip_notifications_until_commit(!self.skip_notifications_until_commit);
    }

    /// Whether a commit of the given change list may go ahead.
    pub fn is_commit_allowed(&mut self, sizes: &ChangeSizesWithPath) -> bool {
        if self.allow_one_commit_without_checks
            || !self.settings.enabled
            || !self.settings.no_commits_above_threshold
        {
            return true;
        }
        let size = sizes.total_excluding(&self.settings.exclusions);
        if size.exceeds(self.settings.max_lines_in_change) {
            debug!(size = %size, "Commit blocked by change size threshold");
            self.ide.notify_that_commit_was_cancelled();
            return false;
        }
        true
    }

    /// Let the next commit through regardless of size and start it.
    pub fn on_force_commit(&mut self) {
        self.allow_one_commit_without_checks = true;
        self.ide.commit_without_dialog();
    }

    fn current_size(&self) -> ChangeSize {
        self.ide
            .current_change_list_size_in_lines()
            .total_excluding(&self.settings.exclusions)
    }

    fn is_time_to_notify(&self, seconds: u64) -> bool {
        let Some(interval) = self.settings.notification_interval_in_seconds else {
            return false;
        };
        match self.last_notification_time {
            None => true,
            Some(last) => seconds.saturating_sub(last) >= u64::from(interval),
        }
    }
}
