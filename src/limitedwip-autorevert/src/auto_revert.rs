//! Auto-revert state machine.

use tracing::debug;

use crate::ide::AutoRevertIde;
use crate::settings::AutoRevertSettings;

/// Reverts the current change list when a countdown runs out.
///
/// The countdown starts on the first tick that sees uncommitted changes and
/// stops when the change list becomes empty, is committed or rolled back.
/// A new countdown length only applies from the next start.
pub struct AutoRevert<I: AutoRevertIde> {
    ide: I,
    settings: AutoRevertSettings,
    /// Countdown length of the current cycle.
    seconds_till_revert: u32,
    /// Countdown length waiting for the next start.
    pending_seconds_till_revert: Option<u32>,
    started: bool,
    paused: bool,
    skipped_revert: bool,
    remaining_seconds: i64,
}

impl<I: AutoRevertIde> AutoRevert<I> {
    pub fn new(mut ide: I, settings: AutoRevertSettings) -> Self {
        ide.on_settings_update(&settings);
        Self {
            ide,
            seconds_till_revert: settings.seconds_till_revert,
            pending_seconds_till_revert: None,
            settings,
            started: false,
            paused: false,
            skipped_revert: false,
            remaining_seconds: 0,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn remaining_seconds(&self) -> i64 {
        self.remaining_seconds
    }

    pub fn settings(&self) -> &AutoRevertSettings {
        &self.settings
    }

    pub fn ide(&self) -> &I {
        &self.ide
    }

    pub fn ide_mut(&mut self) -> &mut I {
        &mut self.ide
    }

    /// Advance the countdown by one second.
    pub fn on_timer(&mut self, has_changes: bool) {
        if !self.settings.enabled {
            return;
        }
        if self.skipped_revert {
            if self.revert() {
                return;
            }
            if self.remaining_seconds < 0 {
                return;
            }
        }

        if self.started && !has_changes {
            self.stop();
        } else if !self.started && has_changes {
            self.start();
        }
        if !self.started {
            return;
        }

        if !self.paused {
            self.remaining_seconds -= 1;
            self.ide.show_time_till_revert(self.remaining_seconds + 1);
        }
        if self.remaining_seconds < 0 {
            self.revert();
        }
    }

    /// Toggle the pause state of a running countdown.
    pub fn on_pause(&mut self) {
        if !self.started {
            return;
        }
        self.paused = !self.paused;
        debug!(paused = self.paused, "Auto-revert pause toggled");
        if self.paused {
            self.ide.show_auto_revert_paused();
        } else {
            self.ide.show_time_till_revert(self.remaining_seconds + 1);
        }
    }

    pub fn on_all_changes_committed(&mut self) {
        if self.started {
            self.stop();
        }
    }

    pub fn on_all_changes_rolled_back(&mut self) {
        if self.started {
            self.stop();
        }
    }

    pub fn on_settings_update(&mut self, settings: AutoRevertSettings) {
        self.ide.on_settings_update(&settings);
        self.pending_seconds_till_revert = Some(settings.seconds_till_revert);
        self.settings = settings;
        if self.started && !self.settings.enabled {
            self.stop();
        }
    }

    fn start(&mut self) {
        if let Some(seconds) = self.pending_seconds_till_revert.take() {
            self.seconds_till_revert = seconds;
        }
        self.started = true;
        self.remaining_seconds = i64::from(self.seconds_till_revert);
        debug!(seconds = self.seconds_till_revert, "Auto-revert started");
    }

    fn stop(&mut self) {
        self.started = false;
        self.paused = false;
        self.skipped_revert = false;
        debug!("Auto-revert stopped");
        self.ide.show_auto_revert_stopped();
    }

    /// Returns false if the revert was postponed because the commit dialog
    /// is open.
    fn revert(&mut self) -> bool {
        if self.ide.is_commit_dialog_open() {
            if !self.skipped_revert {
                debug!("Commit dialog is open, postponing auto-revert");
            }
            self.skipped_revert = true;
            return false;
        }

        let reverted = self.ide.revert_current_change_list();
        debug!(files = reverted, "Auto-revert rolled back changes");
        if reverted > 0 && self.settings.notify_on_revert {
            self.ide.notify_that_changes_were_reverted();
        }
        self.skipped_revert = false;
        self.stop();
        true
    }
}
