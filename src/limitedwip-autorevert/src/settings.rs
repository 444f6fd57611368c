use limitedwip_common::LimitedWipSettings;

/// Settings snapshot used by [`crate::AutoRevert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoRevertSettings {
    pub enabled: bool,
    /// Countdown length. Applied on the next start, not to a running countdown.
    pub seconds_till_revert: u32,
    pub notify_on_revert: bool,
    pub show_timer_in_toolbar: bool,
}

impl AutoRevertSettings {
    pub fn new(enabled: bool, seconds_till_revert: u32) -> Self {
        Self {
            enabled,
            seconds_till_revert,
            notify_on_revert: true,
            show_timer_in_toolbar: true,
        }
    }

    pub fn with_notify_on_revert(mut self, notify: bool) -> Self {
        self.notify_on_revert = notify;
        self
    }

    pub fn with_show_timer_in_toolbar(mut self, show: bool) -> Self {
        self.show_timer_in_toolbar = show;
        self
    }
}

impl From<&LimitedWipSettings> for AutoRevertSettings {
    fn from(settings: &LimitedWipSettings) -> Self {
        Self {
            enabled: settings.auto_revert_enabled,
            seconds_till_revert: settings.seconds_till_revert(),
            notify_on_revert: settings.notify_on_revert,
            show_timer_in_toolbar: settings.show_timer_in_toolbar,
        }
    }
}
