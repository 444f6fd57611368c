use limitedwip_common::{LimitedWipSettings, PathMatchers};

/// Settings snapshot used by [`crate::Watchdog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchdogSettings {
    pub enabled: bool,
    pub max_lines_in_change: u32,
    /// Minimum seconds between "too big" notifications, `None` for never.
    pub notification_interval_in_seconds: Option<u32>,
    pub show_remaining_changes_in_toolbar: bool,
    /// Refuse commits while the change size is above the threshold.
    pub no_commits_above_threshold: bool,
    /// Paths left out of the change size.
    pub exclusions: PathMatchers,
}

impl WatchdogSettings {
    pub fn new(
        enabled: bool,
        max_lines_in_change: u32,
        notification_interval_in_seconds: Option<u32>,
    ) -> Self {
        Self {
            enabled,
            max_lines_in_change,
            notification_interval_in_seconds,
            show_remaining_changes_in_toolbar: true,
            no_commits_above_threshold: false,
            exclusions: PathMatchers::empty(),
        }
    }

    pub fn with_no_commits_above_threshold(mut self, value: bool) -> Self {
        self.no_commits_above_threshold = value;
        self
    }

    pub fn with_exclusions(mut self, exclusions: PathMatchers) -> Self {
        self.exclusions = exclusions;
        self
    }
}

impl TryFrom<&LimitedWipSettings> for WatchdogSettings {
    type Error = limitedwip_common::CommonError;

    fn try_from(settings: &LimitedWipSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            enabled: settings.watchdog_enabled,
            max_lines_in_change: settings.max_lines_in_change,
            notification_interval_in_seconds: settings.notification_interval_in_seconds(),
            show_remaining_changes_in_toolbar: settings.show_remaining_changes_in_toolbar,
            no_commits_above_threshold: settings.no_commits_above_threshold,
            exclusions: settings.exclusion_matchers()?,
        })
    }
}
