use limitedwip_common::{LimitedWipSettings, PathMatchers, TcrAction};

/// Settings snapshot used by [`crate::Tcr`] and [`crate::Limbo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcrSettings {
    pub enabled: bool,
    pub notify_on_revert: bool,
    pub action_on_passed_test: TcrAction,
    /// Keep changes in test sources when reverting.
    pub do_not_revert_tests: bool,
    /// Keep changes in matching files when reverting.
    pub do_not_revert_files: PathMatchers,
}

impl TcrSettings {
    pub fn new(enabled: bool, action_on_passed_test: TcrAction) -> Self {
        Self {
            enabled,
            notify_on_revert: true,
            action_on_passed_test,
            do_not_revert_tests: false,
            do_not_revert_files: PathMatchers::empty(),
        }
    }

    pub fn disabled(&self) -> bool {
        !self.enabled
    }

    pub fn with_notify_on_revert(mut self, notify: bool) -> Self {
        self.notify_on_revert = notify;
        self
    }

    pub fn with_do_not_revert(mut self, tests: bool, files: PathMatchers) -> Self {
        self.do_not_revert_tests = tests;
        self.do_not_revert_files = files;
        self
    }
}

impl TryFrom<&LimitedWipSettings> for TcrSettings {
    type Error = limitedwip_common::CommonError;

    fn try_from(settings: &LimitedWipSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            enabled: settings.tcr_enabled,
            notify_on_revert: settings.notify_on_tcr_revert,
            action_on_passed_test: settings.tcr_action_on_passed_test,
            do_not_revert_tests: settings.do_not_revert_tests,
            do_not_revert_files: settings.do_not_revert_matchers()?,
        })
    }
}
