//! Persisted user settings.
//!
//! [`LimitedWipSettings`] is the single user-facing snapshot stored on disk
//! as TOML. Each engine crate converts it into its own narrower settings
//! type; the helpers here do the shared unit and pattern conversions.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CommonError, Result};
use crate::path_matcher::PathMatchers;

/// Allowed range for `max_lines_in_change`.
pub const CHANGED_LINES_RANGE: RangeInclusive<u32> = 1..=999;

/// Allowed range for `time_till_revert`.
pub const TIME_TILL_REVERT_RANGE: RangeInclusive<u32> = 1..=999;

/// Unit of `time_till_revert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeUnit {
    Seconds,
    #[default]
    Minutes,
}

impl TimeUnit {
    /// Convert an amount in this unit to seconds.
    pub fn to_seconds(self, amount: u32) -> u32 {
        match self {
            TimeUnit::Seconds => amount,
            TimeUnit::Minutes => amount.saturating_mul(60),
        }
    }
}

/// What TCR does after a test run passes on an unchanged change list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TcrAction {
    OpenCommitDialog,
    #[default]
    Commit,
    AmendCommit,
    CommitAndPush,
}

/// Which commit gate runs when TCR is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TcrVariant {
    /// Tracks test names and can amend.
    #[default]
    Tcr,
    /// The earlier gate without test names; amend becomes a plain commit.
    Limbo,
}

/// Where automatic commits take their message from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CommitMessageSource {
    #[default]
    LastCommit,
    ChangeListName,
}

/// All settings of the limited WIP tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitedWipSettings {
    /// Whether the change size watchdog is enabled.
    pub watchdog_enabled: bool,
    /// Change size threshold in lines.
    pub max_lines_in_change: u32,
    /// Minutes between "change is too big" notifications. Unset means never.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_interval_in_minutes: Option<u32>,
    /// Refuse commits while the change size is above the threshold.
    pub no_commits_above_threshold: bool,
    /// Show the current change size in the toolbar.
    pub show_remaining_changes_in_toolbar: bool,
    /// `;`-separated patterns excluded from the change size.
    pub exclusions: String,

    /// Whether auto-revert is enabled.
    pub auto_revert_enabled: bool,
    /// Time until uncommitted changes are reverted, in `time_unit_till_revert`.
    pub time_till_revert: u32,
    pub time_unit_till_revert: TimeUnit,
    /// Show a notification after auto-revert rolled back changes.
    pub notify_on_revert: bool,
    /// Show the auto-revert countdown in the toolbar.
    pub show_timer_in_toolbar: bool,

    /// Whether test && commit || revert is enabled.
    pub tcr_enabled: bool,
    pub tcr_action_on_passed_test: TcrAction,
    pub tcr_variant: TcrVariant,
    pub commit_message_source: CommitMessageSource,
    /// Show a notification after a failed test run reverted changes.
    pub notify_on_tcr_revert: bool,
    /// Keep changes in test files when reverting.
    pub do_not_revert_tests: bool,
    /// `;`-separated patterns of files kept when reverting.
    pub do_not_revert_files: String,
}

impl Default for LimitedWipSettings {
    fn default() -> Self {
        Self {
            watchdog_enabled: true,
            max_lines_in_change: 80,
            notification_interval_in_minutes: None,
            no_commits_above_threshold: false,
            show_remaining_changes_in_toolbar: true,
            exclusions: String::new(),

            auto_revert_enabled: false,
            time_till_revert: 2,
            time_unit_till_revert: TimeUnit::Minutes,
            notify_on_revert: true,
            show_timer_in_toolbar: true,

            tcr_enabled: false,
            tcr_action_on_passed_test: TcrAction::Commit,
            tcr_variant: TcrVariant::Tcr,
            commit_message_source: CommitMessageSource::LastCommit,
            notify_on_tcr_revert: false,
            do_not_revert_tests: false,
            do_not_revert_files: String::new(),
        }
    }
}

impl LimitedWipSettings {
    /// Parse settings from TOML. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CommonError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Load settings from a TOML file, falling back to defaults when the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "Settings file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Write settings as TOML, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CommonError::io(parent, e))?;
        }
        std::fs::write(path, self.to_toml_string()?).map_err(|e| CommonError::io(path, e))
    }

    /// Check value ranges and compile all patterns.
    pub fn validate(&self) -> Result<()> {
        check_range(
            "max_lines_in_change",
            self.max_lines_in_change,
            CHANGED_LINES_RANGE,
        )?;
        check_range(
            "time_till_revert",
            self.time_till_revert,
            TIME_TILL_REVERT_RANGE,
        )?;
        if self.notification_interval_in_minutes == Some(0) {
            return Err(CommonError::invalid_setting(
                "notification_interval_in_minutes",
                0,
                "must be at least 1 minute, or unset to never notify",
            ));
        }
        self.exclusion_matchers()?;
        self.do_not_revert_matchers()?;
        Ok(())
    }

    pub fn seconds_till_revert(&self) -> u32 {
        self.time_unit_till_revert.to_seconds(self.time_till_revert)
    }

    /// Notification interval in seconds, `None` for never.
    pub fn notification_interval_in_seconds(&self) -> Option<u32> {
        self.notification_interval_in_minutes
            .map(|minutes| TimeUnit::Minutes.to_seconds(minutes))
    }

    pub fn exclusion_matchers(&self) -> Result<PathMatchers> {
        PathMatchers::parse(&self.exclusions)
    }

    pub fn do_not_revert_matchers(&self) -> Result<PathMatchers> {
        PathMatchers::parse(&self.do_not_revert_files)
    }
}

fn check_range(name: &'static str, value: u32, range: RangeInclusive<u32>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(CommonError::invalid_setting(
            name,
            value,
            format!("must be between {} and {}", range.start(), range.end()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = LimitedWipSettings::default();
        assert!(settings.watchdog_enabled);
        assert_eq!(settings.max_lines_in_change, 80);
        assert_eq!(settings.notification_interval_in_seconds(), None);
        assert!(!settings.auto_revert_enabled);
        assert_eq!(settings.seconds_till_revert(), 120);
        assert_eq!(settings.tcr_action_on_passed_test, TcrAction::Commit);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let settings = LimitedWipSettings::from_toml_str(
            r#"
            auto_revert_enabled = true
            time_till_revert = 30
            time_unit_till_revert = "Seconds"
            notification_interval_in_minutes = 5
            "#,
        )
        .unwrap();
        assert!(settings.auto_revert_enabled);
        assert_eq!(settings.seconds_till_revert(), 30);
        assert_eq!(settings.notification_interval_in_seconds(), Some(300));
        assert_eq!(settings.max_lines_in_change, 80);
        assert_eq!(settings.commit_message_source, CommitMessageSource::LastCommit);
        assert_eq!(settings.tcr_variant, TcrVariant::Tcr);
    }

    #[test]
    fn test_toml_round_trip_preserves_never() {
        let settings = LimitedWipSettings {
            tcr_enabled: true,
            tcr_action_on_passed_test: TcrAction::AmendCommit,
            tcr_variant: TcrVariant::Limbo,
            commit_message_source: CommitMessageSource::ChangeListName,
            exclusions: "*.approved".to_string(),
            ..Default::default()
        };
        let toml = settings.to_toml_string().unwrap();
        assert!(!toml.contains("notification_interval_in_minutes"));
        assert_eq!(LimitedWipSettings::from_toml_str(&toml).unwrap(), settings);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("limitedwip.toml");
        let settings = LimitedWipSettings {
            max_lines_in_change: 42,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(LimitedWipSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LimitedWipSettings::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(settings, LimitedWipSettings::default());
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let settings = LimitedWipSettings {
            max_lines_in_change: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(CommonError::InvalidSetting { name: "max_lines_in_change", .. })
        ));

        let settings = LimitedWipSettings {
            time_till_revert: 1000,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(CommonError::InvalidSetting { name: "time_till_revert", .. })
        ));

        let settings = LimitedWipSettings {
            notification_interval_in_minutes: Some(0),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_malformed_patterns() {
        let settings = LimitedWipSettings {
            do_not_revert_files: "*.txt;foo(".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(CommonError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_minutes_conversion_saturates() {
        assert_eq!(TimeUnit::Minutes.to_seconds(2), 120);
        assert_eq!(TimeUnit::Seconds.to_seconds(2), 2);
        assert_eq!(TimeUnit::Minutes.to_seconds(u32::MAX), u32::MAX);
    }
}
