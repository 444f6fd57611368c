//! `check-config` and `print-default-config`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use limitedwip_common::{LimitedWipSettings, default_config_path};
use tracing::{debug, info};

/// Settings file to use: the explicit one, else the default location.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path()
            .context("Cannot determine the home directory, pass --config"),
    }
}

/// Load and validate settings. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<LimitedWipSettings> {
    let settings = LimitedWipSettings::load_or_default(path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    settings
        .validate()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    debug!(path = %path.display(), "Settings loaded");
    Ok(settings)
}

/// Resolve, load and validate in one go.
pub fn settings_for(explicit: Option<&Path>) -> Result<LimitedWipSettings> {
    load_settings(&resolve_config_path(explicit)?)
}

/// Human readable overview of what is enabled.
pub fn summary(settings: &LimitedWipSettings) -> String {
    let mut out = String::new();
    let on_off = |enabled: bool| if enabled { "enabled" } else { "disabled" };

    let _ = writeln!(
        out,
        "Auto-revert: {}, reverts after {}s",
        on_off(settings.auto_revert_enabled),
        settings.seconds_till_revert()
    );
    let notifications = match settings.notification_interval_in_minutes {
        Some(minutes) => format!("every {minutes} min"),
        None => "never".to_string(),
    };
    let _ = writeln!(
        out,
        "Watchdog: {}, max {} lines, notifications {}{}",
        on_off(settings.watchdog_enabled),
        settings.max_lines_in_change,
        notifications,
        if settings.no_commits_above_threshold {
            ", blocks commits above threshold"
        } else {
            ""
        }
    );
    if !settings.exclusions.trim().is_empty() {
        let _ = writeln!(out, "  excluded: {}", settings.exclusions);
    }
    let _ = writeln!(
        out,
        "TCR: {} ({:?}), on passed test: {:?}, message from {:?}",
        on_off(settings.tcr_enabled),
        settings.tcr_variant,
        settings.tcr_action_on_passed_test,
        settings.commit_message_source
    );
    if settings.do_not_revert_tests || !settings.do_not_revert_files.trim().is_empty() {
        let _ = writeln!(
            out,
            "  kept on revert: {}{}",
            if settings.do_not_revert_tests {
                "tests; "
            } else {
                ""
            },
            settings.do_not_revert_files
        );
    }
    out
}

/// Load and validate the settings file.
#[derive(Debug, Parser)]
pub struct CheckConfigCli {}

impl CheckConfigCli {
    pub fn run(self, config: Option<&Path>) -> Result<()> {
        let path = resolve_config_path(config)?;
        let settings = load_settings(&path)?;
        if path.exists() {
            println!("Config: {}", path.display());
        } else {
            println!("Config: {} (not found, using defaults)", path.display());
        }
        print!("{}", summary(&settings));
        Ok(())
    }
}

/// Print the default settings as TOML.
#[derive(Debug, Parser)]
pub struct PrintDefaultConfigCli {
    /// Write to the settings file instead of stdout
    #[arg(long)]
    pub write: bool,

    /// Overwrite an existing settings file
    #[arg(long, requires = "write")]
    pub force: bool,
}

impl PrintDefaultConfigCli {
    pub fn run(self, config: Option<&Path>) -> Result<()> {
        let settings = LimitedWipSettings::default();
        if !self.write {
            print!("{}", settings.to_toml_string()?);
            return Ok(());
        }

        let path = resolve_config_path(config)?;
        write_default_config(&path, self.force)?;
        println!("Wrote {}", path.display());
        Ok(())
    }
}

pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists, pass --force to overwrite", path.display());
    }
    LimitedWipSettings::default()
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Default settings written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use limitedwip_common::TcrAction;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("limitedwip.toml")).unwrap();
        assert_eq!(settings, LimitedWipSettings::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limitedwip.toml");
        std::fs::write(&path, "max_lines_in_change = 5000\n").unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid settings in"));
    }

    #[test]
    fn test_write_default_config_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("limitedwip.toml");

        write_default_config(&path, false).unwrap();
        assert_eq!(load_settings(&path).unwrap(), LimitedWipSettings::default());
        assert!(write_default_config(&path, false).is_err());
        assert!(write_default_config(&path, true).is_ok());
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let path = resolve_config_path(Some(Path::new("custom.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_summary() {
        let settings = LimitedWipSettings {
            tcr_enabled: true,
            tcr_action_on_passed_test: TcrAction::AmendCommit,
            do_not_revert_tests: true,
            notification_interval_in_minutes: Some(5),
            ..Default::default()
        };
        assert_eq!(
            summary(&settings),
            "Auto-revert: disabled, reverts after 120s\n\
             Watchdog: enabled, max 80 lines, notifications every 5 min\n\
             TCR: enabled (Tcr), on passed test: AmendCommit, message from LastCommit\n  \
             kept on revert: tests; \n"
        );
    }
}
