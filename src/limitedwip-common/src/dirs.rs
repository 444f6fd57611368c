//! Settings file location.
//!
//! `~/.limitedwip/limitedwip.toml` by default, or
//! `$LIMITEDWIP_HOME/limitedwip.toml` when the variable is set.

use std::path::PathBuf;

/// Environment variable overriding the home directory.
pub const HOME_ENV_VAR: &str = "LIMITEDWIP_HOME";

/// Home directory name under the user's home.
pub const HOME_DIR_NAME: &str = ".limitedwip";

pub const CONFIG_FILE_NAME: &str = "limitedwip.toml";

/// Directory holding the settings file.
pub fn limitedwip_home() -> Option<PathBuf> {
    match std::env::var_os(HOME_ENV_VAR) {
        Some(home) if !home.is_empty() => {
            let home = PathBuf::from(home);
            if home.is_relative() {
                let cwd = std::env::current_dir().ok()?;
                Some(cwd.join(home))
            } else {
                Some(home)
            }
        }
        _ => dirs::home_dir().map(|home| home.join(HOME_DIR_NAME)),
    }
}

/// Default path of the settings file.
pub fn default_config_path() -> Option<PathBuf> {
    limitedwip_home().map(|home| home.join(CONFIG_FILE_NAME))
}
