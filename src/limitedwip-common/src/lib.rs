//! Common types shared across the limited WIP crates.
//!
//! The policy engines (auto-revert, watchdog, TCR) only depend on this
//! crate. It holds the wildcard [`PathMatcher`], the persisted
//! [`LimitedWipSettings`] and the small typed [`EventBus`] used to fan out
//! settings changes and VCS notifications.

pub mod dirs;
pub mod error;
pub mod event_bus;
pub mod path_matcher;
pub mod revert_filter;
pub mod settings;
pub mod settings_store;

pub use dirs::{CONFIG_FILE_NAME, HOME_ENV_VAR, default_config_path, limitedwip_home};
pub use error::{CommonError, Result};
pub use event_bus::{EventBus, Subscription};
pub use path_matcher::{PathMatcher, PathMatchers};
pub use revert_filter::RevertFilter;
pub use settings::{CommitMessageSource, LimitedWipSettings, TcrAction, TcrVariant, TimeUnit};
pub use settings_store::SettingsStore;
