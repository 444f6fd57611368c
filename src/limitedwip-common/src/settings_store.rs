//! Current settings plus change notification.

use tracing::debug;

use crate::error::Result;
use crate::event_bus::{EventBus, Subscription};
use crate::settings::LimitedWipSettings;

/// Owns the active [`LimitedWipSettings`] and notifies listeners with the
/// full snapshot whenever it changes.
pub struct SettingsStore {
    current: LimitedWipSettings,
    listeners: EventBus<LimitedWipSettings>,
}

impl SettingsStore {
    pub fn new(settings: LimitedWipSettings) -> Self {
        Self {
            current: settings,
            listeners: EventBus::new(),
        }
    }

    pub fn current(&self) -> &LimitedWipSettings {
        &self.current
    }

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, listener: impl Fn(&LimitedWipSettings) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }

    /// Validate and apply new settings. Invalid settings leave the current
    /// snapshot untouched and notify nobody.
    pub fn update(&mut self, settings: LimitedWipSettings) -> Result<()> {
        settings.validate()?;
        debug!(?settings, "Settings updated");
        self.current = settings;
        self.listeners.publish(&self.current);
        Ok(())
    }
}
