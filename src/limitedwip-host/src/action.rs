//! What the engines asked the editor to do.

use limitedwip_watchdog::ChangeSize;
use serde::{Deserialize, Serialize};

/// Engine on whose behalf an action happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    AutoRevert,
    Watchdog,
    Tcr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitKind {
    Commit,
    Amend,
    CommitAndPush,
}

/// A UI notification or VCS action, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum IdeAction {
    SettingsApplied { feature: Feature },
    SettingsRejected { reason: String },

    TimeTillRevert { seconds: i64 },
    AutoRevertPaused,
    AutoRevertStopped,

    ChangesReverted { feature: Feature, files: usize },
    RevertNotification { feature: Feature },

    ChangeSize { size: ChangeSize, max_lines: u32 },
    ChangeSizeTooBig { size: ChangeSize, max_lines: u32 },
    ChangeSizeNotificationDismissed,
    NotificationsSkippedUntilCommit { skipped: bool },

    CommitDialogOpened { feature: Feature },
    CommitRequested { feature: Feature, kind: CommitKind },
    CommitCancelled { feature: Feature },
    CommitBlocked,
    Committed {
        files: usize,
        kind: CommitKind,
        message: String,
    },
    NothingToCommit,
    Pushed,
}

impl IdeAction {
    /// Toolbar refreshes, emitted on every tick.
    pub fn is_toolbar_update(&self) -> bool {
        matches!(
            self,
            IdeAction::TimeTillRevert { .. } | IdeAction::ChangeSize { .. }
        )
    }
}
