//! Events delivered to a [`crate::Session`].
//!
//! Events arrive as JSON lines tagged by `"event"`, for example
//! `{"event":"edit","path":"src/lib.rs","content":"fn main() {}\n"}`.

use limitedwip_common::LimitedWipSettings;
use serde::{Deserialize, Serialize};

use crate::action::Feature;
use crate::error::{HostError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// One more second elapsed.
    Tick { seconds: u64 },
    /// Replace the content of a file, creating it if needed.
    Edit {
        path: String,
        content: String,
        #[serde(default)]
        test: bool,
        #[serde(default)]
        binary: bool,
    },
    /// Append generated lines to a file, creating it if needed.
    AppendLines {
        path: String,
        count: usize,
        #[serde(default)]
        test: bool,
    },
    Delete { path: String },
    /// The user commits through the commit dialog. Without a message the
    /// configured commit message source provides one.
    Commit {
        #[serde(default)]
        message: Option<String>,
    },
    RenameChangeList { name: String },
    /// The last commit was pushed.
    Push,
    /// The user rolls back the whole change list.
    Rollback,
    OpenCommitDialog,
    CloseCommitDialog,
    TestPassed {
        #[serde(default)]
        name: Option<String>,
    },
    TestFailed {
        #[serde(default)]
        name: Option<String>,
    },
    /// Toggle the auto-revert pause.
    Pause,
    /// The force-commit link of a "commit cancelled" notification.
    ForceCommit { feature: Feature },
    SkipWatchdogNotifications,
    Settings { settings: LimitedWipSettings },
}

impl HostEvent {
    /// Parse one line of an event stream. Blank lines and `#` comments
    /// yield `None`. `line_number` is only used for error reporting.
    pub fn parse_line(line: &str, line_number: usize) -> Result<Option<HostEvent>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        serde_json::from_str(line)
            .map(Some)
            .map_err(|source| HostError::InvalidEvent {
                line: line_number,
                source,
            })
    }
}
