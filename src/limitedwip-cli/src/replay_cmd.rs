//! `replay`: run a recorded event stream through a session.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use limitedwip_common::LimitedWipSettings;
use limitedwip_host::{IdeAction, Session, replay};
use tracing::info;

use crate::cli::OutputArgs;
use crate::config_cmd::settings_for;

/// Feed a JSON-lines event file through a session.
#[derive(Debug, Parser)]
pub struct ReplayCli {
    /// Event file, `-` for stdin
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl ReplayCli {
    pub fn run(self, config: Option<&Path>) -> Result<()> {
        let settings = settings_for(config)?;
        let reader: Box<dyn BufRead> = if self.file.as_os_str() == "-" {
            Box::new(io::stdin().lock())
        } else {
            let file = File::open(&self.file)
                .with_context(|| format!("Failed to open {}", self.file.display()))?;
            Box::new(BufReader::new(file))
        };

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let handled = replay_events(settings, reader, &mut out, self.output)?;
        info!(events = handled, file = %self.file.display(), "Replay finished");
        Ok(())
    }
}

/// Replay `reader` through a fresh session, writing every action as one
/// JSON line. Returns the number of handled events.
pub fn replay_events<R, W>(
    settings: LimitedWipSettings,
    reader: R,
    out: &mut W,
    output: OutputArgs,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut session = Session::new(settings)?;
    let mut written = Ok(());
    let handled = replay(&mut session, reader, |actions| {
        if written.is_ok() {
            written = write_actions(&mut *out, actions, output);
        }
    })?;
    written.context("Failed to write actions")?;
    out.flush()?;
    Ok(handled)
}

/// Write actions as JSON lines, skipping toolbar refreshes unless asked for.
pub fn write_actions<W: Write>(out: &mut W, actions: &[IdeAction], output: OutputArgs) -> io::Result<()> {
    for action in actions
        .iter()
        .filter(|action| output.toolbar || !action.is_toolbar_update())
    {
        serde_json::to_writer(&mut *out, action)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
