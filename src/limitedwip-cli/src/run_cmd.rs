//! `run`: live session driven by a real timer and events on stdin.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use limitedwip_host::{HostEvent, Session, run_event_loop};
use limitedwip_timer::{Tick, Ticks, Timer};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cli::OutputArgs;
use crate::config_cmd::settings_for;
use crate::replay_cmd::write_actions;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Run with a real timer, reading JSON-lines events from stdin.
#[derive(Debug, Parser)]
pub struct RunCli {
    /// Timer polling period in milliseconds
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(10..=1000))]
    pub period_ms: u64,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl RunCli {
    pub async fn run(self, config: Option<&Path>) -> Result<()> {
        let session = Session::new(settings_for(config)?)?;
        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let mut timer = Timer::with_period(Duration::from_millis(self.period_ms));
        let ticks = timer.subscribe();
        timer.start();

        let tick_task = tokio::spawn(forward_ticks(ticks, tx.clone(), cancel.clone()));
        let input_task = tokio::spawn(forward_lines(
            BufReader::new(tokio::io::stdin()),
            tx,
            cancel.clone(),
        ));
        let signal_cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted");
                signal_cancel.cancel();
            }
        });

        info!(period_ms = self.period_ms, "Running, reading events from stdin");
        let output = self.output;
        run_event_loop(session, rx, |actions| {
            let mut out = io::stdout().lock();
            if let Err(e) = write_actions(&mut out, actions, output).and_then(|()| out.flush()) {
                warn!(error = %e, "Failed to write actions");
            }
        })
        .await;

        timer.stop().await;
        for task in [tick_task, input_task] {
            if let Err(e) = task.await {
                warn!(error = %e, "Event forwarder failed");
            }
        }
        Ok(())
    }
}

/// Forward every timer second until cancelled or the timer goes away.
/// Seconds missed while the event loop was busy are sent late, not dropped.
async fn forward_ticks(mut ticks: Ticks, events: mpsc::Sender<HostEvent>, cancel: CancellationToken) {
    loop {
        let tick = tokio::select! {
            _ = cancel.cancelled() => break,
            tick = ticks.recv() => tick,
        };
        let Some(Tick { seconds }) = tick else {
            break;
        };
        if events.send(HostEvent::Tick { seconds }).await.is_err() {
            break;
        }
    }
    debug!("Tick forwarder stopped");
}

/// Forward parsed events from `input` until end of input or cancellation.
/// End of input cancels everything else. Malformed lines are skipped.
async fn forward_lines<R>(input: R, events: mpsc::Sender<HostEvent>, cancel: CancellationToken)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut line_number = 0;
    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line,
        };
        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("End of input");
                cancel.cancel();
                break;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read input");
                cancel.cancel();
                break;
            }
        };
        line_number += 1;
        match HostEvent::parse_line(&line, line_number) {
            Ok(Some(event)) => {
                if events.send(event).await.is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Skipping malformed event"),
        }
    }
}
