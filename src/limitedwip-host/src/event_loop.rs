//! Feeding events into a [`Session`].

use std::io::BufRead;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::action::IdeAction;
use crate::error::Result;
use crate::event::HostEvent;
use crate::session::Session;

/// Handle events from `events` one at a time until every sender is gone.
///
/// Timer ticks and external events share the channel, so the engines only
/// ever see one event at a time. `on_actions` is called after each event
/// that produced actions. Returns the session for inspection.
pub async fn run_event_loop<F>(
    mut session: Session,
    mut events: mpsc::Receiver<HostEvent>,
    mut on_actions: F,
) -> Session
where
    F: FnMut(&[IdeAction]),
{
    let mut handled = 0usize;
    while let Some(event) = events.recv().await {
        let actions = session.handle(event);
        handled += 1;
        if !actions.is_empty() {
            on_actions(&actions);
        }
    }
    info!(events = handled, "Event loop finished");
    session
}

/// Handle every event of a JSON-lines stream. Returns the number of events
/// handled. Stops at the first malformed line.
pub fn replay<R, F>(session: &mut Session, reader: R, mut on_actions: F) -> Result<usize>
where
    R: BufRead,
    F: FnMut(&[IdeAction]),
{
    let mut handled = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(event) = HostEvent::parse_line(&line, index + 1)? else {
            continue;
        };
        let actions = session.handle(event);
        handled += 1;
        if !actions.is_empty() {
            on_actions(&actions);
        }
    }
    debug!(events = handled, "Replay finished");
    Ok(handled)
}
