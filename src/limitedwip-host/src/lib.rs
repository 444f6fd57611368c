//! Host side of the limited WIP tools.
//!
//! The engines only talk to collaborator traits. This crate provides an
//! in-memory [`Workspace`] standing in for the editor and VCS, the
//! [`WorkspaceIde`] adapter implementing all collaborator traits on top of
//! it, and the [`Session`] that owns the engines and routes [`HostEvent`]s
//! to them on a single thread.

pub mod action;
pub mod error;
pub mod event;
pub mod event_loop;
pub mod ide;
pub mod session;
pub mod test_gate;
pub mod workspace;

pub use action::{CommitKind, Feature, IdeAction};
pub use error::{HostError, Result};
pub use event::HostEvent;
pub use event_loop::{replay, run_event_loop};
pub use ide::WorkspaceIde;
pub use session::{CommitCompleted, RolledBack, Session};
pub use test_gate::TestGate;
pub use workspace::{Workspace, WorkspaceRequest};
