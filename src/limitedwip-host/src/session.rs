//! Owns the engines and routes host events to them.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use limitedwip_autorevert::{AutoRevert, AutoRevertSettings};
use limitedwip_common::{
    EventBus, LimitedWipSettings, RevertFilter, SettingsStore, Subscription,
};
use limitedwip_tcr::TcrSettings;
use limitedwip_watchdog::{Watchdog, WatchdogSettings};
use tracing::{debug, info, trace, warn};

use crate::action::{CommitKind, Feature, IdeAction};
use crate::error::Result;
use crate::event::HostEvent;
use crate::ide::WorkspaceIde;
use crate::test_gate::TestGate;
use crate::workspace::{Workspace, WorkspaceRequest};

/// Published after a commit went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitCompleted {
    /// The change list is empty after the commit.
    pub all_changes_committed: bool,
}

/// Published after changes were rolled back, by an engine or the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolledBack {
    /// The change list is empty after the rollback.
    pub all_changes: bool,
}

type Shared<T> = Rc<RefCell<T>>;

/// Single-threaded owner of the engines.
///
/// Every [`HostEvent`] is handled to completion before the next one.
/// Commits and rollbacks the engines trigger are queued by the workspace and
/// processed after the engine call that caused them has returned, so no
/// engine is ever re-entered.
pub struct Session {
    workspace: Shared<Workspace>,
    auto_revert: Shared<AutoRevert<WorkspaceIde>>,
    watchdog: Shared<Watchdog<WorkspaceIde>>,
    tcr: Shared<TestGate>,
    settings: SettingsStore,
    commits: EventBus<CommitCompleted>,
    rollbacks: EventBus<RolledBack>,
    subscriptions: Vec<Subscription>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("settings", self.settings.current())
            .field("subscriptions", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Build the collaborators, then the engines on top of them.
    pub fn new(settings: LimitedWipSettings) -> Result<Self> {
        settings.validate()?;
        let auto_revert_settings = AutoRevertSettings::from(&settings);
        let watchdog_settings = WatchdogSettings::try_from(&settings)?;
        let tcr_settings = TcrSettings::try_from(&settings)?;

        let workspace = Rc::new(RefCell::new(Workspace::new()));
        let ide = |feature| WorkspaceIde::new(Rc::clone(&workspace), feature);
        let auto_revert = Rc::new(RefCell::new(AutoRevert::new(
            ide(Feature::AutoRevert),
            auto_revert_settings,
        )));
        let watchdog = Rc::new(RefCell::new(Watchdog::new(
            ide(Feature::Watchdog),
            watchdog_settings,
        )));
        let tcr = Rc::new(RefCell::new(TestGate::new(
            settings.tcr_variant,
            ide(Feature::Tcr),
            tcr_settings,
        )));
        // Engines announce their initial settings; that is not an action.
        workspace.borrow_mut().drain_actions();

        let mut session = Self {
            workspace,
            auto_revert,
            watchdog,
            tcr,
            settings: SettingsStore::new(settings),
            commits: EventBus::new(),
            rollbacks: EventBus::new(),
            subscriptions: Vec::new(),
        };
        session.subscriptions = session.subscribe_engines();
        info!(
            auto_revert = session.settings.current().auto_revert_enabled,
            watchdog = session.settings.current().watchdog_enabled,
            tcr = session.settings.current().tcr_enabled,
            tcr_variant = ?session.settings.current().tcr_variant,
            "Session started"
        );
        Ok(session)
    }

    fn subscribe_engines(&self) -> Vec<Subscription> {
        let mut subscriptions = Vec::new();

        let auto_revert = Rc::clone(&self.auto_revert);
        subscriptions.push(self.commits.subscribe(move |commit| {
            if commit.all_changes_committed {
                auto_revert.borrow_mut().on_all_changes_committed();
            }
        }));
        let auto_revert = Rc::clone(&self.auto_revert);
        subscriptions.push(self.rollbacks.subscribe(move |rollback| {
            if rollback.all_changes {
                auto_revert.borrow_mut().on_all_changes_rolled_back();
            }
        }));
        let watchdog = Rc::clone(&self.watchdog);
        subscriptions.push(
            self.commits
                .subscribe(move |_| watchdog.borrow_mut().on_commit()),
        );
        let tcr = Rc::clone(&self.tcr);
        subscriptions.push(
            self.commits
                .subscribe(move |_| tcr.borrow_mut().on_successful_commit()),
        );

        let auto_revert = Rc::clone(&self.auto_revert);
        subscriptions.push(self.settings.subscribe(move |settings| {
            auto_revert
                .borrow_mut()
                .on_settings_update(AutoRevertSettings::from(settings));
        }));
        let watchdog = Rc::clone(&self.watchdog);
        subscriptions.push(self.settings.subscribe(move |settings| {
            match WatchdogSettings::try_from(settings) {
                Ok(settings) => watchdog.borrow_mut().on_settings_update(settings),
                Err(e) => warn!(error = %e, "Watchdog settings not applied"),
            }
        }));
        let tcr = Rc::clone(&self.tcr);
        let workspace = Rc::clone(&self.workspace);
        subscriptions.push(self.settings.subscribe(move |settings| {
            let tcr_settings = match TcrSettings::try_from(settings) {
                Ok(tcr_settings) => tcr_settings,
                Err(e) => {
                    warn!(error = %e, "TCR settings not applied");
                    return;
                }
            };
            let variant = settings.tcr_variant;
            if tcr.borrow().variant() == variant {
                tcr.borrow_mut().on_settings_update(tcr_settings);
            } else {
                info!(?variant, "Switching TCR variant, the commit gate starts closed");
                let ide = WorkspaceIde::new(Rc::clone(&workspace), Feature::Tcr);
                *tcr.borrow_mut() = TestGate::new(variant, ide, tcr_settings);
            }
        }));

        subscriptions
    }

    pub fn settings(&self) -> &LimitedWipSettings {
        self.settings.current()
    }

    pub fn workspace(&self) -> Ref<'_, Workspace> {
        self.workspace.borrow()
    }

    pub fn is_auto_revert_started(&self) -> bool {
        self.auto_revert.borrow().is_started()
    }

    /// Handle one event and everything it triggers. Returns the actions
    /// that happened, in order.
    pub fn handle(&mut self, event: HostEvent) -> Vec<IdeAction> {
        trace!(?event, "Handling event");
        match event {
            HostEvent::Tick { seconds } => {
                let has_changes = self.workspace.borrow().has_changes();
                self.auto_revert.borrow_mut().on_timer(has_changes);
                self.watchdog.borrow_mut().on_timer(seconds);
            }
            HostEvent::Edit {
                path,
                content,
                test,
                binary,
            } => self
                .workspace
                .borrow_mut()
                .edit(&path, content, test, binary),
            HostEvent::AppendLines { path, count, test } => {
                self.workspace.borrow_mut().append_lines(&path, count, test);
            }
            HostEvent::Delete { path } => self.workspace.borrow_mut().delete(&path),
            HostEvent::Commit { message } => self.try_commit(CommitKind::Commit, message),
            HostEvent::RenameChangeList { name } => {
                self.workspace.borrow_mut().rename_change_list(name);
            }
            HostEvent::Push => self.workspace.borrow_mut().push(),
            HostEvent::Rollback => {
                let reverted = self.workspace.borrow_mut().revert(RevertFilter::all());
                debug!(files = reverted, "Change list rolled back");
            }
            HostEvent::OpenCommitDialog => self.workspace.borrow_mut().open_commit_dialog(),
            HostEvent::CloseCommitDialog => self.workspace.borrow_mut().close_commit_dialog(),
            HostEvent::TestPassed { name } => {
                let modifications = self.workspace.borrow().modifications();
                self.tcr
                    .borrow_mut()
                    .on_unit_test_succeeded(modifications, name.as_deref());
            }
            HostEvent::TestFailed { name } => {
                self.tcr.borrow_mut().on_unit_test_failed(name.as_deref());
            }
            HostEvent::Pause => self.auto_revert.borrow_mut().on_pause(),
            HostEvent::ForceCommit { feature } => self.force_commit(feature),
            HostEvent::SkipWatchdogNotifications => {
                self.watchdog
                    .borrow_mut()
                    .toggle_skip_notifications_until_commit();
            }
            HostEvent::Settings { settings } => self.update_settings(settings),
        }

        self.process_requests();
        self.workspace.borrow_mut().drain_actions()
    }

    fn force_commit(&mut self, feature: Feature) {
        match feature {
            Feature::Watchdog => self.watchdog.borrow_mut().on_force_commit(),
            Feature::Tcr => self.tcr.borrow_mut().force_one_commit(),
            Feature::AutoRevert => warn!("Auto-revert has no force commit"),
        }
    }

    fn update_settings(&mut self, settings: LimitedWipSettings) {
        if let Err(e) = self.settings.update(settings) {
            warn!(error = %e, "Rejected settings update");
            self.workspace
                .borrow_mut()
                .record(IdeAction::SettingsRejected {
                    reason: e.to_string(),
                });
        }
    }

    fn process_requests(&mut self) {
        loop {
            let next = self.workspace.borrow_mut().next_request();
            let Some(request) = next else {
                break;
            };
            match request {
                WorkspaceRequest::Commit { feature, kind } => {
                    debug!(?feature, ?kind, "Commit requested");
                    self.try_commit(kind, None);
                }
                WorkspaceRequest::RolledBack { all_changes } => {
                    self.rollbacks.publish(&RolledBack { all_changes });
                }
            }
        }
    }

    /// Run the commit checks, then commit and tell the engines. Without a
    /// `message` the configured source provides one.
    fn try_commit(&mut self, kind: CommitKind, message: Option<String>) {
        let message = message.unwrap_or_else(|| {
            self.workspace
                .borrow()
                .commit_message(self.settings.current().commit_message_source)
        });
        let (has_changes, sizes, modifications) = {
            let mut workspace = self.workspace.borrow_mut();
            workspace.recalculate_change_sizes();
            (
                workspace.has_changes(),
                workspace.change_sizes(),
                workspace.modifications(),
            )
        };
        if !has_changes {
            self.workspace.borrow_mut().commit(kind, message);
            return;
        }

        let allowed = self.watchdog.borrow_mut().is_commit_allowed(&sizes)
            && self.tcr.borrow_mut().is_commit_allowed(&modifications);
        if !allowed {
            self.workspace.borrow_mut().record(IdeAction::CommitBlocked);
            return;
        }

        let all_changes_committed = {
            let mut workspace = self.workspace.borrow_mut();
            workspace.commit(kind, message);
            !workspace.has_changes()
        };
        self.commits.publish(&CommitCompleted {
            all_changes_committed,
        });
    }
}
