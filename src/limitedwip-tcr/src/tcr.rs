//! Test && commit || revert state machine.

use limitedwip_common::TcrAction;
use tracing::debug;

use crate::gate::CommitGate;
use crate::ide::TcrIde;
use crate::modifications::ChangeListModifications;
use crate::settings::TcrSettings;

pub struct Tcr<I: TcrIde> {
    ide: I,
    settings: TcrSettings,
    gate: CommitGate,
    /// Name of the test run that passed last.
    last_test_name: Option<String>,
}

impl<I: TcrIde> Tcr<I> {
    pub fn new(mut ide: I, settings: TcrSettings) -> Self {
        ide.on_settings_update(&settings);
        Self {
            ide,
            settings,
            gate: CommitGate::default(),
            last_test_name: None,
        }
    }

    pub fn settings(&self) -> &TcrSettings {
        &self.settings
    }

    pub fn ide(&self) -> &I {
        &self.ide
    }

    pub fn ide_mut(&mut self) -> &mut I {
        &mut self.ide
    }

    pub fn on_unit_test_succeeded(
        &mut self,
        modifications: ChangeListModifications,
        test_name: Option<&str>,
    ) {
        if self.settings.disabled() {
            return;
        }
        let same_test_as_last_time =
            test_name.is_some() && test_name == self.last_test_name.as_deref();
        let has_modifications = !modifications.is_empty();
        self.gate.on_test_passed(modifications);

        if has_modifications {
            match self.settings.action_on_passed_test {
                TcrAction::OpenCommitDialog => self.ide.open_commit_dialog(),
                TcrAction::AmendCommit => {
                    if same_test_as_last_time
                        && self.ide.last_commit_exists_only_on_current_branch()
                    {
                        self.ide.amend_commit_without_dialog();
                    } else {
                        debug!(test = ?test_name, "Cannot amend, opening commit dialog");
                        self.ide.open_commit_dialog();
                    }
                }
                TcrAction::Commit => self.ide.commit_without_dialog(),
                TcrAction::CommitAndPush => self.ide.commit_without_dialog_and_push(),
            }
        }
        self.last_test_name = test_name.map(str::to_string);
    }

    pub fn on_unit_test_failed(&mut self, test_name: Option<&str>) {
        if self.settings.disabled() {
            return;
        }
        debug!(test = ?test_name, "Unit test failed");
        self.gate.on_test_failed(&mut self.ide, &self.settings);
    }

    /// Let the next commit through untested and start it.
    pub fn force_one_commit(&mut self) {
        self.gate.allow_one_commit_without_checks();
        self.ide.commit_without_dialog();
    }

    pub fn is_commit_allowed(&mut self, modifications: &ChangeListModifications) -> bool {
        self.gate
            .is_commit_allowed(&mut self.ide, &self.settings, modifications)
    }

    pub fn on_successful_commit(&mut self) {
        self.gate.on_successful_commit();
    }

    pub fn on_settings_update(&mut self, settings: TcrSettings) {
        self.ide.on_settings_update(&settings);
        self.settings = settings;
    }
}
