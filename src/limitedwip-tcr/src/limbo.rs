//! Commit gate without test name tracking.

use limitedwip_common::TcrAction;

use crate::gate::CommitGate;
use crate::ide::TcrIde;
use crate::modifications::ChangeListModifications;
use crate::settings::TcrSettings;

pub type LimboSettings = TcrSettings;

/// Like [`crate::Tcr`], but it does not know which test passed, so
/// [`TcrAction::AmendCommit`] falls back to a plain commit.
pub struct Limbo<I: TcrIde> {
    ide: I,
    settings: LimboSettings,
    gate: CommitGate,
}

impl<I: TcrIde> Limbo<I> {
    pub fn new(mut ide: I, settings: LimboSettings) -> Self {
        ide.on_settings_update(&settings);
        Self {
            ide,
            settings,
            gate: CommitGate::default(),
        }
    }

    pub fn ide(&self) -> &I {
        &self.ide
    }

    pub fn on_unit_test_succeeded(&mut self, modifications: ChangeListModifications) {
        if self.settings.disabled() {
            return;
        }
        let has_modifications = !modifications.is_empty();
        self.gate.on_test_passed(modifications);
        if has_modifications {
            match self.settings.action_on_passed_test {
                TcrAction::OpenCommitDialog => self.ide.open_commit_dialog(),
                TcrAction::Commit | TcrAction::AmendCommit => self.ide.commit_without_dialog(),
                TcrAction::CommitAndPush => self.ide.commit_without_dialog_and_push(),
            }
        }
    }

    pub fn on_unit_test_failed(&mut self) {
        if self.settings.disabled() {
            return;
        }
        self.gate.on_test_failed(&mut self.ide, &self.settings);
    }

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

    pub fn on_settings_update(&mut self, settings: LimboSettings) {
        self.ide.on_settings_update(&settings);
        self.settings = settings;
    }
}
