//! The test-driven commit gate a session runs: [`Tcr`] or [`Limbo`].

use limitedwip_common::TcrVariant;
use limitedwip_tcr::{ChangeListModifications, Limbo, Tcr, TcrSettings};

use crate::ide::WorkspaceIde;

pub enum TestGate {
    Tcr(Tcr<WorkspaceIde>),
    Limbo(Limbo<WorkspaceIde>),
}

impl TestGate {
    pub fn new(variant: TcrVariant, ide: WorkspaceIde, settings: TcrSettings) -> Self {
        match variant {
            TcrVariant::Tcr => Self::Tcr(Tcr::new(ide, settings)),
            TcrVariant::Limbo => Self::Limbo(Limbo::new(ide, settings)),
        }
    }

    pub fn variant(&self) -> TcrVariant {
        match self {
            Self::Tcr(_) => TcrVariant::Tcr,
            Self::Limbo(_) => TcrVariant::Limbo,
        }
    }

    /// Limbo ignores the test name.
    pub fn on_unit_test_succeeded(
        &mut self,
        modifications: ChangeListModifications,
        test_name: Option<&str>,
    ) {
        match self {
            Self::Tcr(tcr) => tcr.on_unit_test_succeeded(modifications, test_name),
            Self::Limbo(limbo) => limbo.on_unit_test_succeeded(modifications),
        }
    }

    pub fn on_unit_test_failed(&mut self, test_name: Option<&str>) {
        match self {
            Self::Tcr(tcr) => tcr.on_unit_test_failed(test_name),
            Self::Limbo(limbo) => limbo.on_unit_test_failed(),
        }
    }

    pub fn force_one_commit(&mut self) {
        match self {
            Self::Tcr(tcr) => tcr.force_one_commit(),
            Self::Limbo(limbo) => limbo.force_one_commit(),
        }
    }

    pub fn is_commit_allowed(&mut self, modifications: &ChangeListModifications) -> bool {
        match self {
            Self::Tcr(tcr) => tcr.is_commit_allowed(modifications),
            Self::Limbo(limbo) => limbo.is_commit_allowed(modifications),
        }
    }

    pub fn on_successful_commit(&mut self) {
        match self {
            Self::Tcr(tcr) => tcr.on_successful_commit(),
            Self::Limbo(limbo) => limbo.on_successful_commit(),
        }
    }

    pub fn on_settings_update(&mut self, settings: TcrSettings) {
        match self {
            Self::Tcr(tcr) => tcr.on_settings_update(settings),
            Self::Limbo(limbo) => limbo.on_settings_update(settings),
        }
    }
}
