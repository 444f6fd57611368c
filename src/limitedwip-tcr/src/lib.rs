//! Test && commit || revert.
//!
//! A commit is only allowed if the change list is exactly the one the last
//! passing test run saw. A failing test run reverts the change list.
//!
//! [`Tcr`] can act on a passing test (open the commit dialog, commit,
//! amend or commit and push). [`Limbo`] is the plain gate without test
//! name tracking, so it never amends. Both announce their settings through
//! [`TcrIde::on_settings_update`].

mod gate;
mod ide;
mod limbo;
mod modifications;
mod settings;
mod tcr;

#[cfg(test)]
mod testing;

pub use ide::TcrIde;
pub use limbo::{Limbo, LimboSettings};
pub use limitedwip_common::TcrAction;
pub use modifications::ChangeListModifications;
pub use settings::TcrSettings;
pub use tcr::Tcr;
