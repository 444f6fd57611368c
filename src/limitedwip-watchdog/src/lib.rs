//! Change size watchdog for the limited WIP tools.
//!
//! [`Watchdog`] compares the size of the current change list against a
//! threshold once per second, rate-limits "change is too big" warnings and
//! can refuse commits above the threshold. Sizes come from the editor side
//! through [`WatchdogIde`]; [`ChangeSizeCalculator`] is the line-diff based
//! implementation hosts can use to produce them.

pub mod calculator;
mod change_size;
mod ide;
mod settings;
mod watchdog;

pub use calculator::{
    CalculationResult, ChangeSizeCache, ChangeSizeCalculator, DocumentId, FileChange,
    PendingCalculation, Revision,
};
pub use change_size::{ChangeSize, ChangeSizesWithPath};
pub use ide::WatchdogIde;
pub use settings::WatchdogSettings;
pub use watchdog::Watchdog;
