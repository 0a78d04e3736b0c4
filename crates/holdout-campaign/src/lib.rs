//! Session economy for HOLDOUT: the coin ledger and upgrade progression.
//!
//! Pure bookkeeping with no ECS access. The simulation owns one `Ledger`
//! and one `UpgradeProgression` per session and turns their results into
//! notifications.

pub mod ledger;
pub mod upgrades;

pub use ledger::{Ledger, LedgerError};
pub use upgrades::{effect_for, StatDelta, UpgradeError, UpgradeProgression, UpgradeReceipt};
