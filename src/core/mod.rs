mod ledger;
mod session;

pub use ledger::{Ledger, LedgerEntry, LedgerSnapshot};
pub use session::{CycleOutcome, CycleState, Session};
