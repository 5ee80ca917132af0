mod entry;
mod ledger;
mod money;
mod validation;

pub use entry::*;
pub use ledger::*;
pub use money::*;
pub use validation::*;
