// Application layer - the ledger store and its persistence contract.
// Presentation (CLI) talks to `LedgerStore` only, never to the repository.

pub mod error;
pub mod store;

pub use error::*;
pub use store::*;
