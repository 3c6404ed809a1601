// Application layer: the ledger store and its error taxonomy.
// The interactive dispatcher in `cli` talks only to `LedgerService`.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
