// Reading and writing transaction files in the JSON ledger encoding.
// The main data file, exports and imports all share this format.

pub mod export;
pub mod import;

pub use export::*;
pub use import::*;
