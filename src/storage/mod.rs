//! Plain-text persistence for ledgers.

pub mod codec;
pub mod flat_file;

use crate::{errors::Result, ledger::Ledger};

pub use codec::{
    decode_line, encode_expense, read_ledger, write_ledger, CorruptLine, LoadPolicy, LoadReport,
};
pub use flat_file::FlatFileStorage;

/// Abstraction over places a ledger can be loaded from and saved to.
pub trait StorageBackend {
    /// Reads the full history. A missing source yields an empty ledger.
    fn load(&self) -> Result<LoadReport>;

    /// Replaces the stored history with the ledger's current contents.
    fn save(&self, ledger: &Ledger) -> Result<()>;
}
