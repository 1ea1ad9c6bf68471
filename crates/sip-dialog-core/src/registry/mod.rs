//! Process-wide (but explicitly-constructed, never a singleton — spec.md
//! §9's "global registries" design note) lookup tables: transactions by
//! `TransactionKey`, dialogs by canonical dialog-id string. Both are
//! `dashmap::DashMap`-backed for O(1) insert/lookup/remove with interior
//! synchronization and no process-wide lock, matching the reference
//! crate's choice of `dashmap` for exactly this kind of read-mostly table.

mod dialog_registry;
mod transaction_registry;

pub use dialog_registry::DialogRegistry;
pub use transaction_registry::TransactionRegistry;
