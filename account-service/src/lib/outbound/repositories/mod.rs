pub mod ledger;
pub mod memory;
pub mod postgres;

pub use ledger::InMemoryResetTokenLedger;
pub use memory::InMemoryCredentialStore;
pub use postgres::PostgresCredentialStore;
