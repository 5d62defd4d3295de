pub mod constants;
pub mod error;
pub mod export;
pub mod ledger;
pub mod logger;
pub mod models;
pub mod report;
pub mod service;
pub mod settlement;
pub mod stats;
pub mod storage;
pub mod visualization;

pub use error::TripLedgerError;
pub use ledger::BalanceMode;
pub use logger::in_memory::InMemoryAuditLogger;
pub use service::TripService;
pub use settlement::{BalanceQuery, BalanceSheet, DebtReport};
pub use storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
