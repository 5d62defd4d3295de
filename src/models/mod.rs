pub mod audit;
pub mod debt;
pub mod transaction;
pub mod transaction_split;
pub mod trip;
pub mod trip_member;
pub mod user;

pub use audit::{AuditAction, AuditLogEntry};
pub use debt::Debt;
pub use transaction::Transaction;
pub use transaction_split::TransactionSplit;
pub use trip::Trip;
pub use trip_member::TripMember;
pub use user::User;
