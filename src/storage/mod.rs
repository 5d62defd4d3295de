use uuid::Uuid;

use crate::error::TripLedgerError;
use crate::models::*;

pub trait Storage {
    fn create_user(&mut self, user: User) -> Result<User, TripLedgerError>;
    fn get_user(&self, user_id: Uuid) -> Option<User>;
    fn get_user_by_name(&self, username: &str) -> Option<User>;

    fn create_trip(&mut self, trip: Trip) -> Result<Trip, TripLedgerError>;
    fn update_trip(&mut self, trip: Trip) -> Result<Trip, TripLedgerError>;
    fn get_trip(&self, trip_id: Uuid) -> Option<Trip>;
    fn list_trips(&self) -> Vec<Trip>;
    /// Removes the trip and everything hanging off it: members,
    /// transactions and their splits.
    fn delete_trip(&mut self, trip_id: Uuid) -> Result<(), TripLedgerError>;

    fn add_trip_member(&mut self, member: TripMember) -> Result<(), TripLedgerError>;
    fn remove_trip_member(&mut self, trip_id: Uuid, user_id: Uuid) -> Result<(), TripLedgerError>;
    fn list_trip_members(&self, trip_id: Uuid) -> Vec<TripMember>;
    fn is_trip_member(&self, trip_id: Uuid, user_id: Uuid) -> bool;

    fn create_transaction(&mut self, tx: Transaction) -> Result<Transaction, TripLedgerError>;
    fn create_split(&mut self, split: TransactionSplit) -> Result<(), TripLedgerError>;
    fn get_transaction(&self, tx_id: Uuid) -> Option<Transaction>;
    fn list_transactions(&self, trip_id: Uuid) -> Vec<Transaction>;
    fn list_splits(&self, trip_id: Uuid) -> Vec<TransactionSplit>;
    /// Removes the transaction and cascade-deletes its splits.
    fn delete_transaction(&mut self, tx_id: Uuid) -> Result<(), TripLedgerError>;
}

pub mod in_memory;
