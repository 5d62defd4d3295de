use crate::error::TripLedgerError;
use crate::models::{Transaction, TransactionSplit, Trip, TripMember, User};
use crate::storage::Storage;
use std::collections::HashMap;
use uuid::Uuid;

/// Reference storage backend. Listing methods return deterministic orders
/// (transactions newest first, ties by id) so callers behave the same from
/// run to run.
#[derive(Default)]
pub struct InMemoryStorage {
    users: HashMap<Uuid, User>,
    usernames: HashMap<String, Uuid>, // username -> user_id
    trips: HashMap<Uuid, Trip>,
    members: Vec<TripMember>,
    transactions: HashMap<Uuid, Transaction>,
    splits: Vec<TransactionSplit>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage::default()
    }
}

impl Storage for InMemoryStorage {
    fn create_user(&mut self, user: User) -> Result<User, TripLedgerError> {
        if self.usernames.contains_key(&user.username) {
            return Err(TripLedgerError::UsernameTaken(user.username));
        }
        self.usernames.insert(user.username.clone(), user.id);
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn get_user(&self, user_id: Uuid) -> Option<User> {
        self.users.get(&user_id).cloned()
    }

    fn get_user_by_name(&self, username: &str) -> Option<User> {
        self.usernames
            .get(username)
            .and_then(|id| self.users.get(id))
            .cloned()
    }

    fn create_trip(&mut self, trip: Trip) -> Result<Trip, TripLedgerError> {
        self.trips.insert(trip.id, trip.clone());
        Ok(trip)
    }

    fn update_trip(&mut self, trip: Trip) -> Result<Trip, TripLedgerError> {
        if !self.trips.contains_key(&trip.id) {
            return Err(TripLedgerError::TripNotFound(trip.id));
        }
        self.trips.insert(trip.id, trip.clone());
        Ok(trip)
    }

    fn get_trip(&self, trip_id: Uuid) -> Option<Trip> {
        self.trips.get(&trip_id).cloned()
    }

    fn list_trips(&self) -> Vec<Trip> {
        let mut trips: Vec<Trip> = self.trips.values().cloned().collect();
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        trips
    }

    fn delete_trip(&mut self, trip_id: Uuid) -> Result<(), TripLedgerError> {
        if self.trips.remove(&trip_id).is_none() {
            return Err(TripLedgerError::TripNotFound(trip_id));
        }
        let tx_ids: Vec<Uuid> = self
            .transactions
            .values()
            .filter(|tx| tx.trip_id == trip_id)
            .map(|tx| tx.id)
            .collect();
        self.splits.retain(|s| !tx_ids.contains(&s.transaction_id));
        self.transactions.retain(|_, tx| tx.trip_id != trip_id);
        self.members.retain(|m| m.trip_id != trip_id);
        Ok(())
    }

    fn add_trip_member(&mut self, member: TripMember) -> Result<(), TripLedgerError> {
        self.members.push(member);
        Ok(())
    }

    fn remove_trip_member(&mut self, trip_id: Uuid, user_id: Uuid) -> Result<(), TripLedgerError> {
        self.members
            .retain(|m| !(m.trip_id == trip_id && m.user_id == user_id));
        Ok(())
    }

    fn list_trip_members(&self, trip_id: Uuid) -> Vec<TripMember> {
        let mut members: Vec<TripMember> = self
            .members
            .iter()
            .filter(|m| m.trip_id == trip_id)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.joined_at.cmp(&b.joined_at).then(a.user_id.cmp(&b.user_id)));
        members
    }

    fn is_trip_member(&self, trip_id: Uuid, user_id: Uuid) -> bool {
        self.members
            .iter()
            .any(|m| m.trip_id == trip_id && m.user_id == user_id)
    }

    fn create_transaction(&mut self, tx: Transaction) -> Result<Transaction, TripLedgerError> {
        self.transactions.insert(tx.id, tx.clone());
        Ok(tx)
    }

    fn create_split(&mut self, split: TransactionSplit) -> Result<(), TripLedgerError> {
        self.splits.push(split);
        Ok(())
    }

    fn get_transaction(&self, tx_id: Uuid) -> Option<Transaction> {
        self.transactions.get(&tx_id).cloned()
    }

    fn list_transactions(&self, trip_id: Uuid) -> Vec<Transaction> {
        let mut txs: Vec<Transaction> = self
            .transactions
            .values()
            .filter(|tx| tx.trip_id == trip_id)
            .cloned()
            .collect();
        txs.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));
        txs
    }

    fn list_splits(&self, trip_id: Uuid) -> Vec<TransactionSplit> {
        let trip_tx_ids: Vec<Uuid> = self
            .transactions
            .values()
            .filter(|tx| tx.trip_id == trip_id)
            .map(|tx| tx.id)
            .collect();
        self.splits
            .iter()
            .filter(|s| trip_tx_ids.contains(&s.transaction_id))
            .cloned()
            .collect()
    }

    fn delete_transaction(&mut self, tx_id: Uuid) -> Result<(), TripLedgerError> {
        if self.transactions.remove(&tx_id).is_none() {
            return Err(TripLedgerError::TransactionNotFound(tx_id));
        }
        self.splits.retain(|s| s.transaction_id != tx_id);
        Ok(())
    }
}
