use crate::constants::{MAX_AMOUNT, MAX_TEXT_LENGTH};
use crate::error::TripLedgerError;
use crate::logger::AuditLogger;
use crate::models::*;
use crate::settlement::{self, BalanceQuery, BalanceSheet, DebtReport};
use crate::stats;
use crate::storage::Storage;
use chrono::Utc;
use log::{debug, info, warn};
use serde_json::json;
use std::collections::HashMap;
use uuid::Uuid;

pub struct TripService<'a> {
    pub storage: &'a mut dyn Storage,
    pub audit_logger: &'a mut dyn AuditLogger,
}

impl<'a> TripService<'a> {
    pub fn new(storage: &'a mut dyn Storage, audit_logger: &'a mut dyn AuditLogger) -> Self {
        info!("Initializing TripService");
        Self {
            storage,
            audit_logger,
        }
    }

    // USER MANAGEMENT

    pub fn create_user(&mut self, username: String) -> Result<User, TripLedgerError> {
        info!("Creating user '{}'", username);
        if username.trim().is_empty() {
            return Err(TripLedgerError::EmptyUsername);
        }
        Self::validate_text("username", &username)?;

        let user = User {
            id: Uuid::new_v4(),
            username,
            created_at: Utc::now(),
        };
        let created = self.storage.create_user(user)?;
        debug!("User created with ID: {}", created.id);

        self.audit_logger.log(AuditLogEntry::new(
            created.id,
            AuditAction::CreateUser,
            &json!({ "user_id": created.id, "username": created.username }),
            created.created_at,
        ));

        Ok(created)
    }

    pub fn get_user(&self, user_id: Uuid) -> Option<User> {
        self.storage.get_user(user_id)
    }

    // TRIP MANAGEMENT

    pub fn create_trip(
        &mut self,
        creator: &User,
        name: String,
        main_currency: String,
        destination: String,
    ) -> Result<Trip, TripLedgerError> {
        info!("Creating trip '{}' for user {}", name, creator.id);
        Self::validate_text("name", &name)?;
        Self::validate_text("main_currency", &main_currency)?;
        self.user_or_err(creator.id)?;

        let now = Utc::now();
        let trip = Trip {
            id: Uuid::new_v4(),
            name,
            main_currency,
            destination,
            is_archived: false,
            created_at: now,
        };
        let created = self.storage.create_trip(trip)?;
        self.storage.add_trip_member(TripMember {
            trip_id: created.id,
            user_id: creator.id,
            joined_at: now,
        })?;
        debug!("Trip created with ID: {}", created.id);

        self.audit_logger.log(AuditLogEntry::new(
            creator.id,
            AuditAction::CreateTrip,
            &json!({ "trip_id": created.id, "name": created.name, "main_currency": created.main_currency }),
            now,
        ));

        Ok(created)
    }

    pub fn get_trip(&self, trip_id: Uuid) -> Option<Trip> {
        self.storage.get_trip(trip_id)
    }

    pub fn list_trips(&self) -> Vec<Trip> {
        self.storage.list_trips()
    }

    pub fn archive_trip(&mut self, user: &User, trip_id: Uuid) -> Result<Trip, TripLedgerError> {
        info!("Archiving trip {} by user {}", trip_id, user.id);
        let mut trip = self.member_trip_or_err(trip_id, user.id)?;
        trip.is_archived = true;
        let updated = self.storage.update_trip(trip)?;

        self.audit_logger.log(AuditLogEntry::new(
            user.id,
            AuditAction::ArchiveTrip,
            &json!({ "trip_id": trip_id }),
            Utc::now(),
        ));
        Ok(updated)
    }

    /// Deletes the trip and everything attached to it: memberships,
    /// transactions, splits.
    pub fn delete_trip(&mut self, user: &User, trip_id: Uuid) -> Result<(), TripLedgerError> {
        info!("Deleting trip {} by user {}", trip_id, user.id);
        self.member_trip_or_err(trip_id, user.id)?;
        self.storage.delete_trip(trip_id)?;

        self.audit_logger.log(AuditLogEntry::new(
            user.id,
            AuditAction::DeleteTrip,
            &json!({ "trip_id": trip_id }),
            Utc::now(),
        ));
        Ok(())
    }

    // MEMBERSHIP

    pub fn add_member(
        &mut self,
        trip_id: Uuid,
        user_id: Uuid,
        added_by: &User,
    ) -> Result<(), TripLedgerError> {
        info!("Adding user {} to trip {}", user_id, trip_id);
        self.member_trip_or_err(trip_id, added_by.id)?;
        self.user_or_err(user_id)?;
        if self.storage.is_trip_member(trip_id, user_id) {
            warn!("User {} already in trip {}", user_id, trip_id);
            return Err(TripLedgerError::AlreadyTripMember(user_id));
        }

        let now = Utc::now();
        self.storage.add_trip_member(TripMember {
            trip_id,
            user_id,
            joined_at: now,
        })?;

        self.audit_logger.log(AuditLogEntry::new(
            added_by.id,
            AuditAction::AddMember,
            &json!({ "trip_id": trip_id, "user_id": user_id }),
            now,
        ));
        Ok(())
    }

    /// Adds a member by username, creating the user on the fly when the
    /// name is unknown.
    pub fn add_member_by_name(
        &mut self,
        trip_id: Uuid,
        username: &str,
        added_by: &User,
    ) -> Result<User, TripLedgerError> {
        let user = match self.storage.get_user_by_name(username) {
            Some(user) => user,
            None => self.create_user(username.to_string())?,
        };
        self.add_member(trip_id, user.id, added_by)?;
        Ok(user)
    }

    pub fn remove_member(
        &mut self,
        trip_id: Uuid,
        user_id: Uuid,
        removed_by: &User,
    ) -> Result<(), TripLedgerError> {
        info!("Removing user {} from trip {}", user_id, trip_id);
        self.member_trip_or_err(trip_id, removed_by.id)?;
        if !self.storage.is_trip_member(trip_id, user_id) {
            return Err(TripLedgerError::NotTripMember(user_id));
        }
        self.storage.remove_trip_member(trip_id, user_id)?;

        self.audit_logger.log(AuditLogEntry::new(
            removed_by.id,
            AuditAction::RemoveMember,
            &json!({ "trip_id": trip_id, "user_id": user_id }),
            Utc::now(),
        ));
        Ok(())
    }

    pub fn trip_members(&self, trip_id: Uuid) -> Result<Vec<User>, TripLedgerError> {
        self.storage
            .get_trip(trip_id)
            .ok_or(TripLedgerError::TripNotFound(trip_id))?;
        Ok(self
            .storage
            .list_trip_members(trip_id)
            .iter()
            .filter_map(|m| self.storage.get_user(m.user_id))
            .collect())
    }

    // TRANSACTION MANAGEMENT

    /// Records a shared expense. `shares` pairs each beneficiary with a
    /// relative weight; an empty slice is the degenerate "payer only" case.
    #[allow(clippy::too_many_arguments)]
    pub fn add_expense(
        &mut self,
        trip_id: Uuid,
        payer_id: Uuid,
        amount: f64,
        currency: String,
        exchange_rate: f64,
        description: String,
        category: String,
        shares: &[(Uuid, f64)],
        added_by: &User,
    ) -> Result<Transaction, TripLedgerError> {
        info!(
            "Adding expense of {} {} to trip {} paid by {}",
            amount, currency, trip_id, payer_id
        );
        self.member_trip_or_err(trip_id, added_by.id)?;
        if !self.storage.is_trip_member(trip_id, payer_id) {
            warn!("Payer {} not in trip {}", payer_id, trip_id);
            return Err(TripLedgerError::NotTripMember(payer_id));
        }
        Self::validate_text("description", &description)?;
        Self::validate_amount(amount)?;
        Self::validate_rate(exchange_rate)?;

        let mut total_weight = 0.0;
        for &(beneficiary_id, weight) in shares {
            if !self.storage.is_trip_member(trip_id, beneficiary_id) {
                warn!("Beneficiary {} not in trip {}", beneficiary_id, trip_id);
                return Err(TripLedgerError::NotTripMember(beneficiary_id));
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(TripLedgerError::InvalidWeight {
                    user_id: beneficiary_id,
                    weight,
                });
            }
            total_weight += weight;
        }
        if !shares.is_empty() && total_weight <= 0.0 {
            return Err(TripLedgerError::InvalidShares);
        }

        let now = Utc::now();
        let tx = Transaction {
            id: Uuid::new_v4(),
            trip_id,
            payer_id,
            amount,
            currency,
            description,
            category,
            exchange_rate,
            date: now,
            is_repayment: false,
        };
        let created = self.storage.create_transaction(tx)?;
        for &(beneficiary_id, weight) in shares {
            self.storage.create_split(TransactionSplit {
                id: Uuid::new_v4(),
                transaction_id: created.id,
                beneficiary_id,
                weight,
            })?;
        }
        debug!("Transaction created with ID: {}", created.id);

        self.audit_logger.log(AuditLogEntry::new(
            added_by.id,
            AuditAction::AddExpense,
            &json!({ "transaction_id": created.id, "trip_id": trip_id, "amount": amount, "currency": created.currency }),
            now,
        ));

        Ok(created)
    }

    /// Materializes a settle-up action: a repayment transaction from the
    /// debtor with a single weight-1 split to the receiver. Repayments
    /// cancel computed debt but never count as trip spending.
    pub fn record_repayment(
        &mut self,
        trip_id: Uuid,
        from_user_id: Uuid,
        to_user_id: Uuid,
        amount: f64,
        currency: String,
        exchange_rate: f64,
    ) -> Result<Transaction, TripLedgerError> {
        info!(
            "Recording repayment of {} {} from {} to {} in trip {}",
            amount, currency, from_user_id, to_user_id, trip_id
        );
        if from_user_id == to_user_id {
            return Err(TripLedgerError::SelfRepayment);
        }
        self.member_trip_or_err(trip_id, from_user_id)?;
        if !self.storage.is_trip_member(trip_id, to_user_id) {
            return Err(TripLedgerError::NotTripMember(to_user_id));
        }
        Self::validate_amount(amount)?;
        Self::validate_rate(exchange_rate)?;

        let now = Utc::now();
        let tx = Transaction {
            id: Uuid::new_v4(),
            trip_id,
            payer_id: from_user_id,
            amount,
            currency,
            description: "Debt repayment".to_string(),
            category: "Other".to_string(),
            exchange_rate,
            date: now,
            is_repayment: true,
        };
        let created = self.storage.create_transaction(tx)?;
        self.storage.create_split(TransactionSplit {
            id: Uuid::new_v4(),
            transaction_id: created.id,
            beneficiary_id: to_user_id,
            weight: 1.0,
        })?;

        self.audit_logger.log(AuditLogEntry::new(
            from_user_id,
            AuditAction::RecordRepayment,
            &json!({ "transaction_id": created.id, "trip_id": trip_id, "to_user_id": to_user_id, "amount": amount }),
            now,
        ));

        Ok(created)
    }

    /// Deletes a transaction; its splits go with it.
    pub fn delete_transaction(&mut self, user: &User, tx_id: Uuid) -> Result<(), TripLedgerError> {
        info!("Deleting transaction {} by user {}", tx_id, user.id);
        let tx = self
            .storage
            .get_transaction(tx_id)
            .ok_or(TripLedgerError::TransactionNotFound(tx_id))?;
        self.member_trip_or_err(tx.trip_id, user.id)?;
        self.storage.delete_transaction(tx_id)?;

        self.audit_logger.log(AuditLogEntry::new(
            user.id,
            AuditAction::DeleteTransaction,
            &json!({ "transaction_id": tx_id, "trip_id": tx.trip_id }),
            Utc::now(),
        ));
        Ok(())
    }

    // BALANCES & SETTLEMENT

    /// Net balances for the trip, seeded with every member so idle
    /// participants show up at 0.0. `currency_filter` switches to the
    /// single-currency pool for that code; `None` uses the main-currency
    /// ledger.
    pub fn trip_balances(
        &self,
        trip_id: Uuid,
        currency_filter: Option<&str>,
    ) -> Result<BalanceSheet, TripLedgerError> {
        self.storage
            .get_trip(trip_id)
            .ok_or(TripLedgerError::TripNotFound(trip_id))?;
        let members: Vec<Uuid> = self
            .storage
            .list_trip_members(trip_id)
            .iter()
            .map(|m| m.user_id)
            .collect();
        let transactions = self.storage.list_transactions(trip_id);
        let splits = self.storage.list_splits(trip_id);

        let query = match currency_filter {
            Some(currency) => BalanceQuery::single_currency(currency),
            None => BalanceQuery::main_currency(),
        }
        .with_participants(&members);

        settlement::compute_balances(&transactions, &splits, &query)
    }

    /// Minimal repayment list for the trip, denominated in the trip's main
    /// currency, or in the filtered currency when one is given.
    pub fn trip_debts(
        &self,
        trip_id: Uuid,
        currency_filter: Option<&str>,
    ) -> Result<DebtReport, TripLedgerError> {
        let trip = self
            .storage
            .get_trip(trip_id)
            .ok_or(TripLedgerError::TripNotFound(trip_id))?;
        let members: Vec<Uuid> = self
            .storage
            .list_trip_members(trip_id)
            .iter()
            .map(|m| m.user_id)
            .collect();
        let transactions = self.storage.list_transactions(trip_id);
        let splits = self.storage.list_splits(trip_id);

        let (query, currency) = match currency_filter {
            Some(currency) => (BalanceQuery::single_currency(currency), currency),
            None => (BalanceQuery::main_currency(), trip.main_currency.as_str()),
        };
        let query = query.with_participants(&members);

        settlement::compute_debts(&transactions, &splits, &query, currency)
    }

    // STATISTICS

    /// Total spent in the trip's main currency, repayments excluded.
    pub fn total_spent(&self, trip_id: Uuid) -> Result<f64, TripLedgerError> {
        self.storage
            .get_trip(trip_id)
            .ok_or(TripLedgerError::TripNotFound(trip_id))?;
        Ok(stats::total_spent(&self.storage.list_transactions(trip_id)))
    }

    pub fn category_summary(&self, trip_id: Uuid) -> Result<HashMap<String, f64>, TripLedgerError> {
        self.storage
            .get_trip(trip_id)
            .ok_or(TripLedgerError::TripNotFound(trip_id))?;
        Ok(stats::category_summary(
            &self.storage.list_transactions(trip_id),
        ))
    }

    pub fn currency_summary(&self, trip_id: Uuid) -> Result<HashMap<String, f64>, TripLedgerError> {
        self.storage
            .get_trip(trip_id)
            .ok_or(TripLedgerError::TripNotFound(trip_id))?;
        Ok(stats::currency_summary(
            &self.storage.list_transactions(trip_id),
        ))
    }

    // VALIDATION HELPERS

    fn user_or_err(&self, user_id: Uuid) -> Result<User, TripLedgerError> {
        self.storage
            .get_user(user_id)
            .ok_or(TripLedgerError::UserNotFound(user_id))
    }

    fn member_trip_or_err(&self, trip_id: Uuid, user_id: Uuid) -> Result<Trip, TripLedgerError> {
        let trip = self
            .storage
            .get_trip(trip_id)
            .ok_or(TripLedgerError::TripNotFound(trip_id))?;
        if !self.storage.is_trip_member(trip_id, user_id) {
            warn!("User {} is not a member of trip {}", user_id, trip_id);
            return Err(TripLedgerError::NotTripMember(user_id));
        }
        Ok(trip)
    }

    fn validate_text(field: &str, value: &str) -> Result<(), TripLedgerError> {
        if value.trim().is_empty() {
            return Err(TripLedgerError::InvalidText {
                field: field.to_string(),
                reason: "cannot be empty".to_string(),
            });
        }
        if value.len() > MAX_TEXT_LENGTH {
            return Err(TripLedgerError::InvalidText {
                field: field.to_string(),
                reason: format!("cannot exceed {} characters", MAX_TEXT_LENGTH),
            });
        }
        if value.chars().any(|c| c.is_control()) {
            return Err(TripLedgerError::InvalidText {
                field: field.to_string(),
                reason: "contains control characters".to_string(),
            });
        }
        Ok(())
    }

    fn validate_amount(amount: f64) -> Result<(), TripLedgerError> {
        if !amount.is_finite() || amount <= 0.0 || amount > MAX_AMOUNT {
            return Err(TripLedgerError::InvalidAmount(amount));
        }
        Ok(())
    }

    fn validate_rate(rate: f64) -> Result<(), TripLedgerError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(TripLedgerError::InvalidExchangeRate(rate));
        }
        Ok(())
    }
}
