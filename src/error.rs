use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Serialize)]
pub enum TripLedgerError {
    /// Username field is empty
    #[error("Username is required")]
    EmptyUsername,

    /// Username is already registered
    #[error("Username {0} already taken")]
    UsernameTaken(String),

    /// User with given ID not found
    #[error("User {0} not found")]
    UserNotFound(Uuid),

    /// Trip with given ID not found
    #[error("Trip {0} not found")]
    TripNotFound(Uuid),

    /// User is already a member of the trip
    #[error("User {0} is already a trip member")]
    AlreadyTripMember(Uuid),

    /// User is not a member of the trip
    #[error("User {0} is not a trip member")]
    NotTripMember(Uuid),

    /// Transaction with given ID not found
    #[error("Transaction {0} not found")]
    TransactionNotFound(Uuid),

    /// Amount is non-positive, non-finite or above the allowed maximum
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    /// Exchange rate must be a positive finite number
    #[error("Invalid exchange rate: {0}")]
    InvalidExchangeRate(f64),

    /// Split weight is negative or non-finite
    #[error("Invalid split weight {weight} for user {user_id}")]
    InvalidWeight { user_id: Uuid, weight: f64 },

    /// Expense has no beneficiaries with positive total weight
    #[error("Expense shares must include at least one positive weight")]
    InvalidShares,

    /// Text field is empty, too long or contains control characters
    #[error("Invalid {field}: {reason}")]
    InvalidText { field: String, reason: String },

    /// Cannot record a repayment from a user to themselves
    #[error("Cannot record repayment to self")]
    SelfRepayment,

    /// Single-currency balances need a currency filter
    #[error("Single-currency mode requires a currency filter")]
    CurrencyFilterRequired,

    /// A currency filter was supplied in main-currency mode
    #[error("Currency filter {0} is not valid in main-currency mode")]
    UnexpectedCurrencyFilter(String),

    /// Strict mode aborted on the first malformed record
    #[error("Malformed record in transaction {transaction_id}: {reason}")]
    MalformedRecord { transaction_id: Uuid, reason: String },

    /// No members or balances to visualize
    #[error("No balances available")]
    NoBalancesAvailable,

    /// Export payload could not be produced or parsed
    #[error("Export error: {0}")]
    ExportError(String),

    /// Storage backend failed
    #[error("Storage error: {0}")]
    StorageError(String),
}
