/// Balances with an absolute value below this are treated as settled.
/// One cent, absorbs floating-point drift across accumulation.
pub const SETTLED_EPSILON: f64 = 0.01;

/// Maximum allowed gap between total debtor deficit and creditor surplus
/// before a balance set is flagged as non-conserved.
pub const CONSERVATION_TOLERANCE: f64 = 0.05;

/// Upper bound on a single transaction amount.
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Maximum length for user-supplied names and descriptions.
pub const MAX_TEXT_LENGTH: usize = 255;
