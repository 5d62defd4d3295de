use crate::models::{Debt, Trip, User};
use uuid::Uuid;

/// Shareable plain-text summary of who still owes whom.
pub fn settlement_report(trip: &Trip, members: &[User], debts: &[Debt]) -> String {
    let name_of = |user_id: Uuid| -> &str {
        members
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.username.as_str())
            .unwrap_or("???")
    };

    let mut report = String::new();
    report.push_str(&format!("Trip settlement: {}\n", trip.name));
    report.push_str("-----------------------------\n");

    if debts.is_empty() {
        report.push_str("All settled up. Nobody owes anything.\n");
    } else {
        report.push_str("Outstanding:\n");
        for debt in debts {
            report.push_str(&format!(
                "  {} -> {}: {:.2} {}\n",
                name_of(debt.from_user_id),
                name_of(debt.to_user_id),
                debt.amount,
                debt.currency
            ));
        }
    }

    report.push_str("-----------------------------\n");
    report
}
