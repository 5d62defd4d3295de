use crate::error::TripLedgerError;
use crate::service::TripService;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Portable snapshot of a trip, keyed by member names rather than ids so it
/// survives a round trip between devices.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripExport {
    pub name: String,
    pub main_currency: String,
    pub destination: String,
    pub members: Vec<String>,
    pub transactions: Vec<TransactionExport>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionExport {
    pub payer_name: String,
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub category: String,
    pub exchange_rate: f64,
    pub is_repayment: bool,
    pub beneficiaries: Vec<BeneficiaryExport>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BeneficiaryExport {
    pub name: String,
    pub weight: f64,
}

impl TripExport {
    pub fn to_json(&self) -> Result<String, TripLedgerError> {
        serde_json::to_string_pretty(self).map_err(|e| TripLedgerError::ExportError(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, TripLedgerError> {
        serde_json::from_str(json).map_err(|e| TripLedgerError::ExportError(e.to_string()))
    }
}

/// Assembles the export snapshot for one trip.
pub fn export_trip(service: &TripService, trip_id: Uuid) -> Result<TripExport, TripLedgerError> {
    let trip = service
        .get_trip(trip_id)
        .ok_or(TripLedgerError::TripNotFound(trip_id))?;
    let members = service.trip_members(trip_id)?;
    let transactions = service.storage.list_transactions(trip_id);
    let splits = service.storage.list_splits(trip_id);

    let name_of = |user_id: Uuid| -> String {
        members
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.username.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    };

    let exported = transactions
        .iter()
        .map(|tx| TransactionExport {
            payer_name: name_of(tx.payer_id),
            amount: tx.amount,
            currency: tx.currency.clone(),
            description: tx.description.clone(),
            category: tx.category.clone(),
            exchange_rate: tx.exchange_rate,
            is_repayment: tx.is_repayment,
            beneficiaries: splits
                .iter()
                .filter(|s| s.transaction_id == tx.id)
                .map(|s| BeneficiaryExport {
                    name: name_of(s.beneficiary_id),
                    weight: s.weight,
                })
                .collect(),
        })
        .collect();

    Ok(TripExport {
        name: trip.name,
        main_currency: trip.main_currency,
        destination: trip.destination,
        members: members.iter().map(|u| u.username.clone()).collect(),
        transactions: exported,
    })
}
