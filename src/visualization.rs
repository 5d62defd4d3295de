use crate::error::TripLedgerError;
use crate::service::TripService;
use log::{debug, error};
use serde_json::{Value, json};
use uuid::Uuid;

// Generates Chart.js configuration for visualizing member balances in a trip
pub struct Visualization;

impl Visualization {
    /// Builds a Chart.js bar chart configuration for the trip's
    /// main-currency balances, one bar per member in join order.
    pub fn generate_balance_chart(
        service: &TripService<'_>,
        trip_id: Uuid,
    ) -> Result<Value, TripLedgerError> {
        let trip = service
            .get_trip(trip_id)
            .ok_or(TripLedgerError::TripNotFound(trip_id))?;
        let members = service.trip_members(trip_id)?;
        if members.is_empty() {
            error!("No members found for trip {}", trip_id);
            return Err(TripLedgerError::NoBalancesAvailable);
        }

        let sheet = service.trip_balances(trip_id, None)?;
        debug!(
            "Generating balance chart for trip {} over {} members",
            trip_id,
            members.len()
        );

        let mut labels: Vec<String> = Vec::new();
        let mut data: Vec<f64> = Vec::new();
        for member in &members {
            labels.push(member.username.clone());
            data.push(sheet.balances.get(&member.id).copied().unwrap_or(0.0));
        }

        // Rotate base colors so any member count gets a distinct pair
        let base_colors = [
            (75, 192, 192),  // Teal
            (255, 99, 132),  // Red
            (54, 162, 235),  // Blue
            (255, 206, 86),  // Yellow
            (153, 102, 255), // Purple
        ];
        let mut background_colors = Vec::new();
        let mut border_colors = Vec::new();
        for i in 0..labels.len() {
            let (r, g, b) = base_colors[i % base_colors.len()];
            background_colors.push(format!("rgba({}, {}, {}, 0.6)", r, g, b));
            border_colors.push(format!("rgba({}, {}, {}, 1)", r, g, b));
        }

        Ok(json!({
            "type": "bar",
            "data": {
                "labels": labels,
                "datasets": [{
                    "label": format!("Balance ({})", trip.main_currency),
                    "data": data,
                    "backgroundColor": background_colors,
                    "borderColor": border_colors,
                    "borderWidth": 1
                }]
            },
            "options": {
                "scales": {
                    "y": {
                        "beginAtZero": true,
                        "title": {
                            "display": true,
                            "text": format!("Balance ({})", trip.main_currency)
                        }
                    },
                    "x": {
                        "title": {
                            "display": true,
                            "text": "Members"
                        }
                    }
                },
                "plugins": {
                    "title": {
                        "display": true,
                        "text": format!("Balances for trip: {}", trip.name)
                    }
                }
            }
        }))
    }
}
