use crate::domain::error::DomainError;
use crate::domain::hotel::Hotel;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDetails {
    /// Length of stay in nights.
    pub duration: u32,
    pub date_of_departure: NaiveDate,
    pub number_of_guests: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub hotel_id: String,
    pub order_details: OrderDetails,
    pub created_at: DateTime<Utc>,
}

/// Booking parameters as they travel through confirmation and order URLs,
/// e.g. `id=<hotel>&duration=3&dateOfDeparture=2025-06-01&numberOfGuests=2`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    pub id: String,
    pub duration: u32,
    pub date_of_departure: NaiveDate,
    pub number_of_guests: u32,
}

impl BookingQuery {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::Validation("Hotel must be specified".to_string()));
        }
        if self.duration == 0 {
            return Err(DomainError::Validation(
                "Stay must be at least one night".to_string(),
            ));
        }
        if self.number_of_guests == 0 {
            return Err(DomainError::Validation(
                "At least one guest is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Encodes the query back into the `key=value&...` form used in URLs.
    /// Hotel ids are UUIDs, so no component needs percent-encoding.
    pub fn to_query_string(&self) -> String {
        format!(
            "id={}&duration={}&dateOfDeparture={}&numberOfGuests={}",
            self.id,
            self.duration,
            self.date_of_departure.format("%Y-%m-%d"),
            self.number_of_guests
        )
    }

    pub fn order_details(&self) -> OrderDetails {
        OrderDetails {
            duration: self.duration,
            date_of_departure: self.date_of_departure,
            number_of_guests: self.number_of_guests,
        }
    }
}

/// An order joined against the hotel collection. `hotel_data` holds every
/// hotel whose id matches `order.hotel_id`, so it is empty for a dangling
/// reference.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithHotel {
    pub order: Order,
    pub hotel_data: Vec<Hotel>,
}

impl OrderWithHotel {
    pub fn total_cost(&self) -> Option<u64> {
        self.hotel_data
            .first()
            .map(|h| u64::from(h.cost_per_night) * u64::from(self.order.order_details.duration))
    }
}
