use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub country: String,
    pub city: String,
    pub star_rating: u8,
    /// Whole currency units.
    pub cost_per_night: u32,
    pub description: String,
}
