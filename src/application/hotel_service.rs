use crate::domain::error::DomainError;
use crate::domain::hotel::Hotel;
use crate::domain::repository::HotelRepository;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct HotelService<H: HotelRepository> {
    hotel_repository: Arc<H>,
}

impl<H: HotelRepository> HotelService<H> {
    pub fn new(hotel_repository: Arc<H>) -> Self {
        Self { hotel_repository }
    }

    pub async fn list_hotels(&self) -> Result<Vec<Hotel>> {
        self.hotel_repository.list_hotels().await
    }

    #[instrument(skip(self))]
    pub async fn get_hotel(&self, id: &str) -> Result<Hotel> {
        self.hotel_repository
            .find_hotel_by_id(id)
            .await?
            .ok_or_else(|| DomainError::HotelNotFound(id.to_string()).into())
    }

    /// Loads the starter catalogue. Returns the number of hotels added.
    #[instrument(skip(self))]
    pub async fn seed_catalogue(&self) -> Result<usize> {
        let catalogue = [
            ("The Harbour View", "Portugal", "Porto", 4, 120, "Riverside rooms a short walk from the old town."),
            ("Casa del Sol", "Spain", "Seville", 3, 85, "Family-run hotel with a rooftop terrace."),
            ("Alpine Lodge", "Switzerland", "Zermatt", 5, 340, "Ski-in ski-out chalet with views of the Matterhorn."),
            ("Canal House", "Netherlands", "Amsterdam", 4, 190, "Restored merchant house on the Herengracht."),
            ("Old Town Inn", "Czech Republic", "Prague", 3, 70, "Cosy rooms steps from the astronomical clock."),
        ];

        for (name, country, city, star_rating, cost_per_night, description) in catalogue {
            self.hotel_repository
                .save_hotel(Hotel {
                    id: Uuid::new_v4().to_string(),
                    name: name.to_string(),
                    country: country.to_string(),
                    city: city.to_string(),
                    star_rating,
                    cost_per_night,
                    description: description.to_string(),
                })
                .await?;
        }

        info!(count = catalogue.len(), "Hotel catalogue seeded");
        Ok(catalogue.len())
    }
}
