use crate::domain::hotel::Hotel;
use crate::domain::repository::HotelRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Clone, Default)]
pub struct InMemoryHotelRepository {
    storage: Arc<RwLock<HashMap<String, Hotel>>>,
}

impl InMemoryHotelRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HotelRepository for InMemoryHotelRepository {
    #[instrument(skip(self), fields(hotel_id = %hotel.id, name = %hotel.name))]
    async fn save_hotel(&self, hotel: Hotel) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(hotel.id.clone(), hotel);
        debug!("Hotel saved to memory storage");
        Ok(())
    }

    async fn find_hotel_by_id(&self, id: &str) -> Result<Option<Hotel>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    /// Sorted by country, then city, then name.
    async fn list_hotels(&self) -> Result<Vec<Hotel>> {
        let storage = self.storage.read().await;
        let mut hotels: Vec<Hotel> = storage.values().cloned().collect();
        hotels.sort_by(|a, b| {
            (&a.country, &a.city, &a.name).cmp(&(&b.country, &b.city, &b.name))
        });
        Ok(hotels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel(id: &str, country: &str, name: &str) -> Hotel {
        Hotel {
            id: id.to_string(),
            name: name.to_string(),
            country: country.to_string(),
            city: "City".to_string(),
            star_rating: 4,
            cost_per_night: 100,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_list_hotels_is_sorted() {
        let repo = InMemoryHotelRepository::new();
        repo.save_hotel(hotel("h-2", "Spain", "Sol")).await.unwrap();
        repo.save_hotel(hotel("h-1", "Italy", "Roma")).await.unwrap();
        repo.save_hotel(hotel("h-3", "Italy", "Aurora")).await.unwrap();

        let names: Vec<String> = repo
            .list_hotels()
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(names, vec!["Aurora", "Roma", "Sol"]);
    }

    #[tokio::test]
    async fn test_find_hotel_by_id() {
        let repo = InMemoryHotelRepository::new();
        repo.save_hotel(hotel("h-1", "Italy", "Roma")).await.unwrap();
        assert!(repo.find_hotel_by_id("h-1").await.unwrap().is_some());
        assert!(repo.find_hotel_by_id("h-9").await.unwrap().is_none());
    }
}
