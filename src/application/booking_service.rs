use crate::domain::error::DomainError;
use crate::domain::hotel::Hotel;
use crate::domain::order::{BookingQuery, Order, OrderWithHotel};
use crate::domain::repository::{HotelRepository, OrderRepository};
use anyhow::Result;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub struct BookingService<O: OrderRepository, H: HotelRepository> {
    order_repository: Arc<O>,
    hotel_repository: Arc<H>,
}

impl<O: OrderRepository, H: HotelRepository> BookingService<O, H> {
    pub fn new(order_repository: Arc<O>, hotel_repository: Arc<H>) -> Self {
        Self {
            order_repository,
            hotel_repository,
        }
    }

    /// Looks up the hotel a booking query refers to.
    #[instrument(skip(self), fields(hotel_id = %query.id))]
    pub async fn booking_confirmation(&self, query: &BookingQuery) -> Result<Hotel> {
        query.validate()?;
        self.hotel_repository
            .find_hotel_by_id(&query.id)
            .await?
            .ok_or_else(|| {
                warn!(hotel_id = %query.id, "Booking for unknown hotel");
                DomainError::HotelNotFound(query.id.clone()).into()
            })
    }

    #[instrument(skip(self, query), fields(hotel_id = %query.id, order_id))]
    pub async fn place_order(&self, user_id: &str, query: BookingQuery) -> Result<Order> {
        // Same checks as the confirmation page; the order URL can be hand-edited.
        self.booking_confirmation(&query).await?;

        let order = Order {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            hotel_id: query.id.clone(),
            order_details: query.order_details(),
            created_at: Utc::now(),
        };
        tracing::Span::current().record("order_id", order.id.as_str());

        self.order_repository.save_order(order.clone()).await?;
        info!(
            order_id = %order.id,
            user_id = %order.user_id,
            nights = order.order_details.duration,
            guests = order.order_details.number_of_guests,
            "Order placed"
        );
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: &str) -> Result<Vec<OrderWithHotel>> {
        let orders = self.order_repository.find_orders_by_user(user_id).await?;
        self.join_hotels(orders).await
    }

    #[instrument(skip(self))]
    pub async fn all_orders(&self) -> Result<Vec<OrderWithHotel>> {
        let orders = self.order_repository.list_orders().await?;
        self.join_hotels(orders).await
    }

    /// Attaches matching hotel records to each order, fetching every
    /// distinct hotel once.
    async fn join_hotels(&self, orders: Vec<Order>) -> Result<Vec<OrderWithHotel>> {
        let mut hotels: HashMap<String, Option<Hotel>> = HashMap::new();
        for order in &orders {
            if !hotels.contains_key(&order.hotel_id) {
                let hotel = self
                    .hotel_repository
                    .find_hotel_by_id(&order.hotel_id)
                    .await?;
                hotels.insert(order.hotel_id.clone(), hotel);
            }
        }
        debug!(
            orders = orders.len(),
            hotels = hotels.len(),
            "Joined orders against hotels"
        );

        Ok(orders
            .into_iter()
            .map(|order| {
                let hotel_data = hotels
                    .get(&order.hotel_id)
                    .cloned()
                    .flatten()
                    .into_iter()
                    .collect();
                OrderWithHotel { order, hotel_data }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::hotel_repository::InMemoryHotelRepository;
    use crate::data::order_repository::InMemoryOrderRepository;
    use chrono::NaiveDate;

    async fn service() -> (
        BookingService<InMemoryOrderRepository, InMemoryHotelRepository>,
        Arc<InMemoryOrderRepository>,
    ) {
        let hotels = Arc::new(InMemoryHotelRepository::new());
        hotels
            .save_hotel(Hotel {
                id: "h-1".to_string(),
                name: "Harbour View".to_string(),
                country: "Portugal".to_string(),
                city: "Porto".to_string(),
                star_rating: 4,
                cost_per_night: 120,
                description: String::new(),
            })
            .await
            .unwrap();
        let orders = Arc::new(InMemoryOrderRepository::new());
        (BookingService::new(orders.clone(), hotels), orders)
    }

    fn query(hotel_id: &str) -> BookingQuery {
        BookingQuery {
            id: hotel_id.to_string(),
            duration: 3,
            date_of_departure: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            number_of_guests: 2,
        }
    }

    #[tokio::test]
    async fn test_place_order_ties_order_to_user() {
        let (svc, _) = service().await;
        let order = svc.place_order("user-1", query("h-1")).await.unwrap();
        assert_eq!(order.user_id, "user-1");
        assert_eq!(order.hotel_id, "h-1");
        assert_eq!(order.order_details.duration, 3);
    }

    #[tokio::test]
    async fn test_place_order_unknown_hotel_fails() {
        let (svc, _) = service().await;
        let err = svc.place_order("user-1", query("h-404")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::HotelNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_orders_for_user_joins_hotel_data() {
        let (svc, _) = service().await;
        svc.place_order("user-1", query("h-1")).await.unwrap();
        svc.place_order("user-2", query("h-1")).await.unwrap();

        let mine = svc.orders_for_user("user-1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].hotel_data.len(), 1);
        assert_eq!(mine[0].hotel_data[0].name, "Harbour View");
        assert_eq!(mine[0].total_cost(), Some(360));

        assert_eq!(svc.all_orders().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_dangling_hotel_reference_joins_to_empty_list() {
        let (svc, orders) = service().await;
        orders
            .save_order(Order {
                id: "o-1".to_string(),
                user_id: "user-1".to_string(),
                hotel_id: "gone".to_string(),
                order_details: query("gone").order_details(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let joined = svc.all_orders().await.unwrap();
        assert!(joined[0].hotel_data.is_empty());
    }
}
