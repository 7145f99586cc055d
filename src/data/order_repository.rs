use crate::domain::order::Order;
use crate::domain::repository::OrderRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Orders kept in insertion order, which is also creation order.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    storage: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    #[instrument(skip(self), fields(order_id = %order.id, user_id = %order.user_id, hotel_id = %order.hotel_id))]
    async fn save_order(&self, order: Order) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.push(order);
        debug!(total_orders = storage.len(), "Order saved to memory storage");
        Ok(())
    }

    async fn find_orders_by_user(&self, user_id: &str) -> Result<Vec<Order>> {
        let storage = self.storage.read().await;
        Ok(storage
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let storage = self.storage.read().await;
        Ok(storage.clone())
    }
}
