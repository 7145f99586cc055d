use crate::domain::hotel::Hotel;
use crate::domain::order::Order;
use crate::domain::session::Session;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user. Fails with `DomainError::EmailTaken` when the
    /// email is already registered.
    async fn insert_user(&self, user: User) -> Result<()>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn save_hotel(&self, hotel: Hotel) -> Result<()>;
    async fn find_hotel_by_id(&self, id: &str) -> Result<Option<Hotel>>;
    async fn list_hotels(&self) -> Result<Vec<Hotel>>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn save_order(&self, order: Order) -> Result<()>;
    async fn find_orders_by_user(&self, user_id: &str) -> Result<Vec<Order>>;
    async fn list_orders(&self) -> Result<Vec<Order>>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn save_session(&self, session: Session) -> Result<()>;
    async fn find_session(&self, id: &str) -> Result<Option<Session>>;
    async fn delete_session(&self, id: &str) -> Result<bool>;
    /// Removes every session that expired before `now`. Returns how many
    /// were removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize>;
}
