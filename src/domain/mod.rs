pub mod error;
pub mod hotel;
pub mod order;
pub mod repository;
pub mod session;
pub mod user;
pub mod validation;
