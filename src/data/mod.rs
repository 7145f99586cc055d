pub mod hotel_repository;
pub mod order_repository;
pub mod session_repository;
pub mod user_repository;
