pub mod auth_service;
pub mod booking_service;
pub mod hotel_service;
