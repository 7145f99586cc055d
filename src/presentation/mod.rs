pub mod auth;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod views;
