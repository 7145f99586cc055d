use crate::presentation::auth::{login_get, login_post, logout, sign_up_get, sign_up_post};
use crate::presentation::handlers::{
    all_orders, book, booking_confirmation, health_check, hotel_detail, index, my_account,
    order_placed,
};
use actix_web::web;

/// Registers every route of the site. Shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .route("/hotels/{id}", web::get().to(hotel_detail))
        .route("/book", web::get().to(book))
        .route("/sign-up", web::get().to(sign_up_get))
        .route("/sign-up", web::post().to(sign_up_post))
        .route("/login", web::get().to(login_get))
        .route("/login", web::post().to(login_post))
        .route("/logout", web::get().to(logout))
        .route("/confirmation/{data}", web::get().to(booking_confirmation))
        .route("/order-placed/{data}", web::post().to(order_placed))
        .route("/my-account", web::get().to(my_account))
        .route("/orders", web::get().to(all_orders));
}
