#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use hotel_booking::domain::user::SignUpForm;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "adminpass";

/// Builds the full site (state, middlewares, routes) around seeded stores
/// and evaluates to `(app, state)`.
#[macro_export]
macro_rules! setup_site_test {
    () => {{
        let state = actix_web::web::Data::new(
            hotel_booking::presentation::handlers::AppState::in_memory(
                "test-secret-key-for-site-tests".to_string(),
                3600,
            ),
        );
        state.hotel_service.seed_catalogue().await.unwrap();
        state
            .auth_service
            .ensure_admin(common::ADMIN_EMAIL, common::ADMIN_PASSWORD)
            .await
            .unwrap();

        let app = actix_web::test::init_service(
            actix_web::App::new()
                .app_data(state.clone())
                .wrap(hotel_booking::presentation::middleware::SessionMiddleware)
                .wrap(hotel_booking::presentation::middleware::TimingMiddleware)
                .wrap(hotel_booking::presentation::middleware::RequestIdMiddleware)
                .configure(hotel_booking::presentation::routes::configure),
        )
        .await;

        (app, state)
    }};
}

pub fn sign_up_form(email: &str, password: &str) -> SignUpForm {
    SignUpForm {
        first_name: "Jane".to_string(),
        surname: "Doe".to_string(),
        email: email.to_string(),
        confirm_email: email.to_string(),
        password: password.to_string(),
        confirm_password: password.to_string(),
    }
}

pub fn cookie_named<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn body_text(bytes: actix_web::web::Bytes) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}
