mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{ADMIN_EMAIL, ADMIN_PASSWORD, body_text, cookie_named, location, sign_up_form};
use hotel_booking::domain::user::LoginForm;
use hotel_booking::presentation::middleware::SESSION_COOKIE;

#[actix_web::test]
async fn test_anonymous_visitor_cannot_reach_admin_orders() {
    let (app, _state) = setup_site_test!();

    let req = test::TestRequest::get().uri("/orders").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
}

#[actix_web::test]
async fn test_non_admin_cannot_reach_admin_orders() {
    let (app, _state) = setup_site_test!();

    let req = test::TestRequest::post()
        .uri("/sign-up")
        .set_form(sign_up_form("regular@example.com", "password123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let session = cookie_named(&resp, SESSION_COOKIE).unwrap();

    let req = test::TestRequest::get()
        .uri("/orders")
        .cookie(session)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
}

#[actix_web::test]
async fn test_admin_sees_every_order() {
    let (app, state) = setup_site_test!();
    let hotel = state.hotel_service.list_hotels().await.unwrap().remove(0);

    let mut order_ids = Vec::new();
    for email in ["one@example.com", "two@example.com"] {
        let req = test::TestRequest::post()
            .uri("/sign-up")
            .set_form(sign_up_form(email, "password123"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let session = cookie_named(&resp, SESSION_COOKIE).unwrap();

        let req = test::TestRequest::post()
            .uri(&format!(
                "/order-placed/id={}&duration=1&dateOfDeparture=2030-05-01&numberOfGuests=1",
                hotel.id
            ))
            .cookie(session)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }
    for joined in state.booking_service.all_orders().await.unwrap() {
        order_ids.push(joined.order.id);
    }
    assert_eq!(order_ids.len(), 2);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form(LoginForm {
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    let admin_session = cookie_named(&resp, SESSION_COOKIE).unwrap();

    let req = test::TestRequest::get()
        .uri("/orders")
        .cookie(admin_session)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(test::read_body(resp).await);
    assert!(body.contains("All Orders"));
    assert!(body.contains(&hotel.name));
    for id in order_ids {
        assert!(body.contains(&id));
    }
}

#[actix_web::test]
async fn test_account_page_requires_login() {
    let (app, _state) = setup_site_test!();

    let req = test::TestRequest::get().uri("/my-account").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn test_health_check() {
    let (app, _state) = setup_site_test!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["status"], "ok");
    assert!(resp.get("timestamp").is_some());
}
