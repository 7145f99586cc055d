use crate::application::auth_service::AuthService;
use crate::application::booking_service::BookingService;
use crate::application::hotel_service::HotelService;
use crate::data::hotel_repository::InMemoryHotelRepository;
use crate::data::order_repository::InMemoryOrderRepository;
use crate::data::session_repository::InMemorySessionRepository;
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::order::BookingQuery;
use crate::presentation::error::SiteError;
use crate::presentation::flash::{Flash, IncomingFlash};
use crate::presentation::middleware::{AdminUser, CurrentUser, MaybeUser};
use crate::presentation::views::{
    ConfirmationTemplate, HotelTemplate, IndexTemplate, Layout, OrdersTemplate,
    UserAccountTemplate, order_rows, render_page,
};
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

pub type SiteAuthService = AuthService<InMemoryUserRepository, InMemorySessionRepository>;
pub type SiteBookingService = BookingService<InMemoryOrderRepository, InMemoryHotelRepository>;
pub type SiteHotelService = HotelService<InMemoryHotelRepository>;

// AppState holding the services
pub struct AppState {
    pub auth_service: Arc<SiteAuthService>,
    pub booking_service: SiteBookingService,
    pub hotel_service: SiteHotelService,
}

impl AppState {
    /// Wires every service to fresh in-memory stores. Booking and browsing
    /// share one hotel store.
    pub fn in_memory(session_secret: String, session_ttl_secs: i64) -> Self {
        let hotels = Arc::new(InMemoryHotelRepository::new());
        Self {
            auth_service: Arc::new(AuthService::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemorySessionRepository::new()),
                session_secret,
                session_ttl_secs,
            )),
            booking_service: BookingService::new(
                Arc::new(InMemoryOrderRepository::new()),
                hotels.clone(),
            ),
            hotel_service: HotelService::new(hotels),
        }
    }
}

pub(crate) fn redirect(location: &str) -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, location));
    builder
}

/// Parses the encoded booking string carried in confirmation and order URLs.
fn parse_booking(data: &str) -> Result<BookingQuery, SiteError> {
    let query = web::Query::<BookingQuery>::from_query(data)
        .map(web::Query::into_inner)
        .map_err(|e| SiteError::Validation(format!("Invalid booking details: {}", e)))?;
    query.validate().map_err(anyhow::Error::from)?;
    Ok(query)
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    info!("Health check requested");
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    HttpResponse::Ok().json(response)
}

#[instrument(skip_all)]
pub async fn index(
    state: web::Data<AppState>,
    user: MaybeUser,
    flash: IncomingFlash,
) -> Result<HttpResponse, SiteError> {
    let hotels = state.hotel_service.list_hotels().await?;
    info!(hotels = hotels.len(), "Listing hotels");
    let page = IndexTemplate {
        layout: Layout::new("Find your next stay", &flash, user.0.as_ref()),
        hotels,
    };
    render_page(StatusCode::OK, &page, &flash)
}

#[instrument(skip(state, user, flash), fields(hotel_id = %*path))]
pub async fn hotel_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: MaybeUser,
    flash: IncomingFlash,
) -> Result<HttpResponse, SiteError> {
    let hotel = state.hotel_service.get_hotel(&path).await?;
    let page = HotelTemplate {
        layout: Layout::new(&hotel.name, &flash, user.0.as_ref()),
        today: Utc::now().date_naive().format("%Y-%m-%d").to_string(),
        hotel,
    };
    render_page(StatusCode::OK, &page, &flash)
}

/// Target of the booking form on a hotel page; moves the submitted query
/// into the canonical confirmation URL.
#[instrument(skip_all)]
pub async fn book(req: HttpRequest) -> Result<HttpResponse, SiteError> {
    let query = parse_booking(req.query_string())?;
    Ok(redirect(&format!("/confirmation/{}", query.to_query_string())).finish())
}

#[instrument(skip(state, user, flash), fields(data = %*path))]
pub async fn booking_confirmation(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: MaybeUser,
    flash: IncomingFlash,
) -> Result<HttpResponse, SiteError> {
    let search = parse_booking(&path)?;
    let hotel = state
        .booking_service
        .booking_confirmation(&search)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to load booking confirmation");
            e
        })?;

    let page = ConfirmationTemplate {
        layout: Layout::new("Confirm your booking", &flash, user.0.as_ref()),
        order_path: format!("/order-placed/{}", search.to_query_string()),
        total_cost: u64::from(hotel.cost_per_night) * u64::from(search.duration),
        hotel,
        search,
    };
    render_page(StatusCode::OK, &page, &flash)
}

#[instrument(skip(state, user), fields(user_id = %user.0.id, data = %*path))]
pub async fn order_placed(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, SiteError> {
    let query = parse_booking(&path)?;
    let order = state
        .booking_service
        .place_order(&user.0.id, query)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to place order");
            e
        })?;

    info!(order_id = %order.id, "Order placed, redirecting to account");
    Ok(redirect("/my-account")
        .cookie(Flash::OrderPlaced.cookie())
        .finish())
}

#[instrument(skip(state, user, flash), fields(user_id = %user.0.id))]
pub async fn my_account(
    state: web::Data<AppState>,
    user: CurrentUser,
    flash: IncomingFlash,
) -> Result<HttpResponse, SiteError> {
    let orders = state.booking_service.orders_for_user(&user.0.id).await?;
    info!(orders = orders.len(), "Showing account orders");
    let page = UserAccountTemplate {
        layout: Layout::new("My Account", &flash, Some(&user.0)),
        orders: order_rows(&orders),
    };
    render_page(StatusCode::OK, &page, &flash)
}

#[instrument(skip(state, admin, flash), fields(user_id = %admin.0.id))]
pub async fn all_orders(
    state: web::Data<AppState>,
    admin: AdminUser,
    flash: IncomingFlash,
) -> Result<HttpResponse, SiteError> {
    let orders = state.booking_service.all_orders().await?;
    info!(orders = orders.len(), "Showing all orders");
    let page = OrdersTemplate {
        layout: Layout::new("All Orders", &flash, Some(&admin.0)),
        orders: order_rows(&orders),
    };
    render_page(StatusCode::OK, &page, &flash)
}
