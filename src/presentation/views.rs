// Askama views. Templates live in `templates/` and extend `base.html`.

use crate::domain::hotel::Hotel;
use crate::domain::order::{BookingQuery, OrderWithHotel};
use crate::domain::user::User;
use crate::domain::validation::FieldError;
use crate::presentation::error::SiteError;
use crate::presentation::flash::{IncomingFlash, flash_removal_cookie};
use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use askama::Template;

/// Data every page shares: the title, the pending flash, and the navbar.
pub struct Layout {
    pub title: String,
    pub flash_kind: &'static str,
    pub flash_message: &'static str,
    pub signed_in: bool,
    pub is_admin: bool,
    pub user_name: String,
}

impl Layout {
    pub fn new(title: &str, flash: &IncomingFlash, user: Option<&User>) -> Self {
        Self {
            title: title.to_string(),
            flash_kind: flash.0.map(|f| f.kind()).unwrap_or(""),
            flash_message: flash.0.map(|f| f.message()).unwrap_or(""),
            signed_in: user.is_some(),
            is_admin: user.map(|u| u.is_admin).unwrap_or(false),
            user_name: user.map(User::full_name).unwrap_or_default(),
        }
    }

    pub fn bare(title: &str) -> Self {
        Self::new(title, &IncomingFlash::default(), None)
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub layout: Layout,
    pub hotels: Vec<Hotel>,
}

#[derive(Template)]
#[template(path = "hotel.html")]
pub struct HotelTemplate {
    pub layout: Layout,
    pub hotel: Hotel,
    pub today: String,
}

#[derive(Template)]
#[template(path = "sign_up.html")]
pub struct SignUpTemplate {
    pub layout: Layout,
    pub errors: Vec<FieldError>,
    pub first_name: String,
    pub surname: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "confirmation.html")]
pub struct ConfirmationTemplate {
    pub layout: Layout,
    pub hotel: Hotel,
    pub search: BookingQuery,
    pub order_path: String,
    pub total_cost: u64,
}

#[derive(Template)]
#[template(path = "user_account.html")]
pub struct UserAccountTemplate {
    pub layout: Layout,
    pub orders: Vec<OrderRow>,
}

#[derive(Template)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub layout: Layout,
    pub orders: Vec<OrderRow>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub layout: Layout,
    pub status: u16,
    pub message: String,
}

/// One line of an order table, flattened from an order and its hotel join.
pub struct OrderRow {
    pub order_id: String,
    pub user_id: String,
    pub hotel_name: String,
    pub location: String,
    pub departure: String,
    pub nights: u32,
    pub guests: u32,
    pub total_cost: String,
    pub placed_at: String,
}

impl From<&OrderWithHotel> for OrderRow {
    fn from(joined: &OrderWithHotel) -> Self {
        let details = &joined.order.order_details;
        let (hotel_name, location) = match joined.hotel_data.first() {
            Some(h) => (h.name.clone(), format!("{}, {}", h.city, h.country)),
            None => ("Hotel no longer listed".to_string(), String::new()),
        };
        Self {
            order_id: joined.order.id.clone(),
            user_id: joined.order.user_id.clone(),
            hotel_name,
            location,
            departure: details.date_of_departure.format("%d %B %Y").to_string(),
            nights: details.duration,
            guests: details.number_of_guests,
            total_cost: joined
                .total_cost()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            placed_at: joined.order.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

pub fn order_rows(orders: &[OrderWithHotel]) -> Vec<OrderRow> {
    orders.iter().map(OrderRow::from).collect()
}

/// Renders a page, clearing the flash cookie when the page displayed one.
pub fn render_page<T: Template>(
    status: StatusCode,
    template: &T,
    flash: &IncomingFlash,
) -> Result<HttpResponse, SiteError> {
    let html = template
        .render()
        .map_err(|e| SiteError::Internal(format!("Template error: {}", e)))?;

    let mut builder = HttpResponse::build(status);
    builder.content_type(ContentType::html());
    if flash.0.is_some() {
        builder.cookie(flash_removal_cookie());
    }
    Ok(builder.body(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{Order, OrderDetails};
    use crate::presentation::flash::Flash;
    use chrono::{NaiveDate, Utc};

    fn user(is_admin: bool) -> User {
        User {
            id: "u-1".to_string(),
            first_name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$secret-material".to_string(),
            is_admin,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_layout_for_admin_user_with_flash() {
        let layout = Layout::new("Home", &IncomingFlash(Some(Flash::LoggedIn)), Some(&user(true)));
        assert!(layout.signed_in);
        assert!(layout.is_admin);
        assert_eq!(layout.user_name, "Ada Lovelace");
        assert_eq!(layout.flash_message, "you were logged in");
    }

    #[test]
    fn test_login_template_shows_flash() {
        let html = LoginTemplate {
            layout: Layout::new(
                "Login to continue",
                &IncomingFlash(Some(Flash::LoginFailed)),
                None,
            ),
        }
        .render()
        .unwrap();
        assert!(html.contains("Login to continue"));
        assert!(html.contains("Login Failed. please try again"));
    }

    #[test]
    fn test_sign_up_template_escapes_echoed_values() {
        let html = SignUpTemplate {
            layout: Layout::bare("Please fix the following errors:"),
            errors: vec![FieldError {
                field: "first_name",
                message: "First name must be alphanumeric".to_string(),
            }],
            first_name: "<script>".to_string(),
            surname: String::new(),
            email: String::new(),
        }
        .render()
        .unwrap();
        assert!(html.contains("First name must be alphanumeric"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_order_row_for_dangling_hotel() {
        let joined = OrderWithHotel {
            order: Order {
                id: "o-1".to_string(),
                user_id: "u-1".to_string(),
                hotel_id: "gone".to_string(),
                order_details: OrderDetails {
                    duration: 2,
                    date_of_departure: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
                    number_of_guests: 4,
                },
                created_at: Utc::now(),
            },
            hotel_data: Vec::new(),
        };
        let row = OrderRow::from(&joined);
        assert_eq!(row.hotel_name, "Hotel no longer listed");
        assert_eq!(row.total_cost, "-");
        assert_eq!(row.departure, "09 March 2025");
    }
}
