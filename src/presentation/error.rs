use crate::domain::error::DomainError;
use crate::presentation::flash::Flash;
use crate::presentation::views::{ErrorTemplate, Layout};
use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use thiserror::Error;
use tracing::{error, warn};

/// Centralized error handling for the site. Handlers return this and
/// actix turns it into a page or a redirect.
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Login required")]
    NotAuthenticated,
    #[error("Administrator access required")]
    NotAdmin,
    #[error("Database error: {0}")]
    Database(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SiteError {
    fn user_message(&self) -> String {
        match self {
            SiteError::Validation(msg)
            | SiteError::NotFound(msg)
            | SiteError::Conflict(msg)
            | SiteError::Unauthorized(msg) => msg.clone(),
            // Storage and internal details stay in the logs.
            SiteError::Database(_) | SiteError::Internal(_) => {
                "Something went wrong. Please try again later.".to_string()
            }
            SiteError::NotAuthenticated | SiteError::NotAdmin => self.to_string(),
        }
    }
}

impl ResponseError for SiteError {
    fn status_code(&self) -> StatusCode {
        match self {
            SiteError::Validation(_) => StatusCode::BAD_REQUEST,
            SiteError::NotFound(_) => StatusCode::NOT_FOUND,
            SiteError::Conflict(_) => StatusCode::CONFLICT,
            SiteError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            SiteError::NotAuthenticated | SiteError::NotAdmin => StatusCode::SEE_OTHER,
            SiteError::Database(_) | SiteError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        match self {
            SiteError::NotAuthenticated => {
                warn!(error = %error_msg, "Redirecting anonymous visitor to login");
                return HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, "/login"))
                    .cookie(Flash::LoginRequired.cookie())
                    .finish();
            }
            SiteError::NotAdmin => {
                warn!(error = %error_msg, "Redirecting non-admin away from admin page");
                return HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, "/"))
                    .finish();
            }
            SiteError::Validation(_)
            | SiteError::NotFound(_)
            | SiteError::Conflict(_)
            | SiteError::Unauthorized(_) => {
                warn!(error = %error_msg, status = %status, "Request rejected")
            }
            SiteError::Database(_) => {
                error!(error = %error_msg, status = %status, "Database error")
            }
            SiteError::Internal(_) => {
                error!(error = %error_msg, status = %status, "Internal error")
            }
        }

        let page = ErrorTemplate {
            layout: Layout::bare("Error"),
            status: status.as_u16(),
            message: self.user_message(),
        };

        match page.render() {
            Ok(html) => HttpResponse::build(status)
                .content_type(ContentType::html())
                .body(html),
            Err(e) => {
                error!(error = %e, "Failed to render error page");
                HttpResponse::build(status)
                    .content_type(ContentType::plaintext())
                    .body(self.user_message())
            }
        }
    }
}

impl From<anyhow::Error> for SiteError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::EmailTaken) => SiteError::Conflict(DomainError::EmailTaken.to_string()),
            Some(DomainError::HotelNotFound(id)) => {
                SiteError::NotFound(format!("Hotel not found: {}", id))
            }
            Some(DomainError::Validation(msg)) => SiteError::Validation(msg.clone()),
            Some(DomainError::Unauthorized(msg)) => SiteError::Unauthorized(msg.clone()),
            Some(DomainError::Internal(msg)) => SiteError::Internal(msg.clone()),
            None => SiteError::Database(err.to_string()),
        }
    }
}
