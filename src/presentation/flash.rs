//! One-shot notifications carried to the next rendered page in a cookie.
//!
//! The cookie holds only a slug naming a known message, so nothing
//! user-controlled is ever echoed back from it.

use actix_web::cookie::Cookie;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{Ready, ready};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    LoggedIn,
    LoginFailed,
    LoggedOut,
    Registered,
    OrderPlaced,
    LoginRequired,
}

impl Flash {
    const ALL: [Flash; 6] = [
        Flash::LoggedIn,
        Flash::LoginFailed,
        Flash::LoggedOut,
        Flash::Registered,
        Flash::OrderPlaced,
        Flash::LoginRequired,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Flash::LoggedIn => "logged-in",
            Flash::LoginFailed => "login-failed",
            Flash::LoggedOut => "logged-out",
            Flash::Registered => "registered",
            Flash::OrderPlaced => "order-placed",
            Flash::LoginRequired => "login-required",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.slug() == slug)
    }

    pub fn kind(self) -> &'static str {
        match self {
            Flash::LoginFailed | Flash::LoginRequired => "error",
            _ => "info",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::LoggedIn => "you were logged in",
            Flash::LoginFailed => "Login Failed. please try again",
            Flash::LoggedOut => "You are now Logged out",
            Flash::Registered => "Welcome! Your account has been created",
            Flash::OrderPlaced => "Thank you! Your order has been placed!",
            Flash::LoginRequired => "Please log in to continue",
        }
    }

    pub fn cookie(self) -> Cookie<'static> {
        Cookie::build(FLASH_COOKIE, self.slug())
            .path("/")
            .http_only(true)
            .finish()
    }
}

/// Cookie that makes the browser drop a flash it has already shown.
pub fn flash_removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// The flash set by the previous response, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncomingFlash(pub Option<Flash>);

impl FromRequest for IncomingFlash {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let flash = req
            .cookie(FLASH_COOKIE)
            .and_then(|c| Flash::from_slug(c.value()));
        ready(Ok(IncomingFlash(flash)))
    }
}
