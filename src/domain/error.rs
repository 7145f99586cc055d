use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("A user with the given email is already registered")]
    EmailTaken,
    #[error("Hotel not found: {0}")]
    HotelNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
