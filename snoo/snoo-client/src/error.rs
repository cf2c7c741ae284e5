use http::StatusCode;
use snoo::DecodeError;
use thiserror::Error as ErrorTrait;

pub type Result<T> = std::result::Result<T, Error>;

/// The sum type of all errors that might result from a single API call.
#[derive(ErrorTrait, Debug)]
pub enum Error {
    #[error("HTTP error: {:?}", .0)]
    Http(#[from] reqwest::Error),
    #[error("Reddit returned a non-success status: {}", .0)]
    Status(StatusCode),
    #[error("Decode error: {}", .0)]
    Decode(#[from] DecodeError),
    #[error("JSON error: {:?}", .0)]
    Json(#[from] simd_json::Error),
    #[error("Invalid URL: {}", .0)]
    InvalidUrl(String),
    #[error("Request cancelled")]
    Cancelled,
}
