#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod decode;
pub mod error;
pub mod init;
pub mod models;
pub mod prelude;

pub use self::decode::{decode, Decoded};
pub use self::error::{DecodeError, ProjectionError};
