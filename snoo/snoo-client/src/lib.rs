mod auth;
mod client;
mod error;
mod paths;
mod rate_limiter;
mod session;
mod transport;

pub use self::auth::{ApiError, Credentials, SessionState};
pub use self::client::{CommentThread, Page, RedditClient};
pub use self::error::{Error, Result};
pub use self::paths::{PageParams, Paths};
pub use self::rate_limiter::RateLimiter;
pub use self::session::Session;
pub use self::transport::{HttpTransport, Request, Response, Transport, SESSION_COOKIE};
pub use tokio_util::sync::CancellationToken;
