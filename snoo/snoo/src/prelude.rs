pub use crate::config::RedditConfig;
pub use crate::decode::Decoded;
pub use crate::error::{DecodeError, ProjectionError};
pub use crate::models::{
    Account, Comment, Edited, Fullname, Kind, Link, Listing, Message, More, Subreddit, Thing,
    ThingData, Variant,
};
pub use std::{sync::Arc, time::Duration};
pub use tracing::{debug, error, info, warn};
