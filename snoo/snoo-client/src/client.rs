use crate::auth::ApiError;
use crate::error::Result;
use crate::paths::{PageParams, Paths};
use crate::session::Session;
use crate::transport::{HttpTransport, Transport};
use snoo::prelude::*;
use std::fmt::Display;
use tokio_util::sync::CancellationToken;

/// One page of a front page or subreddit listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub links: Vec<Link>,
    /// Fullname to pass as `after` for the next page.
    pub after: Option<String>,
    pub before: Option<String>,
}

/// A post with its comment tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentThread {
    pub link: Option<Link>,
    /// Top level comments. Replies hang off each comment.
    pub comments: Vec<Comment>,
    /// Stubs for top level comments that were left out of the response.
    pub more: Vec<More>,
}

/// Logs a failed call and turns it into "no result".
trait OrLog<T> {
    fn or_log(self, context: impl Display) -> Option<T>;
}

impl<T, E: Display> OrLog<T> for std::result::Result<T, E> {
    fn or_log(self, context: impl Display) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("{}: {}", context, err);
                None
            }
        }
    }
}

pub struct RedditClient<T = HttpTransport> {
    session: Session<T>,
    paths: Paths,
}

impl RedditClient<HttpTransport> {
    pub fn new(config: &RedditConfig) -> Result<Self> {
        Ok(Self::with_transport(config, HttpTransport::new(config)?))
    }
}

impl<T: Transport> RedditClient<T> {
    pub fn with_transport(config: &RedditConfig, transport: T) -> Self {
        debug!(
            "Creating Reddit client for {} with a {}ms request interval",
            config.domain, config.request_interval_ms
        );
        Self {
            session: Session::new(transport, config.request_interval()),
            paths: Paths::new(config),
        }
    }

    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.session.cancel_token()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.session.is_logged_in().await
    }

    /// Messages of the errors the API reported on the last login attempt.
    pub async fn errors(&self) -> Vec<String> {
        self.session.errors().await
    }

    pub async fn api_errors(&self) -> Vec<ApiError> {
        self.session.api_errors().await
    }

    pub async fn login(&self, user: &str, passwd: &str) -> bool {
        match self.paths.login(user).or_log("Cannot build login URL") {
            Some(url) => self.session.login(&url, user, passwd).await,
            None => false,
        }
    }

    pub async fn logout(&self) -> bool {
        match self.paths.logout().or_log("Cannot build logout URL") {
            Some(url) => self.session.logout(&url).await,
            None => {
                self.session.clear().await;
                true
            }
        }
    }

    /// The logged in account. `None` without a network call when logged out.
    pub async fn get_me(&self) -> Option<Account> {
        let url = self.paths.me().or_log("Cannot build account URL")?;
        let decoded = self
            .session
            .get_authenticated(&url)
            .await
            .or_log("Failed to fetch the current account")??;
        let thing = decoded.into_first()?;
        if let Some(err) = thing.error() {
            warn!("Could not read account from {}: {}", url, err);
        }
        thing.into_variant::<Account>()
    }

    pub async fn get_front_page(&self, params: &PageParams) -> Option<Page> {
        self.get_page(None, params).await
    }

    /// A page of links from `subreddit`, or from the front page for `None`.
    pub async fn get_page(&self, subreddit: Option<&str>, params: &PageParams) -> Option<Page> {
        let url = self
            .paths
            .page(subreddit, params)
            .or_log("Cannot build page URL")?;
        let decoded = self
            .session
            .get(&url)
            .await
            .or_log(format!("Failed to fetch {}", url))?;
        let listing = into_listing(decoded.into_first()?, &url)?;
        Some(Page {
            after: listing.after.clone(),
            before: listing.before.clone(),
            links: listing.into_data_list(),
        })
    }

    /// The post and comment tree for `link_id`. Accepts bare ids or
    /// fullnames.
    pub async fn get_comments(&self, link_id: &str) -> Option<CommentThread> {
        let url = self
            .paths
            .comments(link_id)
            .or_log("Cannot build comments URL")?;
        self.get_thread(&url).await
    }

    /// Like [`RedditClient::get_comments`], scoped to the subtree rooted at
    /// `comment_id`.
    pub async fn get_more_comments(
        &self,
        link_id: &str,
        comment_id: &str,
    ) -> Option<CommentThread> {
        let url = self
            .paths
            .more_comments(link_id, comment_id)
            .or_log("Cannot build comments URL")?;
        self.get_thread(&url).await
    }

    async fn get_thread(&self, url: &str) -> Option<CommentThread> {
        let decoded = self
            .session
            .get(url)
            .await
            .or_log(format!("Failed to fetch {}", url))?;
        let mut listings = decoded.into_vec().into_iter();
        let post = into_listing(listings.next()?, url)?;

        let mut thread = CommentThread {
            link: post.into_data_list::<Link>().into_iter().next(),
            comments: Vec::new(),
            more: Vec::new(),
        };
        for thing in listings {
            let listing = into_listing(thing, url)?;
            thread.more.extend(listing.more().into_iter().cloned());
            thread.comments.extend(listing.into_data_list::<Comment>());
        }
        Some(thread)
    }
}

/// Unwraps a listing envelope, logging records that failed to project.
fn into_listing(thing: Thing, url: &str) -> Option<Listing> {
    let listing = match thing.data {
        Ok(ThingData::Listing(listing)) => listing,
        Ok(other) => {
            warn!("Expected a listing from {}, got {}", url, other.kind());
            return None;
        }
        Err(err) => {
            warn!("Could not read listing from {}: {}", url, err);
            return None;
        }
    };
    for (kind, err) in listing.errors() {
        warn!("Skipping {} record from {}: {}", kind, url, err);
    }
    Some(listing)
}
