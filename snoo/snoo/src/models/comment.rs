use super::fields::{FieldResult, Fields};
use super::{Edited, Listing, Thing, ThingData};
use crate::error::ProjectionError;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub link_id: Option<String>,
    pub subreddit_id: Option<String>,
    pub subreddit: Option<String>,
    pub author: Option<String>,
    pub author_flair_css_class: Option<String>,
    pub author_flair_text: Option<String>,
    pub body: Option<String>,
    pub body_html: Option<String>,
    pub banned_by: Option<String>,
    pub approved_by: Option<String>,
    /// `Some(true)` for an upvote, `Some(false)` for a downvote by the
    /// logged in user.
    pub likes: Option<bool>,
    pub gilded: Option<i64>,
    pub ups: Option<i64>,
    pub downs: Option<i64>,
    pub num_reports: Option<i64>,
    /// Direct replies. Empty when the comment has none.
    pub replies: Listing,
    pub edited: Edited,
    pub created: DateTime<Utc>,
    pub created_utc: DateTime<Utc>,
}

impl Comment {
    pub(super) fn project(fields: &Fields<'_>) -> FieldResult<Self> {
        Ok(Self {
            id: fields.req_string("id")?,
            name: fields.req_string("name")?,
            parent_id: fields.string("parent_id")?,
            link_id: fields.string("link_id")?,
            subreddit_id: fields.string("subreddit_id")?,
            subreddit: fields.string("subreddit")?,
            author: fields.string("author")?,
            author_flair_css_class: fields.string("author_flair_css_class")?,
            author_flair_text: fields.string("author_flair_text")?,
            body: fields.string("body")?,
            body_html: fields.string("body_html")?,
            banned_by: fields.string("banned_by")?,
            approved_by: fields.string("approved_by")?,
            likes: fields.boolean("likes")?,
            gilded: fields.integer("gilded")?,
            ups: fields.integer("ups")?,
            downs: fields.integer("downs")?,
            num_reports: fields.integer("num_reports")?,
            replies: Self::project_replies(fields)?,
            edited: fields.edited("edited")?,
            created: fields.req_timestamp("created")?,
            created_utc: fields.req_timestamp("created_utc")?,
        })
    }

    fn project_replies(fields: &Fields<'_>) -> FieldResult<Listing> {
        let replies = match fields.raw("replies") {
            None => return Ok(Listing::default()),
            Some(replies) => Thing::from_value(replies),
        };
        match replies.data {
            Ok(ThingData::Listing(listing)) => Ok(listing),
            _ => Err(ProjectionError::InvalidField {
                kind: fields.kind(),
                field: "replies",
                expected: "listing",
            }),
        }
    }

    /// All nested replies, depth first, not including `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.replies.comments().into_iter().rev().collect(),
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Comment>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Comment;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.replies.comments().into_iter().rev());
        Some(next)
    }
}
