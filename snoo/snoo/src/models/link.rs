use super::fields::{FieldResult, Fields};
use super::Edited;
use chrono::{DateTime, Utc};

/// A submitted post.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: String,
    pub name: String,
    pub title: String,
    pub domain: Option<String>,
    pub url: Option<String>,
    pub permalink: Option<String>,
    pub thumbnail: Option<String>,
    pub selftext: Option<String>,
    pub selftext_html: Option<String>,
    pub subreddit: Option<String>,
    pub subreddit_id: Option<String>,
    pub author: Option<String>,
    pub author_flair_css_class: Option<String>,
    pub author_flair_text: Option<String>,
    pub link_flair_css_class: Option<String>,
    pub link_flair_text: Option<String>,
    pub banned_by: Option<String>,
    pub approved_by: Option<String>,
    pub likes: Option<bool>,
    pub score: Option<i64>,
    pub ups: Option<i64>,
    pub downs: Option<i64>,
    pub num_comments: Option<i64>,
    pub num_reports: Option<i64>,
    pub over_18: Option<bool>,
    pub is_self: Option<bool>,
    pub saved: Option<bool>,
    pub clicked: Option<bool>,
    pub hidden: Option<bool>,
    pub edited: Edited,
    pub created: DateTime<Utc>,
    pub created_utc: DateTime<Utc>,
}

impl Link {
    pub(super) fn project(fields: &Fields<'_>) -> FieldResult<Self> {
        Ok(Self {
            id: fields.req_string("id")?,
            name: fields.req_string("name")?,
            title: fields.req_string("title")?,
            domain: fields.string("domain")?,
            url: fields.string("url")?,
            permalink: fields.string("permalink")?,
            thumbnail: fields.string("thumbnail")?,
            selftext: fields.string("selftext")?,
            selftext_html: fields.string("selftext_html")?,
            subreddit: fields.string("subreddit")?,
            subreddit_id: fields.string("subreddit_id")?,
            author: fields.string("author")?,
            author_flair_css_class: fields.string("author_flair_css_class")?,
            author_flair_text: fields.string("author_flair_text")?,
            link_flair_css_class: fields.string("link_flair_css_class")?,
            link_flair_text: fields.string("link_flair_text")?,
            banned_by: fields.string("banned_by")?,
            approved_by: fields.string("approved_by")?,
            likes: fields.boolean("likes")?,
            score: fields.integer("score")?,
            ups: fields.integer("ups")?,
            downs: fields.integer("downs")?,
            num_comments: fields.integer("num_comments")?,
            num_reports: fields.integer("num_reports")?,
            over_18: fields.boolean("over_18")?,
            is_self: fields.boolean("is_self")?,
            saved: fields.boolean("saved")?,
            clicked: fields.boolean("clicked")?,
            hidden: fields.boolean("hidden")?,
            edited: fields.edited("edited")?,
            created: fields.req_timestamp("created")?,
            created_utc: fields.req_timestamp("created_utc")?,
        })
    }
}
