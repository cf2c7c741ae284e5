use super::fields::{FieldResult, Fields};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Subreddit {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub subscribers: Option<i64>,
    pub over18: Option<bool>,
    pub created: DateTime<Utc>,
    pub created_utc: DateTime<Utc>,
}

impl Subreddit {
    pub(super) fn project(fields: &Fields<'_>) -> FieldResult<Self> {
        Ok(Self {
            id: fields.req_string("id")?,
            name: fields.req_string("name")?,
            display_name: fields.req_string("display_name")?,
            title: fields.string("title")?,
            url: fields.string("url")?,
            description: fields.string("description")?,
            subscribers: fields.integer("subscribers")?,
            over18: fields.boolean("over18")?,
            created: fields.req_timestamp("created")?,
            created_utc: fields.req_timestamp("created_utc")?,
        })
    }
}
