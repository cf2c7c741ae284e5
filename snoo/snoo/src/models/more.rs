use super::fields::{FieldResult, Fields};

/// Placeholder for comments that were not included in a comment tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct More {
    pub count: i64,
    pub id: String,
    pub name: String,
}

impl More {
    pub(super) fn project(fields: &Fields<'_>) -> FieldResult<Self> {
        Ok(Self {
            count: fields.req_integer("count")?,
            id: fields.req_string("id")?,
            name: fields.req_string("name")?,
        })
    }
}
