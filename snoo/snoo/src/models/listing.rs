use super::fields::{FieldResult, Fields};
use super::{Comment, Link, More, Thing, Variant};
use crate::error::ProjectionError;
use serde_json::Value;

/// A page of envelopes, with fullnames to continue paging in either
/// direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub modhash: Option<String>,
    pub children: Vec<Thing>,
    pub after: Option<String>,
    pub before: Option<String>,
}

impl Listing {
    pub(super) fn project(fields: &Fields<'_>) -> FieldResult<Self> {
        let children = match fields.raw("children") {
            None => Vec::new(),
            Some(Value::Array(children)) => children.iter().map(Thing::from_value).collect(),
            Some(_) => {
                return Err(ProjectionError::InvalidField {
                    kind: fields.kind(),
                    field: "children",
                    expected: "array of envelopes",
                })
            }
        };
        Ok(Self {
            modhash: fields.string("modhash")?,
            children,
            after: fields.string("after")?,
            before: fields.string("before")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The children that projected to `T`. Children of other kinds and
    /// children that failed to project are skipped.
    pub fn data_list<T: Variant>(&self) -> Vec<&T> {
        self.children.iter().filter_map(Thing::get::<T>).collect()
    }

    /// Owned counterpart of [`Listing::data_list`].
    pub fn into_data_list<T: Variant>(self) -> Vec<T> {
        self.children
            .into_iter()
            .filter_map(Thing::into_variant::<T>)
            .collect()
    }

    pub fn links(&self) -> Vec<&Link> {
        self.data_list()
    }

    pub fn comments(&self) -> Vec<&Comment> {
        self.data_list()
    }

    pub fn more(&self) -> Vec<&More> {
        self.data_list()
    }

    /// Children that could not be projected, paired with their raw tag.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &ProjectionError)> + '_ {
        self.children
            .iter()
            .filter_map(|child| child.error().map(|err| (child.kind.as_str(), err)))
    }
}
