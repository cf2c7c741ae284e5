use super::fields::{FieldResult, Fields};
use serde_json::{Map, Value};

/// Private messages are not modelled; the raw property bag is kept as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub raw: Map<String, Value>,
}

impl Message {
    pub(super) fn project(fields: &Fields<'_>) -> FieldResult<Self> {
        Ok(Self {
            raw: fields.bag().clone(),
        })
    }
}
