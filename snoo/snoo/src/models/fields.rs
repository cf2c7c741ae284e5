use super::time::{self, Edited};
use super::Kind;
use crate::error::ProjectionError;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub(crate) type FieldResult<T> = Result<T, ProjectionError>;

/// Typed, by-name access to an envelope's property bag. Keys missing from the
/// bag and keys holding `null` both read as `None`.
pub(crate) struct Fields<'a> {
    kind: Kind,
    bag: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn new(kind: Kind, bag: &'a Map<String, Value>) -> Self {
        Self { kind, bag }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn bag(&self) -> &'a Map<String, Value> {
        self.bag
    }

    pub fn raw(&self, field: &'static str) -> Option<&'a Value> {
        match self.bag.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    fn required<T>(&self, field: &'static str, value: FieldResult<Option<T>>) -> FieldResult<T> {
        value?.ok_or(ProjectionError::MissingField {
            kind: self.kind,
            field,
        })
    }

    fn invalid(&self, field: &'static str, expected: &'static str) -> ProjectionError {
        ProjectionError::InvalidField {
            kind: self.kind,
            field,
            expected,
        }
    }

    pub fn string(&self, field: &'static str) -> FieldResult<Option<String>> {
        match self.raw(field) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(_) => Err(self.invalid(field, "string")),
        }
    }

    pub fn req_string(&self, field: &'static str) -> FieldResult<String> {
        self.required(field, self.string(field))
    }

    pub fn boolean(&self, field: &'static str) -> FieldResult<Option<bool>> {
        match self.raw(field) {
            None => Ok(None),
            Some(Value::Bool(value)) => Ok(Some(*value)),
            Some(_) => Err(self.invalid(field, "boolean")),
        }
    }

    /// Reads an integer counter. Whole floats such as `5000.0` are accepted.
    pub fn integer(&self, field: &'static str) -> FieldResult<Option<i64>> {
        match self.raw(field) {
            None => Ok(None),
            Some(Value::Number(number)) => {
                if let Some(value) = number.as_i64() {
                    return Ok(Some(value));
                }
                match number.as_f64() {
                    Some(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
                        Ok(Some(value as i64))
                    }
                    _ => Err(self.invalid(field, "integer")),
                }
            }
            Some(_) => Err(self.invalid(field, "integer")),
        }
    }

    pub fn req_integer(&self, field: &'static str) -> FieldResult<i64> {
        self.required(field, self.integer(field))
    }

    pub fn timestamp(&self, field: &'static str) -> FieldResult<Option<DateTime<Utc>>> {
        match self.raw(field) {
            None => Ok(None),
            Some(Value::Number(number)) => number
                .as_f64()
                .and_then(time::from_unix_seconds)
                .map(Some)
                .ok_or_else(|| self.invalid(field, "unix timestamp")),
            Some(_) => Err(self.invalid(field, "unix timestamp")),
        }
    }

    pub fn req_timestamp(&self, field: &'static str) -> FieldResult<DateTime<Utc>> {
        self.required(field, self.timestamp(field))
    }

    pub fn edited(&self, field: &'static str) -> FieldResult<Edited> {
        match self.raw(field) {
            None | Some(Value::Bool(false)) => Ok(Edited::NeverEdited),
            Some(Value::Bool(true)) => Ok(Edited::EditedUnknownTime),
            Some(Value::Number(number)) => number
                .as_f64()
                .and_then(time::from_unix_seconds)
                .map(Edited::EditedAt)
                .ok_or_else(|| self.malformed_edited(number)),
            Some(other) => Err(self.malformed_edited(other)),
        }
    }

    fn malformed_edited(&self, value: impl ToString) -> ProjectionError {
        ProjectionError::MalformedEdited {
            kind: self.kind,
            value: value.to_string(),
        }
    }
}
