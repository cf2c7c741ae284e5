//! Turns raw response bodies into envelopes.
//!
//! Decoding runs in three steps:
//!
//! 1. The body is parsed into a JSON tree. Malformed JSON fails the whole
//!    decode.
//! 2. The tree is normalized to smooth over two quirks of the API:
//!    * a comment without replies carries `"replies": ""` instead of an empty
//!      listing. The key is removed, which projects to an empty listing.
//!    * a `children` array can be a flat list of id strings (as sent for
//!      `more` stubs) instead of envelopes. Such arrays carry nothing that can
//!      be projected and are removed.
//! 3. The top-level value is projected. An object becomes a single envelope;
//!    an array (the comments endpoint) becomes one envelope per element. Any
//!    other top-level shape fails the whole decode. Problems below the top
//!    level are recorded on the affected envelope only.

use crate::error::DecodeError;
use crate::models::Thing;
use serde_json::Value;

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    One(Thing),
    Many(Vec<Thing>),
}

impl Decoded {
    /// The single envelope, or the first one of an array response.
    pub fn into_first(self) -> Option<Thing> {
        match self {
            Self::One(thing) => Some(thing),
            Self::Many(things) => things.into_iter().next(),
        }
    }

    pub fn into_vec(self) -> Vec<Thing> {
        match self {
            Self::One(thing) => vec![thing],
            Self::Many(things) => things,
        }
    }
}

/// Decodes a response body. The buffer is used as scratch space by the parser
/// and is left in an unspecified state.
pub fn decode(body: &mut [u8]) -> Result<Decoded, DecodeError> {
    let mut value: Value = simd_json::serde::from_slice(body)?;
    normalize(&mut value);
    match &value {
        Value::Object(_) => Ok(Decoded::One(envelope(&value)?)),
        Value::Array(elements) => elements
            .iter()
            .map(envelope)
            .collect::<Result<Vec<_>, _>>()
            .map(Decoded::Many),
        _ => Err(DecodeError::Shape("expected an envelope or an array of envelopes")),
    }
}

fn envelope(value: &Value) -> Result<Thing, DecodeError> {
    let is_envelope = value
        .as_object()
        .map(|object| {
            object.get("kind").map_or(false, Value::is_string)
                && object.get("data").map_or(false, Value::is_object)
        })
        .unwrap_or(false);
    if !is_envelope {
        return Err(DecodeError::Shape("top-level value is not a {kind, data} envelope"));
    }
    Ok(Thing::from_value(value))
}

/// Removes the two malformed shapes described in the module docs, at any
/// depth.
pub fn normalize(value: &mut Value) {
    match value {
        Value::Object(object) => {
            if matches!(object.get("replies"), Some(Value::String(s)) if s.is_empty()) {
                object.remove("replies");
            }
            if object.get("children").map_or(false, is_id_list) {
                object.remove("children");
            }
            object.values_mut().for_each(normalize);
        }
        Value::Array(elements) => elements.iter_mut().for_each(normalize),
        _ => {}
    }
}

fn is_id_list(value: &Value) -> bool {
    match value {
        Value::Array(elements) => !elements.is_empty() && elements.iter().all(Value::is_string),
        _ => false,
    }
}
