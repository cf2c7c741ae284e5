mod account;
mod comment;
mod fields;
mod fullname;
mod link;
mod listing;
mod message;
mod more;
mod subreddit;
pub mod time;

pub use self::account::Account;
pub use self::comment::{Comment, Descendants};
pub use self::fullname::Fullname;
pub use self::link::Link;
pub use self::listing::Listing;
pub use self::message::Message;
pub use self::more::More;
pub use self::subreddit::Subreddit;
pub use self::time::Edited;

use self::fields::{FieldResult, Fields};
use crate::error::ProjectionError;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The discriminant tag of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Listing,
    Comment,
    Account,
    Link,
    Message,
    Subreddit,
    More,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Listing => "Listing",
            Self::Comment => "t1",
            Self::Account => "t2",
            Self::Link => "t3",
            Self::Message => "t4",
            Self::Subreddit => "t5",
            Self::More => "more",
        }
    }
}

impl FromStr for Kind {
    type Err = ProjectionError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(match tag {
            "Listing" => Self::Listing,
            "t1" => Self::Comment,
            "t2" => Self::Account,
            "t3" => Self::Link,
            "t4" => Self::Message,
            "t5" => Self::Subreddit,
            "more" => Self::More,
            other => return Err(ProjectionError::UnknownKind(other.to_owned())),
        })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed variant record.
#[derive(Debug, Clone, PartialEq)]
pub enum ThingData {
    Listing(Listing),
    Comment(Box<Comment>),
    Account(Account),
    Link(Box<Link>),
    Message(Message),
    Subreddit(Subreddit),
    More(More),
}

impl ThingData {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Listing(_) => Kind::Listing,
            Self::Comment(_) => Kind::Comment,
            Self::Account(_) => Kind::Account,
            Self::Link(_) => Kind::Link,
            Self::Message(_) => Kind::Message,
            Self::Subreddit(_) => Kind::Subreddit,
            Self::More(_) => Kind::More,
        }
    }

    fn project(kind: Kind, fields: &Fields<'_>) -> FieldResult<Self> {
        Ok(match kind {
            Kind::Listing => Self::Listing(Listing::project(fields)?),
            Kind::Comment => Self::Comment(Box::new(Comment::project(fields)?)),
            Kind::Account => Self::Account(Account::project(fields)?),
            Kind::Link => Self::Link(Box::new(Link::project(fields)?)),
            Kind::Message => Self::Message(Message::project(fields)?),
            Kind::Subreddit => Self::Subreddit(Subreddit::project(fields)?),
            Kind::More => Self::More(More::project(fields)?),
        })
    }
}

/// Implemented by every variant record so callers can pull a concrete type
/// out of an envelope.
pub trait Variant: Sized {
    const KIND: Kind;

    fn from_data(data: &ThingData) -> Option<&Self>;
    fn from_data_owned(data: ThingData) -> Option<Self>;
}

macro_rules! impl_variant {
    ($variant:ident, $ty:ty, boxed) => {
        impl Variant for $ty {
            const KIND: Kind = Kind::$variant;

            fn from_data(data: &ThingData) -> Option<&Self> {
                match data {
                    ThingData::$variant(inner) => Some(&**inner),
                    _ => None,
                }
            }

            fn from_data_owned(data: ThingData) -> Option<Self> {
                match data {
                    ThingData::$variant(inner) => Some(*inner),
                    _ => None,
                }
            }
        }
    };
    ($variant:ident, $ty:ty) => {
        impl Variant for $ty {
            const KIND: Kind = Kind::$variant;

            fn from_data(data: &ThingData) -> Option<&Self> {
                match data {
                    ThingData::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_data_owned(data: ThingData) -> Option<Self> {
                match data {
                    ThingData::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_variant!(Listing, Listing);
impl_variant!(Comment, Comment, boxed);
impl_variant!(Account, Account);
impl_variant!(Link, Link, boxed);
impl_variant!(Message, Message);
impl_variant!(Subreddit, Subreddit);
impl_variant!(More, More);

/// A `{kind, data}` envelope. The raw tag is always kept; `data` holds either
/// the projected record or the reason this one envelope could not be
/// projected.
#[derive(Debug, Clone, PartialEq)]
pub struct Thing {
    pub kind: String,
    pub data: Result<ThingData, ProjectionError>,
}

impl Thing {
    /// Builds an envelope from an already normalized JSON value. Never fails
    /// as a whole; problems are recorded on the returned envelope.
    pub fn from_value(value: &Value) -> Self {
        let (tag, bag) = match value {
            Value::Object(envelope) => (
                envelope.get("kind").and_then(Value::as_str),
                envelope.get("data").and_then(Value::as_object),
            ),
            _ => (None, None),
        };
        let (tag, bag) = match (tag, bag) {
            (Some(tag), Some(bag)) => (tag, bag),
            (tag, _) => {
                return Self {
                    kind: tag.unwrap_or_default().to_owned(),
                    data: Err(ProjectionError::MalformedEnvelope),
                }
            }
        };
        let data = tag
            .parse::<Kind>()
            .and_then(|kind| ThingData::project(kind, &Fields::new(kind, bag)));
        Self {
            kind: tag.to_owned(),
            data,
        }
    }

    /// The parsed tag, or `None` for tags this crate does not model.
    pub fn kind(&self) -> Option<Kind> {
        self.kind.parse().ok()
    }

    pub fn data(&self) -> Option<&ThingData> {
        self.data.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ProjectionError> {
        self.data.as_ref().err()
    }

    pub fn get<T: Variant>(&self) -> Option<&T> {
        self.data().and_then(T::from_data)
    }

    pub fn into_variant<T: Variant>(self) -> Option<T> {
        self.data.ok().and_then(T::from_data_owned)
    }
}
