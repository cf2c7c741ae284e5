use super::Kind;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref FULLNAME_REGEX: Regex = Regex::new(r"^(t[1-6])_([0-9a-z]+)$").unwrap();
}

/// A type prefix plus an id, e.g. `t3_136ypz`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fullname {
    pub kind: Kind,
    pub id: String,
}

impl Fullname {
    pub fn parse(text: &str) -> Option<Self> {
        let captures = FULLNAME_REGEX.captures(text)?;
        let kind = captures.get(1)?.as_str().parse().ok()?;
        Some(Self {
            kind,
            id: captures.get(2)?.as_str().to_owned(),
        })
    }

    /// Strips the type prefix from a fullname. Bare ids are returned as is.
    pub fn strip(text: &str) -> &str {
        match FULLNAME_REGEX.captures(text).and_then(|c| c.get(2)) {
            Some(id) => id.as_str(),
            None => text,
        }
    }
}

impl fmt::Display for Fullname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind, self.id)
    }
}
