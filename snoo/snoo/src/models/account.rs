use super::fields::{FieldResult, Fields};
use chrono::{DateTime, Utc};

/// A user account, as returned for the logged in user.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub modhash: Option<String>,
    pub link_karma: Option<i64>,
    pub comment_karma: Option<i64>,
    pub is_gold: Option<bool>,
    pub is_mod: Option<bool>,
    /// Unread messages or replies.
    pub has_mail: Option<bool>,
    /// Unread moderator mail.
    pub has_mod_mail: Option<bool>,
    pub created: DateTime<Utc>,
    pub created_utc: DateTime<Utc>,
}

impl Account {
    pub(super) fn project(fields: &Fields<'_>) -> FieldResult<Self> {
        Ok(Self {
            id: fields.req_string("id")?,
            name: fields.req_string("name")?,
            modhash: fields.string("modhash")?,
            link_karma: fields.integer("link_karma")?,
            comment_karma: fields.integer("comment_karma")?,
            is_gold: fields.boolean("is_gold")?,
            is_mod: fields.boolean("is_mod")?,
            has_mail: fields.boolean("has_mail")?,
            has_mod_mail: fields.boolean("has_mod_mail")?,
            created: fields.req_timestamp("created")?,
            created_utc: fields.req_timestamp("created_utc")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Thing;
    use serde_json::json;

    #[test]
    fn test_account() {
        let account = Thing::from_value(&json!({
            "kind": "t2",
            "data": {
                "has_mail": false, "name": "username", "created": 1213716360.0,
                "modhash": "f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0",
                "created_utc": 1213716360.0, "link_karma": 5000,
                "comment_karma": 10000, "is_gold": false, "is_mod": true,
                "id": "0ffff", "has_mod_mail": false, "over_18": true
            }
        }))
        .into_variant::<Account>()
        .unwrap();

        assert_eq!(account.id, "0ffff");
        assert_eq!(account.name, "username");
        assert_eq!(
            account.modhash.as_deref(),
            Some("f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0")
        );
        assert_eq!(account.link_karma, Some(5000));
        assert_eq!(account.comment_karma, Some(10000));
        assert_eq!(account.is_gold, Some(false));
        assert_eq!(account.is_mod, Some(true));
        assert_eq!(account.has_mail, Some(false));
        assert_eq!(account.has_mod_mail, Some(false));
        assert_eq!(account.created.timestamp(), 1213716360);
        assert_eq!(account.created_utc.timestamp(), 1213716360);
    }

    #[test]
    fn test_null_karma_is_absent() {
        let account = Thing::from_value(&json!({
            "kind": "t2",
            "data": {
                "id": "0ffff", "name": "username", "link_karma": null,
                "created": 0, "created_utc": 0
            }
        }))
        .into_variant::<Account>()
        .unwrap();
        assert_eq!(account.link_karma, None);
        assert_eq!(account.comment_karma, None);
        assert_eq!(account.is_gold, None);
    }
}
