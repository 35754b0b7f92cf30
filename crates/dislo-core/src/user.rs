//! Users and their authentication tokens.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{AuthTokenId, UserId};
use crate::object::WorkingObject;

/// An authentication token bound to a user session.
///
/// The `token` string is opaque; in force-token mode it replaces the numeric user id
/// as the identity sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    /// Token record id.
    pub id: AuthTokenId,

    /// Owner of the token.
    pub user_id: UserId,

    /// When the token was issued.
    #[serde(with = "crate::datetime")]
    pub created_at: DateTime<Utc>,

    /// When the token was last touched.
    #[serde(default, with = "crate::datetime::option")]
    pub modified_at: Option<DateTime<Utc>>,

    /// Expiry, if the token expires.
    #[serde(default, with = "crate::datetime::option")]
    pub valid_until: Option<DateTime<Utc>>,

    /// Free-form information recorded at issue time (user agent, IP).
    #[serde(default)]
    pub meta_info: Option<String>,

    /// The opaque token value.
    pub token: String,
}

impl AuthToken {
    /// Whether the token has expired at `now`. Tokens without expiry never expire.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_until.is_some_and(|until| until <= now)
    }
}

impl WorkingObject for AuthToken {
    const TYPE_NAME: &'static str = "AuthToken";
}

/// A Dislo user account.
///
/// Users are never patched in place. A mutation on the server yields a new `User`
/// that replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user id.
    pub user_id: UserId,

    /// When the account was created.
    #[serde(with = "crate::datetime")]
    pub created_at: DateTime<Utc>,

    /// Whether logging in is disabled for this account.
    pub login_disabled: bool,

    /// Preferred language (ISO 639-1).
    pub language: String,

    /// Last successful login.
    #[serde(default, with = "crate::datetime::option")]
    pub last_login_date: Option<DateTime<Utc>>,

    /// IP address of the last login.
    #[serde(default)]
    pub last_login_ip: Option<String>,

    /// Application-defined metadata.
    #[serde(default, deserialize_with = "crate::maps::lenient")]
    pub meta_data: BTreeMap<String, String>,

    /// Account currency, once the user has been billed.
    #[serde(default)]
    pub currency_code: Option<String>,

    /// Verification state per verified attribute (e.g. `email`).
    #[serde(default, deserialize_with = "crate::maps::lenient")]
    pub verified_data: BTreeMap<String, Value>,

    /// Session token, present when the user came from a login.
    #[serde(default)]
    pub auth_token: Option<AuthToken>,
}

impl User {
    /// Build a new user carrying `auth_token` and every other field of `self`.
    ///
    /// Used to re-attach the session token to a user returned by an endpoint that
    /// does not echo the token back.
    #[must_use]
    pub fn with_auth_token(self, auth_token: Option<AuthToken>) -> Self {
        Self { auth_token, ..self }
    }

    /// Look up a metadata value.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta_data.get(key).map(String::as_str)
    }
}

impl WorkingObject for User {
    const TYPE_NAME: &'static str = "User";
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn token_json() -> Value {
        json!({
            "id": 5,
            "userId": 42,
            "createdAt": "2018-01-01 10:00:00",
            "modifiedAt": null,
            "validUntil": "2018-02-01 10:00:00",
            "metaInfo": "Mozilla/5.0",
            "token": "abc123"
        })
    }

    fn user_json() -> Value {
        json!({
            "userId": 42,
            "createdAt": "2017-05-04 08:15:00",
            "loginDisabled": false,
            "language": "de",
            "lastLoginDate": "2018-01-01 10:00:00",
            "lastLoginIp": "10.0.0.1",
            "metaData": {"firstName": "Ada"},
            "currencyCode": "EUR",
            "verifiedData": [],
            "authToken": token_json()
        })
    }

    #[test]
    fn decodes_full_user() {
        let user = User::from_response(&user_json()).unwrap();
        assert_eq!(user.user_id, UserId::new(42));
        assert_eq!(user.meta("firstName"), Some("Ada"));
        assert!(user.verified_data.is_empty());
        assert_eq!(user.auth_token.unwrap().token, "abc123");
    }

    #[test]
    fn optional_keys_default() {
        let user = User::from_response(&json!({
            "userId": "7",
            "createdAt": "2017-05-04 08:15:00",
            "loginDisabled": true,
            "language": "en"
        }))
        .unwrap();
        assert_eq!(user.user_id, UserId::new(7));
        assert!(user.auth_token.is_none());
        assert!(user.last_login_date.is_none());
        assert!(user.meta_data.is_empty());
    }

    #[test]
    fn missing_language_fails() {
        let mut raw = user_json();
        raw.as_object_mut().unwrap().remove("language");
        assert!(User::from_response(&raw).unwrap_err().is_deserialization());
    }

    #[test]
    fn user_roundtrip() {
        let user = User::from_response(&user_json()).unwrap();
        let encoded = user.to_value();
        assert_eq!(encoded["_type"], "User");
        assert_eq!(encoded["createdAt"], "2017-05-04 08:15:00");
        assert_eq!(User::from_response(&encoded).unwrap(), user);
    }

    #[test]
    fn with_auth_token_replaces_only_token() {
        let user = User::from_response(&user_json()).unwrap();
        let stripped = user.clone().with_auth_token(None);
        assert!(stripped.auth_token.is_none());
        assert_eq!(stripped.meta_data, user.meta_data);
        assert_eq!(stripped.with_auth_token(user.auth_token.clone()), user);
    }

    #[test]
    fn token_expiry() {
        let token = AuthToken::from_response(&token_json()).unwrap();
        let before = Utc.with_ymd_and_hms(2018, 1, 15, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2018, 3, 1, 0, 0, 0).unwrap();
        assert!(!token.is_expired_at(before));
        assert!(token.is_expired_at(after));
        assert_eq!(AuthToken::from_response(&token.to_value()).unwrap(), token);
    }

    #[test]
    fn token_roundtrip_keeps_sub_second_timestamps() {
        let created_at = Utc.timestamp_opt(1_500_000_000, 250_000_000).unwrap();
        let token = AuthToken {
            id: AuthTokenId::new(8),
            user_id: UserId::new(42),
            created_at,
            modified_at: Some(created_at + chrono::Duration::milliseconds(1_500)),
            valid_until: Some(Utc.timestamp_opt(1_600_000_000, 123_456_000).unwrap()),
            meta_info: Some("curl/8.0".into()),
            token: "xyz".into(),
        };

        let encoded = token.to_value();
        assert_eq!(encoded["createdAt"], "2017-07-14 02:40:00.250");
        assert_eq!(AuthToken::from_response(&encoded).unwrap(), token);
    }

    #[test]
    fn user_roundtrip_with_rfc3339_fraction() {
        let mut raw = user_json();
        raw["createdAt"] = json!("2018-01-01T10:00:00.5Z");
        raw["lastLoginDate"] = json!("2018-01-02T11:30:00.125+01:00");
        raw["verifiedData"] = json!({"email": true, "phone": {"country": "AT"}});

        let user = User::from_response(&raw).unwrap();
        assert_eq!(User::from_response(&user.to_value()).unwrap(), user);
    }
}
