//! The transport seam between the SDK and the Dislo API.
//!
//! The SDK never talks to the network itself. A [`DisloTransport`] performs one remote
//! operation per method and hands back the raw response map, which the caller decodes
//! with the matching envelope from [`crate::responses`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use dislo_core::{Flexible, UserId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;

/// Raw result of a transport call.
pub type TransportResult = Result<Value, ClientError>;

/// How a user is identified to the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum UserIdentifier {
    /// The numeric user id.
    Id(UserId),

    /// The opaque auth token value (force-token mode).
    Token(String),
}

impl fmt::Display for UserIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Token(_) => f.write_str("<token>"),
        }
    }
}

/// Sort order for paginated lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderDirection {
    /// Oldest first.
    Asc,

    /// Newest first.
    #[default]
    Desc,
}

impl OrderDirection {
    /// Wire name of the direction.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(format!("unknown order direction: {other}")),
        }
    }
}

/// Remote operations the SDK consumes.
///
/// Each method performs exactly one round trip and returns the raw response map.
/// Retry and timeout policy belong to the implementation.
#[async_trait]
pub trait DisloTransport: Send + Sync {
    /// Whether users must be identified by auth token rather than by user id.
    fn is_force_token_mode(&self) -> bool;

    /// List all subscriptions of a user. Decodes as `SubscriptionGetAllResponse`.
    async fn subscription_get_all(&self, user: &UserIdentifier) -> TransportResult;

    /// Fetch the user's flexible. Decodes as `BillingGetFlexibleResponse`.
    async fn billing_get_flexible(&self, user: &UserIdentifier) -> TransportResult;

    /// Fetch one page of billing events. Decodes as `BillingGetEventsForUserResponse`.
    async fn billing_get_events_for_user(
        &self,
        user: &UserIdentifier,
        limit: u32,
        offset: u32,
        order: OrderDirection,
    ) -> TransportResult;

    /// Close a flexible. Decodes as `BillingCloseFlexibleResponse`.
    async fn billing_close_flexible(
        &self,
        flexible: &Flexible,
        user: &UserIdentifier,
    ) -> TransportResult;

    /// Fetch the account balance. Decodes as `UserGetBalanceResponse`.
    async fn user_get_balance(&self, user: &UserIdentifier) -> TransportResult;

    /// List the user's auth tokens. Decodes as `UserGetTokensResponse`.
    async fn user_get_tokens(&self, user: &UserIdentifier) -> TransportResult;

    /// Change language and metadata. Decodes as `UserChangeResponse`.
    async fn user_change(
        &self,
        user: &UserIdentifier,
        language: &str,
        meta_data: &BTreeMap<String, String>,
    ) -> TransportResult;

    /// Change the password. Decodes as `UserChangePasswordResponse`.
    async fn user_change_password(
        &self,
        user: &UserIdentifier,
        new_password: &str,
    ) -> TransportResult;

    /// Delete the user. Decodes as `UserDeleteResponse`.
    async fn user_delete(&self, user: &UserIdentifier) -> TransportResult;

    /// Disable login for the user. Decodes as `UserDisableLoginResponse`.
    async fn user_disable_login(&self, user: &UserIdentifier) -> TransportResult;
}
