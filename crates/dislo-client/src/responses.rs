//! Response envelopes, one per remote operation.
//!
//! An envelope is a read-only projection of a raw response map onto working objects.
//! Decoding goes through [`dislo_core::decode`], so a missing key fails with a
//! deserialization error naming the envelope.

use std::collections::BTreeMap;

use dislo_core::{
    AuthToken, BillingEvent, BillingMethod, Flexible, Price, Subscription, User,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// A typed view of one operation's raw response.
pub trait Envelope: DeserializeOwned {
    /// Envelope name used in decode errors.
    const NAME: &'static str;

    /// Decode from a raw response map.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error when a required key is missing or mistyped.
    fn from_response(raw: &Value) -> dislo_core::Result<Self> {
        dislo_core::decode(Self::NAME, raw)
    }
}

macro_rules! envelope {
    ($name:ident) => {
        impl Envelope for $name {
            const NAME: &'static str = stringify!($name);
        }
    };
}

// ============================================================================
// Subscriptions
// ============================================================================

/// Response of `subscriptionGetAll`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionGetAllResponse {
    /// All subscriptions of the user, in server order.
    pub subscriptions: Vec<Subscription>,
}
envelope!(SubscriptionGetAllResponse);

/// Response of `subscriptionExternalAddonCreate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionExternalAddonCreateResponse {
    /// The parent subscription including the new addon.
    pub subscription: Subscription,
    /// Id of the upgrade that added the addon.
    pub upgrade_id: u64,
}
envelope!(SubscriptionExternalAddonCreateResponse);

/// Response of `subscriptionExternalClose`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionExternalCloseResponse {
    /// The closed subscription.
    pub subscription: Subscription,
}
envelope!(SubscriptionExternalCloseResponse);

/// Response of `subscriptionCallSpi`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionCallSpiResponse {
    /// Whatever the service provisioning interface returned.
    #[serde(deserialize_with = "dislo_core::maps::lenient")]
    pub spi_response: BTreeMap<String, Value>,
}
envelope!(SubscriptionCallSpiResponse);

// ============================================================================
// Billing
// ============================================================================

/// Response of `billingGetFlexible`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingGetFlexibleResponse {
    /// The user's flexible.
    pub flexible: Flexible,
}
envelope!(BillingGetFlexibleResponse);

/// Response of `billingCloseFlexible`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingCloseFlexibleResponse {
    /// The flexible in its closed state.
    pub flexible: Flexible,
}
envelope!(BillingCloseFlexibleResponse);

/// Response of `billingGetEvent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingGetEventResponse {
    /// The requested event.
    pub billing_event: BillingEvent,
}
envelope!(BillingGetEventResponse);

/// Response of `billingGetEventsForUser`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingGetEventsForUserResponse {
    /// The requested page.
    pub billing_events: Vec<BillingEvent>,
    /// Number of events across all pages.
    pub total_count: u64,
}
envelope!(BillingGetEventsForUserResponse);

/// Response of `billingGetMethods`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingMethodsGetResponse {
    /// Offered billing methods.
    pub billing_methods: Vec<BillingMethod>,
}
envelope!(BillingMethodsGetResponse);

// ============================================================================
// Users
// ============================================================================

/// Response of `userFind`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserFindResponse {
    /// The found user.
    pub user: User,
}
envelope!(UserFindResponse);

/// Response of `userChange`. The returned user carries no auth token.
#[derive(Debug, Clone, Deserialize)]
pub struct UserChangeResponse {
    /// The updated user.
    pub user: User,
}
envelope!(UserChangeResponse);

/// Response of `userChangePassword`. The returned user carries no auth token.
#[derive(Debug, Clone, Deserialize)]
pub struct UserChangePasswordResponse {
    /// The updated user.
    pub user: User,
}
envelope!(UserChangePasswordResponse);

/// Response of `userDisableLogin`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDisableLoginResponse {
    /// The updated user, including its auth token.
    pub user: User,
}
envelope!(UserDisableLoginResponse);

/// Response of `userRecoveryFinish`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecoveryFinishResponse {
    /// The recovered user.
    pub user: User,
}
envelope!(UserRecoveryFinishResponse);

/// Response of `userDelete`. Carries no data; any map or `null` is accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDeleteResponse {}

impl Envelope for UserDeleteResponse {
    const NAME: &'static str = "UserDeleteResponse";

    fn from_response(raw: &Value) -> dislo_core::Result<Self> {
        if raw.is_null() {
            return Ok(Self::default());
        }
        dislo_core::decode(Self::NAME, raw)
    }
}

/// Response of `userGetBalance`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserGetBalanceResponse {
    /// Current account balance.
    pub balance: Price,
}
envelope!(UserGetBalanceResponse);

/// Response of `userGetTokens`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserGetTokensResponse {
    /// Auth tokens of the user.
    #[serde(rename = "authTokens")]
    pub tokens: Vec<AuthToken>,
}
envelope!(UserGetTokensResponse);

#[cfg(test)]
mod tests {
    use super::*;
    use dislo_core::{DisloError, SubscriptionId};
    use serde_json::json;

    fn subscription_json(id: u64) -> Value {
        json!({
            "subscriptionId": id,
            "userId": 42,
            "status": "running",
            "currencyCode": "EUR",
            "startedAt": "2018-01-01 00:00:00"
        })
    }

    fn user_json() -> Value {
        json!({
            "userId": 42,
            "createdAt": "2017-05-04 08:15:00",
            "loginDisabled": false,
            "language": "en"
        })
    }

    #[test]
    fn subscription_get_all_keeps_order() {
        let response = SubscriptionGetAllResponse::from_response(&json!({
            "subscriptions": [subscription_json(3), subscription_json(1)]
        }))
        .unwrap();
        let ids: Vec<_> = response
            .subscriptions
            .iter()
            .map(|s| s.subscription_id)
            .collect();
        assert_eq!(ids, vec![SubscriptionId::new(3), SubscriptionId::new(1)]);
    }

    #[test]
    fn missing_key_names_envelope() {
        let err = SubscriptionGetAllResponse::from_response(&json!({})).unwrap_err();
        match err {
            DisloError::Deserialization { object, .. } => {
                assert_eq!(object, "SubscriptionGetAllResponse");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn addon_create_reads_upgrade_id() {
        let response = SubscriptionExternalAddonCreateResponse::from_response(&json!({
            "subscription": subscription_json(5),
            "upgradeId": 77
        }))
        .unwrap();
        assert_eq!(response.upgrade_id, 77);
        assert_eq!(response.subscription.subscription_id, SubscriptionId::new(5));
    }

    #[test]
    fn external_close_reads_subscription() {
        let response = SubscriptionExternalCloseResponse::from_response(&json!({
            "subscription": subscription_json(8)
        }))
        .unwrap();
        assert_eq!(response.subscription.subscription_id, SubscriptionId::new(8));
    }

    #[test]
    fn call_spi_accepts_empty_list() {
        let response =
            SubscriptionCallSpiResponse::from_response(&json!({"spiResponse": []})).unwrap();
        assert!(response.spi_response.is_empty());
        assert!(SubscriptionCallSpiResponse::from_response(&json!({})).is_err());
    }

    #[test]
    fn events_for_user_reads_total_count() {
        let response = BillingGetEventsForUserResponse::from_response(&json!({
            "billingEvents": [{
                "billingEventId": 1,
                "userId": 42,
                "currencyCode": "EUR",
                "amount": 5,
                "createdAt": "2018-01-01 00:00:00",
                "type": "charge",
                "status": "success"
            }],
            "totalCount": 31
        }))
        .unwrap();
        assert_eq!(response.billing_events.len(), 1);
        assert_eq!(response.total_count, 31);
    }

    #[test]
    fn events_for_user_requires_total_count() {
        let err =
            BillingGetEventsForUserResponse::from_response(&json!({"billingEvents": []}))
                .unwrap_err();
        assert!(err.to_string().contains("totalCount"));
    }

    #[test]
    fn get_event_and_methods() {
        let event = BillingGetEventResponse::from_response(&json!({
            "billingEvent": {
                "billingEventId": 2,
                "userId": 42,
                "currencyCode": "EUR",
                "amount": 1.5,
                "createdAt": "2018-01-01 00:00:00",
                "type": "refund",
                "status": "pending"
            }
        }))
        .unwrap();
        assert_eq!(event.billing_event.event_type, BillingEvent::TYPE_REFUND);

        let methods = BillingMethodsGetResponse::from_response(&json!({
            "billingMethods": [{"billingMethodId": 1, "name": "cc", "displayName": "Card"}]
        }))
        .unwrap();
        assert_eq!(methods.billing_methods[0].display_name, "Card");
    }

    #[test]
    fn user_envelopes() {
        let raw = json!({"user": user_json()});
        assert_eq!(UserFindResponse::from_response(&raw).unwrap().user.language, "en");
        assert!(UserChangeResponse::from_response(&raw).is_ok());
        assert!(UserChangePasswordResponse::from_response(&raw).is_ok());
        assert!(UserDisableLoginResponse::from_response(&raw).is_ok());
        assert!(UserRecoveryFinishResponse::from_response(&raw).is_ok());
        assert!(UserFindResponse::from_response(&json!({})).is_err());
    }

    #[test]
    fn delete_accepts_any_map_or_null() {
        assert!(UserDeleteResponse::from_response(&json!({})).is_ok());
        assert!(UserDeleteResponse::from_response(&json!({"deleted": true})).is_ok());
        assert!(UserDeleteResponse::from_response(&Value::Null).is_ok());
        assert!(UserDeleteResponse::from_response(&json!("gone")).is_err());
    }

    #[test]
    fn balance_and_tokens() {
        let balance = UserGetBalanceResponse::from_response(&json!({
            "balance": {"amount": 12.5, "currencyCode": "EUR"}
        }))
        .unwrap();
        assert_eq!(balance.balance, Price::new(12.5, "EUR"));

        let tokens = UserGetTokensResponse::from_response(&json!({
            "authTokens": [{
                "id": 1,
                "userId": 42,
                "createdAt": "2018-01-01 00:00:00",
                "token": "t-1"
            }]
        }))
        .unwrap();
        assert_eq!(tokens.tokens[0].token, "t-1");
    }
}
