//! Common test utilities for dislo-client integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use dislo_client::{ClientError, DisloTransport, OrderDirection, TransportResult, UserIdentifier};
use dislo_core::{Flexible, User, WorkingObject};
use serde_json::{json, Value};

/// One recorded transport call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Operation name.
    pub operation: &'static str,
    /// Identity the call was made for.
    pub user: UserIdentifier,
    /// Operation-specific arguments, rendered as JSON.
    pub args: Value,
}

/// In-memory transport serving canned responses and recording every call.
#[derive(Debug)]
pub struct ScriptedTransport {
    force_token_mode: bool,
    subscriptions: Mutex<Vec<Value>>,
    billing_events: Mutex<Vec<Value>>,
    flexible: Mutex<Value>,
    balance: Value,
    tokens: Vec<Value>,
    user: Value,
    failing: Mutex<Option<&'static str>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    /// Create a transport with fixture data for user 42.
    pub fn new() -> Self {
        Self {
            force_token_mode: false,
            subscriptions: Mutex::new(vec![
                subscription_json(1, "pending", None),
                subscription_json(2, "canceled", Some("2018-02-01 00:00:00")),
                subscription_json(3, "closed", Some("2017-01-01 00:00:00")),
                subscription_json(4, "running", Some("2018-03-01 00:00:00")),
            ]),
            billing_events: Mutex::new((1..=25).map(billing_event_json).collect()),
            flexible: Mutex::new(flexible_json(11)),
            balance: json!({"amount": 12.5, "currencyCode": "EUR"}),
            tokens: vec![token_json(1, "token-one"), token_json(2, "token-two")],
            user: user_json(None),
            failing: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Require users to be identified by auth token.
    pub fn force_token_mode(mut self) -> Self {
        self.force_token_mode = true;
        self
    }

    /// Replace the subscription fixtures.
    pub fn with_subscriptions(self, subscriptions: Vec<Value>) -> Self {
        *self.subscriptions.lock().unwrap() = subscriptions;
        self
    }

    /// Replace the subscription fixtures after construction.
    pub fn set_subscriptions(&self, subscriptions: Vec<Value>) {
        *self.subscriptions.lock().unwrap() = subscriptions;
    }

    /// Replace the flexible fixture after construction.
    pub fn set_flexible(&self, flexible: Value) {
        *self.flexible.lock().unwrap() = flexible;
    }

    /// Make every call to `operation` fail with a transport error.
    pub fn fail(&self, operation: &'static str) {
        *self.failing.lock().unwrap() = Some(operation);
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls to `operation`.
    pub fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.operation == operation)
            .count()
    }

    fn record(&self, operation: &'static str, user: &UserIdentifier, args: Value) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(Call {
            operation,
            user: user.clone(),
            args,
        });
        if *self.failing.lock().unwrap() == Some(operation) {
            return Err(ClientError::transport(operation, "connection reset"));
        }
        Ok(())
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DisloTransport for ScriptedTransport {
    fn is_force_token_mode(&self) -> bool {
        self.force_token_mode
    }

    async fn subscription_get_all(&self, user: &UserIdentifier) -> TransportResult {
        self.record("subscriptionGetAll", user, Value::Null)?;
        Ok(json!({"subscriptions": *self.subscriptions.lock().unwrap()}))
    }

    async fn billing_get_flexible(&self, user: &UserIdentifier) -> TransportResult {
        self.record("billingGetFlexible", user, Value::Null)?;
        Ok(json!({"flexible": *self.flexible.lock().unwrap()}))
    }

    async fn billing_get_events_for_user(
        &self,
        user: &UserIdentifier,
        limit: u32,
        offset: u32,
        order: OrderDirection,
    ) -> TransportResult {
        self.record(
            "billingGetEventsForUser",
            user,
            json!({"limit": limit, "offset": offset, "orderDir": order}),
        )?;
        let mut events = self.billing_events.lock().unwrap().clone();
        if order == OrderDirection::Desc {
            events.reverse();
        }
        let total = events.len();
        let page: Vec<Value> = events
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok(json!({"billingEvents": page, "totalCount": total}))
    }

    async fn billing_close_flexible(
        &self,
        flexible: &Flexible,
        user: &UserIdentifier,
    ) -> TransportResult {
        self.record(
            "billingCloseFlexible",
            user,
            json!({"flexibleId": flexible.flexible_id}),
        )?;
        let mut closed = flexible.to_value();
        closed["status"] = json!(Flexible::STATUS_CLOSED);
        Ok(json!({"flexible": closed}))
    }

    async fn user_get_balance(&self, user: &UserIdentifier) -> TransportResult {
        self.record("userGetBalance", user, Value::Null)?;
        Ok(json!({"balance": self.balance}))
    }

    async fn user_get_tokens(&self, user: &UserIdentifier) -> TransportResult {
        self.record("userGetTokens", user, Value::Null)?;
        Ok(json!({"authTokens": self.tokens}))
    }

    async fn user_change(
        &self,
        user: &UserIdentifier,
        language: &str,
        meta_data: &BTreeMap<String, String>,
    ) -> TransportResult {
        self.record(
            "userChange",
            user,
            json!({"language": language, "metaData": meta_data}),
        )?;
        let mut changed = self.user.clone();
        changed["metaData"] = json!(meta_data);
        Ok(json!({"user": changed}))
    }

    async fn user_change_password(
        &self,
        user: &UserIdentifier,
        new_password: &str,
    ) -> TransportResult {
        self.record("userChangePassword", user, json!({"plaintextPassword": new_password}))?;
        Ok(json!({"user": self.user}))
    }

    async fn user_delete(&self, user: &UserIdentifier) -> TransportResult {
        self.record("userDelete", user, Value::Null)?;
        // The server answers a delete with an empty body
        Ok(Value::Null)
    }

    async fn user_disable_login(&self, user: &UserIdentifier) -> TransportResult {
        self.record("userDisableLogin", user, Value::Null)?;
        let mut disabled = user_json(Some(token_json(9, "server-token")));
        disabled["loginDisabled"] = json!(true);
        Ok(json!({"user": disabled}))
    }
}

/// A subscription fixture for user 42.
pub fn subscription_json(id: u64, status: &str, started_at: Option<&str>) -> Value {
    json!({
        "subscriptionId": id,
        "userId": 42,
        "status": status,
        "currencyCode": "EUR",
        "startedAt": started_at
    })
}

/// A billing event fixture for user 42.
pub fn billing_event_json(id: u64) -> Value {
    json!({
        "billingEventId": id,
        "userId": 42,
        "currencyCode": "EUR",
        "amount": 9.99,
        "createdAt": "2018-01-01 00:00:00",
        "type": "charge",
        "status": "success"
    })
}

/// An active flexible fixture.
pub fn flexible_json(id: u64) -> Value {
    json!({
        "flexibleId": id,
        "status": "active",
        "createdAt": "2018-01-01 00:00:00",
        "billingMethod": "creditcard"
    })
}

/// An auth token fixture for user 42.
pub fn token_json(id: u64, token: &str) -> Value {
    json!({
        "id": id,
        "userId": 42,
        "createdAt": "2018-01-01 00:00:00",
        "token": token
    })
}

/// User 42 as the server renders it, optionally with a token.
pub fn user_json(auth_token: Option<Value>) -> Value {
    json!({
        "userId": 42,
        "createdAt": "2017-05-04 08:15:00",
        "loginDisabled": false,
        "language": "de",
        "metaData": {"plan": "basic"},
        "authToken": auth_token
    })
}

/// User 42 without a token.
pub fn user() -> User {
    User::from_response(&user_json(None)).unwrap()
}

/// User 42 carrying the session token `session-token`.
pub fn user_with_token() -> User {
    User::from_response(&user_json(Some(token_json(5, "session-token")))).unwrap()
}
