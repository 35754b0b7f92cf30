//! Billing events, flexible billing arrangements, and billing methods.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{BillingEventId, BillingMethodId, FlexibleId, UserId};
use crate::object::WorkingObject;
use crate::subscription::Subscription;

/// A single money movement recorded for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingEvent {
    /// The event id.
    pub billing_event_id: BillingEventId,

    /// The billed user.
    pub user_id: UserId,

    /// Currency of `amount`.
    pub currency_code: String,

    /// Amount in the major currency unit.
    pub amount: f64,

    /// When the event was recorded.
    #[serde(with = "crate::datetime")]
    pub created_at: DateTime<Utc>,

    /// Event type, one of the `TYPE_*` constants.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Outcome, one of the `STATUS_*` constants.
    pub status: String,

    /// Human readable description.
    #[serde(default)]
    pub description: Option<String>,

    /// Payment provider diagnostics.
    #[serde(default)]
    pub techinfo: Option<String>,

    /// Billing method used.
    #[serde(default)]
    pub billing_method: Option<String>,

    /// Last modification.
    #[serde(default, with = "crate::datetime::option")]
    pub modified_at: Option<DateTime<Utc>>,

    /// Subscription the event was charged for.
    #[serde(default)]
    pub subscription: Option<Subscription>,
}

impl BillingEvent {
    /// Authorization of a payment method.
    pub const TYPE_AUTHORIZE: &'static str = "authorize";
    /// A charge.
    pub const TYPE_CHARGE: &'static str = "charge";
    /// A refund.
    pub const TYPE_REFUND: &'static str = "refund";
    /// A chargeback initiated by the payer.
    pub const TYPE_CHARGEBACK: &'static str = "chargeback";

    /// The event succeeded.
    pub const STATUS_SUCCESS: &'static str = "success";
    /// The event failed.
    pub const STATUS_ERROR: &'static str = "error";
    /// The event awaits confirmation by the provider.
    pub const STATUS_PENDING: &'static str = "pending";

    /// Whether the event succeeded.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.status == Self::STATUS_SUCCESS
    }
}

impl WorkingObject for BillingEvent {
    const TYPE_NAME: &'static str = "BillingEvent";
}

/// A flexible (ad-hoc) billing arrangement, e.g. a stored payment method.
///
/// From the client's point of view a user has at most one open flexible at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flexible {
    /// The flexible id.
    pub flexible_id: FlexibleId,

    /// Status, one of the `STATUS_*` constants.
    pub status: String,

    /// When the arrangement was created.
    #[serde(with = "crate::datetime")]
    pub created_at: DateTime<Utc>,

    /// Billing method backing the arrangement.
    #[serde(default)]
    pub billing_method: Option<String>,

    /// Provider data (masked card number, expiry, ...).
    #[serde(default, deserialize_with = "crate::maps::lenient")]
    pub meta_data: BTreeMap<String, String>,
}

impl Flexible {
    /// The arrangement can be charged.
    pub const STATUS_ACTIVE: &'static str = "active";
    /// The arrangement was closed.
    pub const STATUS_CLOSED: &'static str = "closed";

    /// Whether the arrangement can be charged.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == Self::STATUS_ACTIVE
    }
}

impl WorkingObject for Flexible {
    const TYPE_NAME: &'static str = "Flexible";
}

/// A payment method offered by Dislo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingMethod {
    /// The billing method id.
    pub billing_method_id: BillingMethodId,

    /// Internal name.
    pub name: String,

    /// Name to show to users.
    pub display_name: String,

    /// Whether the method can currently be used.
    #[serde(default)]
    pub available: bool,

    /// Whether the method supports checkout.
    #[serde(default)]
    pub checkout: bool,

    /// Whether the method supports flexible arrangements.
    #[serde(default)]
    pub flexible: bool,

    /// Whether the method supports recurring charges.
    #[serde(default)]
    pub recurring: bool,

    /// Whether the method can replace another on a running subscription.
    #[serde(default)]
    pub replaceable: bool,
}

impl WorkingObject for BillingMethod {
    const TYPE_NAME: &'static str = "BillingMethod";
}
