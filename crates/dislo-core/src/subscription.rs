//! Subscriptions.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coupon::CouponObject;
use crate::ids::{SubscriptionId, UserId};
use crate::object::WorkingObject;
use crate::package::Package;
use crate::price::Price;

/// Lifecycle status of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Created but not yet started (e.g. awaiting payment).
    Pending,

    /// Started and renewing.
    Running,

    /// Cancelled; still active until the end of the paid period.
    Canceled,

    /// Ended.
    Closed,

    /// Ended and archived.
    Archived,

    /// A status this SDK does not know. Never active.
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Canceled => "canceled",
            Self::Closed => "closed",
            Self::Archived => "archived",
            Self::Unknown => "unknown",
        }
    }

    /// Whether a subscription in this status still grants access.
    ///
    /// A cancelled subscription keeps running until its effective end date.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Canceled)
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's subscription to a package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// The subscription id.
    pub subscription_id: SubscriptionId,

    /// The subscribed user.
    pub user_id: UserId,

    /// Current status.
    pub status: SubscriptionStatus,

    /// Currency the subscription is billed in.
    pub currency_code: String,

    /// Package currently subscribed to.
    #[serde(default)]
    pub current_package: Option<Package>,

    /// Package taking effect at the next billing (scheduled up/downgrade).
    #[serde(default)]
    pub next_package: Option<Package>,

    /// When the subscription started. `None` until the first successful start.
    #[serde(default, with = "crate::datetime::option")]
    pub started_at: Option<DateTime<Utc>>,

    /// When the subscription was cancelled.
    #[serde(default, with = "crate::datetime::option")]
    pub canceled_at: Option<DateTime<Utc>>,

    /// When the subscription was closed.
    #[serde(default, with = "crate::datetime::option")]
    pub closed_at: Option<DateTime<Utc>>,

    /// End of the paid period.
    #[serde(default, with = "crate::datetime::option")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Next scheduled billing.
    #[serde(default, with = "crate::datetime::option")]
    pub next_billing_at: Option<DateTime<Utc>>,

    /// End of the minimum term.
    #[serde(default, with = "crate::datetime::option")]
    pub minimum_term_ends_at: Option<DateTime<Utc>>,

    /// Amount charged at the next billing.
    #[serde(default)]
    pub next_billing_amount: Option<Price>,

    /// Coupon redeemed on this subscription.
    #[serde(default)]
    pub coupon: Option<CouponObject>,

    /// Whether the subscription is still in its initial period.
    #[serde(default)]
    pub is_initial_period: bool,

    /// Whether the service has been provisioned.
    #[serde(default)]
    pub is_provisioned: bool,

    /// Whether the subscription is managed by an external billing system.
    #[serde(default)]
    pub is_external: bool,

    /// Provisioning data reported by the service.
    #[serde(default, deserialize_with = "crate::maps::lenient")]
    pub provisioning_meta_data: BTreeMap<String, String>,

    /// Addon subscriptions.
    #[serde(default)]
    pub addons: Vec<Subscription>,
}

impl Subscription {
    /// Whether the subscription grants access (running or cancelled).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether the subscription has ever started.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started_at.is_some()
    }
}

impl WorkingObject for Subscription {
    const TYPE_NAME: &'static str = "Subscription";
}
