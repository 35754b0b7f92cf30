//! Coupons applied to subscriptions.

use serde::{Deserialize, Serialize};

use crate::object::WorkingObject;

/// A coupon redeemed on a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CouponObject {
    /// Coupon code as entered by the user.
    #[serde(default)]
    pub code: Option<String>,

    /// Human readable description.
    #[serde(default)]
    pub description: Option<String>,
}

impl CouponObject {
    /// Coupon event for redeeming at subscription start.
    pub const COUPON_EVENT_START: &'static str = "subscription_start";

    /// Coupon event for redeeming at an upgrade.
    pub const COUPON_EVENT_UPGRADE: &'static str = "subscription_upgrade";

    /// Create a coupon.
    #[must_use]
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            description: Some(description.into()),
        }
    }
}

impl WorkingObject for CouponObject {
    const TYPE_NAME: &'static str = "CouponObject";
}
