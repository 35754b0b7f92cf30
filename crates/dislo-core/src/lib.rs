//! Core types for the Dislo SDK.
//!
//! This crate provides the working objects that mirror Dislo server entities and the
//! codecs that translate raw wire payloads into them:
//!
//! - **Identifiers**: `UserId`, `SubscriptionId`, `BillingEventId`, `FlexibleId`, ...
//! - **Users**: `User`, `AuthToken`
//! - **Subscriptions**: `Subscription`, `SubscriptionStatus`, `CouponObject`
//! - **Packages**: `Package`, `PackagePeriod`, `DisplayName`
//! - **Billing**: `BillingEvent`, `Flexible`, `BillingMethod`, `Price`
//!
//! # Wire Format
//!
//! Payloads are JSON objects with camel-cased keys. Every working object decodes
//! through [`WorkingObject::from_response`], which reports a
//! [`DisloError::Deserialization`] naming the object when a required key is missing,
//! and encodes back through [`WorkingObject::to_value`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod billing;
pub mod coupon;
pub mod datetime;
pub mod error;
pub mod ids;
pub mod maps;
pub mod object;
pub mod package;
pub mod price;
pub mod subscription;
pub mod user;

pub use billing::{BillingEvent, BillingMethod, Flexible};
pub use coupon::CouponObject;
pub use error::{DisloError, Result};
pub use ids::{AuthTokenId, BillingEventId, BillingMethodId, FlexibleId, IdError, SubscriptionId, UserId};
pub use object::{decode, decode_list, WorkingObject, TYPE_KEY};
pub use package::{DisplayName, Package, PackagePeriod, PeriodUnit};
pub use price::Price;
pub use subscription::{Subscription, SubscriptionStatus};
pub use user::{AuthToken, User};
