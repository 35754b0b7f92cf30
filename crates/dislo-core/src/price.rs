//! Monetary amounts.

use serde::{Deserialize, Serialize};

use crate::object::WorkingObject;

/// An amount of money in a given currency.
///
/// Dislo transports amounts as decimal numbers in the major currency unit
/// (e.g. `9.99` EUR).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Amount in the major currency unit.
    pub amount: f64,

    /// ISO 4217 currency code.
    pub currency_code: String,

    /// Optional tag distinguishing price variants (e.g. a promotion).
    #[serde(default)]
    pub tag: Option<String>,
}

impl Price {
    /// Create an untagged price.
    #[must_use]
    pub fn new(amount: f64, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
            tag: None,
        }
    }

    /// Set the tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.abs() < f64::EPSILON
    }
}

impl WorkingObject for Price {
    const TYPE_NAME: &'static str = "Price";
}
