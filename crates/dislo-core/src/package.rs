//! Packages: what a subscription is subscribed to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::object::WorkingObject;
use crate::price::Price;

/// Localized name of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayName {
    /// Language code the name is written in.
    pub language: String,

    /// The display name.
    pub name: String,
}

impl WorkingObject for DisplayName {
    const TYPE_NAME: &'static str = "DisplayName";
}

/// Unit of a package period length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    /// Days.
    Day,
    /// Weeks.
    Week,
    /// Months.
    Month,
    /// Years.
    Year,
}

/// A billing period of a package (initial or recurring).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePeriod {
    /// Number of `length_unit`s in one period.
    pub length: u32,

    /// Unit the length is measured in.
    pub length_unit: PeriodUnit,

    /// Application-defined metadata.
    #[serde(default, deserialize_with = "crate::maps::lenient")]
    pub meta_data: BTreeMap<String, String>,

    /// Minimum number of periods before cancellation takes effect.
    #[serde(default)]
    pub minimum_term_length: Option<u32>,

    /// Price of one period, one entry per currency.
    #[serde(default)]
    pub base_price: Vec<Price>,
}

impl PackagePeriod {
    /// Price of this period in `currency_code`, if offered.
    #[must_use]
    pub fn price_in(&self, currency_code: &str) -> Option<&Price> {
        self.base_price
            .iter()
            .find(|price| price.currency_code == currency_code)
    }
}

impl WorkingObject for PackagePeriod {
    const TYPE_NAME: &'static str = "PackagePeriod";
}

/// A subscribable package, possibly with addon packages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Unique package identifier.
    pub package_identifier: String,

    /// Identifier of the service the package belongs to.
    pub service_identifier: String,

    /// Localized names.
    #[serde(default)]
    pub display_names: Vec<DisplayName>,

    /// Whether new subscriptions may be started for this package.
    pub signup_available: bool,

    /// Packages that can be booked on top of this one.
    #[serde(default)]
    pub addon_packages: Vec<Package>,

    /// Application-defined metadata.
    #[serde(default, deserialize_with = "crate::maps::lenient")]
    pub meta_data: BTreeMap<String, String>,

    /// The first billing period.
    pub initial_period: PackagePeriod,

    /// The period repeating after the initial one; `None` for one-off packages.
    #[serde(default)]
    pub recurring_period: Option<PackagePeriod>,
}

impl Package {
    /// Name in `language`, falling back to the first name available.
    #[must_use]
    pub fn display_name(&self, language: &str) -> Option<&str> {
        self.display_names
            .iter()
            .find(|name| name.language == language)
            .or_else(|| self.display_names.first())
            .map(|name| name.name.as_str())
    }

    /// Whether the package renews after its initial period.
    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        self.recurring_period.is_some()
    }

    /// Find an addon package by identifier.
    #[must_use]
    pub fn addon(&self, package_identifier: &str) -> Option<&Package> {
        self.addon_packages
            .iter()
            .find(|addon| addon.package_identifier == package_identifier)
    }
}

impl WorkingObject for Package {
    const TYPE_NAME: &'static str = "Package";
}
