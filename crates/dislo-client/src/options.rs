//! Context options.

use crate::transport::OrderDirection;

/// Default number of billing events fetched per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Environment variable overriding the billing-event page size.
pub const PAGE_SIZE_ENV: &str = "DISLO_BILLING_EVENTS_PAGE_SIZE";

/// Environment variable overriding the billing-event order (`ASC` or `DESC`).
pub const ORDER_ENV: &str = "DISLO_BILLING_EVENTS_ORDER";

/// Options for a [`crate::UserContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextOptions {
    /// Billing events fetched when no page is given explicitly (default: 10).
    pub page_size: u32,
    /// Billing event order when none is given explicitly (default: `DESC`).
    pub order_direction: OrderDirection,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            order_direction: OrderDirection::Desc,
        }
    }
}

impl ContextOptions {
    /// Load options from environment variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load options through `lookup`, falling back to defaults for absent or
    /// unparsable values.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let page_size = lookup(PAGE_SIZE_ENV)
            .and_then(|raw| match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => Some(size),
                _ => {
                    tracing::debug!(var = PAGE_SIZE_ENV, value = %raw, "Ignoring invalid page size");
                    None
                }
            })
            .unwrap_or(defaults.page_size);

        let order_direction = lookup(ORDER_ENV)
            .and_then(|raw| match raw.parse::<OrderDirection>() {
                Ok(order) => Some(order),
                Err(e) => {
                    tracing::debug!(var = ORDER_ENV, error = %e, "Ignoring invalid order direction");
                    None
                }
            })
            .unwrap_or(defaults.order_direction);

        Self {
            page_size,
            order_direction,
        }
    }

    /// Set the default page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the default order direction.
    #[must_use]
    pub fn with_order_direction(mut self, order_direction: OrderDirection) -> Self {
        self.order_direction = order_direction;
        self
    }
}
