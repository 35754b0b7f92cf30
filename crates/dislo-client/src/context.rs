//! Per-user cache facade over a [`DisloTransport`].
//!
//! A [`UserContext`] represents what is currently known about one user. Reads go
//! through the context, which asks the transport only for data it has not fetched yet
//! (or when the caller passes `cached = false`). Writes go through the transport and
//! replace local state with what the server returned.
//!
//! A context is meant to live for one logical request or session. It holds no locks
//! and must not be shared between concurrent tasks.

use std::collections::BTreeMap;
use std::sync::Arc;

use dislo_core::{
    AuthToken, BillingEvent, BillingEventId, Flexible, Price, Subscription, SubscriptionId, User,
};

use crate::error::{ClientError, Result};
use crate::options::ContextOptions;
use crate::responses::{
    BillingCloseFlexibleResponse, BillingGetEventsForUserResponse, BillingGetFlexibleResponse,
    Envelope, SubscriptionGetAllResponse, UserChangePasswordResponse, UserChangeResponse,
    UserDeleteResponse, UserDisableLoginResponse, UserGetBalanceResponse, UserGetTokensResponse,
};
use crate::transport::{DisloTransport, OrderDirection, UserIdentifier};

/// Paging parameters of a billing-event request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    /// Maximum number of events.
    pub limit: u32,
    /// Number of events to skip.
    pub offset: u32,
    /// Sort order.
    pub order: OrderDirection,
}

/// The cached billing-event page and the query that produced it.
#[derive(Debug, Clone)]
struct BillingEventsPage {
    query: PageQuery,
    events: Vec<BillingEvent>,
    total_count: u64,
}

/// Cached view of one Dislo user.
///
/// Every cached collection starts out unset (`None`) and is populated by the first
/// read. An empty collection returned by the server is cached as `Some(vec![])` and
/// does not trigger another fetch.
#[derive(Debug)]
pub struct UserContext<T: DisloTransport + ?Sized> {
    transport: Arc<T>,
    user: Option<User>,
    options: ContextOptions,
    subscriptions: Option<Vec<Subscription>>,
    active_flexible: Option<Flexible>,
    billing_events: Option<BillingEventsPage>,
    account_balance: Option<Price>,
    auth_tokens: Option<Vec<AuthToken>>,
}

impl<T: DisloTransport + ?Sized> UserContext<T> {
    /// Create a context for `user` with default options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidToken`] if the transport is in force-token mode
    /// and `user` carries no auth token. No remote call is made in that case.
    pub fn new(transport: Arc<T>, user: User) -> Result<Self> {
        Self::with_options(transport, user, ContextOptions::default())
    }

    /// Create a context for `user` with explicit options.
    ///
    /// # Errors
    ///
    /// Same as [`UserContext::new`].
    pub fn with_options(transport: Arc<T>, user: User, options: ContextOptions) -> Result<Self> {
        if transport.is_force_token_mode() && user.auth_token.is_none() {
            tracing::warn!(user_id = %user.user_id, "Force-token mode requires an auth token");
            return Err(ClientError::InvalidToken);
        }

        Ok(Self {
            transport,
            user: Some(user),
            options,
            subscriptions: None,
            active_flexible: None,
            billing_events: None,
            account_balance: None,
            auth_tokens: None,
        })
    }

    /// The options this context was created with.
    #[must_use]
    pub const fn options(&self) -> &ContextOptions {
        &self.options
    }

    /// The current user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidToken`] once the user has been deleted.
    pub fn user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(ClientError::InvalidToken)
    }

    /// The identity to send to the transport for the current user.
    ///
    /// In force-token mode this is the auth token value, otherwise the user id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidToken`] if there is no user, or if force-token
    /// mode is active and the user has no auth token.
    pub fn user_identifier(&self) -> Result<UserIdentifier> {
        let user = self.user()?;

        if self.transport.is_force_token_mode() {
            return user
                .auth_token
                .as_ref()
                .map(|token| UserIdentifier::Token(token.token.clone()))
                .ok_or(ClientError::InvalidToken);
        }

        Ok(UserIdentifier::Id(user.user_id))
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// All subscriptions of the user, in server order.
    ///
    /// # Errors
    ///
    /// Fails on a missing identity, a transport failure, or an undecodable response.
    pub async fn get_all_subscriptions(&mut self, cached: bool) -> Result<&[Subscription]> {
        if cached && self.subscriptions.is_some() {
            tracing::debug!("Subscriptions served from cache");
        } else {
            let identifier = self.user_identifier()?;
            tracing::debug!(user = %identifier, "Fetching subscriptions");
            let raw = self.transport.subscription_get_all(&identifier).await?;
            let response = SubscriptionGetAllResponse::from_response(&raw)?;
            self.subscriptions = Some(response.subscriptions);
        }

        Ok(self.subscriptions.as_deref().unwrap_or_default())
    }

    /// Subscriptions that still grant access (running or cancelled), in server order.
    ///
    /// # Errors
    ///
    /// Same as [`UserContext::get_all_subscriptions`].
    pub async fn get_active_subscriptions(&mut self, cached: bool) -> Result<Vec<&Subscription>> {
        let subscriptions = self.get_all_subscriptions(cached).await?;
        Ok(subscriptions.iter().filter(|s| s.is_active()).collect())
    }

    /// The first active subscription, if any.
    ///
    /// # Errors
    ///
    /// Same as [`UserContext::get_all_subscriptions`].
    pub async fn get_first_active_subscription(
        &mut self,
        cached: bool,
    ) -> Result<Option<&Subscription>> {
        let subscriptions = self.get_all_subscriptions(cached).await?;
        Ok(subscriptions.iter().find(|s| s.is_active()))
    }

    /// Subscriptions that have a start date, in server order.
    ///
    /// # Errors
    ///
    /// Same as [`UserContext::get_all_subscriptions`].
    pub async fn get_started_subscriptions(&mut self, cached: bool) -> Result<Vec<&Subscription>> {
        let subscriptions = self.get_all_subscriptions(cached).await?;
        Ok(subscriptions.iter().filter(|s| s.is_started()).collect())
    }

    /// The first subscription that has a start date, if any.
    ///
    /// # Errors
    ///
    /// Same as [`UserContext::get_all_subscriptions`].
    pub async fn get_first_started_subscription(
        &mut self,
        cached: bool,
    ) -> Result<Option<&Subscription>> {
        let subscriptions = self.get_all_subscriptions(cached).await?;
        Ok(subscriptions.iter().find(|s| s.is_started()))
    }

    /// Find a subscription by id.
    ///
    /// # Errors
    ///
    /// Same as [`UserContext::get_all_subscriptions`].
    pub async fn get_subscription(
        &mut self,
        subscription_id: SubscriptionId,
        cached: bool,
    ) -> Result<Option<&Subscription>> {
        let subscriptions = self.get_all_subscriptions(cached).await?;
        Ok(subscriptions
            .iter()
            .find(|s| s.subscription_id == subscription_id))
    }

    /// Append a subscription the caller created elsewhere.
    ///
    /// Populates the cache first if it is unset; the append itself is local.
    ///
    /// # Errors
    ///
    /// Same as [`UserContext::get_all_subscriptions`].
    pub async fn add_subscription(&mut self, subscription: Subscription) -> Result<&mut Self> {
        self.get_all_subscriptions(true).await?;
        self.subscriptions
            .get_or_insert_with(Vec::new)
            .push(subscription);
        Ok(self)
    }

    // ========================================================================
    // Flexible
    // ========================================================================

    /// The user's flexible billing arrangement.
    ///
    /// # Errors
    ///
    /// Fails on a missing identity, a transport failure, or an undecodable response.
    pub async fn get_active_flexible(&mut self, cached: bool) -> Result<&Flexible> {
        let flexible = match self.active_flexible.take() {
            Some(flexible) if cached => {
                tracing::debug!("Flexible served from cache");
                flexible
            }
            previous => match self.fetch_active_flexible().await {
                Ok(flexible) => flexible,
                Err(e) => {
                    self.active_flexible = previous;
                    return Err(e);
                }
            },
        };

        Ok(self.active_flexible.insert(flexible))
    }

    async fn fetch_active_flexible(&self) -> Result<Flexible> {
        let identifier = self.user_identifier()?;
        tracing::debug!(user = %identifier, "Fetching flexible");
        let raw = self.transport.billing_get_flexible(&identifier).await?;
        Ok(BillingGetFlexibleResponse::from_response(&raw)?.flexible)
    }

    /// Replace the cached flexible with one the caller obtained elsewhere.
    pub fn set_active_flexible(&mut self, flexible: Flexible) -> &mut Self {
        self.active_flexible = Some(flexible);
        self
    }

    /// Close the active flexible on the server and unset the cached one.
    ///
    /// # Errors
    ///
    /// Fails on a missing identity, a transport failure, or an undecodable response.
    pub async fn close_active_flexible(&mut self) -> Result<&mut Self> {
        let flexible = self.get_active_flexible(true).await?.clone();
        let identifier = self.user_identifier()?;

        let raw = self
            .transport
            .billing_close_flexible(&flexible, &identifier)
            .await?;
        BillingCloseFlexibleResponse::from_response(&raw)?;

        tracing::info!(flexible_id = %flexible.flexible_id, "Closed flexible");
        self.active_flexible = None;
        Ok(self)
    }

    // ========================================================================
    // Billing events
    // ========================================================================

    /// The default page: [`ContextOptions::page_size`] events from offset 0.
    #[must_use]
    pub const fn default_page(&self) -> PageQuery {
        PageQuery {
            limit: self.options.page_size,
            offset: 0,
            order: self.options.order_direction,
        }
    }

    /// A page of the user's billing events.
    ///
    /// Only one page is cached and the cache is not keyed by `limit`, `offset` or
    /// `order`: with `cached = true` and a populated cache, the cached page is
    /// returned even if it was fetched with different paging. Pass `cached = false`
    /// to fetch a different page.
    ///
    /// # Errors
    ///
    /// Fails on a missing identity, a transport failure, or an undecodable response.
    pub async fn get_billing_events(
        &mut self,
        limit: u32,
        offset: u32,
        order: OrderDirection,
        cached: bool,
    ) -> Result<&[BillingEvent]> {
        let query = PageQuery {
            limit,
            offset,
            order,
        };

        let reuse = match &self.billing_events {
            Some(page) if cached => {
                if page.query != query {
                    tracing::warn!(
                        cached = ?page.query,
                        requested = ?query,
                        "Serving cached billing event page for a different page request"
                    );
                }
                true
            }
            _ => false,
        };

        if !reuse {
            let identifier = self.user_identifier()?;
            tracing::debug!(user = %identifier, limit, offset, order = %order, "Fetching billing events");
            let raw = self
                .transport
                .billing_get_events_for_user(&identifier, limit, offset, order)
                .await?;
            let response = BillingGetEventsForUserResponse::from_response(&raw)?;
            self.billing_events = Some(BillingEventsPage {
                query,
                events: response.billing_events,
                total_count: response.total_count,
            });
        }

        Ok(self
            .billing_events
            .as_ref()
            .map(|page| page.events.as_slice())
            .unwrap_or_default())
    }

    /// Find a billing event by id within the default page.
    ///
    /// # Errors
    ///
    /// Same as [`UserContext::get_billing_events`].
    pub async fn get_billing_event(
        &mut self,
        billing_event_id: BillingEventId,
        cached: bool,
    ) -> Result<Option<&BillingEvent>> {
        let page = self.default_page();
        let events = self
            .get_billing_events(page.limit, page.offset, page.order, cached)
            .await?;
        Ok(events
            .iter()
            .find(|event| event.billing_event_id == billing_event_id))
    }

    /// Append a billing event the caller created elsewhere.
    ///
    /// Populates the cache with the default page first if it is unset; the append
    /// itself is local and does not change the reported total count.
    ///
    /// # Errors
    ///
    /// Same as [`UserContext::get_billing_events`].
    pub async fn add_billing_event(&mut self, billing_event: BillingEvent) -> Result<&mut Self> {
        let page = self.default_page();
        self.get_billing_events(page.limit, page.offset, page.order, true)
            .await?;
        if let Some(cached) = self.billing_events.as_mut() {
            cached.events.push(billing_event);
        }
        Ok(self)
    }

    /// Total number of billing events on the server, as reported with the cached page.
    ///
    /// # Errors
    ///
    /// Same as [`UserContext::get_billing_events`].
    pub async fn get_billing_events_total_count(
        &mut self,
        limit: u32,
        offset: u32,
        order: OrderDirection,
        cached: bool,
    ) -> Result<u64> {
        if let Some(page) = self.billing_events.as_ref().filter(|_| cached) {
            return Ok(page.total_count);
        }

        self.get_billing_events(limit, offset, order, cached).await?;
        Ok(self
            .billing_events
            .as_ref()
            .map_or(0, |page| page.total_count))
    }

    // ========================================================================
    // Account
    // ========================================================================

    /// The user's account balance.
    ///
    /// # Errors
    ///
    /// Fails on a missing identity, a transport failure, or an undecodable response.
    pub async fn get_account_balance(&mut self, cached: bool) -> Result<&Price> {
        let balance = match self.account_balance.take() {
            Some(balance) if cached => balance,
            previous => match self.fetch_account_balance().await {
                Ok(balance) => balance,
                Err(e) => {
                    self.account_balance = previous;
                    return Err(e);
                }
            },
        };

        Ok(self.account_balance.insert(balance))
    }

    async fn fetch_account_balance(&self) -> Result<Price> {
        let identifier = self.user_identifier()?;
        tracing::debug!(user = %identifier, "Fetching account balance");
        let raw = self.transport.user_get_balance(&identifier).await?;
        Ok(UserGetBalanceResponse::from_response(&raw)?.balance)
    }

    /// The user's auth tokens.
    ///
    /// # Errors
    ///
    /// Fails on a missing identity, a transport failure, or an undecodable response.
    pub async fn get_auth_tokens(&mut self, cached: bool) -> Result<&[AuthToken]> {
        if !cached || self.auth_tokens.is_none() {
            let identifier = self.user_identifier()?;
            tracing::debug!(user = %identifier, "Fetching auth tokens");
            let raw = self.transport.user_get_tokens(&identifier).await?;
            self.auth_tokens = Some(UserGetTokensResponse::from_response(&raw)?.tokens);
        }

        Ok(self.auth_tokens.as_deref().unwrap_or_default())
    }

    // ========================================================================
    // User mutations
    // ========================================================================

    /// Replace the user's metadata, keeping the language and the session token.
    ///
    /// # Errors
    ///
    /// Fails on a missing identity, a transport failure, or an undecodable response.
    pub async fn change_user_meta_data(
        &mut self,
        meta_data: &BTreeMap<String, String>,
    ) -> Result<&mut Self> {
        let user = self.user()?;
        let auth_token = user.auth_token.clone();
        let language = user.language.clone();
        let identifier = self.user_identifier()?;

        let raw = self
            .transport
            .user_change(&identifier, &language, meta_data)
            .await?;
        let changed = UserChangeResponse::from_response(&raw)?.user;

        tracing::info!(user_id = %changed.user_id, "Changed user metadata");
        self.user = Some(changed.with_auth_token(auth_token));
        Ok(self)
    }

    /// Change the user's password, keeping the session token.
    ///
    /// # Errors
    ///
    /// Fails on a missing identity, a transport failure, or an undecodable response.
    pub async fn change_user_password(&mut self, new_password: &str) -> Result<&mut Self> {
        let auth_token = self.user()?.auth_token.clone();
        let identifier = self.user_identifier()?;

        let raw = self
            .transport
            .user_change_password(&identifier, new_password)
            .await?;
        let changed = UserChangePasswordResponse::from_response(&raw)?.user;

        tracing::info!(user_id = %changed.user_id, "Changed user password");
        self.user = Some(changed.with_auth_token(auth_token));
        Ok(self)
    }

    /// Delete the user on the server. Afterwards [`UserContext::user`] fails with
    /// [`ClientError::InvalidToken`].
    ///
    /// # Errors
    ///
    /// Fails on a missing identity, a transport failure, or an undecodable response.
    pub async fn delete_user(&mut self) -> Result<&mut Self> {
        let identifier = self.user_identifier()?;

        let raw = self.transport.user_delete(&identifier).await?;
        UserDeleteResponse::from_response(&raw)?;

        tracing::info!(user = %identifier, "Deleted user");
        self.user = None;
        Ok(self)
    }

    /// Disable login for the user. The server returns the user with its token.
    ///
    /// # Errors
    ///
    /// Fails on a missing identity, a transport failure, or an undecodable response.
    pub async fn disable_user_login(&mut self) -> Result<&mut Self> {
        let identifier = self.user_identifier()?;

        let raw = self.transport.user_disable_login(&identifier).await?;
        let user = UserDisableLoginResponse::from_response(&raw)?.user;

        tracing::info!(user_id = %user.user_id, "Disabled user login");
        self.user = Some(user);
        Ok(self)
    }
}
