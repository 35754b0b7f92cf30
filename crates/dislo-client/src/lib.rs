//! Dislo Client SDK.
//!
//! This crate provides the client-side view of a Dislo user: response envelopes that
//! decode raw operation responses into working objects, a [`DisloTransport`] seam for
//! the remote calls themselves, and a [`UserContext`] that caches per-user data for
//! the lifetime of one request or session.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use dislo_client::{DisloTransport, UserContext};
//! use dislo_core::User;
//!
//! # async fn example<T: DisloTransport>(transport: Arc<T>, user: User) -> Result<(), dislo_client::ClientError> {
//! let mut context = UserContext::new(transport, user)?;
//!
//! // First call hits the transport, the second is served from cache
//! let count = context.get_all_subscriptions(true).await?.len();
//! let active = context.get_active_subscriptions(true).await?;
//!
//! println!("{} of {count} subscriptions active", active.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod context;
mod error;
mod options;
pub mod responses;
mod transport;

pub use context::{PageQuery, UserContext};
pub use error::{ClientError, Result};
pub use options::{ContextOptions, DEFAULT_PAGE_SIZE, ORDER_ENV, PAGE_SIZE_ENV};
pub use responses::Envelope;
pub use transport::{DisloTransport, OrderDirection, TransportResult, UserIdentifier};
