//! # dislo-redirector
//!
//! Request model and actions for the Dislo URL redirector.
//!
//! The redirector inspects an incoming [`RedirectorRequest`] and lets configured
//! actions write their effects into a [`RedirectorResult`]: session variables to
//! store, cookies to set, and an optional redirect.
//!
//! Actions are built from their configured parameters with
//! [`Action::from_parameters`], which rejects incomplete configuration up front.
//! Processing itself cannot fail.
//!
//! ```
//! use dislo_redirector::{Action, RedirectorRequest, RedirectorResult, SetSessionVariable};
//! use serde_json::json;
//!
//! let parameters = json!({"variableName": "campaign", "variableValue": "spring"});
//! let action = SetSessionVariable::from_parameters(parameters.as_object().unwrap()).unwrap();
//!
//! let request = RedirectorRequest::new();
//! let mut result = RedirectorResult::new();
//! action.process(&mut result, &request);
//!
//! assert_eq!(result.session_variable("campaign").map(|v| v.value.as_str()), Some("spring"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod actions;
mod error;
mod request;
mod result;
mod values;

pub use actions::{Action, Redirect, SetCookie, SetSessionVariable};
pub use error::{RedirectorError, Result};
pub use request::RedirectorRequest;
pub use result::{RedirectTarget, RedirectorResult, DEFAULT_REDIRECT_STATUS};
pub use values::{Cookie, Header, RequestParameter, SessionVariable};
