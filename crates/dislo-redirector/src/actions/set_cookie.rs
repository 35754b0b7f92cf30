use serde_json::{Map, Value};

use super::{required, Action};
use crate::error::Result;
use crate::request::RedirectorRequest;
use crate::result::RedirectorResult;
use crate::values::Cookie;

/// Sets a fixed cookie on the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    cookie_name: String,
    cookie_value: String,
}

impl SetCookie {
    /// Action name used in errors and logs.
    pub const NAME: &'static str = "SetCookie";

    /// Create the action directly.
    #[must_use]
    pub fn new(cookie_name: impl Into<String>, cookie_value: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            cookie_value: cookie_value.into(),
        }
    }
}

impl Action for SetCookie {
    fn from_parameters(parameters: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            cookie_name: required(Self::NAME, parameters, "cookieName")?,
            cookie_value: required(Self::NAME, parameters, "cookieValue")?,
        })
    }

    fn process(&self, result: &mut RedirectorResult, _request: &RedirectorRequest) {
        tracing::debug!(name = %self.cookie_name, "Setting cookie");
        result.add_cookie(Cookie::new(self.cookie_name.clone(), self.cookie_value.clone()));
    }
}
