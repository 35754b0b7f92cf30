use serde_json::{Map, Value};

use super::{optional, required, Action};
use crate::error::{RedirectorError, Result};
use crate::request::RedirectorRequest;
use crate::result::{RedirectorResult, DEFAULT_REDIRECT_STATUS};

/// Redirects the visitor to a fixed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    url: String,
    status_code: u16,
}

impl Redirect {
    /// Action name used in errors and logs.
    pub const NAME: &'static str = "Redirect";

    /// Create a redirect with the default status code.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code: DEFAULT_REDIRECT_STATUS,
        }
    }

    /// Target URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Status code of the redirect response.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }
}

fn parse_status(raw: &str) -> Result<u16> {
    let invalid = |message: String| RedirectorError::InvalidParameter {
        action: Redirect::NAME,
        parameter: "statusCode",
        message,
    };

    let code: u16 = raw
        .parse()
        .map_err(|_| invalid(format!("{raw:?} is not a status code")))?;
    if (300..400).contains(&code) {
        Ok(code)
    } else {
        Err(invalid(format!("{code} is not a redirect status")))
    }
}

impl Action for Redirect {
    fn from_parameters(parameters: &Map<String, Value>) -> Result<Self> {
        let url = required(Self::NAME, parameters, "url")?;
        let status_code = optional(Self::NAME, parameters, "statusCode")?
            .as_deref()
            .map(parse_status)
            .transpose()?
            .unwrap_or(DEFAULT_REDIRECT_STATUS);

        Ok(Self { url, status_code })
    }

    fn process(&self, result: &mut RedirectorResult, _request: &RedirectorRequest) {
        tracing::debug!(url = %self.url, status = self.status_code, "Redirecting");
        result.set_redirect(self.url.clone(), self.status_code);
    }
}
