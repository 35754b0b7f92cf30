//! Effects accumulated while processing a request.

use serde::Serialize;

use crate::values::{Cookie, SessionVariable};

/// Status code used when a redirect does not name one.
pub const DEFAULT_REDIRECT_STATUS: u16 = 302;

/// Where to send the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectTarget {
    /// Target URL, absolute or relative.
    pub url: String,
    /// HTTP status code of the redirect response.
    pub status_code: u16,
}

/// Session variables, cookies and redirect produced by the actions that ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectorResult {
    session_variables: Vec<SessionVariable>,
    cookies: Vec<Cookie>,
    redirect: Option<RedirectTarget>,
}

impl RedirectorResult {
    /// An empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session variables to store, in the order they were first set.
    #[must_use]
    pub fn session_variables(&self) -> &[SessionVariable] {
        &self.session_variables
    }

    /// Session variable named `name`.
    #[must_use]
    pub fn session_variable(&self, name: &str) -> Option<&SessionVariable> {
        self.session_variables.iter().find(|v| v.name == name)
    }

    /// Store a session variable, replacing any earlier one with the same name.
    pub fn set_session_variable(&mut self, variable: SessionVariable) -> &mut Self {
        match self
            .session_variables
            .iter_mut()
            .find(|existing| existing.name == variable.name)
        {
            Some(existing) => existing.value = variable.value,
            None => self.session_variables.push(variable),
        }
        self
    }

    /// Cookies to set, in the order they were added.
    #[must_use]
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Append a cookie to set.
    pub fn add_cookie(&mut self, cookie: Cookie) -> &mut Self {
        self.cookies.push(cookie);
        self
    }

    /// The redirect, if an action requested one.
    #[must_use]
    pub fn redirect(&self) -> Option<&RedirectTarget> {
        self.redirect.as_ref()
    }

    /// Whether an action requested a redirect.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        self.redirect.is_some()
    }

    /// Request a redirect. A later call replaces an earlier one.
    pub fn set_redirect(&mut self, url: impl Into<String>, status_code: u16) -> &mut Self {
        self.redirect = Some(RedirectTarget {
            url: url.into(),
            status_code,
        });
        self
    }
}
