//! The incoming request the redirector evaluates.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{RedirectorError, Result};
use crate::values::{Cookie, Header, RequestParameter, SessionVariable};

const DEFAULT_METHOD: &str = "GET";

/// What the redirector knows about one incoming request.
///
/// Built by the host application with the fluent setters, typically starting from
/// [`RedirectorRequest::set_from_url`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectorRequest {
    scheme: Option<String>,
    host: Option<String>,
    path: Option<String>,
    query: Option<String>,
    request_parameters: Vec<RequestParameter>,
    method: String,
    cookies: Vec<Cookie>,
    ip_based_country_code: Option<String>,
    headers: Vec<Header>,
    session_variables: Vec<SessionVariable>,
}

impl Default for RedirectorRequest {
    fn default() -> Self {
        Self {
            scheme: None,
            host: None,
            path: None,
            query: None,
            request_parameters: Vec::new(),
            method: DEFAULT_METHOD.to_string(),
            cookies: Vec::new(),
            ip_based_country_code: None,
            headers: Vec::new(),
            session_variables: Vec::new(),
        }
    }
}

impl RedirectorRequest {
    /// An empty `GET` request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill scheme, host, path and query from an absolute URL.
    ///
    /// Other fields are left untouched. Query parameters are not copied into the
    /// request parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RedirectorError::InvalidUrl`] if `url` does not parse. The request is
    /// unchanged in that case.
    pub fn set_from_url(&mut self, url: &str) -> Result<&mut Self> {
        let parsed = Url::parse(url).map_err(|e| RedirectorError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        self.scheme = Some(parsed.scheme().to_string());
        self.host = parsed.host_str().map(str::to_string);
        self.path = Some(parsed.path())
            .filter(|path| !path.is_empty())
            .map(str::to_string);
        self.query = parsed.query().map(str::to_string);
        Ok(self)
    }

    // ========================================================================
    // URL parts
    // ========================================================================

    /// URL scheme, e.g. `https`.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Set the URL scheme.
    pub fn set_scheme(&mut self, scheme: impl Into<String>) -> &mut Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Host name.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Set the host name.
    pub fn set_host(&mut self, host: impl Into<String>) -> &mut Self {
        self.host = Some(host.into());
        self
    }

    /// URL path.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Set the URL path.
    pub fn set_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.path = Some(path.into());
        self
    }

    /// Raw query string, without the leading `?`.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Set the raw query string.
    pub fn set_query(&mut self, query: impl Into<String>) -> &mut Self {
        self.query = Some(query.into());
        self
    }

    // ========================================================================
    // Method and origin
    // ========================================================================

    /// HTTP method. Defaults to `GET`.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Set the HTTP method.
    pub fn set_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.method = method.into();
        self
    }

    /// Country code derived from the client IP, if the host resolved one.
    #[must_use]
    pub fn ip_based_country_code(&self) -> Option<&str> {
        self.ip_based_country_code.as_deref()
    }

    /// Set the IP-based country code.
    pub fn set_ip_based_country_code(&mut self, country_code: impl Into<String>) -> &mut Self {
        self.ip_based_country_code = Some(country_code.into());
        self
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// Request parameters, in the order they were added.
    #[must_use]
    pub fn request_parameters(&self) -> &[RequestParameter] {
        &self.request_parameters
    }

    /// Replace all request parameters.
    pub fn set_request_parameters(&mut self, parameters: Vec<RequestParameter>) -> &mut Self {
        self.request_parameters = parameters;
        self
    }

    /// Append a request parameter.
    pub fn add_request_parameter(&mut self, parameter: RequestParameter) -> &mut Self {
        self.request_parameters.push(parameter);
        self
    }

    /// First request parameter named `name`.
    #[must_use]
    pub fn request_parameter(&self, name: &str) -> Option<&RequestParameter> {
        self.request_parameters.iter().find(|p| p.name == name)
    }

    /// Cookies sent with the request.
    #[must_use]
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Replace all cookies.
    pub fn set_cookies(&mut self, cookies: Vec<Cookie>) -> &mut Self {
        self.cookies = cookies;
        self
    }

    /// Append a cookie.
    pub fn add_cookie(&mut self, cookie: Cookie) -> &mut Self {
        self.cookies.push(cookie);
        self
    }

    /// First cookie named `name`.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().find(|c| c.name == name)
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Replace all headers.
    pub fn set_headers(&mut self, headers: Vec<Header>) -> &mut Self {
        self.headers = headers;
        self
    }

    /// Append a header.
    pub fn add_header(&mut self, header: Header) -> &mut Self {
        self.headers.push(header);
        self
    }

    /// First header named `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&Header> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
    }

    /// Session variables present when the request arrived.
    #[must_use]
    pub fn session_variables(&self) -> &[SessionVariable] {
        &self.session_variables
    }

    /// Replace all session variables.
    pub fn set_session_variables(&mut self, variables: Vec<SessionVariable>) -> &mut Self {
        self.session_variables = variables;
        self
    }

    /// Session variable named `name`.
    #[must_use]
    pub fn session_variable(&self, name: &str) -> Option<&SessionVariable> {
        self.session_variables.iter().find(|v| v.name == name)
    }
}
