use serde_json::{Map, Value};

use super::{required, Action};
use crate::error::Result;
use crate::request::RedirectorRequest;
use crate::result::RedirectorResult;
use crate::values::SessionVariable;

/// Stores a fixed session variable for the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSessionVariable {
    variable_name: String,
    variable_value: String,
}

impl SetSessionVariable {
    /// Action name used in errors and logs.
    pub const NAME: &'static str = "SetSessionVariable";

    /// Create the action directly.
    #[must_use]
    pub fn new(variable_name: impl Into<String>, variable_value: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            variable_value: variable_value.into(),
        }
    }
}

impl Action for SetSessionVariable {
    fn from_parameters(parameters: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            variable_name: required(Self::NAME, parameters, "variableName")?,
            variable_value: required(Self::NAME, parameters, "variableValue")?,
        })
    }

    fn process(&self, result: &mut RedirectorResult, _request: &RedirectorRequest) {
        tracing::debug!(name = %self.variable_name, "Setting session variable");
        result.set_session_variable(SessionVariable::new(
            self.variable_name.clone(),
            self.variable_value.clone(),
        ));
    }
}
