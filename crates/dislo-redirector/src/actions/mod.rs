//! Actions a redirector rule can trigger.
//!
//! Each action is configured once from a JSON parameter map and then applied to any
//! number of requests. Configuration fails fast on missing parameters so a broken
//! rule set is caught when it is loaded.

use serde_json::{Map, Value};

use crate::error::{RedirectorError, Result};
use crate::request::RedirectorRequest;
use crate::result::RedirectorResult;

mod redirect;
mod set_cookie;
mod set_session_variable;

pub use redirect::Redirect;
pub use set_cookie::SetCookie;
pub use set_session_variable::SetSessionVariable;

/// A configured redirector action.
pub trait Action: std::fmt::Debug + Send + Sync {
    /// Build the action from its configured parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RedirectorError::MissingParameter`] if a required parameter is
    /// absent, `null`, or an empty string, and [`RedirectorError::InvalidParameter`]
    /// if a parameter has an unusable value.
    fn from_parameters(parameters: &Map<String, Value>) -> Result<Self>
    where
        Self: Sized;

    /// Apply the action to `result` for `request`.
    fn process(&self, result: &mut RedirectorResult, request: &RedirectorRequest);
}

/// Read a required parameter as a string.
///
/// Numbers and booleans are accepted in their JSON text form.
pub(crate) fn required(
    action: &'static str,
    parameters: &Map<String, Value>,
    parameter: &'static str,
) -> Result<String> {
    optional(action, parameters, parameter)?
        .ok_or(RedirectorError::MissingParameter { action, parameter })
}

/// Read an optional parameter as a string. Absent, `null` and `""` give `None`.
pub(crate) fn optional(
    action: &'static str,
    parameters: &Map<String, Value>,
    parameter: &'static str,
) -> Result<Option<String>> {
    match parameters.get(parameter) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) if value.is_empty() => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(value.to_string())),
        Some(Value::Array(_) | Value::Object(_)) => Err(RedirectorError::InvalidParameter {
            action,
            parameter,
            message: "expected a string".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn required_treats_null_and_empty_as_missing() {
        let parameters = params(json!({"a": null, "b": ""}));
        for name in ["a", "b", "c"] {
            let err = required("Test", &parameters, name).unwrap_err();
            assert_eq!(
                err,
                RedirectorError::MissingParameter {
                    action: "Test",
                    parameter: name
                }
            );
        }
    }

    #[test]
    fn scalars_are_stringified() {
        let parameters = params(json!({"n": 301, "b": true}));
        assert_eq!(required("Test", &parameters, "n").unwrap(), "301");
        assert_eq!(required("Test", &parameters, "b").unwrap(), "true");
    }

    #[test]
    fn structured_values_are_invalid() {
        let parameters = params(json!({"a": [1, 2]}));
        assert!(matches!(
            optional("Test", &parameters, "a"),
            Err(RedirectorError::InvalidParameter { parameter: "a", .. })
        ));
    }

    #[test]
    fn actions_run_in_order_as_trait_objects() {
        let actions: Vec<Box<dyn Action>> = vec![
            Box::new(
                SetSessionVariable::from_parameters(&params(
                    json!({"variableName": "step", "variableValue": "one"}),
                ))
                .unwrap(),
            ),
            Box::new(
                SetSessionVariable::from_parameters(&params(
                    json!({"variableName": "step", "variableValue": "two"}),
                ))
                .unwrap(),
            ),
            Box::new(Redirect::from_parameters(&params(json!({"url": "/done"}))).unwrap()),
        ];

        let request = RedirectorRequest::new();
        let mut result = RedirectorResult::new();
        for action in &actions {
            action.process(&mut result, &request);
        }

        assert_eq!(result.session_variables().len(), 1);
        assert_eq!(
            result.session_variable("step").map(|v| v.value.as_str()),
            Some("two")
        );
        assert_eq!(result.redirect().map(|r| r.url.as_str()), Some("/done"));
    }
}
