//! Name/value pairs carried by requests and results.

use serde::{Deserialize, Serialize};

/// Defines a name/value pair type with fluent setters.
macro_rules! name_value_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name {
            /// Name.
            pub name: String,
            /// Value.
            pub value: String,
        }

        impl $name {
            /// Create a pair.
            #[must_use]
            pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
                Self {
                    name: name.into(),
                    value: value.into(),
                }
            }

            /// Set the name.
            pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
                self.name = name.into();
                self
            }

            /// Set the value.
            pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
                self.value = value.into();
                self
            }
        }
    };
}

name_value_type!(Cookie, "A cookie sent with the request or to be set on the response.");
name_value_type!(Header, "An HTTP request header.");
name_value_type!(RequestParameter, "A query or form parameter of the request.");
name_value_type!(SessionVariable, "A variable stored in the visitor's session.");
