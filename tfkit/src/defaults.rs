//! Default value providers for attributes
//!
//! Defaults are evaluated during planning when an attribute is not set in
//! configuration. They differ from plan modifiers in that they only run
//! when the value is absent, not when it's explicitly set to null.

use crate::schema::Default;
use crate::types::Dynamic;

/// StaticDefault provides a static default value
pub struct StaticDefault {
    value: Dynamic,
}

impl StaticDefault {
    pub fn create(value: Dynamic) -> Box<dyn Default> {
        Box::new(Self { value })
    }

    pub fn string(value: &str) -> Box<dyn Default> {
        Box::new(Self {
            value: Dynamic::String(value.to_string()),
        })
    }

    pub fn number(value: f64) -> Box<dyn Default> {
        Box::new(Self {
            value: Dynamic::Number(value),
        })
    }

    pub fn bool(value: bool) -> Box<dyn Default> {
        Box::new(Self {
            value: Dynamic::Bool(value),
        })
    }
}

impl Default for StaticDefault {
    fn description(&self) -> String {
        format!("static default value: {:?}", self.value)
    }

    fn default_value(&self) -> Dynamic {
        self.value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_default_string() {
        let default = StaticDefault::string("default-value");
        assert_eq!(
            default.default_value(),
            Dynamic::String("default-value".to_string())
        );
    }

    #[test]
    fn static_default_bool() {
        let default = StaticDefault::bool(true);
        assert_eq!(default.default_value(), Dynamic::Bool(true));
    }

    #[test]
    fn static_default_number() {
        let default = StaticDefault::number(42.0);
        assert_eq!(default.default_value(), Dynamic::Number(42.0));
    }
}
