//! Built-in attribute validators

use crate::schema::{Validator, ValidatorRequest, ValidatorResponse};
use crate::types::{Diagnostic, Dynamic};

/// Restricts a string attribute to a fixed set of values
pub struct OneOf {
    allowed: Vec<String>,
}

impl OneOf {
    pub fn create(allowed: &[&str]) -> Box<dyn Validator> {
        Box::new(Self {
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        })
    }
}

impl Validator for OneOf {
    fn description(&self) -> String {
        format!("value must be one of: {}", self.allowed.join(", "))
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut diagnostics = Vec::new();

        if let Dynamic::String(s) = &request.value {
            if !self.allowed.iter().any(|a| a == s) {
                diagnostics.push(
                    Diagnostic::error(
                        "Invalid Attribute Value",
                        format!(
                            "Value {:?} is not valid, {}.",
                            s,
                            self.description()
                        ),
                    )
                    .with_attribute(request.path),
                );
            }
        }

        ValidatorResponse { diagnostics }
    }
}

/// Requires a string attribute to match a regular expression
pub struct RegexMatches {
    pattern: regex::Regex,
    description: String,
}

impl RegexMatches {
    pub fn create(pattern: &str, description: &str) -> Box<dyn Validator> {
        Box::new(Self {
            pattern: regex::Regex::new(pattern).expect("invalid validator regex"),
            description: description.to_string(),
        })
    }
}

impl Validator for RegexMatches {
    fn description(&self) -> String {
        self.description.clone()
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut diagnostics = Vec::new();

        if let Dynamic::String(s) = &request.value {
            if !self.pattern.is_match(s) {
                diagnostics.push(
                    Diagnostic::error(
                        "Invalid Attribute Value",
                        format!("Value {:?} does not match: {}", s, self.description),
                    )
                    .with_attribute(request.path),
                );
            }
        }

        ValidatorResponse { diagnostics }
    }
}
