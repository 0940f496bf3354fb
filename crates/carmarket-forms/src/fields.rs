//! Form field definitions and type-level validation.
//!
//! Each [`FieldDef`] describes a single form field, including its type,
//! requiredness, and custom error messages. The [`FieldType`] enum defines
//! the type-specific parsing and coercion logic through the
//! [`clean_field_value`] function.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

/// A cleaned, typed field value.
///
/// This is the output of [`clean_field_value`]: raw string input coerced
/// into the field's native type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string value.
    String(String),
    /// An integer value.
    Int(i64),
    /// The absence of a value (optional field left empty).
    Null,
}

impl Value {
    /// Converts this value into its JSON representation.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Int(n) => serde_json::Value::Number((*n).into()),
            Self::Null => serde_json::Value::Null,
        }
    }

    /// Returns the contained string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained integer, if this is an integer value.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }
}

/// Defines the type of a form field, including type-specific parameters.
///
/// Each variant carries the parameters needed for parsing and validating
/// raw string input. [`clean_field_value`] dispatches on this enum to
/// perform type coercion and built-in validation.
#[derive(Debug, Clone)]
pub enum FieldType {
    /// A character (string) field.
    Char {
        /// Minimum length (characters).
        min_length: Option<usize>,
        /// Maximum length (characters).
        max_length: Option<usize>,
        /// Whether to strip leading/trailing whitespace.
        strip: bool,
    },
    /// An integer field.
    Integer {
        /// Minimum allowed value.
        min_value: Option<i64>,
        /// Maximum allowed value.
        max_value: Option<i64>,
    },
    /// An email address field.
    Email,
    /// A field validated against a regular expression.
    Regex {
        /// The regex pattern string.
        pattern: String,
    },
}

/// Complete definition of a form field.
///
/// A `FieldDef` captures everything needed to parse and validate a single
/// form field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// The field name.
    pub name: String,
    /// The field type, controlling parsing and coercion.
    pub field_type: FieldType,
    /// Whether this field is required.
    pub required: bool,
    /// Default/initial value.
    pub initial: Option<Value>,
    /// Human-readable label.
    pub label: String,
    /// Custom error messages keyed by error code (e.g. "required", "invalid").
    pub error_messages: HashMap<String, String>,
    /// Whether this field is transient: collected from the user but
    /// excluded from the request payload (e.g. the max-pictures control).
    pub transient: bool,
}

impl FieldDef {
    /// Creates a new `FieldDef` with sensible defaults.
    ///
    /// The field is required by default and carries no custom error messages.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        let label = name.replace('_', " ");
        Self {
            name,
            field_type,
            required: true,
            initial: None,
            label,
            error_messages: HashMap::new(),
            transient: false,
        }
    }

    /// Sets whether this field is required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn initial(mut self, value: Value) -> Self {
        self.initial = Some(value);
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets a custom error message for a given code.
    #[must_use]
    pub fn error_message(mut self, code: impl Into<String>, msg: impl Into<String>) -> Self {
        self.error_messages.insert(code.into(), msg.into());
        self
    }

    /// Marks this field as transient (excluded from request payloads).
    #[must_use]
    pub const fn transient(mut self, transient: bool) -> Self {
        self.transient = transient;
        self
    }

    /// Returns the custom message for `code`, or `default` rendered as-is.
    fn message(&self, code: &str, default: impl Into<String>) -> String {
        self.error_messages
            .get(code)
            .cloned()
            .unwrap_or_else(|| default.into())
    }
}

/// Cleans (validates and coerces) a raw form input string into a typed [`Value`].
///
/// This performs type-level validation:
/// 1. Required check (if `required` and value is empty/None)
/// 2. Type coercion (string -> i64, etc.)
/// 3. Type-specific constraint validation (min/max, regex, email shape)
///
/// Returns the cleaned `Value` or a list of error messages. Custom error
/// messages registered on the field (per error code) take precedence over
/// the built-in texts.
pub fn clean_field_value(field: &FieldDef, raw: Option<&str>) -> Result<Value, Vec<String>> {
    let raw_str = raw.unwrap_or("");
    let is_empty = raw_str.is_empty() || raw.is_none();

    // Required check
    if field.required && is_empty {
        return Err(vec![field.message("required", "This field is required.")]);
    }

    // If not required and empty, return the initial value or Null
    if is_empty {
        return Ok(field.initial.clone().unwrap_or(Value::Null));
    }

    let mut errors = Vec::new();

    let value = match &field.field_type {
        FieldType::Char {
            min_length,
            max_length,
            strip,
        } => {
            let s = if *strip { raw_str.trim() } else { raw_str };
            if let Some(min) = min_length {
                if s.len() < *min {
                    errors.push(field.message(
                        "min_length",
                        format!(
                            "Ensure this value has at least {min} characters (it has {}).",
                            s.len()
                        ),
                    ));
                }
            }
            if let Some(max) = max_length {
                if s.len() > *max {
                    errors.push(field.message(
                        "max_length",
                        format!(
                            "Ensure this value has at most {max} characters (it has {}).",
                            s.len()
                        ),
                    ));
                }
            }
            Value::String(s.to_string())
        }

        FieldType::Integer {
            min_value,
            max_value,
        } => match raw_str.parse::<i64>() {
            Ok(n) => {
                if let Some(min) = min_value {
                    if n < *min {
                        errors.push(field.message(
                            "min_value",
                            format!("Ensure this value is greater than or equal to {min}."),
                        ));
                    }
                }
                if let Some(max) = max_value {
                    if n > *max {
                        errors.push(field.message(
                            "max_value",
                            format!("Ensure this value is less than or equal to {max}."),
                        ));
                    }
                }
                Value::Int(n)
            }
            Err(_) => {
                errors.push(field.message("invalid", "Enter a whole number."));
                Value::Null
            }
        },

        FieldType::Email => {
            if !EMAIL_RE.is_match(raw_str) {
                errors.push(field.message("invalid", "Enter a valid email address."));
            }
            Value::String(raw_str.to_string())
        }

        FieldType::Regex { pattern } => {
            let re = Regex::new(pattern).map_err(|e| vec![format!("Invalid regex: {e}")])?;
            if !re.is_match(raw_str) {
                errors.push(field.message("invalid", "Enter a valid value."));
            }
            Value::String(raw_str.to_string())
        }
    };

    if errors.is_empty() {
        Ok(value)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_field_clean() {
        let field = FieldDef::new(
            "model",
            FieldType::Char {
                min_length: Some(3),
                max_length: Some(50),
                strip: true,
            },
        );
        let result = clean_field_value(&field, Some("  Civic  "));
        assert_eq!(result.unwrap(), Value::String("Civic".to_string()));
    }

    #[test]
    fn test_char_field_too_short() {
        let field = FieldDef::new(
            "model",
            FieldType::Char {
                min_length: Some(3),
                max_length: None,
                strip: false,
            },
        );
        let result = clean_field_value(&field, Some("GT"));
        assert!(result.unwrap_err()[0].contains("at least 3"));
    }

    #[test]
    fn test_char_field_custom_message() {
        let field = FieldDef::new(
            "model",
            FieldType::Char {
                min_length: Some(3),
                max_length: None,
                strip: false,
            },
        )
        .error_message("min_length", "Car model must be at least 3 characters!");
        let result = clean_field_value(&field, Some("GT"));
        assert_eq!(
            result.unwrap_err()[0],
            "Car model must be at least 3 characters!"
        );
    }

    #[test]
    fn test_integer_field_clean() {
        let field = FieldDef::new(
            "price",
            FieldType::Integer {
                min_value: Some(0),
                max_value: None,
            },
        );
        assert_eq!(clean_field_value(&field, Some("15000")).unwrap(), Value::Int(15000));
    }

    #[test]
    fn test_integer_field_below_min() {
        let field = FieldDef::new(
            "price",
            FieldType::Integer {
                min_value: Some(0),
                max_value: None,
            },
        );
        let result = clean_field_value(&field, Some("-5"));
        assert!(result.unwrap_err()[0].contains("greater than or equal to 0"));
    }

    #[test]
    fn test_integer_field_not_a_number() {
        let field = FieldDef::new(
            "price",
            FieldType::Integer {
                min_value: None,
                max_value: None,
            },
        );
        let result = clean_field_value(&field, Some("cheap"));
        assert_eq!(result.unwrap_err()[0], "Enter a whole number.");
    }

    #[test]
    fn test_integer_field_range() {
        let field = FieldDef::new(
            "max_pictures",
            FieldType::Integer {
                min_value: Some(1),
                max_value: Some(10),
            },
        );
        assert!(clean_field_value(&field, Some("5")).is_ok());
        assert!(clean_field_value(&field, Some("0")).is_err());
        assert!(clean_field_value(&field, Some("11")).is_err());
    }

    #[test]
    fn test_email_field() {
        let field = FieldDef::new("email", FieldType::Email);
        assert!(clean_field_value(&field, Some("buyer@example.com")).is_ok());
        assert!(clean_field_value(&field, Some("not-an-email")).is_err());
        assert!(clean_field_value(&field, Some("a@b")).is_err());
    }

    #[test]
    fn test_regex_field_phone() {
        let field = FieldDef::new(
            "phone",
            FieldType::Regex {
                pattern: r"^\d{11}$".to_string(),
            },
        )
        .error_message("invalid", "Phone number must be 11 digits!");
        assert!(clean_field_value(&field, Some("03001234567")).is_ok());
        assert_eq!(
            clean_field_value(&field, Some("12345")).unwrap_err()[0],
            "Phone number must be 11 digits!"
        );
    }

    #[test]
    fn test_required_field_missing() {
        let field = FieldDef::new("city", FieldType::Char {
            min_length: None,
            max_length: None,
            strip: true,
        })
        .error_message("required", "Please enter your city!");
        assert_eq!(
            clean_field_value(&field, None).unwrap_err()[0],
            "Please enter your city!"
        );
        assert_eq!(
            clean_field_value(&field, Some("")).unwrap_err()[0],
            "Please enter your city!"
        );
    }

    #[test]
    fn test_optional_field_empty_uses_initial() {
        let field = FieldDef::new("city", FieldType::Char {
            min_length: None,
            max_length: None,
            strip: true,
        })
        .required(false)
        .initial(Value::String("Lahore".into()));
        assert_eq!(
            clean_field_value(&field, None).unwrap(),
            Value::String("Lahore".into())
        );
    }

    #[test]
    fn test_optional_field_empty_no_initial() {
        let field = FieldDef::new("note", FieldType::Char {
            min_length: None,
            max_length: None,
            strip: true,
        })
        .required(false);
        assert_eq!(clean_field_value(&field, None).unwrap(), Value::Null);
    }

    #[test]
    fn test_value_to_json() {
        assert_eq!(
            Value::String("x".into()).to_json(),
            serde_json::Value::String("x".into())
        );
        assert_eq!(Value::Int(7).to_json(), serde_json::json!(7));
        assert_eq!(Value::Null.to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_field_def_label_default() {
        let field = FieldDef::new("max_pictures", FieldType::Integer {
            min_value: None,
            max_value: None,
        });
        assert_eq!(field.label, "max pictures");
    }
}
