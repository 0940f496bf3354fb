//! Validation pipeline for form processing.
//!
//! Validation runs in one accumulating pass at submit time: every field is
//! cleaned and every failure is reported, rather than stopping at the first
//! offender. Nothing here performs I/O; a form that fails validation never
//! causes a network call.

use std::collections::HashMap;

use carmarket_core::ValidationError;

use crate::fields::{clean_field_value, FieldDef, Value};

/// Performs field-level validation for all fields.
///
/// For each field definition:
/// 1. Extracts the raw value from the data map
/// 2. Runs [`clean_field_value`] for type coercion and field-level validation
/// 3. Populates `cleaned_data` on success or `errors` on failure
///
/// Errors accumulate across all fields (no short-circuiting).
pub fn clean_fields(
    field_defs: &[FieldDef],
    raw_data: &HashMap<String, Option<String>>,
    cleaned_data: &mut HashMap<String, Value>,
    errors: &mut HashMap<String, Vec<String>>,
) {
    for field in field_defs {
        let raw = raw_data.get(&field.name).and_then(|v| v.as_deref());

        match clean_field_value(field, raw) {
            Ok(value) => {
                cleaned_data.insert(field.name.clone(), value);
            }
            Err(field_errors) => {
                errors.insert(field.name.clone(), field_errors);
            }
        }
    }
}

/// Packages an accumulated error map into a single [`ValidationError`].
///
/// Returns `None` when the map is empty (the form is valid).
pub fn into_validation_error(errors: &HashMap<String, Vec<String>>) -> Option<ValidationError> {
    if errors.is_empty() {
        return None;
    }
    let field_errors = errors
        .iter()
        .map(|(name, msgs)| {
            let errs = msgs
                .iter()
                .map(|m| ValidationError::new(m.clone(), "invalid"))
                .collect();
            (name.clone(), errs)
        })
        .collect();
    Some(ValidationError::with_field_errors(field_errors))
}
