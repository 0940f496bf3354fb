//! [`FormState`]: the mutable state of one form instance.
//!
//! A `FormState` is created on form mount with default values, mutated on
//! every user input event via [`FormState::update_field`], and read once at
//! submit time. Validation is deferred entirely to submit time; updating a
//! field never validates it (input masking is a presentation concern that
//! lives in the UI layer, not here).

use std::collections::HashMap;

use carmarket_core::ValidationError;

use crate::fields::{FieldDef, Value};
use crate::validation;

/// The state of a single form: field definitions plus the raw values the
/// user has entered so far, and (after validation) cleaned data and errors.
#[derive(Debug)]
pub struct FormState {
    field_defs: Vec<FieldDef>,
    raw_data: HashMap<String, Option<String>>,
    errors: HashMap<String, Vec<String>>,
    cleaned_data: HashMap<String, Value>,
}

impl FormState {
    /// Creates a new `FormState` with the given field definitions.
    ///
    /// Fields with an initial value start out with that value as their raw
    /// data; everything else starts empty.
    pub fn new(fields: Vec<FieldDef>) -> Self {
        let mut raw_data = HashMap::new();
        for field in &fields {
            let initial = field.initial.as_ref().map(|v| match v {
                Value::String(s) => s.clone(),
                Value::Int(n) => n.to_string(),
                Value::Null => String::new(),
            });
            raw_data.insert(field.name.clone(), initial);
        }
        Self {
            field_defs: fields,
            raw_data,
            errors: HashMap::new(),
            cleaned_data: HashMap::new(),
        }
    }

    /// Returns the form's field definitions.
    pub fn fields(&self) -> &[FieldDef] {
        &self.field_defs
    }

    /// Merges a user-entered value into the form state.
    ///
    /// No validation happens here; it is deferred to [`Self::is_valid`].
    /// Setting the same value twice is a no-op, and unknown field names are
    /// ignored (the UI cannot submit fields the form does not declare).
    pub fn update_field(&mut self, name: &str, value: impl Into<String>) {
        if self.field_defs.iter().any(|f| f.name == name) {
            self.raw_data.insert(name.to_string(), Some(value.into()));
        }
    }

    /// Returns the current raw value of a field, if one has been entered.
    pub fn raw_value(&self, name: &str) -> Option<&str> {
        self.raw_data.get(name).and_then(|v| v.as_deref())
    }

    /// Validates the form. Returns `true` if valid.
    ///
    /// After calling this, [`Self::errors`] and [`Self::cleaned_data`] are
    /// populated. Calling it again re-runs validation from the current raw
    /// data, so a form remains editable and resubmittable after a failure.
    pub fn is_valid(&mut self) -> bool {
        self.errors.clear();
        self.cleaned_data.clear();

        validation::clean_fields(
            &self.field_defs,
            &self.raw_data,
            &mut self.cleaned_data,
            &mut self.errors,
        );

        self.errors.is_empty()
    }

    /// Runs validation and packages any failures into a [`ValidationError`].
    pub fn full_clean(&mut self) -> Result<(), ValidationError> {
        if self.is_valid() {
            Ok(())
        } else {
            // is_valid() returned false, so the map is non-empty.
            Err(validation::into_validation_error(&self.errors)
                .unwrap_or_else(|| ValidationError::new("Form is invalid.", "invalid")))
        }
    }

    /// Returns per-field validation errors.
    ///
    /// Keys are field names, values are lists of error messages.
    pub fn errors(&self) -> &HashMap<String, Vec<String>> {
        &self.errors
    }

    /// Returns the cleaned (validated and coerced) data.
    ///
    /// Only populated after a successful call to [`Self::is_valid`].
    pub fn cleaned_data(&self) -> &HashMap<String, Value> {
        &self.cleaned_data
    }

    /// Returns the cleaned value for one field.
    pub fn cleaned_value(&self, name: &str) -> Option<&Value> {
        self.cleaned_data.get(name)
    }

    /// Returns the cleaned data for all non-transient fields, as JSON.
    ///
    /// This is the payload-assembly view of the form: transient UI-only
    /// fields (such as the max-pictures control) are excluded.
    pub fn payload_fields(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        for field in &self.field_defs {
            if field.transient {
                continue;
            }
            if let Some(value) = self.cleaned_data.get(&field.name) {
                map.insert(field.name.clone(), value.to_json());
            }
        }
        map
    }
}
