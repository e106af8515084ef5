use std::{any::Any, fmt::Display};

use crate::common::{equal, Value};
use crate::errors::FiremockResult;

use super::{FieldSource, FieldTarget, FilterProvider};

fn contains(haystack: &[Value], needle: &Value) -> bool {
    haystack.iter().any(|candidate| equal(needle, candidate))
}

/// Matches documents whose field equals one element of an array operand.
///
/// A non-array operand matches nothing.
pub(crate) struct InFilter {
    field: FieldTarget,
    values: Value,
}

impl InFilter {
    #[inline]
    pub(crate) fn new(field: FieldTarget, values: Value) -> Self {
        InFilter { field, values }
    }
}

impl Display for InFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} in {})", self.field, self.values)
    }
}

impl FilterProvider for InFilter {
    fn apply(&self, entry: &dyn FieldSource) -> FiremockResult<bool> {
        let Some(values) = self.values.as_array() else {
            return Ok(false);
        };
        Ok(self
            .field
            .resolve(entry)?
            .is_some_and(|value| contains(values, value)))
    }

    fn validate(&self) -> FiremockResult<()> {
        self.field.validate()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Matches documents whose field is present and equals no element of an
/// array operand. An absent field is never "not in".
pub(crate) struct NotInFilter {
    field: FieldTarget,
    values: Value,
}

impl NotInFilter {
    #[inline]
    pub(crate) fn new(field: FieldTarget, values: Value) -> Self {
        NotInFilter { field, values }
    }
}

impl Display for NotInFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} not in {})", self.field, self.values)
    }
}

impl FilterProvider for NotInFilter {
    fn apply(&self, entry: &dyn FieldSource) -> FiremockResult<bool> {
        let Some(values) = self.values.as_array() else {
            return Ok(false);
        };
        Ok(self
            .field
            .resolve(entry)?
            .is_some_and(|value| !contains(values, value)))
    }

    fn validate(&self) -> FiremockResult<()> {
        self.field.validate()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Matches documents whose array field holds an element equal to the operand.
pub(crate) struct ArrayContainsFilter {
    field: FieldTarget,
    value: Value,
}

impl ArrayContainsFilter {
    #[inline]
    pub(crate) fn new(field: FieldTarget, value: Value) -> Self {
        ArrayContainsFilter { field, value }
    }
}

impl Display for ArrayContainsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} contains {})", self.field, self.value)
    }
}

impl FilterProvider for ArrayContainsFilter {
    fn apply(&self, entry: &dyn FieldSource) -> FiremockResult<bool> {
        Ok(self
            .field
            .resolve(entry)?
            .and_then(Value::as_array)
            .is_some_and(|elements| elements.iter().any(|e| equal(e, &self.value))))
    }

    fn validate(&self) -> FiremockResult<()> {
        self.field.validate()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Matches documents whose array field holds an element equal to any element
/// of an array operand. A non-array operand matches nothing.
pub(crate) struct ArrayContainsAnyFilter {
    field: FieldTarget,
    values: Value,
}

impl ArrayContainsAnyFilter {
    #[inline]
    pub(crate) fn new(field: FieldTarget, values: Value) -> Self {
        ArrayContainsAnyFilter { field, values }
    }
}

impl Display for ArrayContainsAnyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} contains any {})", self.field, self.values)
    }
}

impl FilterProvider for ArrayContainsAnyFilter {
    fn apply(&self, entry: &dyn FieldSource) -> FiremockResult<bool> {
        let Some(values) = self.values.as_array() else {
            return Ok(false);
        };
        Ok(self
            .field
            .resolve(entry)?
            .and_then(Value::as_array)
            .is_some_and(|elements| elements.iter().any(|e| contains(values, e))))
    }

    fn validate(&self) -> FiremockResult<()> {
        self.field.validate()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
