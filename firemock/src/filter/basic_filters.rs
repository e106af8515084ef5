use std::{any::Any, fmt::Display};

use crate::common::{equal, Value};
use crate::errors::FiremockResult;

use super::{FieldSource, FieldTarget, FilterProvider};

/// Matches documents whose field equals a value.
///
/// Values of different types are never equal, except that an integer or
/// double operand is coerced to the representation of the field.
pub(crate) struct EqualsFilter {
    field: FieldTarget,
    value: Value,
}

impl EqualsFilter {
    #[inline]
    pub(crate) fn new(field: FieldTarget, value: Value) -> Self {
        EqualsFilter { field, value }
    }
}

impl Display for EqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", self.field, self.value)
    }
}

impl FilterProvider for EqualsFilter {
    #[inline]
    fn apply(&self, entry: &dyn FieldSource) -> FiremockResult<bool> {
        Ok(self
            .field
            .resolve(entry)?
            .is_some_and(|value| equal(value, &self.value)))
    }

    fn validate(&self) -> FiremockResult<()> {
        self.field.validate()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Matches documents whose field is present and differs from a value.
///
/// A field of another type than the operand is not comparable with it and
/// does not match either.
pub(crate) struct NotEqualsFilter {
    field: FieldTarget,
    value: Value,
}

impl NotEqualsFilter {
    #[inline]
    pub(crate) fn new(field: FieldTarget, value: Value) -> Self {
        NotEqualsFilter { field, value }
    }
}

impl Display for NotEqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} != {})", self.field, self.value)
    }
}

impl FilterProvider for NotEqualsFilter {
    #[inline]
    fn apply(&self, entry: &dyn FieldSource) -> FiremockResult<bool> {
        Ok(self
            .field
            .resolve(entry)?
            .and_then(|value| value.filter_cmp(&self.value))
            .is_some_and(|ordering| ordering.is_ne()))
    }

    fn validate(&self) -> FiremockResult<()> {
        self.field.validate()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
