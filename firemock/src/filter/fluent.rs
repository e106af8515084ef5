use crate::common::Value;

use super::{FieldOperator, Filter};

/// Starts a fluent filter on `field_name`, a dotted field path.
///
/// ```rust
/// use firemock::filter::field;
///
/// let filter = field("field7.subfield2").eq("v").and(field("field3").gte(10));
/// assert_eq!(filter.to_string(), "((field7.subfield2 == \"v\") && (field3 >= 10))");
/// ```
pub fn field(field_name: &str) -> FluentFilter {
    FluentFilter {
        field_name: field_name.to_string(),
    }
}

/// A fluent builder for predicates on a single field.
pub struct FluentFilter {
    field_name: String,
}

impl FluentFilter {
    #[inline]
    fn with<T: Into<Value>>(self, operator: FieldOperator, value: T) -> Filter {
        Filter::field(&self.field_name, operator, value)
    }

    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Filter {
        self.with(FieldOperator::Equal, value)
    }

    #[inline]
    pub fn ne<T: Into<Value>>(self, value: T) -> Filter {
        self.with(FieldOperator::NotEqual, value)
    }

    #[inline]
    pub fn gt<T: Into<Value>>(self, value: T) -> Filter {
        self.with(FieldOperator::GreaterThan, value)
    }

    #[inline]
    pub fn gte<T: Into<Value>>(self, value: T) -> Filter {
        self.with(FieldOperator::GreaterThanOrEqual, value)
    }

    #[inline]
    pub fn lt<T: Into<Value>>(self, value: T) -> Filter {
        self.with(FieldOperator::LessThan, value)
    }

    #[inline]
    pub fn lte<T: Into<Value>>(self, value: T) -> Filter {
        self.with(FieldOperator::LessThanOrEqual, value)
    }

    /// The field equals one of `values`.
    pub fn in_array<T: Into<Value>>(self, values: Vec<T>) -> Filter {
        self.with(FieldOperator::In, values)
    }

    /// The field is present and equals none of `values`.
    pub fn not_in_array<T: Into<Value>>(self, values: Vec<T>) -> Filter {
        self.with(FieldOperator::NotIn, values)
    }

    /// The field is an array holding `value`.
    pub fn array_contains<T: Into<Value>>(self, value: T) -> Filter {
        self.with(FieldOperator::ArrayContains, value)
    }

    /// The field is an array holding at least one of `values`.
    pub fn array_contains_any<T: Into<Value>>(self, values: Vec<T>) -> Filter {
        self.with(FieldOperator::ArrayContainsAny, values)
    }
}
