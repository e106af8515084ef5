use crate::collection::{Document, DocumentSnapshot};
use crate::common::{FieldPath, Value};
use crate::errors::FiremockResult;
use std::any::Any;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

use super::{
    AndFilter, ArrayContainsAnyFilter, ArrayContainsFilter, ComparisonFilter, ComparisonMode,
    EqualsFilter, InFilter, NotEqualsFilter, NotInFilter, OrFilter,
};

/// Anything a filter can be evaluated against: a source of field values
/// addressed by field path.
pub trait FieldSource {
    /// The value at `path`, `None` when the field is absent.
    fn field_value(&self, path: &FieldPath) -> Option<&Value>;
}

impl FieldSource for Document {
    fn field_value(&self, path: &FieldPath) -> Option<&Value> {
        self.field(path)
    }
}

impl FieldSource for DocumentSnapshot {
    fn field_value(&self, path: &FieldPath) -> Option<&Value> {
        self.get_path(path)
    }
}

/// Trait for implementing filters.
///
/// A `FilterProvider` decides whether a single document matches. Providers are
/// stateless with respect to the documents they are applied to.
pub trait FilterProvider: Any + Send + Sync + Display {
    /// Applies the filter to a document and returns whether it matches.
    ///
    /// # Errors
    ///
    /// A malformed field path in the filter.
    fn apply(&self, entry: &dyn FieldSource) -> FiremockResult<bool>;

    /// Checks the filter for malformed input before it is applied.
    fn validate(&self) -> FiremockResult<()> {
        Ok(())
    }

    /// The child filters of a composite filter, empty for field predicates.
    fn logical_filters(&self) -> Vec<Filter> {
        Vec::new()
    }

    fn as_any(&self) -> &dyn Any;
}

/// Binary comparison operators of a field predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    /// The operand is an array holding the field value.
    In,
    /// The operand is an array not holding the field value.
    NotIn,
    /// The field is an array holding the operand.
    ArrayContains,
    /// The field is an array holding any element of the array operand.
    ArrayContainsAny,
}

impl Display for FieldOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FieldOperator::Equal => "EQUAL",
            FieldOperator::NotEqual => "NOT_EQUAL",
            FieldOperator::LessThan => "LESS_THAN",
            FieldOperator::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            FieldOperator::GreaterThan => "GREATER_THAN",
            FieldOperator::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            FieldOperator::In => "IN",
            FieldOperator::NotIn => "NOT_IN",
            FieldOperator::ArrayContains => "ARRAY_CONTAINS",
            FieldOperator::ArrayContainsAny => "ARRAY_CONTAINS_ANY",
        };
        write!(f, "{}", text)
    }
}

/// Boolean operators of a composite filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeOperator {
    And,
    Or,
}

/// A query filter: a tree of composite (AND/OR) nodes over field predicates.
///
/// # Examples
///
/// ```rust
/// use firemock::filter::{field, Filter, FieldOperator};
///
/// let by_operator = Filter::field("x", FieldOperator::GreaterThan, 1);
/// let fluent = field("x").gt(1).and(field("y").eq("a"));
/// assert_eq!(fluent.to_string(), "((x > 1) && (y == \"a\"))");
/// # let _ = by_operator;
/// ```
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    /// Creates a new filter from a filter provider implementation.
    pub fn new<T: FilterProvider + 'static>(inner: T) -> Self {
        Filter {
            inner: Arc::new(inner),
        }
    }

    /// A field predicate `field <op> value`.
    ///
    /// A malformed `field` path is reported when the filter is validated or
    /// applied.
    pub fn field<T: Into<Value>>(field: &str, operator: FieldOperator, value: T) -> Filter {
        let target = FieldTarget::new(field);
        let value = value.into();
        match operator {
            FieldOperator::Equal => Filter::new(EqualsFilter::new(target, value)),
            FieldOperator::NotEqual => Filter::new(NotEqualsFilter::new(target, value)),
            FieldOperator::LessThan => {
                Filter::new(ComparisonFilter::new(target, value, ComparisonMode::Lesser))
            }
            FieldOperator::LessThanOrEqual => {
                Filter::new(ComparisonFilter::new(target, value, ComparisonMode::LesserEqual))
            }
            FieldOperator::GreaterThan => {
                Filter::new(ComparisonFilter::new(target, value, ComparisonMode::Greater))
            }
            FieldOperator::GreaterThanOrEqual => {
                Filter::new(ComparisonFilter::new(target, value, ComparisonMode::GreaterEqual))
            }
            FieldOperator::In => Filter::new(InFilter::new(target, value)),
            FieldOperator::NotIn => Filter::new(NotInFilter::new(target, value)),
            FieldOperator::ArrayContains => Filter::new(ArrayContainsFilter::new(target, value)),
            FieldOperator::ArrayContainsAny => {
                Filter::new(ArrayContainsAnyFilter::new(target, value))
            }
        }
    }

    /// A composite filter over `filters`.
    pub fn composite(operator: CompositeOperator, filters: Vec<Filter>) -> Filter {
        match operator {
            CompositeOperator::And => and(filters),
            CompositeOperator::Or => or(filters),
        }
    }

    /// Combines this filter with another using logical AND.
    pub fn and(&self, filter: Filter) -> Self {
        Filter::new(AndFilter::new(vec![self.clone(), filter]))
    }

    /// Combines this filter with another using logical OR.
    pub fn or(&self, filter: Filter) -> Self {
        Filter::new(OrFilter::new(vec![self.clone(), filter]))
    }
}

impl Display for Filter {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl std::fmt::Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Filter({})", self.inner)
    }
}

impl Deref for Filter {
    type Target = Arc<dyn FilterProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Combines multiple filters using logical AND. An empty AND matches every
/// document.
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::new(AndFilter::new(filters))
}

/// Combines multiple filters using logical OR. An empty OR matches nothing.
pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::new(OrFilter::new(filters))
}

/// The field a predicate reads, parsed once when the filter is built.
///
/// The parse result is kept as is so that a malformed path surfaces as an
/// error when the filter is used, not when it is built.
#[derive(Clone, Debug)]
pub(crate) struct FieldTarget {
    text: String,
    path: FiremockResult<FieldPath>,
}

impl FieldTarget {
    pub(crate) fn new(field: &str) -> Self {
        FieldTarget {
            text: field.to_string(),
            path: FieldPath::parse(field),
        }
    }

    pub(crate) fn validate(&self) -> FiremockResult<()> {
        self.path.as_ref().map(|_| ()).map_err(Clone::clone)
    }

    /// The field value in `entry`, `None` when absent.
    pub(crate) fn resolve<'a>(&self, entry: &'a dyn FieldSource) -> FiremockResult<Option<&'a Value>> {
        match &self.path {
            Ok(path) => Ok(entry.field_value(path)),
            Err(err) => Err(err.clone()),
        }
    }
}

impl Display for FieldTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
