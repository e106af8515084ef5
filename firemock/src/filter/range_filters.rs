use std::{any::Any, cmp::Ordering, fmt::Display};

use crate::common::Value;
use crate::errors::FiremockResult;

use super::{FieldSource, FieldTarget, FilterProvider};

/// The relation a [ComparisonFilter] checks between field and operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ComparisonMode {
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
}

impl ComparisonMode {
    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            ComparisonMode::Greater => ordering.is_gt(),
            ComparisonMode::GreaterEqual => ordering.is_ge(),
            ComparisonMode::Lesser => ordering.is_lt(),
            ComparisonMode::LesserEqual => ordering.is_le(),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            ComparisonMode::Greater => ">",
            ComparisonMode::GreaterEqual => ">=",
            ComparisonMode::Lesser => "<",
            ComparisonMode::LesserEqual => "<=",
        }
    }
}

/// Range comparison of a field against an operand.
///
/// Only values of the same type are ordered (with numeric operand coercion);
/// a field of any other type, or an absent field, does not match.
pub(crate) struct ComparisonFilter {
    field: FieldTarget,
    value: Value,
    comparison_mode: ComparisonMode,
}

impl ComparisonFilter {
    #[inline]
    pub(crate) fn new(field: FieldTarget, value: Value, comparison_mode: ComparisonMode) -> Self {
        ComparisonFilter {
            field,
            value,
            comparison_mode,
        }
    }
}

impl Display for ComparisonFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} {} {})",
            self.field,
            self.comparison_mode.symbol(),
            self.value
        )
    }
}

impl FilterProvider for ComparisonFilter {
    fn apply(&self, entry: &dyn FieldSource) -> FiremockResult<bool> {
        Ok(self
            .field
            .resolve(entry)?
            .and_then(|value| value.filter_cmp(&self.value))
            .is_some_and(|ordering| self.comparison_mode.accepts(ordering)))
    }

    fn validate(&self) -> FiremockResult<()> {
        self.field.validate()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
