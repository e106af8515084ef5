use itertools::Itertools;
use std::{any::Any, fmt::Display};

use crate::errors::FiremockResult;

use super::{FieldSource, Filter, FilterProvider};

/// Logical AND over child filters, evaluated in order.
///
/// Stops at the first child that does not match. An empty AND matches every
/// document.
pub(crate) struct AndFilter {
    filters: Vec<Filter>,
}

impl AndFilter {
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        AndFilter { filters }
    }
}

impl Display for AndFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.filters.iter().join(" && "))
    }
}

impl FilterProvider for AndFilter {
    #[inline]
    fn apply(&self, entry: &dyn FieldSource) -> FiremockResult<bool> {
        for filter in &self.filters {
            if !filter.apply(entry)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn validate(&self) -> FiremockResult<()> {
        self.filters.iter().try_for_each(|filter| filter.validate())
    }

    fn logical_filters(&self) -> Vec<Filter> {
        self.filters.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Logical OR over child filters, evaluated in order.
///
/// Stops at the first child that matches. An empty OR matches nothing.
pub(crate) struct OrFilter {
    filters: Vec<Filter>,
}

impl OrFilter {
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        OrFilter { filters }
    }
}

impl Display for OrFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.filters.iter().join(" || "))
    }
}

impl FilterProvider for OrFilter {
    #[inline]
    fn apply(&self, entry: &dyn FieldSource) -> FiremockResult<bool> {
        for filter in &self.filters {
            if filter.apply(entry)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn validate(&self) -> FiremockResult<()> {
        self.filters.iter().try_for_each(|filter| filter.validate())
    }

    fn logical_filters(&self) -> Vec<Filter> {
        self.filters.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
