//! Typed per-field filter expressions.
//!
//! A criteria object carries one optional filter per entity field; every
//! clause that is present must hold for a record to qualify (logical AND).
//! Filters are plain data evaluated by pure predicate functions, so the same
//! criteria value drives both the in-memory scan and the SQL translation.

use crate::entity::Ponude;

/// Clauses available on every filterable field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter<T> {
    pub equals: Option<T>,
    pub not_equals: Option<T>,
    pub r#in: Option<Vec<T>>,
    pub specified: Option<bool>,
}

impl<T: PartialEq> Filter<T> {
    /// Evaluate every present clause against `value`.
    ///
    /// Clauses other than `specified` never match an absent value; this
    /// includes `not_equals`, which behaves like `specified = false`
    /// exclusion rather than vacuous truth.
    pub fn matches(&self, value: Option<&T>) -> bool {
        if let Some(wanted) = self.specified {
            if wanted != value.is_some() {
                return false;
            }
        }
        let Some(v) = value else {
            return self.equals.is_none() && self.not_equals.is_none() && self.r#in.is_none();
        };
        if let Some(eq) = &self.equals {
            if v != eq {
                return false;
            }
        }
        if let Some(ne) = &self.not_equals {
            if v == ne {
                return false;
            }
        }
        if let Some(set) = &self.r#in {
            if !set.contains(v) {
                return false;
            }
        }
        true
    }
}

/// Filter for ordered fields: comparison clauses on top of [`Filter`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeFilter<T> {
    pub filter: Filter<T>,
    pub greater_than: Option<T>,
    pub greater_than_or_equal: Option<T>,
    pub less_than: Option<T>,
    pub less_than_or_equal: Option<T>,
}

impl<T: PartialOrd> RangeFilter<T> {
    pub fn matches(&self, value: Option<&T>) -> bool {
        if !self.filter.matches(value) {
            return false;
        }
        let Some(v) = value else {
            return self.greater_than.is_none()
                && self.greater_than_or_equal.is_none()
                && self.less_than.is_none()
                && self.less_than_or_equal.is_none();
        };
        if let Some(bound) = &self.greater_than {
            if !(v > bound) {
                return false;
            }
        }
        if let Some(bound) = &self.greater_than_or_equal {
            if !(v >= bound) {
                return false;
            }
        }
        if let Some(bound) = &self.less_than {
            if !(v < bound) {
                return false;
            }
        }
        if let Some(bound) = &self.less_than_or_equal {
            if !(v <= bound) {
                return false;
            }
        }
        true
    }
}

/// Filter for text fields: substring clauses on top of [`Filter`].
///
/// Substring matching is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringFilter {
    pub filter: Filter<String>,
    pub contains: Option<String>,
    pub does_not_contain: Option<String>,
}

impl StringFilter {
    pub fn matches(&self, value: Option<&String>) -> bool {
        if !self.filter.matches(value) {
            return false;
        }
        let Some(v) = value else {
            return self.contains.is_none() && self.does_not_contain.is_none();
        };
        if let Some(needle) = &self.contains {
            if !v.contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(needle) = &self.does_not_contain {
            if v.contains(needle.as_str()) {
                return false;
            }
        }
        true
    }
}

/// All filtering options accepted by the offers list/count endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PonudeCriteria {
    pub id: Option<RangeFilter<i64>>,
    pub broj: Option<RangeFilter<i32>>,
    pub ime: Option<StringFilter>,
    pub distinct: Option<bool>,
}

impl PonudeCriteria {
    /// Whether `entity` satisfies every specified clause on every field.
    pub fn matches(&self, entity: &Ponude) -> bool {
        if let Some(f) = &self.id {
            if !f.matches(entity.id.as_ref()) {
                return false;
            }
        }
        if let Some(f) = &self.broj {
            if !f.matches(entity.broj.as_ref()) {
                return false;
            }
        }
        if let Some(f) = &self.ime {
            if !f.matches(entity.ime.as_ref()) {
                return false;
            }
        }
        true
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct.unwrap_or(false)
    }
}
