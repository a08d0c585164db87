use std::fmt;

use super::SemaNode;

#[derive(Clone, Debug, PartialEq)]
pub struct SingleValueConstraint {
    pub value: Option<Box<SemaNode>>,
}

impl fmt::Display for SingleValueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "({})", value),
            None => write!(f, "()"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValueRangeConstraint {
    pub min_value: Option<Box<SemaNode>>,
    pub max_value: Option<Box<SemaNode>>,
}

impl fmt::Display for ValueRangeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let min = self.min_value.as_ref().map(ToString::to_string).unwrap_or_default();
        let max = self.max_value.as_ref().map(ToString::to_string).unwrap_or_default();
        write!(f, "({}..{})", min, max)
    }
}

/// Nests a `ValueRangeConstraint` or `SingleValueConstraint` to denote
/// valid sizes.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeConstraint {
    pub nested: Box<SemaNode>,
}

impl fmt::Display for SizeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SIZE{}", self.nested)
    }
}
