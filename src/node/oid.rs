use std::fmt;

use derefable::Derefable;

use super::SemaNode;

/// A symbolic OID component, e.g. `iso` in `{ iso 3 6 }`.
#[derive(Clone, Debug, PartialEq)]
pub struct NameForm {
    pub name: String,
}

impl fmt::Display for NameForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A bare numeric OID component.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberForm {
    pub value: String,
}

impl fmt::Display for NumberForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// `name(number)`, e.g. `enterprise(1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct NameAndNumberForm {
    pub name: Box<SemaNode>,
    pub number: Box<SemaNode>,
}

impl fmt::Display for NameAndNumberForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.name, self.number)
    }
}

/// `{ iso member-body(2) 6 }` — an ordered sequence of OID component
/// forms. `Derefable` gives a `Deref<Target = Vec<SemaNode>>`.
#[derive(Clone, Debug, PartialEq, Derefable)]
pub struct ObjectIdentifierValue {
    #[deref]
    pub components: Vec<SemaNode>,
}

impl fmt::Display for ObjectIdentifierValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for component in &self.components {
            write!(f, " {}", component)?;
        }
        write!(f, " }}")
    }
}
