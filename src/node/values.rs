use std::fmt;

use super::SemaNode;

/// A reference to a value defined elsewhere, optionally qualified by the
/// module that defines it.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferencedValue {
    pub module_reference: Option<String>,
    pub name: String,
}

impl fmt::Display for ReferencedValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.module_reference {
            Some(module) => write!(f, "{}.{}", module, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// ENUMERATED-shaped types: an ordered list of named values with an
/// optional constraint. Members with no explicit value are numbered
/// sequentially (first = 0, subsequent = previous + 1).
#[derive(Clone, Debug, PartialEq)]
pub struct ValueListType {
    pub type_name: String,
    pub named_values: Vec<SemaNode>,
    pub constraint: Option<Box<SemaNode>>,
}

impl fmt::Display for ValueListType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.type_name)?;
        if !self.named_values.is_empty() {
            let values = itertools::join(self.named_values.iter().map(ToString::to_string), ", ");
            write!(f, " {{ {} }}", values)?;
        }
        if let Some(constraint) = &self.constraint {
            write!(f, " {}", constraint)?;
        }
        Ok(())
    }
}

/// BIT STRING with a named-bit list.
#[derive(Clone, Debug, PartialEq)]
pub struct BitStringType {
    pub type_name: String,
    pub named_bits: Vec<SemaNode>,
    pub constraint: Option<Box<SemaNode>>,
}

impl fmt::Display for BitStringType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.type_name)?;
        if !self.named_bits.is_empty() {
            let bits = itertools::join(self.named_bits.iter().map(ToString::to_string), ", ");
            write!(f, " {{ {} }}", bits)?;
        }
        if let Some(constraint) = &self.constraint {
            write!(f, " {}", constraint)?;
        }
        Ok(())
    }
}

/// `identifier(value)` inside a `ValueListType`/`BitStringType`. `value`
/// is filled in by sequential numbering when the parser left it unset; by
/// the time a `NamedValue` is visible to callers it is always `Some`.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedValue {
    pub identifier: String,
    pub value: Option<Box<SemaNode>>,
}

impl fmt::Display for NamedValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} ({})", self.identifier, value),
            None => write!(f, "{}", self.identifier),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryStringValue {
    pub value: String,
}

impl fmt::Display for BinaryStringValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}'B", self.value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HexStringValue {
    pub value: String,
}

impl fmt::Display for HexStringValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}'H", self.value)
    }
}

/// The `...` extension marker inside a constructed type's component list.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtensionMarker;

impl fmt::Display for ExtensionMarker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "...")
    }
}
