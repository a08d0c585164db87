use std::fmt;

use super::SemaNode;

/// One component of a SEQUENCE/SET/CHOICE, or a `COMPONENTS OF` inclusion.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentType {
    pub identifier: Option<String>,
    pub type_decl: Option<Box<SemaNode>>,
    pub default_value: Option<Box<SemaNode>>,
    pub optional: bool,
    pub components_of_type: Option<Box<SemaNode>>,
}

impl ComponentType {
    pub(crate) fn children(&self) -> Vec<&SemaNode> {
        let mut out: Vec<&SemaNode> = Vec::new();
        out.extend(self.type_decl.as_deref());
        out.extend(self.default_value.as_deref());
        out.extend(self.components_of_type.as_deref());
        out
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(components_of_type) = &self.components_of_type {
            return write!(f, "COMPONENTS OF {}", components_of_type);
        }

        let identifier = self.identifier.as_deref().unwrap_or("?");
        let type_decl = self
            .type_decl
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        write!(f, "{} {}", identifier, type_decl)?;

        if self.optional {
            write!(f, " OPTIONAL")?;
        } else if let Some(default_value) = &self.default_value {
            write!(f, " DEFAULT {}", default_value)?;
        }

        Ok(())
    }
}

/// `identifier Type`, or an auto-generated `unnamedN` identifier for a
/// bare `Type` token.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedType {
    pub identifier: String,
    pub type_decl: Box<SemaNode>,
}

impl fmt::Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.identifier, self.type_decl)
    }
}
