use std::fmt;

use variation::Variation;

use super::SemaNode;

/// SEQUENCE, SET or CHOICE.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Variation)]
pub enum ConstructedKind {
    Sequence,
    Set,
    Choice,
}

impl ConstructedKind {
    fn keyword(self) -> &'static str {
        match self {
            ConstructedKind::Sequence => "SEQUENCE",
            ConstructedKind::Set => "SET",
            ConstructedKind::Choice => "CHOICE",
        }
    }
}

/// Base type for SEQUENCE, SET and CHOICE: a named list of components,
/// each either a `ComponentType` or an `ExtensionMarker`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstructedType {
    pub kind: ConstructedKind,
    pub type_name: String,
    pub components: Vec<SemaNode>,
}

impl ConstructedType {
    /// Wrap each component's `type_decl` in an ordinal `TaggedType`, unless
    /// any component is already explicitly tagged.
    pub fn auto_tag(&mut self) {
        let already_tagged = self
            .components
            .iter()
            .filter_map(component_type_decl)
            .any(|decl| decl.is_tagged_type());

        if already_tagged {
            return;
        }

        let mut ordinal = 0usize;
        for component in &mut self.components {
            if let Some(decl) = component_type_decl_mut(component) {
                let tagged = TaggedType {
                    class_name: None,
                    class_number: ordinal.to_string(),
                    implicitness: None,
                    type_decl: Box::new(std::mem::replace(decl, SemaNode::Literal(String::new()))),
                };
                *decl = SemaNode::TaggedType(Box::new(tagged));
                ordinal += 1;
            }
        }
    }
}

fn component_type_decl(component: &SemaNode) -> Option<&SemaNode> {
    match component {
        SemaNode::ComponentType(c) => c.type_decl.as_deref(),
        _ => None,
    }
}

fn component_type_decl_mut(component: &mut SemaNode) -> Option<&mut SemaNode> {
    match component {
        SemaNode::ComponentType(c) => c.type_decl.as_deref_mut(),
        _ => None,
    }
}

impl fmt::Display for ConstructedType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let components = itertools::join(self.components.iter().map(ToString::to_string), ", ");
        write!(f, "{} {{ {} }}", self.kind.keyword(), components)
    }
}

/// SEQUENCE OF or SET OF.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Variation)]
pub enum CollectionKind {
    SequenceOf,
    SetOf,
}

impl CollectionKind {
    fn keyword(self) -> &'static str {
        match self {
            CollectionKind::SequenceOf => "SEQUENCE",
            CollectionKind::SetOf => "SET",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CollectionType {
    pub kind: CollectionKind,
    pub type_name: String,
    pub size_constraint: Option<Box<SemaNode>>,
    pub type_decl: Box<SemaNode>,
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.size_constraint {
            Some(constraint) => write!(f, "{} {} OF {}", self.kind.keyword(), constraint, self.type_decl),
            None => write!(f, "{} OF {}", self.kind.keyword(), self.type_decl),
        }
    }
}

/// IMPLICIT or EXPLICIT, when specified on a tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Variation)]
pub enum Implicitness {
    Implicit,
    Explicit,
}

/// `[class number] [IMPLICIT|EXPLICIT] Type`.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedType {
    pub class_name: Option<String>,
    pub class_number: String,
    pub implicitness: Option<Implicitness>,
    pub type_decl: Box<SemaNode>,
}

impl fmt::Display for TaggedType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.class_name {
            Some(class_name) => write!(f, "[{} {}] ", class_name, self.class_number)?,
            None => write!(f, "[{}] ", self.class_number)?,
        }

        match self.implicitness {
            Some(Implicitness::Implicit) => write!(f, "IMPLICIT ")?,
            Some(Implicitness::Explicit) => write!(f, "EXPLICIT ")?,
            None => {}
        }

        write!(f, "{}", self.type_decl)
    }
}

/// A built-in type name (`INTEGER`, `OCTET STRING`, ...) with an optional
/// constraint.
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleType {
    pub type_name: String,
    pub constraint: Option<Box<SemaNode>>,
}

impl fmt::Display for SimpleType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.constraint {
            Some(constraint) => write!(f, "{} {}", self.type_name, constraint),
            None => write!(f, "{}", self.type_name),
        }
    }
}

/// A reference to a user-defined type, optionally qualified by the module
/// that defines it.
#[derive(Clone, Debug, PartialEq)]
pub struct DefinedType {
    pub module_name: Option<String>,
    pub type_name: String,
    pub constraint: Option<Box<SemaNode>>,
}

impl fmt::Display for DefinedType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let qualified = match &self.module_name {
            Some(module_name) => format!("{}.{}", module_name, self.type_name),
            None => self.type_name.clone(),
        };
        match &self.constraint {
            Some(constraint) => write!(f, "{} {}", qualified, constraint),
            None => write!(f, "{}", qualified),
        }
    }
}

/// `identifier < ChoiceType` — refers to one alternative of a CHOICE.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionType {
    pub identifier: String,
    pub type_decl: Box<SemaNode>,
}

impl fmt::Display for SelectionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.type_decl.type_name() {
            Some(name) => write!(f, "{} < {}", self.identifier, name),
            None => write!(f, "{} < ?", self.identifier),
        }
    }
}
