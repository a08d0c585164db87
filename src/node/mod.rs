//! The semantic node model: a tagged union over every ASN.1 concept the
//! builder produces, with traversal (`children`/`descendants`) and
//! reference-name operations shared across all variants.

mod assignment;
mod component;
mod constraint;
mod module;
mod oid;
mod types;
mod values;

pub use assignment::*;
pub use component::*;
pub use constraint::*;
pub use module::*;
pub use oid::*;
pub use types::*;
pub use values::*;

use std::collections::BTreeSet;
use std::fmt;

use variation::Variation;

/// A node in the semantic model. Recursive or large variants are boxed to
/// keep the enum itself small. `Literal` stands in for the pass-through
/// primitive case of the node factory's `create_opt`.
#[derive(Clone, Debug, PartialEq, Variation)]
pub enum SemaNode {
    Module(Box<Module>),
    Exports(Exports),
    Imports(Box<Imports>),
    GlobalModuleReference(Box<GlobalModuleReference>),
    TypeAssignment(Box<TypeAssignment>),
    ValueAssignment(Box<ValueAssignment>),
    ConstructedType(Box<ConstructedType>),
    CollectionType(Box<CollectionType>),
    TaggedType(Box<TaggedType>),
    SimpleType(SimpleType),
    DefinedType(DefinedType),
    SelectionType(Box<SelectionType>),
    ReferencedValue(ReferencedValue),
    ComponentType(Box<ComponentType>),
    NamedType(Box<NamedType>),
    ValueListType(ValueListType),
    BitStringType(BitStringType),
    NamedValue(Box<NamedValue>),
    SingleValueConstraint(Box<SingleValueConstraint>),
    ValueRangeConstraint(Box<ValueRangeConstraint>),
    SizeConstraint(Box<SizeConstraint>),
    ObjectIdentifierValue(ObjectIdentifierValue),
    NameForm(NameForm),
    NumberForm(NumberForm),
    NameAndNumberForm(Box<NameAndNumberForm>),
    BinaryStringValue(BinaryStringValue),
    HexStringValue(HexStringValue),
    ExtensionMarker(ExtensionMarker),
    /// A primitive leaf (string or number) passed through unchanged by
    /// `create_opt` where the parser handed back a bare value rather than
    /// a token.
    Literal(String),
}

impl SemaNode {
    pub fn children(&self) -> Vec<&SemaNode> {
        match self {
            SemaNode::Module(m) => m.children(),
            SemaNode::Exports(_) => Vec::new(),
            SemaNode::Imports(i) => i.children(),
            SemaNode::GlobalModuleReference(g) => g.oid.iter().map(|b| b.as_ref()).collect(),
            SemaNode::TypeAssignment(a) => vec![a.type_decl.as_ref()],
            SemaNode::ValueAssignment(a) => {
                let mut out = vec![a.type_decl.as_ref()];
                out.extend(a.value.as_ref());
                out
            }
            SemaNode::ConstructedType(c) => c.components.iter().collect(),
            SemaNode::CollectionType(c) => {
                let mut out: Vec<&SemaNode> = c.size_constraint.iter().map(|b| b.as_ref()).collect();
                out.push(c.type_decl.as_ref());
                out
            }
            SemaNode::TaggedType(t) => vec![t.type_decl.as_ref()],
            SemaNode::SimpleType(s) => s.constraint.iter().map(|b| b.as_ref()).collect(),
            SemaNode::DefinedType(d) => d.constraint.iter().map(|b| b.as_ref()).collect(),
            SemaNode::SelectionType(s) => vec![s.type_decl.as_ref()],
            SemaNode::ReferencedValue(_) => Vec::new(),
            SemaNode::ComponentType(c) => c.children(),
            SemaNode::NamedType(n) => vec![n.type_decl.as_ref()],
            SemaNode::ValueListType(v) => {
                let mut out: Vec<&SemaNode> = v.named_values.iter().collect();
                out.extend(v.constraint.iter().map(|b| b.as_ref()));
                out
            }
            SemaNode::BitStringType(b) => {
                let mut out: Vec<&SemaNode> = b.named_bits.iter().collect();
                out.extend(b.constraint.iter().map(|c| c.as_ref()));
                out
            }
            SemaNode::NamedValue(n) => n.value.iter().map(|b| b.as_ref()).collect(),
            SemaNode::SingleValueConstraint(s) => s.value.iter().map(|b| b.as_ref()).collect(),
            SemaNode::ValueRangeConstraint(v) => {
                let mut out = Vec::new();
                if let Some(min) = &v.min_value {
                    out.push(min.as_ref());
                }
                if let Some(max) = &v.max_value {
                    out.push(max.as_ref());
                }
                out
            }
            SemaNode::SizeConstraint(s) => vec![s.nested.as_ref()],
            SemaNode::ObjectIdentifierValue(o) => o.components.iter().collect(),
            SemaNode::NameForm(_) => Vec::new(),
            SemaNode::NumberForm(_) => Vec::new(),
            SemaNode::NameAndNumberForm(n) => vec![n.name.as_ref(), n.number.as_ref()],
            SemaNode::BinaryStringValue(_) => Vec::new(),
            SemaNode::HexStringValue(_) => Vec::new(),
            SemaNode::ExtensionMarker(_) => Vec::new(),
            SemaNode::Literal(_) => Vec::new(),
        }
    }

    pub fn descendants(&self) -> Vec<&SemaNode> {
        let mut out = Vec::new();
        for child in self.children() {
            out.push(child);
            out.extend(child.descendants());
        }
        out
    }

    pub fn reference_name(&self) -> Option<&str> {
        match self {
            SemaNode::TypeAssignment(a) => Some(a.type_name.as_str()),
            SemaNode::ValueAssignment(a) => Some(a.value_name.as_str()),
            SemaNode::DefinedType(d) => Some(d.type_name.as_str()),
            SemaNode::SelectionType(s) => s.type_decl.type_name(),
            SemaNode::ReferencedValue(r) => Some(r.name.as_str()),
            SemaNode::NameForm(f) => Some(f.name.as_str()),
            _ => None,
        }
    }

    /// Transparently unwraps `TaggedType`/`SelectionType` to the type they denote.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            SemaNode::SimpleType(s) => Some(s.type_name.as_str()),
            SemaNode::DefinedType(d) => Some(d.type_name.as_str()),
            SemaNode::ConstructedType(c) => Some(c.type_name.as_str()),
            SemaNode::CollectionType(c) => Some(c.type_name.as_str()),
            SemaNode::ValueListType(v) => Some(v.type_name.as_str()),
            SemaNode::BitStringType(b) => Some(b.type_name.as_str()),
            SemaNode::TaggedType(t) => t.type_decl.type_name(),
            SemaNode::SelectionType(s) => s.type_decl.type_name(),
            _ => None,
        }
    }

    pub fn references(&self) -> BTreeSet<String> {
        self.descendants()
            .into_iter()
            .filter_map(|d| d.reference_name())
            .map(str::to_owned)
            .collect()
    }
}

impl fmt::Display for SemaNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SemaNode::Module(m) => write!(f, "{}", m),
            SemaNode::Exports(e) => write!(f, "{}", e),
            SemaNode::Imports(i) => write!(f, "{}", i),
            SemaNode::GlobalModuleReference(g) => write!(f, "{}", g),
            SemaNode::TypeAssignment(a) => write!(f, "{}", a),
            SemaNode::ValueAssignment(a) => write!(f, "{}", a),
            SemaNode::ConstructedType(c) => write!(f, "{}", c),
            SemaNode::CollectionType(c) => write!(f, "{}", c),
            SemaNode::TaggedType(t) => write!(f, "{}", t),
            SemaNode::SimpleType(s) => write!(f, "{}", s),
            SemaNode::DefinedType(d) => write!(f, "{}", d),
            SemaNode::SelectionType(s) => write!(f, "{}", s),
            SemaNode::ReferencedValue(r) => write!(f, "{}", r),
            SemaNode::ComponentType(c) => write!(f, "{}", c),
            SemaNode::NamedType(n) => write!(f, "{}", n),
            SemaNode::ValueListType(v) => write!(f, "{}", v),
            SemaNode::BitStringType(b) => write!(f, "{}", b),
            SemaNode::NamedValue(n) => write!(f, "{}", n),
            SemaNode::SingleValueConstraint(s) => write!(f, "{}", s),
            SemaNode::ValueRangeConstraint(v) => write!(f, "{}", v),
            SemaNode::SizeConstraint(s) => write!(f, "{}", s),
            SemaNode::ObjectIdentifierValue(o) => write!(f, "{}", o),
            SemaNode::NameForm(n) => write!(f, "{}", n),
            SemaNode::NumberForm(n) => write!(f, "{}", n),
            SemaNode::NameAndNumberForm(n) => write!(f, "{}", n),
            SemaNode::BinaryStringValue(b) => write!(f, "{}", b),
            SemaNode::HexStringValue(h) => write!(f, "{}", h),
            SemaNode::ExtensionMarker(e) => write!(f, "{}", e),
            SemaNode::Literal(s) => write!(f, "{}", s),
        }
    }
}
