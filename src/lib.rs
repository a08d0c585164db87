//! A semantic model builder for ASN.1 module definitions: turns an
//! annotated parser token tree into a typed, cross-referenced,
//! dependency-orderable model of modules, type/value assignments,
//! constructed types, constraints, tags and object identifiers.
//!
//! The crate does not parse ASN.1 source itself (see [`token`]) — it
//! consumes whatever shape an external parser hands it and builds the
//! semantic model from there.

#[macro_use]
extern crate log;

mod error;
mod factory;
mod node;
mod registry;
mod sort;
mod token;

pub use error::SemaError;
pub use node::*;
pub use registry::registered_oid_number;
pub use sort::{dependency_sort, topological_sort};
pub use token::{AnnotatedToken, Element};

pub type Result<T> = std::result::Result<T, SemaError>;

/// Build the semantic model for a sequence of top-level `ModuleDefinition`
/// tokens, then apply automatic tagging to every module that requests it.
pub fn build_semantic_model(tokens: &[AnnotatedToken]) -> Result<Vec<Module>> {
    let mut modules = Vec::with_capacity(tokens.len());

    for token in tokens {
        match factory::create(token)? {
            SemaNode::Module(module) => modules.push(*module),
            _ => return Err(SemaError::malformed("top-level token did not produce a Module")),
        }
    }

    for module in &mut modules {
        if module.tag_default.is_automatic() {
            trace!("auto-tagging module {}", module.name);
            auto_tag_module(module);
        }
    }

    debug!("built {} module(s)", modules.len());

    Ok(modules)
}

/// Apply `ConstructedType::auto_tag()` to every constructed-type
/// descendant reachable from `module`'s assignments. `children()` only
/// hands back shared references, so this walks the owned tree directly
/// rather than going through it.
fn auto_tag_module(module: &mut Module) {
    for assignment in &mut module.assignments {
        auto_tag_node(assignment);
    }
}

fn auto_tag_node(node: &mut SemaNode) {
    match node {
        SemaNode::TypeAssignment(a) => auto_tag_node(&mut a.type_decl),
        SemaNode::ValueAssignment(a) => {
            auto_tag_node(&mut a.type_decl);
            if let Some(value) = &mut a.value {
                auto_tag_node(value);
            }
        }
        SemaNode::ConstructedType(c) => {
            c.auto_tag();
            for component in &mut c.components {
                auto_tag_node(component);
            }
        }
        SemaNode::CollectionType(c) => {
            if let Some(size) = &mut c.size_constraint {
                auto_tag_node(size);
            }
            auto_tag_node(&mut c.type_decl);
        }
        SemaNode::TaggedType(t) => auto_tag_node(&mut t.type_decl),
        SemaNode::ComponentType(c) => {
            if let Some(decl) = &mut c.type_decl {
                auto_tag_node(decl);
            }
            if let Some(default) = &mut c.default_value {
                auto_tag_node(default);
            }
            if let Some(components_of) = &mut c.components_of_type {
                auto_tag_node(components_of);
            }
        }
        SemaNode::NamedType(n) => auto_tag_node(&mut n.type_decl),
        SemaNode::SelectionType(s) => auto_tag_node(&mut s.type_decl),
        SemaNode::SimpleType(s) => {
            if let Some(constraint) = &mut s.constraint {
                auto_tag_node(constraint);
            }
        }
        SemaNode::DefinedType(d) => {
            if let Some(constraint) = &mut d.constraint {
                auto_tag_node(constraint);
            }
        }
        SemaNode::ValueListType(v) => {
            for value in &mut v.named_values {
                auto_tag_node(value);
            }
            if let Some(constraint) = &mut v.constraint {
                auto_tag_node(constraint);
            }
        }
        SemaNode::BitStringType(b) => {
            for bit in &mut b.named_bits {
                auto_tag_node(bit);
            }
            if let Some(constraint) = &mut b.constraint {
                auto_tag_node(constraint);
            }
        }
        _ => {}
    }
}

/// Fluent builder around [`build_semantic_model`]: collect tokens and any
/// OID name overrides, then build the model in one call.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    tokens: Vec<AnnotatedToken>,
    registered_oid_overrides: Vec<(String, i64)>,
}

impl ModelBuilder {
    pub fn new(tokens: Vec<AnnotatedToken>) -> Self {
        Self {
            tokens,
            registered_oid_overrides: Vec::new(),
        }
    }

    /// Register an additional well-known OID component name, supplementing
    /// (not replacing) the built-in table in [`registry`].
    pub fn register_oid_name(mut self, name: impl Into<String>, number: i64) -> Self {
        self.registered_oid_overrides.push((name.into(), number));
        self
    }

    /// Look up a registered OID component name, preferring an override
    /// supplied via [`Self::register_oid_name`] over the built-in table.
    pub fn oid_number(&self, name: &str) -> Option<i64> {
        self.registered_oid_overrides
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, number)| *number)
            .or_else(|| registered_oid_number(name))
    }

    pub fn build(self) -> Result<Vec<Module>> {
        debug!("building model from {} top-level token(s)", self.tokens.len());
        build_semantic_model(&self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(ty: &str, s: &str) -> Element {
        Element::Token(AnnotatedToken::new(ty, vec![Element::Str(s.to_owned())]))
    }

    fn module_token(name: &str, tag_default: Element, assignments: Vec<Element>) -> AnnotatedToken {
        let body = AnnotatedToken::new(
            "ModuleBody",
            vec![
                Element::Null,
                Element::Null,
                Element::Token(AnnotatedToken::new("AssignmentList", assignments)),
            ],
        );
        AnnotatedToken::new(
            "ModuleDefinition",
            vec![
                Element::Token(AnnotatedToken::new("ModuleReference", vec![Element::Str(name.to_owned())])),
                Element::Null,
                tag_default,
                Element::Null,
                Element::Token(body),
            ],
        )
    }

    fn type_assignment(name: &str, type_token: Element) -> Element {
        Element::Token(AnnotatedToken::new(
            "TypeAssignment",
            vec![Element::Str(name.to_owned()), Element::Str("::=".to_owned()), type_token],
        ))
    }

    fn simple_type(name: &str) -> Element {
        Element::Token(AnnotatedToken::new("SimpleType", vec![Element::Str(name.to_owned())]))
    }

    #[test]
    fn build_semantic_model_constructs_one_module_per_token() {
        let token = module_token(
            "Foo",
            Element::Null,
            vec![type_assignment("Bar", simple_type("INTEGER"))],
        );

        let modules = build_semantic_model(&[token]).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "Foo");
        assert!(modules[0].get_type_decl("Bar").is_some());
    }

    #[test]
    fn automatic_tag_default_tags_every_untagged_component() {
        let sequence = Element::Token(AnnotatedToken::new(
            "SequenceType",
            vec![Element::Token(AnnotatedToken::new(
                "ComponentList",
                vec![
                    Element::Token(AnnotatedToken::new(
                        "ComponentType",
                        vec![Element::Token(AnnotatedToken::new(
                            "NamedType",
                            vec![leaf("Identifier", "a"), simple_type("INTEGER")],
                        ))],
                    )),
                    Element::Token(AnnotatedToken::new(
                        "ComponentType",
                        vec![Element::Token(AnnotatedToken::new(
                            "NamedType",
                            vec![leaf("Identifier", "b"), simple_type("BOOLEAN")],
                        ))],
                    )),
                ],
            ))],
        ));

        let token = module_token(
            "Foo",
            Element::Str("AUTOMATIC TAGS".to_owned()),
            vec![type_assignment("Seq", sequence)],
        );

        let modules = build_semantic_model(&[token]).unwrap();
        let type_decl = modules[0].get_type_decl("Seq").unwrap();
        let constructed = match type_decl {
            SemaNode::ConstructedType(c) => c,
            other => panic!("expected ConstructedType, got {:?}", other),
        };

        for (i, component) in constructed.components.iter().enumerate() {
            let decl = match component {
                SemaNode::ComponentType(c) => c.type_decl.as_deref().unwrap(),
                other => panic!("expected ComponentType, got {:?}", other),
            };
            match decl {
                SemaNode::TaggedType(t) => assert_eq!(t.class_number, i.to_string()),
                other => panic!("expected TaggedType, got {:?}", other),
            }
        }
    }

    #[test]
    fn model_builder_is_equivalent_to_the_free_function() {
        let token = module_token("Foo", Element::Null, vec![type_assignment("Bar", simple_type("INTEGER"))]);
        let modules = ModelBuilder::new(vec![token]).build().unwrap();
        assert_eq!(modules[0].name, "Foo");
    }

    #[test]
    fn model_builder_oid_override_takes_precedence_over_the_built_in_table() {
        let builder = ModelBuilder::new(Vec::new()).register_oid_name("iso", 99);
        assert_eq!(builder.oid_number("iso"), Some(99));
        assert_eq!(builder.oid_number("member-body"), Some(2));
        assert_eq!(builder.oid_number("not-a-real-arc"), None);
    }
}
