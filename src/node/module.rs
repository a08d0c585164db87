use std::collections::BTreeMap;
use std::fmt;

use once_cell::unsync::OnceCell;
use unwrap_to::unwrap_to;
use variation::Variation;

use crate::error::SemaError;
use crate::Result;

use super::SemaNode;

/// `IMPLICIT TAGS` / `EXPLICIT TAGS` / `AUTOMATIC TAGS`, defaulting to
/// `Explicit` when the module header names none of them.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Variation)]
pub enum TagDefault {
    Implicit,
    Explicit,
    Automatic,
}

impl Default for TagDefault {
    fn default() -> Self {
        TagDefault::Explicit
    }
}

/// A module definition: the top-level unit the node factory produces from
/// a `ModuleDefinition` token.
pub struct Module {
    pub name: String,
    pub tag_default: TagDefault,
    pub exports: Option<Box<SemaNode>>,
    pub imports: Option<Box<SemaNode>>,
    pub assignments: Vec<SemaNode>,
    user_types: OnceCell<BTreeMap<String, usize>>,
}

impl Module {
    pub fn new(
        name: String,
        tag_default: TagDefault,
        exports: Option<SemaNode>,
        imports: Option<SemaNode>,
        assignments: Vec<SemaNode>,
    ) -> Self {
        Self {
            name,
            tag_default,
            exports: exports.map(Box::new),
            imports: imports.map(Box::new),
            assignments,
            user_types: OnceCell::new(),
        }
    }

    pub(crate) fn children(&self) -> Vec<&SemaNode> {
        let mut out: Vec<&SemaNode> = Vec::new();
        out.extend(self.exports.as_deref());
        out.extend(self.imports.as_deref());
        out.extend(self.assignments.iter());
        out
    }

    pub fn user_types(&self) -> &BTreeMap<String, usize> {
        self.user_types.get_or_init(|| {
            let mut map = BTreeMap::new();
            for (i, a) in self.assignments.iter().enumerate() {
                if let SemaNode::TypeAssignment(ta) = a {
                    map.insert(ta.type_name.clone(), i);
                }
            }
            map
        })
    }

    pub fn get_type_decl(&self, type_name: &str) -> Option<&SemaNode> {
        let idx = *self.user_types().get(type_name)?;
        match &self.assignments[idx] {
            SemaNode::TypeAssignment(ta) => Some(ta.type_decl.as_ref()),
            _ => unreachable!("user_types only ever indexes TypeAssignment entries"),
        }
    }

    /// Recursively resolve user-defined types to their built-in
    /// declaration. Carries a visited-name guard so a malformed cyclic
    /// alias chain fails with `UnknownReference` instead of recursing
    /// indefinitely.
    pub fn resolve_type_decl<'a>(
        &'a self,
        type_decl: &'a SemaNode,
        referenced_modules: &'a [Module],
    ) -> Result<&'a SemaNode> {
        self.resolve_type_decl_guarded(type_decl, referenced_modules, &mut Vec::new())
    }

    fn resolve_type_decl_guarded<'a>(
        &'a self,
        type_decl: &'a SemaNode,
        referenced_modules: &'a [Module],
        visited: &mut Vec<(String, String)>,
    ) -> Result<&'a SemaNode> {
        let (module_name, type_name) = match type_decl {
            SemaNode::DefinedType(d) => (d.module_name.clone(), d.type_name.clone()),
            SemaNode::SelectionType(s) => {
                let inner_name = s
                    .type_decl
                    .type_name()
                    .ok_or_else(|| SemaError::malformed("SelectionType without an inner type_name"))?
                    .to_owned();
                (None, inner_name)
            }
            _ => return Ok(type_decl),
        };

        let module: &Module = match &module_name {
            None => self,
            Some(name) if name == &self.name => self,
            Some(name) => referenced_modules
                .iter()
                .find(|m| &m.name == name)
                .ok_or_else(|| SemaError::UnknownModule {
                    module: name.clone(),
                    known: referenced_modules.iter().map(|m| m.name.clone()).collect(),
                })?,
        };

        let key = (module.name.clone(), type_name.clone());
        if visited.contains(&key) {
            return Err(SemaError::UnknownReference {
                module: module.name.clone(),
                type_name,
            });
        }
        visited.push(key);

        let next = module
            .get_type_decl(&type_name)
            .ok_or_else(|| SemaError::UnknownReference {
                module: module.name.clone(),
                type_name: type_name.clone(),
            })?;

        module.resolve_type_decl_guarded(next, referenced_modules, visited)
    }

    pub fn resolve_selection_type<'a>(&'a self, selection: &'a SemaNode) -> Result<Option<&'a SemaNode>> {
        let sel = match selection {
            SemaNode::SelectionType(s) => s,
            other => {
                return Err(SemaError::InvalidArgument {
                    expected: "SelectionType",
                    found: variant_name(other),
                })
            }
        };

        let type_name = sel
            .type_decl
            .type_name()
            .ok_or_else(|| SemaError::malformed("SelectionType without an inner type_name"))?;
        let choice = self
            .get_type_decl(type_name)
            .ok_or_else(|| SemaError::UnknownReference {
                module: self.name.clone(),
                type_name: type_name.to_owned(),
            })?;
        let components = unwrap_to!(choice => SemaNode::ConstructedType);

        for component in &components.components {
            if let SemaNode::ComponentType(c) = component {
                if c.identifier.as_deref() == Some(sel.identifier.as_str()) {
                    return Ok(c.type_decl.as_deref());
                }
            }
        }
        Ok(None)
    }

    pub fn resolve_tag_implicitness(
        &self,
        tag_implicitness: Option<super::Implicitness>,
        tagged_type_decl: &SemaNode,
    ) -> super::Implicitness {
        use super::Implicitness;

        if let Some(explicit) = tag_implicitness {
            return explicit;
        }

        // Tagged CHOICEs must always be explicit if the default is
        // implicit, automatic or empty. See X.680, 30.6c.
        if let SemaNode::ConstructedType(c) = tagged_type_decl {
            if c.kind.is_choice() {
                return Implicitness::Explicit;
            }
        }

        match self.tag_default {
            TagDefault::Automatic => Implicitness::Implicit,
            TagDefault::Implicit => Implicitness::Implicit,
            TagDefault::Explicit => Implicitness::Explicit,
        }
    }
}

fn variant_name(node: &SemaNode) -> &'static str {
    match node {
        SemaNode::Module(_) => "Module",
        SemaNode::Exports(_) => "Exports",
        SemaNode::Imports(_) => "Imports",
        SemaNode::GlobalModuleReference(_) => "GlobalModuleReference",
        SemaNode::TypeAssignment(_) => "TypeAssignment",
        SemaNode::ValueAssignment(_) => "ValueAssignment",
        SemaNode::ConstructedType(_) => "ConstructedType",
        SemaNode::CollectionType(_) => "CollectionType",
        SemaNode::TaggedType(_) => "TaggedType",
        SemaNode::SimpleType(_) => "SimpleType",
        SemaNode::DefinedType(_) => "DefinedType",
        SemaNode::SelectionType(_) => "SelectionType",
        SemaNode::ReferencedValue(_) => "ReferencedValue",
        SemaNode::ComponentType(_) => "ComponentType",
        SemaNode::NamedType(_) => "NamedType",
        SemaNode::ValueListType(_) => "ValueListType",
        SemaNode::BitStringType(_) => "BitStringType",
        SemaNode::NamedValue(_) => "NamedValue",
        SemaNode::SingleValueConstraint(_) => "SingleValueConstraint",
        SemaNode::ValueRangeConstraint(_) => "ValueRangeConstraint",
        SemaNode::SizeConstraint(_) => "SizeConstraint",
        SemaNode::ObjectIdentifierValue(_) => "ObjectIdentifierValue",
        SemaNode::NameForm(_) => "NameForm",
        SemaNode::NumberForm(_) => "NumberForm",
        SemaNode::NameAndNumberForm(_) => "NameAndNumberForm",
        SemaNode::BinaryStringValue(_) => "BinaryStringValue",
        SemaNode::HexStringValue(_) => "HexStringValue",
        SemaNode::ExtensionMarker(_) => "ExtensionMarker",
        SemaNode::Literal(_) => "Literal",
    }
}

impl Clone for Module {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            tag_default: self.tag_default,
            exports: self.exports.clone(),
            imports: self.imports.clone(),
            assignments: self.assignments.clone(),
            // Caches are not part of a clone's observable identity; a
            // fresh clone recomputes on first access.
            user_types: OnceCell::new(),
        }
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("tag_default", &self.tag_default)
            .field("exports", &self.exports)
            .field("imports", &self.imports)
            .field("assignments", &self.assignments)
            .finish()
    }
}

impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.tag_default == other.tag_default
            && self.exports == other.exports
            && self.imports == other.imports
            && self.assignments == other.assignments
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} DEFINITIONS ::=", self.name)?;
        writeln!(f, "BEGIN")?;

        if let Some(exports) = &self.exports {
            writeln!(f, "{}", exports)?;
            writeln!(f)?;
        }

        if let Some(imports) = &self.imports {
            writeln!(f, "{}", imports)?;
            writeln!(f)?;
        }

        for assignment in &self.assignments {
            writeln!(f, "{}", assignment)?;
        }

        write!(f, "END")
    }
}

/// `EXPORTS a, b, c;`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Exports {
    pub symbols: Vec<String>,
}

impl fmt::Display for Exports {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EXPORTS {};", itertools::join(&self.symbols, ", "))
    }
}

/// `IMPORTS a, b FROM Foo;` — entries from clauses naming the same source
/// module are merged. Stored as an ordered list of pairs rather than a map
/// keyed by a type with no natural `Ord`.
#[derive(Clone, Debug, PartialEq)]
pub struct Imports {
    pub entries: Vec<(SemaNode, Vec<String>)>,
}

impl Imports {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn merge(&mut self, reference: SemaNode, symbols: Vec<String>) {
        let module_name = match &reference {
            SemaNode::GlobalModuleReference(g) => g.module_name.clone(),
            _ => return,
        };

        for (existing, existing_symbols) in &mut self.entries {
            if let SemaNode::GlobalModuleReference(g) = existing {
                if g.module_name == module_name {
                    existing_symbols.extend(symbols);
                    return;
                }
            }
        }

        self.entries.push((reference, symbols));
    }

    pub(crate) fn children(&self) -> Vec<&SemaNode> {
        self.entries.iter().map(|(r, _)| r).collect()
    }
}

impl Default for Imports {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Imports {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "IMPORTS")?;
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by_key(|(r, _)| match r {
            SemaNode::GlobalModuleReference(g) => g.module_name.clone(),
            _ => String::new(),
        });
        for (reference, symbols) in sorted {
            writeln!(f, "  {} FROM {}", itertools::join(symbols, ", "), reference)?;
        }
        write!(f, ";")
    }
}

/// A module named in an `IMPORTS` clause, with the OID its origin claims
/// to identify, if given.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobalModuleReference {
    pub module_name: String,
    pub oid: Option<Box<SemaNode>>,
}

impl fmt::Display for GlobalModuleReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.module_name)?;
        if let Some(oid) = &self.oid {
            write!(f, " {}", oid)?;
        }
        Ok(())
    }
}
