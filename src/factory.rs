//! The node factory: `create`/`create_opt` map each tagged parser token to
//! a `SemaNode` variant.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::SemaError;
use crate::node::*;
use crate::token::{AnnotatedToken, Element};
use crate::Result;

/// Shared, process-wide counter for auto-generated `unnamedN` identifiers.
static UNNAMED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Reset the unnamed-member counter to zero. Intended for tests that need
/// deterministic `unnamedN` names; not required between ordinary builds.
pub fn reset_unnamed_counter() {
    UNNAMED_COUNTER.store(0, Ordering::SeqCst);
}

fn next_unnamed() -> String {
    let n = UNNAMED_COUNTER.fetch_add(1, Ordering::SeqCst) + 1;
    format!("unnamed{}", n)
}

fn as_token(element: &Element) -> Result<&AnnotatedToken> {
    element
        .as_token()
        .ok_or_else(|| SemaError::malformed(format!("expected a token, found {:?}", element)))
}

fn as_str(element: &Element) -> Result<&str> {
    element
        .as_str()
        .ok_or_else(|| SemaError::malformed(format!("expected a string leaf, found {:?}", element)))
}

fn expect_len(token: &AnnotatedToken, len: usize) -> Result<()> {
    if token.elements.len() != len {
        return Err(SemaError::malformed(format!(
            "{} expects {} elements, found {}",
            token.ty,
            len,
            token.elements.len()
        )));
    }
    Ok(())
}

/// Accepts either a token or a primitive leaf; primitives pass through
/// unchanged as `SemaNode::Literal`, and `Null` yields `None`.
pub fn create_opt(element: &Element) -> Result<Option<SemaNode>> {
    match element {
        Element::Null => Ok(None),
        Element::Token(token) => Ok(Some(create(token)?)),
        Element::Str(s) => Ok(Some(SemaNode::Literal(s.clone()))),
        Element::Num(n) => Ok(Some(SemaNode::Literal(n.to_string()))),
    }
}

/// Dispatch on `token.ty` to build the matching `SemaNode` variant. Fails
/// with `MalformedInput` on an unrecognized `ty` or a malformed shape.
pub fn create(token: &AnnotatedToken) -> Result<SemaNode> {
    match token.ty.as_str() {
        "ModuleDefinition" => create_module(token),
        "Exports" => create_exports(token),
        "Imports" => create_imports(token),
        "TypeAssignment" => create_type_assignment(token),
        "ValueAssignment" => create_value_assignment(token),
        "ComponentType" => create_component_type(token),
        "NamedType" => create_named_type(token),
        "ValueListType" => create_value_list_type(token),
        "BitStringType" => create_bit_string_type(token),
        "NamedValue" => create_named_value(token),
        "Type" => create_type(token),
        "SimpleType" => create_simple_type(token),
        "DefinedType" => create_defined_type(token),
        "SelectionType" => create_selection_type(token),
        "ReferencedValue" => create_referenced_value(token),
        "TaggedType" => create_tagged_type(token),
        "SequenceType" => create_constructed_type(token, ConstructedKind::Sequence),
        "ChoiceType" => create_constructed_type(token, ConstructedKind::Choice),
        "SetType" => create_constructed_type(token, ConstructedKind::Set),
        "SequenceOfType" => create_collection_type(token, CollectionKind::SequenceOf),
        "SetOfType" => create_collection_type(token, CollectionKind::SetOf),
        "ExtensionMarker" => Ok(SemaNode::ExtensionMarker(ExtensionMarker)),
        "SingleValueConstraint" => create_single_value_constraint(token),
        "SizeConstraint" => create_size_constraint(token),
        "ValueRangeConstraint" => create_value_range_constraint(token),
        "ObjectIdentifierValue" => create_object_identifier_value(token),
        "NameForm" => create_name_form(token),
        "NumberForm" => create_number_form(token),
        "NameAndNumberForm" => create_name_and_number_form(token),
        "BinaryStringValue" => create_binary_string_value(token),
        "HexStringValue" => create_hex_string_value(token),
        other => Err(SemaError::malformed(format!("unknown token type: {}", other))),
    }
}

/// `Type` tokens are transparent: dispatch on their first sub-element's
/// `ty`.
fn create_type(token: &AnnotatedToken) -> Result<SemaNode> {
    let first = token
        .elements
        .get(0)
        .ok_or_else(|| SemaError::malformed("Type token has no elements"))?;
    create(as_token(first)?)
}

fn module_reference_name(element: &Element) -> Result<String> {
    let token = as_token(element)?;
    expect_len(token, 1)?;
    Ok(as_str(&token.elements[0])?.to_owned())
}

fn create_module(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 5)?;

    let name = module_reference_name(&token.elements[0])?;
    // token.elements[1] is the definitive identifier; unused.

    let tag_default = match &token.elements[2] {
        Element::Null => TagDefault::Explicit,
        Element::Str(s) if s == "IMPLICIT TAGS" => TagDefault::Implicit,
        Element::Str(s) if s == "EXPLICIT TAGS" => TagDefault::Explicit,
        Element::Str(s) if s == "AUTOMATIC TAGS" => TagDefault::Automatic,
        other => return Err(SemaError::malformed(format!("unexpected tag default: {:?}", other))),
    };
    // token.elements[3] is the extension default; unused.

    let body = as_token(&token.elements[4])?;
    expect_len(body, 3)?;

    let exports = create_opt(&body.elements[0])?;
    let imports = create_opt(&body.elements[1])?;

    let assignment_list = as_token(&body.elements[2])?;
    let mut assignments = Vec::with_capacity(assignment_list.elements.len());
    for element in &assignment_list.elements {
        assignments.push(create(as_token(element)?)?);
    }

    debug!("built module {}", name);

    Ok(SemaNode::Module(Box::new(Module::new(
        name,
        tag_default,
        exports,
        imports,
        assignments,
    ))))
}

fn create_exports(token: &AnnotatedToken) -> Result<SemaNode> {
    let symbols = token
        .elements
        .iter()
        .map(as_str)
        .map(|r| r.map(str::to_owned))
        .collect::<Result<Vec<_>>>()?;
    Ok(SemaNode::Exports(Exports { symbols }))
}

fn create_imports(token: &AnnotatedToken) -> Result<SemaNode> {
    let mut imports = Imports::new();

    for element in &token.elements {
        let clause = as_token(element)?;
        expect_len(clause, 3)?;

        let symbols_token = as_token(&clause.elements[0])?;
        let symbols = symbols_token
            .elements
            .iter()
            .map(as_str)
            .map(|r| r.map(str::to_owned))
            .collect::<Result<Vec<_>>>()?;

        let module_name = module_reference_name(&clause.elements[1])?;
        let oid = create_opt(&clause.elements[2])?;

        let reference = SemaNode::GlobalModuleReference(Box::new(GlobalModuleReference {
            module_name,
            oid: oid.map(Box::new),
        }));

        imports.merge(reference, symbols);
    }

    Ok(SemaNode::Imports(Box::new(imports)))
}

fn create_type_assignment(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 3)?;
    let type_name = as_str(&token.elements[0])?.to_owned();
    // token.elements[1] is the literal "::=" token; unused.
    let type_decl = create(as_token(&token.elements[2])?)?;

    Ok(SemaNode::TypeAssignment(Box::new(TypeAssignment {
        type_name,
        type_decl: Box::new(type_decl),
    })))
}

fn create_value_assignment(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 4)?;
    let value_name = as_str(&token.elements[0])?.to_owned();
    let type_decl = create(as_token(&token.elements[1])?)?;
    // token.elements[2] is the literal "::=" token; unused.
    let value = create_opt(&token.elements[3])?;

    Ok(SemaNode::ValueAssignment(Box::new(ValueAssignment {
        value_name,
        type_decl: Box::new(type_decl),
        value: value.map(Box::new),
    })))
}

fn crack_named_type(token: &AnnotatedToken) -> Result<(Option<String>, Box<SemaNode>)> {
    let named = create_named_type(token)?;
    match named {
        SemaNode::NamedType(n) => Ok((Some(n.identifier), n.type_decl)),
        _ => unreachable!("create_named_type always returns SemaNode::NamedType"),
    }
}

fn create_component_type(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 1)?;
    let first = as_token(&token.elements[0])?;

    let component = match first.ty.as_str() {
        "NamedType" => {
            let (identifier, type_decl) = crack_named_type(first)?;
            ComponentType {
                identifier,
                type_decl: Some(type_decl),
                default_value: None,
                optional: false,
                components_of_type: None,
            }
        }
        "ComponentTypeOptional" => {
            expect_len(first, 1)?;
            let (identifier, type_decl) = crack_named_type(as_token(&first.elements[0])?)?;
            ComponentType {
                identifier,
                type_decl: Some(type_decl),
                default_value: None,
                optional: true,
                components_of_type: None,
            }
        }
        "ComponentTypeDefault" => {
            expect_len(first, 2)?;
            let (identifier, type_decl) = crack_named_type(as_token(&first.elements[0])?)?;
            let default_value = create_opt(&first.elements[1])?;
            ComponentType {
                identifier,
                type_decl: Some(type_decl),
                default_value: default_value.map(Box::new),
                optional: false,
                components_of_type: None,
            }
        }
        "ComponentTypeComponentsOf" => {
            expect_len(first, 1)?;
            let components_of_type = create(as_token(&first.elements[0])?)?;
            ComponentType {
                identifier: None,
                type_decl: None,
                default_value: None,
                optional: false,
                components_of_type: Some(Box::new(components_of_type)),
            }
        }
        other => return Err(SemaError::malformed(format!("unknown component type: {}", other))),
    };

    Ok(SemaNode::ComponentType(Box::new(component)))
}

fn create_named_type(token: &AnnotatedToken) -> Result<SemaNode> {
    if token.elements.is_empty() {
        return Err(SemaError::malformed("NamedType expects at least 1 element"));
    }
    let first = as_token(&token.elements[0])?;

    let (identifier, type_token) = if first.ty == "Type" {
        (next_unnamed(), first)
    } else if first.ty == "Identifier" {
        expect_len(first, 1)?;
        let name = as_str(&first.elements[0])?.to_owned();
        let type_token = token
            .elements
            .get(1)
            .ok_or_else(|| SemaError::malformed("NamedType missing its type"))?;
        (name, as_token(type_token)?)
    } else {
        return Err(SemaError::malformed(format!("unexpected token in NamedType: {}", first.ty)));
    };

    let type_decl = create(type_token)?;

    Ok(SemaNode::NamedType(Box::new(NamedType {
        identifier,
        type_decl: Box::new(type_decl),
    })))
}

fn create_value_list_type(token: &AnnotatedToken) -> Result<SemaNode> {
    if token.elements.len() < 2 {
        return Err(SemaError::malformed("ValueListType expects at least 2 elements"));
    }

    let type_name = as_str(&token.elements[0])?.to_owned();
    let values_token = as_token(&token.elements[1])?;

    let mut named_values = Vec::with_capacity(values_token.elements.len());
    for element in &values_token.elements {
        named_values.push(create(as_token(element)?)?);
    }
    auto_number(&mut named_values);

    let constraint = match token.elements.get(2) {
        Some(element) => create_opt(element)?,
        None => None,
    };

    Ok(SemaNode::ValueListType(ValueListType {
        type_name,
        named_values,
        constraint: constraint.map(Box::new),
    }))
}

fn create_bit_string_type(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 3)?;
    let type_name = as_str(&token.elements[0])?.to_owned();
    let bits_token = as_token(&token.elements[1])?;

    let mut named_bits = Vec::with_capacity(bits_token.elements.len());
    for element in &bits_token.elements {
        named_bits.push(create(as_token(element)?)?);
    }

    let constraint = create_opt(&token.elements[2])?;

    Ok(SemaNode::BitStringType(BitStringType {
        type_name,
        named_bits,
        constraint: constraint.map(Box::new),
    }))
}

/// Sequentially number `NamedValue`s left with no explicit value: first =
/// 0, subsequent = previous + 1.
fn auto_number(named_values: &mut [SemaNode]) {
    let mut previous: Option<i64> = None;
    for node in named_values.iter_mut() {
        if let SemaNode::NamedValue(nv) = node {
            if nv.value.is_none() {
                let next = previous.map(|p| p + 1).unwrap_or(0);
                nv.value = Some(Box::new(SemaNode::Literal(next.to_string())));
                previous = Some(next);
            } else if let Some(value) = &nv.value {
                previous = value.to_string().parse::<i64>().ok();
            }
        }
    }
}

fn create_named_value(token: &AnnotatedToken) -> Result<SemaNode> {
    let (identifier, value) = match token.elements.len() {
        1 => (as_str(&token.elements[0])?.to_owned(), None),
        2 => {
            let identifier_token = as_token(&token.elements[0])?;
            expect_len(identifier_token, 1)?;
            let identifier = as_str(&identifier_token.elements[0])?.to_owned();

            let value_token = as_token(&token.elements[1])?;
            expect_len(value_token, 1)?;
            let value = as_str(&value_token.elements[0])?.to_owned();

            (identifier, Some(SemaNode::Literal(value)))
        }
        other => return Err(SemaError::malformed(format!("NamedValue expects 1 or 2 elements, found {}", other))),
    };

    Ok(SemaNode::NamedValue(Box::new(NamedValue {
        identifier,
        value: value.map(Box::new),
    })))
}

fn create_simple_type(token: &AnnotatedToken) -> Result<SemaNode> {
    if token.elements.is_empty() {
        return Err(SemaError::malformed("SimpleType expects at least 1 element"));
    }

    let type_name = as_str(&token.elements[0])?.to_owned();
    let constraint = match token.elements.get(1) {
        Some(element) => Some(create(as_token(element)?)?),
        None => None,
    };

    Ok(SemaNode::SimpleType(SimpleType {
        type_name,
        constraint: constraint.map(Box::new),
    }))
}

fn create_defined_type(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 3)?;

    let module_name = match &token.elements[0] {
        Element::Null => None,
        other => Some(module_reference_name(other)?),
    };
    let type_name = as_str(&token.elements[1])?.to_owned();
    let constraint = match &token.elements[2] {
        Element::Null => None,
        other => Some(create(as_token(other)?)?),
    };

    Ok(SemaNode::DefinedType(DefinedType {
        module_name,
        type_name,
        constraint: constraint.map(Box::new),
    }))
}

fn create_selection_type(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 2)?;
    let identifier_token = as_token(&token.elements[0])?;
    expect_len(identifier_token, 1)?;
    let identifier = as_str(&identifier_token.elements[0])?.to_owned();

    let type_decl = create(as_token(&token.elements[1])?)?;

    Ok(SemaNode::SelectionType(Box::new(SelectionType {
        identifier,
        type_decl: Box::new(type_decl),
    })))
}

fn create_referenced_value(token: &AnnotatedToken) -> Result<SemaNode> {
    let qualified = token.elements.len() > 1
        && token
            .elements
            .get(0)
            .and_then(Element::as_token)
            .map(|t| t.ty == "ModuleReference")
            .unwrap_or(false);

    let (module_reference, name) = if qualified {
        let module_reference = module_reference_name(&token.elements[0])?;
        let name = as_str(&token.elements[1])?.to_owned();
        (Some(module_reference), name)
    } else {
        let name = as_str(&token.elements[0])?.to_owned();
        (None, name)
    };

    Ok(SemaNode::ReferencedValue(ReferencedValue {
        module_reference,
        name,
    }))
}

fn create_tagged_type(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 3)?;

    let tag_token = as_token(&token.elements[0])?;
    let mut class_name = None;
    let mut class_number = None;
    for element in &tag_token.elements {
        let sub = as_token(element)?;
        match sub.ty.as_str() {
            "TagClassNumber" => {
                expect_len(sub, 1)?;
                class_number = Some(as_str(&sub.elements[0])?.to_owned());
            }
            "TagClass" => {
                expect_len(sub, 1)?;
                class_name = Some(as_str(&sub.elements[0])?.to_owned());
            }
            other => return Err(SemaError::malformed(format!("unknown tag element: {}", other))),
        }
    }
    let class_number = class_number.ok_or_else(|| SemaError::malformed("TaggedType missing a class number"))?;

    let implicitness = match &token.elements[1] {
        Element::Null => None,
        Element::Str(s) if s == "IMPLICIT" => Some(Implicitness::Implicit),
        Element::Str(s) if s == "EXPLICIT" => Some(Implicitness::Explicit),
        other => return Err(SemaError::malformed(format!("unexpected implicitness: {:?}", other))),
    };

    let type_decl = create(as_token(&token.elements[2])?)?;

    Ok(SemaNode::TaggedType(Box::new(TaggedType {
        class_name,
        class_number,
        implicitness,
        type_decl: Box::new(type_decl),
    })))
}

fn create_constructed_type(token: &AnnotatedToken, kind: ConstructedKind) -> Result<SemaNode> {
    expect_len(token, 1)?;
    let component_tokens = as_token(&token.elements[0])?;

    let mut components = Vec::with_capacity(component_tokens.elements.len());
    for element in &component_tokens.elements {
        components.push(create(as_token(element)?)?);
    }

    let type_name = match kind {
        ConstructedKind::Sequence => "SEQUENCE",
        ConstructedKind::Set => "SET",
        ConstructedKind::Choice => "CHOICE",
    }
    .to_owned();

    Ok(SemaNode::ConstructedType(Box::new(ConstructedType {
        kind,
        type_name,
        components,
    })))
}

fn create_collection_type(token: &AnnotatedToken, kind: CollectionKind) -> Result<SemaNode> {
    expect_len(token, 2)?;
    let keyword = match kind {
        CollectionKind::SequenceOf => "SEQUENCE",
        CollectionKind::SetOf => "SET",
    };
    let type_name = format!("{} OF", keyword);

    let size_constraint = create_opt(&token.elements[0])?;
    let type_decl = create(as_token(&token.elements[1])?)?;

    Ok(SemaNode::CollectionType(Box::new(CollectionType {
        kind,
        type_name,
        size_constraint: size_constraint.map(Box::new),
        type_decl: Box::new(type_decl),
    })))
}

fn create_single_value_constraint(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 1)?;
    let value = create_opt(&token.elements[0])?;
    Ok(SemaNode::SingleValueConstraint(Box::new(SingleValueConstraint {
        value: value.map(Box::new),
    })))
}

fn create_value_range_constraint(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 2)?;
    let min_value = create_opt(&token.elements[0])?;
    let max_value = create_opt(&token.elements[1])?;
    Ok(SemaNode::ValueRangeConstraint(Box::new(ValueRangeConstraint {
        min_value: min_value.map(Box::new),
        max_value: max_value.map(Box::new),
    })))
}

fn create_size_constraint(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 1)?;
    let nested = create(as_token(&token.elements[0])?)?;
    match &nested {
        SemaNode::ValueRangeConstraint(_) | SemaNode::SingleValueConstraint(_) => {}
        other => {
            return Err(SemaError::malformed(format!(
                "unexpected size constraint type {:?}",
                other
            )))
        }
    }
    Ok(SemaNode::SizeConstraint(Box::new(SizeConstraint {
        nested: Box::new(nested),
    })))
}

fn create_object_identifier_value(token: &AnnotatedToken) -> Result<SemaNode> {
    let mut components = Vec::with_capacity(token.elements.len());
    for element in &token.elements {
        components.push(create(as_token(element)?)?);
    }
    Ok(SemaNode::ObjectIdentifierValue(ObjectIdentifierValue { components }))
}

fn create_name_form(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 1)?;
    Ok(SemaNode::NameForm(NameForm {
        name: as_str(&token.elements[0])?.to_owned(),
    }))
}

fn create_number_form(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 1)?;
    let value = match &token.elements[0] {
        Element::Str(s) => s.clone(),
        Element::Num(n) => n.to_string(),
        other => return Err(SemaError::malformed(format!("unexpected NumberForm value: {:?}", other))),
    };
    Ok(SemaNode::NumberForm(NumberForm { value }))
}

fn create_name_and_number_form(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 2)?;
    let name = create(as_token(&token.elements[0])?)?;
    let number = create(as_token(&token.elements[1])?)?;
    Ok(SemaNode::NameAndNumberForm(Box::new(NameAndNumberForm {
        name: Box::new(name),
        number: Box::new(number),
    })))
}

fn create_binary_string_value(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 1)?;
    Ok(SemaNode::BinaryStringValue(BinaryStringValue {
        value: as_str(&token.elements[0])?.to_owned(),
    }))
}

fn create_hex_string_value(token: &AnnotatedToken) -> Result<SemaNode> {
    expect_len(token, 1)?;
    Ok(SemaNode::HexStringValue(HexStringValue {
        value: as_str(&token.elements[0])?.to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(ty: &str, elements: Vec<Element>) -> AnnotatedToken {
        AnnotatedToken::new(ty, elements)
    }

    fn named_value(name: &str) -> Element {
        Element::Token(token("NamedValue", vec![Element::Str(name.to_owned())]))
    }

    #[test]
    fn unknown_token_type_is_malformed_input() {
        let t = token("Nonsense", vec![]);
        let err = create(&t).unwrap_err();
        assert!(matches!(err, SemaError::MalformedInput(_)));
    }

    #[test]
    fn simple_type_round_trips_through_display() {
        let t = token("SimpleType", vec![Element::Str("INTEGER".to_owned())]);
        let node = create(&t).unwrap();
        assert_eq!(node.to_string(), "INTEGER");
    }

    #[test]
    fn value_list_type_numbers_bare_named_values_sequentially() {
        reset_unnamed_counter();
        let values = token(
            "NamedValueList",
            vec![named_value("red"), named_value("green"), named_value("blue")],
        );
        let t = token(
            "ValueListType",
            vec![Element::Str("ENUMERATED".to_owned()), Element::Token(values)],
        );

        let node = create(&t).unwrap();
        let value_list = match node {
            SemaNode::ValueListType(v) => v,
            other => panic!("expected ValueListType, got {:?}", other),
        };

        let rendered: Vec<String> = value_list.named_values.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["red (0)", "green (1)", "blue (2)"]);
    }

    #[test]
    fn value_list_type_resumes_numbering_after_explicit_value() {
        reset_unnamed_counter();
        let explicit = Element::Token(token(
            "NamedValue",
            vec![
                Element::Token(token("Identifier", vec![Element::Str("ten".to_owned())])),
                Element::Token(token("IntegerValue", vec![Element::Str("10".to_owned())])),
            ],
        ));
        let values = token("NamedValueList", vec![named_value("zero"), explicit, named_value("eleven")]);
        let t = token(
            "ValueListType",
            vec![Element::Str("ENUMERATED".to_owned()), Element::Token(values)],
        );

        let node = create(&t).unwrap();
        let value_list = match node {
            SemaNode::ValueListType(v) => v,
            other => panic!("expected ValueListType, got {:?}", other),
        };

        let rendered: Vec<String> = value_list.named_values.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["zero (0)", "ten (10)", "eleven (11)"]);
    }

    #[test]
    fn named_type_without_identifier_gets_unnamed_placeholder() {
        reset_unnamed_counter();
        let t = token(
            "NamedType",
            vec![Element::Token(token(
                "Type",
                vec![Element::Token(token("SimpleType", vec![Element::Str("BOOLEAN".to_owned())]))],
            ))],
        );

        let node = create(&t).unwrap();
        match node {
            SemaNode::NamedType(n) => assert_eq!(n.identifier, "unnamed1"),
            other => panic!("expected NamedType, got {:?}", other),
        }
    }

    #[test]
    fn tagged_type_reports_class_and_implicitness() {
        let tag = token(
            "Tag",
            vec![
                Element::Token(token("TagClass", vec![Element::Str("APPLICATION".to_owned())])),
                Element::Token(token("TagClassNumber", vec![Element::Str("2".to_owned())])),
            ],
        );
        let t = token(
            "TaggedType",
            vec![
                Element::Token(tag),
                Element::Str("IMPLICIT".to_owned()),
                Element::Token(token("SimpleType", vec![Element::Str("INTEGER".to_owned())])),
            ],
        );

        let node = create(&t).unwrap();
        assert_eq!(node.to_string(), "[APPLICATION 2] IMPLICIT INTEGER");
    }

    #[test]
    fn imports_merges_clauses_naming_the_same_module() {
        fn clause(symbol: &str, module: &str) -> Element {
            Element::Token(token(
                "ImportsFrom",
                vec![
                    Element::Token(token("SymbolList", vec![Element::Str(symbol.to_owned())])),
                    Element::Token(token("ModuleReference", vec![Element::Str(module.to_owned())])),
                    Element::Null,
                ],
            ))
        }

        let t = token("Imports", vec![clause("Foo", "Other"), clause("Bar", "Other")]);
        let node = create(&t).unwrap();
        match node {
            SemaNode::Imports(i) => {
                assert_eq!(i.entries.len(), 1);
                assert_eq!(i.entries[0].1, vec!["Foo".to_owned(), "Bar".to_owned()]);
            }
            other => panic!("expected Imports, got {:?}", other),
        }
    }
}
