//! The shape of the external parser's output: the node factory consumes
//! these tokens opaquely by their `ty` discriminator.

use serde::{Deserialize, Serialize};

/// A single element inside an [`AnnotatedToken`]'s `elements` list: either a
/// further token, or one of the primitive leaf kinds the parser may emit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Token(AnnotatedToken),
    Str(String),
    Num(i64),
    Null,
}

impl Element {
    pub fn as_token(&self) -> Option<&AnnotatedToken> {
        match self {
            Element::Token(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Element::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Element::Null)
    }
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Element::Str(s.to_owned())
    }
}

impl From<String> for Element {
    fn from(s: String) -> Self {
        Element::Str(s)
    }
}

impl From<AnnotatedToken> for Element {
    fn from(t: AnnotatedToken) -> Self {
        Element::Token(t)
    }
}

/// `{ty: string, elements: list}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    pub ty: String,
    pub elements: Vec<Element>,
}

impl AnnotatedToken {
    pub fn new(ty: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            ty: ty.into(),
            elements,
        }
    }
}
