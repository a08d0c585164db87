use std::collections::BTreeMap;

use failure::Fail;

/// Every fatal condition the model builder can raise.
#[derive(Debug, Fail)]
pub enum SemaError {
    /// A token had the wrong `ty`, the wrong element count, or carried a
    /// primitive where a token was required.
    #[fail(display = "malformed input: {}", _0)]
    MalformedInput(String),

    /// A `DefinedType` named a module that isn't `self` and wasn't found
    /// among the supplied referenced modules.
    #[fail(display = "unrecognized referenced module {:?} (known: {:?})", module, known)]
    UnknownModule {
        module: String,
        known: Vec<String>,
    },

    /// A type name was not present in the resolved module's `user_types()`.
    #[fail(display = "unknown reference {:?} in module {:?}", type_name, module)]
    UnknownReference {
        module: String,
        type_name: String,
    },

    /// A caller passed the wrong node kind to an operation that expects one
    /// specific variant (e.g. `resolve_selection_type`).
    #[fail(display = "invalid argument: expected {}, found {}", expected, found)]
    InvalidArgument {
        expected: &'static str,
        found: &'static str,
    },

    /// `topological_sort` found a cycle; the residual graph is attached for
    /// diagnostics.
    #[fail(display = "can't sort cyclic references: {:?}", residual_graph)]
    CyclicReferences {
        residual_graph: BTreeMap<String, Vec<String>>,
    },
}

impl SemaError {
    pub fn malformed(message: impl Into<String>) -> Self {
        SemaError::MalformedInput(message.into())
    }
}
