// src/errors/define.rs
//! Type construction errors (E1xxx).

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum DefineError {
    #[error(
        "method '{method}' of '{ty}' is marked as an explicit implementation of '{target}', which is not an outstanding abstract member of any base of '{ty}'"
    )]
    #[diagnostic(
        code(E1001),
        help("the target must be an abstract member inherited from a base interface and not already satisfied by a base")
    )]
    UnknownTarget {
        ty: String,
        method: String,
        target: String,
    },

    #[error("conflicting explicit implementations of {members} in '{ty}'")]
    #[diagnostic(
        code(E1002),
        help("re-implement the member in this type's body to resolve the ambiguity")
    )]
    ConflictingOverride { ty: String, members: String },

    #[error("concrete type '{ty}' does not provide explicit implementations for: {missing}")]
    #[diagnostic(
        code(E1003),
        help("implement every outstanding abstract member or drop the concrete qualifier")
    )]
    IncompleteConcrete { ty: String, missing: String },

    #[error("interface '{ty}' cannot extend '{base}': not an interface type")]
    #[diagnostic(code(E1004))]
    InvalidBase { ty: String, base: String },
}
