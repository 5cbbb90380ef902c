// src/errors/runtime.rs
//! Casting, view access, and instantiation errors (E2xxx).

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum RuntimeError {
    #[error("type '{ty}' cannot be cast to '{target}'")]
    #[diagnostic(
        code(E2001),
        help("the cast target must be an interface type that '{ty}' declares as a base")
    )]
    InterfaceMismatch { ty: String, target: String },

    #[error("type '{ty}' has no implementation mapping for interface '{interface}'")]
    #[diagnostic(code(E2002))]
    UnimplementedInterface { ty: String, interface: String },

    #[error(
        "type '{ty}' does not provide an explicit implementation for member '{member}' of interface '{interface}'"
    )]
    #[diagnostic(
        code(E2003),
        help("the implementation may be registered under a different declaring interface of the hierarchy")
    )]
    MissingExplicitImplementation {
        ty: String,
        interface: String,
        member: String,
    },

    #[error("interface '{interface}' has no member named '{member}'")]
    #[diagnostic(code(E2004))]
    UnknownMember { interface: String, member: String },

    #[error("'{ty}' object has no attribute '{attribute}'")]
    #[diagnostic(code(E2005))]
    UnknownAttribute { ty: String, attribute: String },

    #[error("interface '{interface}' cannot be instantiated")]
    #[diagnostic(code(E2006))]
    InterfaceInstantiation { interface: String },

    #[error("cannot instantiate abstract type '{ty}' with unsatisfied members: {missing}")]
    #[diagnostic(code(E2007))]
    AbstractInstantiation { ty: String, missing: String },

    #[error("value of type '{found}' is not callable")]
    #[diagnostic(code(E2008))]
    NotCallable { found: String },

    #[error("expected {expected}, found {found}")]
    #[diagnostic(code(E2009))]
    TypeMismatch { expected: String, found: String },
}
