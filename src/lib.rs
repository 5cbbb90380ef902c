// src/lib.rs
//! Facet: a dynamic object model with explicitly implemented interfaces.
//!
//! A concrete type may implement several interfaces that declare
//! same-named members; each implementation is explicitly bound to the one
//! interface it satisfies. Callers cast an instance to an interface and
//! call through the resulting view, which dispatches abstract members
//! through the type's implementation registry and everything else through
//! ordinary attribute lookup.

pub mod errors;
pub mod identity;
pub mod model;
pub mod runtime;

pub use errors::{DefineError, RuntimeError};
pub use identity::{MemberId, Symbol, TypeDefId};
pub use model::{
    ImplementationEntry, ObjectModel, TypeDef, TypeDefKind, implements,
};
pub use runtime::{BoundMethod, Instance, InstanceRef, InterfaceView, NativeFn, StaticFn, Value};
