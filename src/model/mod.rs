// src/model/mod.rs
//! Type construction and the per-type implementation registries.

pub mod builder;
pub mod defs;
pub mod object_model;
pub mod registry;

pub use builder::{ClassBuilder, ImplementationEntry, InterfaceBuilder, implements};
pub use defs::{MemberDef, NamespaceEntry, TypeDef, TypeDefKind};
pub use object_model::ObjectModel;
pub use registry::{ImplEntry, ImplRegistry};
