// src/model/defs.rs
//! Definition structs for object-model entities.
//!
//! These hold the full information about finalized types and their abstract
//! members. The corresponding ID types (TypeDefId, MemberId) are indices
//! into the model's arenas.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::identity::{MemberId, Symbol, TypeDefId};
use crate::model::registry::ImplRegistry;
use crate::runtime::value::{NativeFn, StaticFn};

/// What kind of type definition this is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDefKind {
    Interface,
    Class,
}

/// One abstract member declaration (always belongs to an interface)
#[derive(Debug, Clone)]
pub struct MemberDef {
    pub id: MemberId,
    pub name: Symbol,
    /// The interface that declared this member. Fixed at creation.
    pub declaring: TypeDefId,
}

/// An ordinary (non-explicit) callable in a type's namespace
#[derive(Debug, Clone)]
pub enum NamespaceEntry {
    /// Instance method, bound to the receiver on access
    Method(NativeFn),
    /// Static method, resolves unbound
    Static(StaticFn),
}

/// A finalized type definition. Immutable once published to the model.
#[derive(Debug)]
pub struct TypeDef {
    pub id: TypeDefId,
    pub name: Symbol,
    pub kind: TypeDefKind,
    /// Declared bases, in declaration order
    pub extends: Vec<TypeDefId>,
    /// Self-first linearization of the inheritance graph, declared-order
    /// depth-first with first-occurrence dedup
    pub ancestry: Vec<TypeDefId>,
    /// Abstract members declared by this type itself, in declaration order
    pub declares: Vec<MemberId>,
    /// Every abstract member this type must satisfy, transitively inherited
    /// plus its own declarations
    pub required: FxHashSet<MemberId>,
    /// Cached name -> identity table for view resolution; the first
    /// declaring ancestor in ancestry order wins a name
    pub abstract_names: FxHashMap<Symbol, MemberId>,
    /// Ordinary methods declared on this type itself
    pub namespace: FxHashMap<Symbol, NamespaceEntry>,
    /// Explicit implementations, keyed by declaring interface
    pub registry: ImplRegistry,
    /// Names of abstract members still unsatisfied at finalization, sorted.
    /// Instantiation is refused while this is non-empty.
    pub outstanding: Vec<String>,
}

impl TypeDef {
    pub fn is_interface(&self) -> bool {
        self.kind == TypeDefKind::Interface
    }

    /// Whether `interface` is this type or one of its declared ancestors
    pub fn descends_from(&self, interface: TypeDefId) -> bool {
        self.ancestry.contains(&interface)
    }
}
