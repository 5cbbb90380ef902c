// src/model/object_model.rs
//! Central arena for all finalized types and abstract members.
//!
//! The model is mutated only while a type builder publishes into it;
//! afterwards every lookup is `&self` and the stored definitions are never
//! touched again, so a finalized model may be read from any number of
//! threads.

use rustc_hash::FxHashMap;

use crate::identity::{Interner, MemberId, Symbol, TypeDefId};
use crate::model::builder::{ClassBuilder, InterfaceBuilder};
use crate::model::defs::{MemberDef, TypeDef};

/// The object model: every type and abstract member ever finalized
#[derive(Debug)]
pub struct ObjectModel {
    pub(crate) interner: Interner,
    pub(crate) type_defs: Vec<TypeDef>,
    pub(crate) member_defs: Vec<MemberDef>,
    pub(crate) type_by_name: FxHashMap<Symbol, TypeDefId>,
}

impl ObjectModel {
    pub fn new() -> Self {
        Self {
            interner: Interner::new(),
            type_defs: Vec::new(),
            member_defs: Vec::new(),
            type_by_name: FxHashMap::default(),
        }
    }

    /// Start building an interface type
    pub fn interface(&mut self, name: &str) -> InterfaceBuilder<'_> {
        InterfaceBuilder::new(self, name)
    }

    /// Start building a class type
    pub fn class(&mut self, name: &str) -> ClassBuilder<'_> {
        ClassBuilder::new(self, name)
    }

    /// Get a type definition by ID
    pub fn type_def(&self, id: TypeDefId) -> &TypeDef {
        &self.type_defs[id.index() as usize]
    }

    /// Get an abstract member definition by ID
    pub fn member_def(&self, id: MemberId) -> &MemberDef {
        &self.member_defs[id.index() as usize]
    }

    /// Look up a type by name
    pub fn type_by_name(&self, name: &str) -> Option<TypeDefId> {
        let sym = self.interner.lookup(name)?;
        self.type_by_name.get(&sym).copied()
    }

    pub fn type_name(&self, id: TypeDefId) -> &str {
        self.interner.resolve(self.type_def(id).name)
    }

    pub fn member_name(&self, id: MemberId) -> &str {
        self.interner.resolve(self.member_def(id).name)
    }

    /// Qualified "Interface::member" form, used in diagnostics
    pub fn qualified_member_name(&self, id: MemberId) -> String {
        let member = self.member_def(id);
        format!("{}::{}", self.type_name(member.declaring), self.member_name(id))
    }

    /// Resolve an abstract member of `interface` by name, including members
    /// inherited from its base interfaces
    pub fn abstract_member(&self, interface: TypeDefId, name: &str) -> Option<MemberId> {
        let sym = self.interner.lookup(name)?;
        self.type_def(interface).abstract_names.get(&sym).copied()
    }

    /// Whether `ty` is `interface` or declares it as a (transitive) base
    pub fn is_subtype(&self, ty: TypeDefId, interface: TypeDefId) -> bool {
        self.type_def(ty).descends_from(interface)
    }

    pub(crate) fn symbol(&self, name: &str) -> Option<Symbol> {
        self.interner.lookup(name)
    }
}

impl Default for ObjectModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::defs::TypeDefKind;

    #[test]
    fn register_and_lookup_type() {
        let mut model = ObjectModel::new();
        let id = model.interface("IFoo").build().unwrap();

        assert_eq!(model.type_by_name("IFoo"), Some(id));
        assert_eq!(model.type_name(id), "IFoo");
        assert_eq!(model.type_def(id).kind, TypeDefKind::Interface);
        assert_eq!(model.type_by_name("IBar"), None);
    }

    #[test]
    fn abstract_member_resolves_own_and_inherited() {
        let mut model = ObjectModel::new();
        let base = model.interface("IBase").abstract_method("m").build().unwrap();
        let sub = model.interface("ISub").extends(base).abstract_method("extra").build().unwrap();

        let m = model.abstract_member(base, "m").unwrap();
        assert_eq!(model.abstract_member(sub, "m"), Some(m));
        assert!(model.abstract_member(sub, "extra").is_some());
        assert_eq!(model.abstract_member(base, "extra"), None);
        assert_eq!(model.qualified_member_name(m), "IBase::m");
    }

    #[test]
    fn subtype_follows_declared_bases_only() {
        let mut model = ObjectModel::new();
        let a = model.interface("IA").build().unwrap();
        let b = model.interface("IB").build().unwrap();
        let c = model.class("C").extends(a).build().unwrap();

        assert!(model.is_subtype(c, a));
        assert!(model.is_subtype(c, c));
        assert!(!model.is_subtype(c, b));
    }
}
