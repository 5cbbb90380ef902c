// src/model/builder.rs
//! Two-phase construction of interfaces and classes.
//!
//! Builders collect declarations, ordinary methods, and explicit
//! implementation markers into a mutable draft; `build` runs the
//! construction pipeline (collect base requirements, merge base registries,
//! consume markers, detect collisions, finalize the outstanding set) and
//! publishes one immutable `TypeDef` into the model. A failed build
//! publishes nothing; a published type is never mutated.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::errors::DefineError;
use crate::identity::{MemberId, TypeDefId};
use crate::model::defs::{MemberDef, NamespaceEntry, TypeDef, TypeDefKind};
use crate::model::object_model::ObjectModel;
use crate::model::registry::{ImplEntry, ImplRegistry};
use crate::runtime::value::{NativeFn, StaticFn};

/// Explicit-implementation marker: pairs the targeted abstract member with
/// the callable that satisfies it. Produced by [`implements`], consumed
/// exactly once by `build`, and otherwise inert.
#[derive(Debug, Clone)]
pub struct ImplementationEntry {
    pub(crate) target: MemberId,
    pub(crate) body: NativeFn,
}

/// Mark `body` as the explicit implementation of `target`
pub fn implements(target: MemberId, body: NativeFn) -> ImplementationEntry {
    ImplementationEntry { target, body }
}

#[derive(Debug)]
enum BodyEntry {
    Method { name: String, body: NativeFn },
    Static { name: String, body: StaticFn },
    Implement { name: String, marker: ImplementationEntry },
}

#[derive(Debug)]
struct TypeDraft {
    name: String,
    kind: TypeDefKind,
    extends: Vec<TypeDefId>,
    abstracts: Vec<String>,
    body: Vec<BodyEntry>,
    concrete: bool,
}

impl TypeDraft {
    fn new(name: &str, kind: TypeDefKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            extends: Vec::new(),
            abstracts: Vec::new(),
            body: Vec::new(),
            concrete: false,
        }
    }
}

/// Builder for an interface type
#[derive(Debug)]
pub struct InterfaceBuilder<'m> {
    model: &'m mut ObjectModel,
    draft: TypeDraft,
}

impl<'m> InterfaceBuilder<'m> {
    pub(crate) fn new(model: &'m mut ObjectModel, name: &str) -> Self {
        Self {
            model,
            draft: TypeDraft::new(name, TypeDefKind::Interface),
        }
    }

    /// Add a base interface
    pub fn extends(mut self, base: TypeDefId) -> Self {
        self.draft.extends.push(base);
        self
    }

    /// Declare a new abstract member. The declaring interface of the
    /// resulting identity is the interface being built.
    pub fn abstract_method(mut self, name: &str) -> Self {
        self.draft.abstracts.push(name.to_string());
        self
    }

    /// Add a default (concrete) method
    pub fn method(mut self, name: &str, body: NativeFn) -> Self {
        self.draft.body.push(BodyEntry::Method {
            name: name.to_string(),
            body,
        });
        self
    }

    /// Add a static method
    pub fn static_method(mut self, name: &str, body: StaticFn) -> Self {
        self.draft.body.push(BodyEntry::Static {
            name: name.to_string(),
            body,
        });
        self
    }

    /// Attach an explicit implementation of an inherited abstract member.
    /// `name` is the marker's source name; it never enters the namespace.
    pub fn implement(mut self, name: &str, marker: ImplementationEntry) -> Self {
        self.draft.body.push(BodyEntry::Implement {
            name: name.to_string(),
            marker,
        });
        self
    }

    pub fn build(self) -> Result<TypeDefId, DefineError> {
        self.model.finalize(self.draft)
    }
}

/// Builder for a class type
#[derive(Debug)]
pub struct ClassBuilder<'m> {
    model: &'m mut ObjectModel,
    draft: TypeDraft,
}

impl<'m> ClassBuilder<'m> {
    pub(crate) fn new(model: &'m mut ObjectModel, name: &str) -> Self {
        Self {
            model,
            draft: TypeDraft::new(name, TypeDefKind::Class),
        }
    }

    /// Add a base type (interface or class)
    pub fn extends(mut self, base: TypeDefId) -> Self {
        self.draft.extends.push(base);
        self
    }

    /// Add an ordinary method
    pub fn method(mut self, name: &str, body: NativeFn) -> Self {
        self.draft.body.push(BodyEntry::Method {
            name: name.to_string(),
            body,
        });
        self
    }

    /// Add a static method
    pub fn static_method(mut self, name: &str, body: StaticFn) -> Self {
        self.draft.body.push(BodyEntry::Static {
            name: name.to_string(),
            body,
        });
        self
    }

    /// Attach an explicit implementation of an inherited abstract member.
    /// `name` is the marker's source name; it never enters the namespace.
    pub fn implement(mut self, name: &str, marker: ImplementationEntry) -> Self {
        self.draft.body.push(BodyEntry::Implement {
            name: name.to_string(),
            marker,
        });
        self
    }

    /// Require the type to leave no abstract member unsatisfied
    pub fn concrete(mut self) -> Self {
        self.draft.concrete = true;
        self
    }

    pub fn build(self) -> Result<TypeDefId, DefineError> {
        self.model.finalize(self.draft)
    }
}

impl ObjectModel {
    /// Run the construction pipeline for one draft and publish the result.
    ///
    /// Pipeline: collect base requirements -> merge base registries ->
    /// consume own markers -> detect collisions -> finalize the
    /// outstanding set.
    /// Nothing is pushed into the arenas until every check has passed.
    fn finalize(&mut self, draft: TypeDraft) -> Result<TypeDefId, DefineError> {
        if draft.kind == TypeDefKind::Interface {
            for &base in &draft.extends {
                if !self.type_def(base).is_interface() {
                    return Err(DefineError::InvalidBase {
                        ty: draft.name.clone(),
                        base: self.type_name(base).to_string(),
                    });
                }
            }
        }

        // The new type's ID is reserved before its members are minted so
        // each member's declaring interface can reference it.
        let id = TypeDefId::new(self.type_defs.len() as u32);
        let ancestry = self.linearize(id, &draft.extends);

        // collect base requirements
        let mut required: FxHashSet<MemberId> = FxHashSet::default();
        for &base in &draft.extends {
            required.extend(&self.type_def(base).required);
        }

        let mut new_members: Vec<MemberDef> = Vec::new();
        let mut declares: Vec<MemberId> = Vec::new();
        for name in &draft.abstracts {
            let member_id = MemberId::new((self.member_defs.len() + new_members.len()) as u32);
            new_members.push(MemberDef {
                id: member_id,
                name: self.interner.intern(name),
                declaring: id,
            });
            declares.push(member_id);
            required.insert(member_id);
        }

        // merge base registries
        let mut registry = ImplRegistry::new();
        let mut collisions: FxHashMap<MemberId, Vec<String>> = FxHashMap::default();
        for &base in &draft.extends {
            let base_def = self.type_def(base);
            registry.merge_base(&base_def.registry, &mut collisions);
            if base_def.is_interface() && !base_def.required.is_empty() {
                registry.ensure_interface(base);
            }
        }

        // A member counts as satisfied only when its declaring interface
        // maps it un-conflicted; collision-flagged members stay outstanding
        // until the body overwrites them.
        let mut outstanding: FxHashSet<MemberId> = required
            .iter()
            .copied()
            .filter(|&member| {
                let declaring = self.declaring_of(member, &new_members);
                registry.get(declaring, member).is_none() || collisions.contains_key(&member)
            })
            .collect();

        // consume own markers
        let mut namespace: FxHashMap<_, NamespaceEntry> = FxHashMap::default();
        let mut satisfied_here: FxHashMap<MemberId, String> = FxHashMap::default();
        for entry in &draft.body {
            match entry {
                BodyEntry::Method { name, body } => {
                    namespace.insert(self.interner.intern(name), NamespaceEntry::Method(body.clone()));
                }
                BodyEntry::Static { name, body } => {
                    namespace.insert(self.interner.intern(name), NamespaceEntry::Static(body.clone()));
                }
                BodyEntry::Implement { name, marker } => {
                    let target = marker.target;
                    if !outstanding.contains(&target) {
                        if let Some(first) = satisfied_here.get(&target) {
                            let member_name = self.member_name_local(target, &new_members);
                            return Err(DefineError::ConflictingOverride {
                                ty: draft.name.clone(),
                                members: format!(
                                    "'{}' ({}::{}, {}::{})",
                                    member_name, draft.name, first, draft.name, name
                                ),
                            });
                        }
                        return Err(DefineError::UnknownTarget {
                            ty: draft.name.clone(),
                            method: name.clone(),
                            target: self.qualified_member_name(target),
                        });
                    }

                    let declaring = self.declaring_of(target, &new_members);
                    registry.insert(
                        declaring,
                        target,
                        ImplEntry {
                            body: marker.body.clone(),
                            source: format!("{}::{}", draft.name, name),
                        },
                    );
                    outstanding.remove(&target);
                    collisions.remove(&target);
                    satisfied_here.insert(target, name.clone());
                }
            }
        }

        // detect collisions
        if !collisions.is_empty() {
            let mut conflicts: Vec<String> = collisions
                .iter()
                .map(|(member, sources)| {
                    format!(
                        "'{}' ({})",
                        self.member_name_local(*member, &new_members),
                        sources.join(", ")
                    )
                })
                .collect();
            conflicts.sort();
            return Err(DefineError::ConflictingOverride {
                ty: draft.name,
                members: conflicts.join("; "),
            });
        }

        // finalize the outstanding set
        let mut outstanding_names: Vec<String> = outstanding
            .iter()
            .map(|&member| self.member_name_local(member, &new_members).to_string())
            .collect();
        outstanding_names.sort();

        if draft.concrete && !outstanding_names.is_empty() {
            return Err(DefineError::IncompleteConcrete {
                ty: draft.name,
                missing: outstanding_names.join(", "),
            });
        }

        let abstract_names = self.abstract_name_table(&ancestry, &new_members);

        tracing::debug!(
            ty = %draft.name,
            kind = ?draft.kind,
            required = required.len(),
            outstanding = outstanding_names.len(),
            "type finalized"
        );

        let name = self.interner.intern(&draft.name);
        self.member_defs.extend(new_members);
        self.type_defs.push(TypeDef {
            id,
            name,
            kind: draft.kind,
            extends: draft.extends,
            ancestry,
            declares,
            required,
            abstract_names,
            namespace,
            registry,
            outstanding: outstanding_names,
        });
        self.type_by_name.insert(name, id);
        Ok(id)
    }

    /// Self-first linearization: declared-order depth-first over the bases'
    /// ancestries, first occurrence wins
    fn linearize(&self, self_id: TypeDefId, extends: &[TypeDefId]) -> Vec<TypeDefId> {
        let mut out = vec![self_id];
        for &base in extends {
            for &ancestor in &self.type_def(base).ancestry {
                if !out.contains(&ancestor) {
                    out.push(ancestor);
                }
            }
        }
        out
    }

    /// Name -> identity table over the whole ancestry; the first declaring
    /// type in ancestry order wins a name. Computed once per type and
    /// cached on the TypeDef for view resolution.
    fn abstract_name_table(
        &self,
        ancestry: &[TypeDefId],
        new_members: &[MemberDef],
    ) -> FxHashMap<crate::identity::Symbol, MemberId> {
        let mut table = FxHashMap::default();
        for member in new_members {
            table.entry(member.name).or_insert(member.id);
        }
        for &ancestor in &ancestry[1..] {
            for &member_id in &self.type_def(ancestor).declares {
                let member = self.member_def(member_id);
                table.entry(member.name).or_insert(member_id);
            }
        }
        table
    }

    /// Declaring interface of a member that may not be published yet
    fn declaring_of(&self, member: MemberId, new_members: &[MemberDef]) -> TypeDefId {
        let arena_len = self.member_defs.len();
        if (member.index() as usize) < arena_len {
            self.member_def(member).declaring
        } else {
            new_members[member.index() as usize - arena_len].declaring
        }
    }

    fn member_name_local<'a>(&'a self, member: MemberId, new_members: &'a [MemberDef]) -> &'a str {
        let arena_len = self.member_defs.len();
        let sym = if (member.index() as usize) < arena_len {
            self.member_def(member).name
        } else {
            new_members[member.index() as usize - arena_len].name
        };
        self.interner.resolve(sym)
    }
}
