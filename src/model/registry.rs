// src/model/registry.rs
//! Per-type registry of explicit interface implementations.
//!
//! Each finalized type owns one registry: a mapping from ancestor interface
//! to a mapping from abstract-member identity to the callable that satisfies
//! it. Registries are built by merging all base registries and overlaying
//! the implementations consumed from the type's own body, then frozen.

use rustc_hash::FxHashMap;

use crate::identity::{MemberId, TypeDefId};
use crate::runtime::value::NativeFn;

/// One registered implementation
#[derive(Debug, Clone)]
pub struct ImplEntry {
    pub body: NativeFn,
    /// Qualified source of the implementation ("Type::method"), kept for
    /// conflict diagnostics
    pub source: String,
}

/// Implementations owned by one type, keyed by declaring interface
#[derive(Debug, Default, Clone)]
pub struct ImplRegistry {
    entries: FxHashMap<TypeDefId, FxHashMap<MemberId, ImplEntry>>,
}

impl ImplRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-create an (empty, if nothing merged) entry for an ancestor
    /// interface, so the registry records which ancestors participate even
    /// before any concrete mapping exists
    pub fn ensure_interface(&mut self, interface: TypeDefId) {
        self.entries.entry(interface).or_default();
    }

    /// Record an implementation under its declaring interface, overwriting
    /// any previously merged entry for the same member
    pub fn insert(&mut self, interface: TypeDefId, member: MemberId, entry: ImplEntry) {
        self.entries.entry(interface).or_default().insert(member, entry);
    }

    pub fn get(&self, interface: TypeDefId, member: MemberId) -> Option<&ImplEntry> {
        self.entries.get(&interface)?.get(&member)
    }

    /// The identity -> implementation mapping for one interface, if the
    /// interface participates in this registry
    pub fn mapping(&self, interface: TypeDefId) -> Option<&FxHashMap<MemberId, ImplEntry>> {
        self.entries.get(&interface)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = TypeDefId> + '_ {
        self.entries.keys().copied()
    }

    /// Merge a base type's registry into this one.
    ///
    /// A member that already has a pointer-distinct implementation merged
    /// from an earlier base is flagged in `collisions` rather than failing:
    /// collisions are only fatal if still unresolved after the new type's
    /// own body is processed. The same callable arriving through two paths
    /// of a diamond is not a collision. The first merged entry is kept so
    /// the flagged member still resolves if the body overwrites it.
    pub fn merge_base(
        &mut self,
        base: &ImplRegistry,
        collisions: &mut FxHashMap<MemberId, Vec<String>>,
    ) {
        for (&interface, mapping) in &base.entries {
            let merged = self.entries.entry(interface).or_default();
            for (&member, entry) in mapping {
                match merged.get(&member) {
                    Some(existing) if NativeFn::same(&existing.body, &entry.body) => {}
                    Some(existing) => {
                        let sources = collisions
                            .entry(member)
                            .or_insert_with(|| vec![existing.source.clone()]);
                        if !sources.contains(&entry.source) {
                            sources.push(entry.source.clone());
                        }
                    }
                    None => {
                        merged.insert(member, entry.clone());
                    }
                }
            }
        }
    }
}
