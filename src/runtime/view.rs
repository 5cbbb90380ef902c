// src/runtime/view.rs
//! Interface casting and the per-cast view adapter.
//!
//! A view narrows an instance to one interface: abstract members resolve
//! strictly through the type's implementation registry, keyed by member
//! identity (tied to the declaring interface, not the casting interface),
//! and every other interface member falls through to ordinary attribute
//! lookup. Views are independent per-cast values; any number may coexist
//! over one instance.

use rustc_hash::FxHashMap;

use crate::errors::RuntimeError;
use crate::identity::{MemberId, TypeDefId};
use crate::model::object_model::ObjectModel;
use crate::model::registry::ImplEntry;
use crate::runtime::instance::InstanceRef;
use crate::runtime::value::{BoundMethod, Value};

/// A per-cast view of an instance under one interface's dispatch rules
#[derive(Debug)]
pub struct InterfaceView<'m> {
    model: &'m ObjectModel,
    instance: InstanceRef,
    interface: TypeDefId,
    /// The resolved identity -> implementation mapping for the instance's
    /// type; `None` marks the transparent (identity) cast of an interface
    /// with no required members
    mapping: Option<&'m FxHashMap<MemberId, ImplEntry>>,
}

impl ObjectModel {
    /// Cast an instance to one of its interfaces.
    ///
    /// The target must be an interface type the instance's type declares as
    /// a (transitive) base. An interface with no required members casts to
    /// a transparent view; otherwise the instance's type must carry a
    /// registry mapping for the target.
    pub fn cast<'m>(
        &'m self,
        instance: &InstanceRef,
        interface: TypeDefId,
    ) -> Result<InterfaceView<'m>, RuntimeError> {
        let target = self.type_def(interface);
        let ty = self.type_def(instance.type_id());
        if !target.is_interface() || !ty.descends_from(interface) {
            return Err(RuntimeError::InterfaceMismatch {
                ty: self.type_name(ty.id).to_string(),
                target: self.type_name(interface).to_string(),
            });
        }

        if target.required.is_empty() {
            tracing::trace!(
                ty = %self.type_name(ty.id),
                interface = %self.type_name(interface),
                "identity cast"
            );
            return Ok(InterfaceView {
                model: self,
                instance: instance.clone(),
                interface,
                mapping: None,
            });
        }

        let Some(mapping) = ty.registry.mapping(interface) else {
            return Err(RuntimeError::UnimplementedInterface {
                ty: self.type_name(ty.id).to_string(),
                interface: self.type_name(interface).to_string(),
            });
        };

        tracing::trace!(
            ty = %self.type_name(ty.id),
            interface = %self.type_name(interface),
            "cast"
        );
        Ok(InterfaceView {
            model: self,
            instance: instance.clone(),
            interface,
            mapping: Some(mapping),
        })
    }
}

impl InterfaceView<'_> {
    /// Resolve an interface member by name.
    ///
    /// Abstract members look up their identity in the bound mapping and
    /// bind to the underlying instance; a name the interface inherits whose
    /// implementation is registered only under a sibling branch fails here
    /// (the diamond-branch gap). Non-abstract interface members delegate to
    /// ordinary attribute access; names absent from the interface fail
    /// outright.
    pub fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        let Some(mapping) = self.mapping else {
            // Transparent view: indistinguishable from the instance itself
            return self.model.attr(&self.instance, name);
        };

        let target = self.model.type_def(self.interface);
        if let Some(sym) = self.model.symbol(name)
            && let Some(&member) = target.abstract_names.get(&sym)
        {
            return match mapping.get(&member) {
                Some(entry) => Ok(Value::Method(BoundMethod {
                    body: entry.body.clone(),
                    receiver: self.instance.clone(),
                })),
                None => Err(RuntimeError::MissingExplicitImplementation {
                    ty: self.model.type_name(self.instance.type_id()).to_string(),
                    interface: self.model.type_name(self.interface).to_string(),
                    member: name.to_string(),
                }),
            };
        }

        // Non-abstract members of the interface (defaults, statics) pass
        // through to the instance, so a concrete override wins over the
        // interface's default.
        if self.interface_declares(name) {
            return self.model.attr(&self.instance, name);
        }

        Err(RuntimeError::UnknownMember {
            interface: self.model.type_name(self.interface).to_string(),
            member: name.to_string(),
        })
    }

    /// Resolve a member and invoke it
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, RuntimeError> {
        self.get(name)?.call(self.model, args)
    }

    pub fn instance(&self) -> &InstanceRef {
        &self.instance
    }

    pub fn interface(&self) -> TypeDefId {
        self.interface
    }

    /// Whether the casting interface's own ancestry declares `name` as an
    /// ordinary (non-abstract) member
    fn interface_declares(&self, name: &str) -> bool {
        self.model.namespace_lookup(self.interface, name).is_some()
    }
}
