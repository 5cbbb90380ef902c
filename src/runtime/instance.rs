// src/runtime/instance.rs
//! Instances of finalized types and ordinary attribute lookup.

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

use crate::errors::RuntimeError;
use crate::identity::TypeDefId;
use crate::model::defs::NamespaceEntry;
use crate::model::object_model::ObjectModel;
use crate::runtime::value::{BoundMethod, Value};

pub type InstanceRef = Arc<Instance>;

/// One instance of a class type.
///
/// Fields are per-instance attributes set at runtime; everything else
/// resolves through the type's namespace. The field map sits behind an
/// RwLock so instances may be shared across threads.
#[derive(Debug)]
pub struct Instance {
    ty: TypeDefId,
    fields: RwLock<FxHashMap<String, Value>>,
}

impl Instance {
    fn new(ty: TypeDefId) -> InstanceRef {
        Arc::new(Self {
            ty,
            fields: RwLock::new(FxHashMap::default()),
        })
    }

    pub fn type_id(&self) -> TypeDefId {
        self.ty
    }

    /// Set a per-instance attribute
    pub fn set(&self, name: &str, value: Value) {
        self.fields.write().unwrap().insert(name.to_string(), value);
    }

    /// Read a per-instance attribute, without consulting the type namespace
    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.read().unwrap().get(name).cloned()
    }
}

impl ObjectModel {
    /// Create an instance of a finalized class type.
    ///
    /// Interface types are refused outright, and so is any type whose
    /// outstanding abstract-member set is non-empty: such a type exists but
    /// cannot be instantiated until a subtype satisfies the remainder.
    pub fn instantiate(&self, ty: TypeDefId) -> Result<InstanceRef, RuntimeError> {
        let def = self.type_def(ty);
        if def.is_interface() {
            return Err(RuntimeError::InterfaceInstantiation {
                interface: self.type_name(ty).to_string(),
            });
        }
        if !def.outstanding.is_empty() {
            return Err(RuntimeError::AbstractInstantiation {
                ty: self.type_name(ty).to_string(),
                missing: def.outstanding.join(", "),
            });
        }

        tracing::trace!(ty = %self.type_name(ty), "instantiate");
        Ok(Instance::new(ty))
    }

    /// Ordinary attribute access: instance fields first, then the type's
    /// ancestry namespaces in linearization order, binding methods to the
    /// receiver
    pub fn attr(&self, instance: &InstanceRef, name: &str) -> Result<Value, RuntimeError> {
        if let Some(value) = instance.field(name) {
            return Ok(value);
        }
        if let Some(entry) = self.namespace_lookup(instance.type_id(), name) {
            return Ok(self.bind_entry(entry, instance));
        }
        Err(RuntimeError::UnknownAttribute {
            ty: self.type_name(instance.type_id()).to_string(),
            attribute: name.to_string(),
        })
    }

    /// Walk a type's ancestry for an ordinary namespace entry; first hit
    /// wins
    pub(crate) fn namespace_lookup(&self, ty: TypeDefId, name: &str) -> Option<&NamespaceEntry> {
        let sym = self.symbol(name)?;
        self.type_def(ty)
            .ancestry
            .iter()
            .find_map(|&ancestor| self.type_def(ancestor).namespace.get(&sym))
    }

    fn bind_entry(&self, entry: &NamespaceEntry, instance: &InstanceRef) -> Value {
        match entry {
            NamespaceEntry::Method(body) => Value::Method(BoundMethod {
                body: body.clone(),
                receiver: instance.clone(),
            }),
            NamespaceEntry::Static(body) => Value::Function(body.clone()),
        }
    }
}
