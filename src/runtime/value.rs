// src/runtime/value.rs
//! Dynamic values and callable handles.

use std::fmt;
use std::sync::Arc;

use crate::errors::RuntimeError;
use crate::model::ObjectModel;
use crate::runtime::instance::InstanceRef;

type MethodBody =
    dyn Fn(&ObjectModel, &InstanceRef, &[Value]) -> Result<Value, RuntimeError> + Send + Sync;

/// Shared handle to a native method body.
///
/// The handle is the unit of callable identity: clones of one handle are
/// the same implementation, independently created handles are different
/// implementations even when behaviorally identical.
#[derive(Clone)]
pub struct NativeFn(Arc<MethodBody>);

impl NativeFn {
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&ObjectModel, &InstanceRef, &[Value]) -> Result<Value, RuntimeError>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(body))
    }

    pub fn call(
        &self,
        model: &ObjectModel,
        receiver: &InstanceRef,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        (self.0)(model, receiver, args)
    }

    /// Whether two handles refer to the same implementation
    pub fn same(a: &NativeFn, b: &NativeFn) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn")
            .field("ptr", &Arc::as_ptr(&self.0))
            .finish()
    }
}

type StaticBody = dyn Fn(&ObjectModel, &[Value]) -> Result<Value, RuntimeError> + Send + Sync;

/// Shared handle to a receiver-less (static) method body
#[derive(Clone)]
pub struct StaticFn(Arc<StaticBody>);

impl StaticFn {
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&ObjectModel, &[Value]) -> Result<Value, RuntimeError> + Send + Sync + 'static,
    {
        Self(Arc::new(body))
    }

    pub fn call(&self, model: &ObjectModel, args: &[Value]) -> Result<Value, RuntimeError> {
        (self.0)(model, args)
    }
}

impl fmt::Debug for StaticFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticFn")
            .field("ptr", &Arc::as_ptr(&self.0))
            .finish()
    }
}

/// A method bound to its receiver instance
#[derive(Debug, Clone)]
pub struct BoundMethod {
    pub body: NativeFn,
    pub receiver: InstanceRef,
}

/// A dynamic value in the object model
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Instance(InstanceRef),
    /// A method bound to its receiver
    Method(BoundMethod),
    /// An unbound (static) function
    Function(StaticFn),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Instance(_) => "instance",
            Value::Method(_) => "method",
            Value::Function(_) => "function",
        }
    }

    /// Invoke a callable value
    pub fn call(&self, model: &ObjectModel, args: &[Value]) -> Result<Value, RuntimeError> {
        match self {
            Value::Method(method) => method.body.call(model, &method.receiver, args),
            Value::Function(func) => func.call(model, args),
            other => Err(RuntimeError::NotCallable {
                found: other.type_name().to_string(),
            }),
        }
    }

    pub fn as_int(&self) -> Result<i64, RuntimeError> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(type_mismatch("int", other)),
        }
    }

    pub fn as_bool(&self) -> Result<bool, RuntimeError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(type_mismatch("bool", other)),
        }
    }

    pub fn as_float(&self) -> Result<f64, RuntimeError> {
        match self {
            Value::Float(x) => Ok(*x),
            other => Err(type_mismatch("float", other)),
        }
    }

    pub fn as_str(&self) -> Result<&str, RuntimeError> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(type_mismatch("string", other)),
        }
    }
}

fn type_mismatch(expected: &str, found: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch {
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
}
