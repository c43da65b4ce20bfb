//! Runtime values crossing the native boundary.
//!
//! Heap payloads are behind `Arc` so values clone cheaply when they are
//! copied into argument lists. Structs and connectors are shared by
//! reference: an attached function receives the same struct the caller
//! holds and may mutate it in place.

mod json;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tala_ir::{Name, Ty, TypeRef};

pub use json::JsonValue;

/// The error value carried in the last slot of fallible results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorValue {
    pub message: String,
}

impl ErrorValue {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorValue {
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Field storage of a struct or connector instance.
#[derive(Clone, Debug, PartialEq)]
pub struct StructValue {
    ty: TypeRef,
    fields: BTreeMap<Name, Value>,
}

impl StructValue {
    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    pub fn field(&self, name: Name) -> Option<&Value> {
        self.fields.get(&name)
    }

    /// Set a field, returning its previous value.
    pub fn set_field(&mut self, name: Name, value: Value) -> Option<Value> {
        self.fields.insert(name, value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (Name, &Value)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }
}

/// Shared handle to a struct instance.
///
/// Clones alias the same instance. Equality is identity.
#[derive(Clone)]
pub struct StructRef(Arc<RwLock<StructValue>>);

impl StructRef {
    pub fn new(ty: TypeRef) -> Self {
        StructRef(Arc::new(RwLock::new(StructValue {
            ty,
            fields: BTreeMap::new(),
        })))
    }

    /// The nominal type of the instance.
    pub fn ty(&self) -> TypeRef {
        self.0.read().ty
    }

    #[inline]
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, StructValue> {
        self.0.read()
    }

    #[inline]
    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, StructValue> {
        self.0.write()
    }

    /// Check whether two handles refer to the same instance.
    pub fn ptr_eq(&self, other: &StructRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for StructRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for StructRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StructRef").field(&*self.0.read()).finish()
    }
}

/// A runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Boolean(bool),
    Str(Arc<str>),
    Blob(Arc<[u8]>),
    Json(Arc<JsonValue>),
    /// String-keyed map; values are `any`.
    Map(Arc<BTreeMap<String, Value>>),
    /// Homogeneous array tagged with its element type.
    Array { element: Ty, items: Arc<Vec<Value>> },
    Struct(StructRef),
    Connector(StructRef),
    Nil,
    Error(Arc<ErrorValue>),
}

impl Value {
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn blob(bytes: impl Into<Arc<[u8]>>) -> Self {
        Value::Blob(bytes.into())
    }

    pub fn json(json: JsonValue) -> Self {
        Value::Json(Arc::new(json))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(Arc::new(ErrorValue::new(message)))
    }

    pub fn array(element: Ty, items: Vec<Value>) -> Self {
        Value::Array {
            element,
            items: Arc::new(items),
        }
    }

    pub fn map(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(Arc::new(entries))
    }

    /// The default value of `ty`.
    ///
    /// Fills the value slot of a failed unsafe conversion.
    pub fn zero(ty: &Ty) -> Value {
        match ty {
            Ty::Int => Value::Int(0),
            Ty::Float => Value::Float(0.0),
            Ty::Boolean => Value::Boolean(false),
            Ty::String => Value::string(""),
            Ty::Blob => Value::blob(Vec::<u8>::new()),
            Ty::Json => Value::json(JsonValue::Null),
            Ty::Map => Value::map(BTreeMap::new()),
            Ty::Array(element) => Value::array((**element).clone(), Vec::new()),
            Ty::Xml | Ty::Any | Ty::Nil | Ty::Error | Ty::Struct(_) | Ty::Connector(_) => {
                Value::Nil
            }
        }
    }

    /// The runtime type of this value.
    pub fn ty(&self) -> Ty {
        match self {
            Value::Int(_) => Ty::Int,
            Value::Float(_) => Ty::Float,
            Value::Boolean(_) => Ty::Boolean,
            Value::Str(_) => Ty::String,
            Value::Blob(_) => Ty::Blob,
            Value::Json(_) => Ty::Json,
            Value::Map(_) => Ty::Map,
            Value::Array { element, .. } => Ty::array_of(element.clone()),
            Value::Struct(s) => Ty::Struct(s.ty()),
            Value::Connector(c) => Ty::Connector(c.ty()),
            Value::Nil => Ty::Nil,
            Value::Error(_) => Ty::Error,
        }
    }

    /// Check whether this value may occupy a slot declared as `declared`.
    ///
    /// `any` accepts everything. An error slot also accepts `nil`, which
    /// marks the absence of an error.
    pub fn conforms_to(&self, declared: &Ty) -> bool {
        match declared {
            Ty::Any => true,
            Ty::Error => matches!(self, Value::Error(_) | Value::Nil),
            _ => self.ty() == *declared,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}
