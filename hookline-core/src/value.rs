//! Dynamically typed argument values and the parameter types that accept them.

use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc,
};

/// A single argument passed to a function.
///
/// Arguments are dynamically typed so that one function definition can carry
/// executors authored independently of each other. Host-specific types travel
/// as [`Value::Opaque`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value. Only [`ParamType::Any`] accepts it.
    Null,
    /// A boolean.
    Bool(bool),
    /// Any integer. Every Rust integer width up to `i64` converts into this.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered sequence of values.
    List(Vec<Value>),
    /// A shared host value of an arbitrary Rust type.
    Opaque(Opaque),
}

impl Value {
    /// Wrap an arbitrary host value.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::Opaque(Opaque::new(value))
    }

    /// Short name of the runtime type, used in mismatch reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Opaque(opaque) => opaque.type_name(),
        }
    }

    /// Returns `true` for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats, and integers widened to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the string slice if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the host value if this is an [`Value::Opaque`] holding a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Opaque(opaque) => opaque.downcast_ref(),
            _ => None,
        }
    }
}

/// A type-erased, reference-counted host value.
///
/// Cloning is O(1). Two opaque values are equal only if they share the same
/// allocation.
#[derive(Clone)]
pub struct Opaque {
    type_id: TypeId,
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    /// Wrap a value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            inner: Arc::new(value),
        }
    }

    /// The [`TypeId`] of the wrapped value.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The Rust type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the wrapped value as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Opaque").field(&self.type_name).finish()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

// Conversions

macro_rules! impl_from_int {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<Opaque> for Value {
    fn from(value: Opaque) -> Self {
        Value::Opaque(value)
    }
}

/// The declared type of one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// Accepts every value, `Null` included.
    Any,
    /// Accepts [`Value::Bool`].
    Bool,
    /// Accepts [`Value::Int`].
    Int,
    /// Accepts [`Value::Float`] and, widened, [`Value::Int`].
    Float,
    /// Accepts [`Value::Str`].
    Str,
    /// Accepts a [`Value::List`] whose every element the inner type accepts.
    List(Box<ParamType>),
    /// Accepts [`Value::Opaque`] values holding exactly one Rust type.
    Opaque {
        /// Identity of the accepted type.
        id: TypeId,
        /// Rust type name, for reports.
        name: &'static str,
    },
}

impl ParamType {
    /// A list parameter with the given element type.
    pub fn list(element: ParamType) -> Self {
        ParamType::List(Box::new(element))
    }

    /// An opaque parameter accepting host values of type `T`.
    pub fn opaque<T: Any>() -> Self {
        ParamType::Opaque {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Whether `value` is assignable to this parameter type.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ParamType::Any, _) => true,
            (ParamType::Bool, Value::Bool(_)) => true,
            (ParamType::Int, Value::Int(_)) => true,
            (ParamType::Float, Value::Float(_) | Value::Int(_)) => true,
            (ParamType::Str, Value::Str(_)) => true,
            (ParamType::List(element), Value::List(items)) => {
                items.iter().all(|item| element.accepts(item))
            }
            (ParamType::Opaque { id, .. }, Value::Opaque(opaque)) => opaque.type_id() == *id,
            _ => false,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Any => f.write_str("any"),
            ParamType::Bool => f.write_str("bool"),
            ParamType::Int => f.write_str("int"),
            ParamType::Float => f.write_str("float"),
            ParamType::Str => f.write_str("str"),
            ParamType::List(element) => write!(f, "list<{element}>"),
            ParamType::Opaque { name, .. } => f.write_str(name),
        }
    }
}
