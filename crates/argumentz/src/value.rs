//! Resolved parameter values.

use serde::{Serialize, Serializer};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A value produced by a parameter resolver.
///
/// Built-in resolvers produce `Str`, `Int` and `Bool`. Anything else a caller
/// maps raw input into is carried as `Custom` and recovered with
/// [`crate::Match::get_as`].
#[derive(Debug, Clone)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    Custom(Custom),
}

impl Value {
    /// Wrap a caller-defined type.
    pub fn custom<T>(value: T) -> Self
    where
        T: Any + fmt::Display + fmt::Debug + Send + Sync,
    {
        Self::Custom(Custom {
            payload: Arc::new(value),
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Checked extraction of the inner value as `T`.
    ///
    /// `Str` is reachable as `String`, `Int` as `i64`, `Bool` as `bool` and
    /// `Custom` as the exact type it was created from.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = match self {
            Self::Str(s) => s as &dyn Any,
            Self::Int(i) => i as &dyn Any,
            Self::Bool(b) => b as &dyn Any,
            Self::Custom(c) => {
                let payload: &dyn CustomPayload = &*c.payload;
                payload.as_any()
            }
        };
        any.downcast_ref::<T>()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Custom(c) => write!(f, "{}", c.payload),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(&a.payload, &b.payload),
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Custom(c) => serializer.collect_str(&c.payload),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Shared payload of a [`Value::Custom`].
#[derive(Clone)]
pub struct Custom {
    payload: Arc<dyn CustomPayload>,
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.payload, f)
    }
}

trait CustomPayload: Any + fmt::Display + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T> CustomPayload for T
where
    T: Any + fmt::Display + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Conversion of a mapper's output into a [`Value`].
///
/// Caller-defined types implement this by delegating to [`Value::custom`].
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

// Narrower integers widen to `Int`; read them back with `get_int` as `i64`.
macro_rules! widen_into_int {
    ($($ty:ty),*) => {
        $(
            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::Int(i64::from(self))
                }
            }
        )*
    };
}

widen_into_int!(i8, i16, i32, u8, u16, u32);

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}
