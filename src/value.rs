use std::fmt::Write;

use smol_str::SmolStr;

use crate::{
    error::Result,
    writer::{FormatContext, FormatWriter},
};

/// A literal value that can appear in a statement or be bound to a placeholder.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(SmolStr),
}

impl Value {
    pub fn text<T>(value: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

// floats compare by bits so a NaN value equals itself
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident as $wide:ty: $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(<$wide>::from(value))
                }
            }
        )+
    };
}

impl_from_int!(Int as i64: i8, i16, i32, i64);
impl_from_int!(UInt as u64: u8, u16, u32, u64);

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

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(SmolStr::new(value))
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(SmolStr::new(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(SmolStr::from(value))
    }
}

impl From<SmolStr> for Value {
    fn from(value: SmolStr) -> Self {
        Value::Text(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Text(smol_str::format_smolstr!("{}", value))
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(feature = "uuid")]
impl From<uuid::Uuid> for Value {
    fn from(value: uuid::Uuid) -> Self {
        Value::Text(smol_str::format_smolstr!("{}", value.hyphenated()))
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for Value {
    fn from(value: chrono::NaiveDate) -> Self {
        Value::Text(smol_str::format_smolstr!("{}", value.format("%Y-%m-%d")))
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDateTime> for Value {
    fn from(value: chrono::NaiveDateTime) -> Self {
        Value::Text(smol_str::format_smolstr!(
            "{}",
            value.format("%Y-%m-%d %H:%M:%S%.f")
        ))
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Utc>> for Value {
    fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
        Value::Text(SmolStr::from(value.to_rfc3339()))
    }
}

// arrays and objects have no literal form, keep their json text
#[cfg(feature = "json")]
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(SmolStr::from(s)),
            other => Value::Text(SmolStr::from(other.to_string())),
        }
    }
}

impl FormatWriter for Value {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        match self {
            Value::Null => context.writer.write_str("NULL")?,
            Value::Bool(true) => context.writer.write_str("TRUE")?,
            Value::Bool(false) => context.writer.write_str("FALSE")?,
            Value::Int(value) => write!(context.writer, "{}", value)?,
            Value::UInt(value) => write!(context.writer, "{}", value)?,
            Value::Float(value) if value.is_nan() => context.write_string("NaN")?,
            Value::Float(value) if value.is_infinite() => {
                let text = if value.is_sign_positive() {
                    "Infinity"
                } else {
                    "-Infinity"
                };
                context.write_string(text)?
            }
            // debug keeps the decimal point on whole numbers
            Value::Float(value) => write!(context.writer, "{:?}", value)?,
            Value::Text(value) => context.write_string(value)?,
        }
        Ok(())
    }
}
