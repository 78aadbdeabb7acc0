use std::{
    any::{Any, TypeId, type_name},
    fmt,
};

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

/// The nine value kinds a column can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Text,
    Character,
    Byte,
    Short,
    Integer,
    Long,
    Boolean,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 9] = [
        PrimitiveKind::Text,
        PrimitiveKind::Character,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Integer,
        PrimitiveKind::Long,
        PrimitiveKind::Boolean,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Text => "text",
            PrimitiveKind::Character => "character",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Float => "single-float",
            PrimitiveKind::Double => "double-float",
        }
    }

    /// The Rust type storing values of this kind.
    fn storage_type_id(&self) -> TypeId {
        match self {
            PrimitiveKind::Text => TypeId::of::<String>(),
            PrimitiveKind::Character => TypeId::of::<char>(),
            PrimitiveKind::Byte => TypeId::of::<i8>(),
            PrimitiveKind::Short => TypeId::of::<i16>(),
            PrimitiveKind::Integer => TypeId::of::<i32>(),
            PrimitiveKind::Long => TypeId::of::<i64>(),
            PrimitiveKind::Boolean => TypeId::of::<bool>(),
            PrimitiveKind::Float => TypeId::of::<f32>(),
            PrimitiveKind::Double => TypeId::of::<f64>(),
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared storage type of a record field.
///
/// Only [`FieldType::Primitive`] fields can take part in a schema; anything else is
/// rejected when the schema is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Primitive(PrimitiveKind),
    Other(String),
}

impl FieldType {
    /// Resolves the field type of the Rust type `V`.
    ///
    /// ```
    /// use csv_serializer::core::value::{FieldType, PrimitiveKind};
    ///
    /// assert_eq!(FieldType::of::<i64>(), FieldType::Primitive(PrimitiveKind::Long));
    /// assert!(matches!(FieldType::of::<Vec<u8>>(), FieldType::Other(_)));
    /// ```
    pub fn of<V: Any>() -> FieldType {
        let id = TypeId::of::<V>();
        match PrimitiveKind::ALL.iter().find(|kind| kind.storage_type_id() == id) {
            Some(kind) => FieldType::Primitive(*kind),
            None => FieldType::Other(type_name::<V>().to_string()),
        }
    }

    pub fn name(&self) -> String {
        match self {
            FieldType::Primitive(kind) => kind.name().to_string(),
            FieldType::Other(name) => name.clone(),
        }
    }
}

impl From<PrimitiveKind> for FieldType {
    fn from(kind: PrimitiveKind) -> Self {
        FieldType::Primitive(kind)
    }
}

/// A field value travelling between a getter, the CSV text and a setter.
#[derive(Debug, Clone, PartialEq)]
pub enum CsvValue {
    Text(String),
    Character(char),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Boolean(bool),
    Float(f32),
    Double(f64),
}

impl CsvValue {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            CsvValue::Text(_) => PrimitiveKind::Text,
            CsvValue::Character(_) => PrimitiveKind::Character,
            CsvValue::Byte(_) => PrimitiveKind::Byte,
            CsvValue::Short(_) => PrimitiveKind::Short,
            CsvValue::Integer(_) => PrimitiveKind::Integer,
            CsvValue::Long(_) => PrimitiveKind::Long,
            CsvValue::Boolean(_) => PrimitiveKind::Boolean,
            CsvValue::Float(_) => PrimitiveKind::Float,
            CsvValue::Double(_) => PrimitiveKind::Double,
        }
    }

    /// Parses the text of a cell into a value of the given kind.
    ///
    /// - text is taken as is
    /// - character takes the first char, an empty cell gives `'\0'`
    /// - integer kinds accept base-10 literals in range, without surrounding whitespace
    /// - boolean is `true` when the text is `true` in any case, `false` otherwise
    /// - float kinds accept decimal and scientific literals
    ///
    /// # Examples
    ///
    /// ```
    /// use csv_serializer::core::value::{CsvValue, PrimitiveKind};
    ///
    /// assert_eq!(CsvValue::parse(PrimitiveKind::Integer, "123").unwrap(), CsvValue::Integer(123));
    /// assert_eq!(CsvValue::parse(PrimitiveKind::Boolean, "TRUE").unwrap(), CsvValue::Boolean(true));
    /// assert_eq!(CsvValue::parse(PrimitiveKind::Boolean, "yes").unwrap(), CsvValue::Boolean(false));
    /// assert!(CsvValue::parse(PrimitiveKind::Byte, "300").is_err());
    /// ```
    pub fn parse(kind: PrimitiveKind, text: &str) -> Result<CsvValue, ConversionError> {
        let invalid = |reason: String| ConversionError::InvalidLiteral {
            kind,
            value: text.to_string(),
            reason,
        };

        let value = match kind {
            PrimitiveKind::Text => CsvValue::Text(text.to_string()),
            PrimitiveKind::Character => CsvValue::Character(text.chars().next().unwrap_or('\0')),
            PrimitiveKind::Byte => CsvValue::Byte(text.parse().map_err(|e| invalid(format!("{e}")))?),
            PrimitiveKind::Short => {
                CsvValue::Short(text.parse().map_err(|e| invalid(format!("{e}")))?)
            }
            PrimitiveKind::Integer => {
                CsvValue::Integer(text.parse().map_err(|e| invalid(format!("{e}")))?)
            }
            PrimitiveKind::Long => CsvValue::Long(text.parse().map_err(|e| invalid(format!("{e}")))?),
            PrimitiveKind::Boolean => CsvValue::Boolean(text.eq_ignore_ascii_case("true")),
            PrimitiveKind::Float => {
                CsvValue::Float(text.trim().parse().map_err(|e| invalid(format!("{e}")))?)
            }
            PrimitiveKind::Double => {
                CsvValue::Double(text.trim().parse().map_err(|e| invalid(format!("{e}")))?)
            }
        };

        Ok(value)
    }
}

/// Writes the cell text of the value.
///
/// Floats use the shortest representation that reads back to the same value and always
/// carry a decimal point or an exponent, independently of any locale.
impl fmt::Display for CsvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvValue::Text(value) => f.write_str(value),
            CsvValue::Character(value) => write!(f, "{value}"),
            CsvValue::Byte(value) => write!(f, "{value}"),
            CsvValue::Short(value) => write!(f, "{value}"),
            CsvValue::Integer(value) => write!(f, "{value}"),
            CsvValue::Long(value) => write!(f, "{value}"),
            CsvValue::Boolean(value) => write!(f, "{value}"),
            CsvValue::Float(value) => write!(f, "{value:?}"),
            CsvValue::Double(value) => write!(f, "{value:?}"),
        }
    }
}

/// A Rust type that can be stored in a column.
///
/// Implemented for `String`, `char`, `i8`, `i16`, `i32`, `i64`, `bool`, `f32` and `f64`.
pub trait CsvPrimitive: Into<CsvValue> + TryFrom<CsvValue, Error = ConversionError> + 'static {
    const KIND: PrimitiveKind;
}

macro_rules! csv_primitive {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for CsvValue {
            fn from(value: $ty) -> Self {
                CsvValue::$variant(value)
            }
        }

        impl TryFrom<CsvValue> for $ty {
            type Error = ConversionError;

            fn try_from(value: CsvValue) -> Result<Self, Self::Error> {
                match value {
                    CsvValue::$variant(inner) => Ok(inner),
                    other => Err(ConversionError::KindMismatch {
                        expected: PrimitiveKind::$variant,
                        actual: other.kind(),
                    }),
                }
            }
        }

        impl CsvPrimitive for $ty {
            const KIND: PrimitiveKind = PrimitiveKind::$variant;
        }
    };
}

csv_primitive!(String, Text);
csv_primitive!(char, Character);
csv_primitive!(i8, Byte);
csv_primitive!(i16, Short);
csv_primitive!(i32, Integer);
csv_primitive!(i64, Long);
csv_primitive!(bool, Boolean);
csv_primitive!(f32, Float);
csv_primitive!(f64, Double);

impl From<&str> for CsvValue {
    fn from(value: &str) -> Self {
        CsvValue::Text(value.to_string())
    }
}
