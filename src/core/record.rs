use std::{any::type_name, collections::HashMap};

use super::value::{CsvPrimitive, CsvValue, FieldType, PrimitiveKind};
use crate::error::ConversionError;

pub(crate) type Getter<T> = Box<dyn Fn(&T) -> Result<CsvValue, ConversionError> + Send + Sync>;
pub(crate) type Setter<T> =
    Box<dyn Fn(&mut T, CsvValue) -> Result<(), ConversionError> + Send + Sync>;
pub(crate) type Constructor<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Marks a field as a column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvField {
    /// Column name override. `None` or an empty name keeps the field name.
    pub column: Option<String>,
}

impl CsvField {
    pub fn named(column: impl Into<String>) -> Self {
        CsvField {
            column: Some(column.into()),
        }
    }
}

/// A declared field of a record type.
#[derive(Debug, Clone)]
pub struct FieldDeclaration {
    pub name: String,
    pub field_type: FieldType,
    pub marker: Option<CsvField>,
}

impl FieldDeclaration {
    /// Column name of a marked field.
    pub(crate) fn column(&self, marker: &CsvField) -> String {
        match &marker.column {
            Some(column) if !column.is_empty() => column.clone(),
            _ => self.name.clone(),
        }
    }
}

/// A declared accessor, tagged with the kind of the value it produces or accepts.
pub(crate) enum Operation<T> {
    Getter(PrimitiveKind, Getter<T>),
    Setter(PrimitiveKind, Setter<T>),
}

/// Returns the getter and setter names expected for a field.
///
/// The first char of the field name is upper-cased and prefixed with `get` and `set`.
///
/// ```
/// use csv_serializer::core::record::accessor_names;
///
/// assert_eq!(
///     accessor_names("color"),
///     ("getColor".to_string(), "setColor".to_string())
/// );
/// ```
pub fn accessor_names(field: &str) -> (String, String) {
    let mut chars = field.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    (format!("get{capitalized}"), format!("set{capitalized}"))
}

/// Description of a record type: its declared fields, its declared accessor
/// operations and how to construct a blank instance.
///
/// A [`Schema`](super::schema::Schema) is built from it once.
///
/// # Examples
///
/// ```
/// use csv_serializer::core::record::RecordDescription;
///
/// #[derive(Default)]
/// struct Item {
///     name: String,
///     number: i32,
/// }
///
/// let description = RecordDescription::<Item>::new()
///     .default_constructor()
///     .marked_field::<i32>("number")
///     .marked_field::<String>("name")
///     .getter("getNumber", |item: &Item| item.number)
///     .setter("setNumber", |item: &mut Item, value: i32| item.number = value)
///     .getter("getName", |item: &Item| item.name.clone())
///     .setter("setName", |item: &mut Item, value: String| item.name = value);
///
/// assert_eq!(description.fields().len(), 2);
/// ```
pub struct RecordDescription<T> {
    pub(crate) type_name: String,
    pub(crate) fields: Vec<FieldDeclaration>,
    pub(crate) operations: HashMap<String, Operation<T>>,
    pub(crate) constructor: Option<Constructor<T>>,
}

impl<T: 'static> RecordDescription<T> {
    pub fn new() -> Self {
        RecordDescription {
            type_name: type_name::<T>().to_string(),
            fields: Vec::new(),
            operations: HashMap::new(),
            constructor: None,
        }
    }

    /// Overrides the type name used in error messages.
    pub fn type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = name.into();
        self
    }

    pub fn constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.constructor = Some(Box::new(constructor));
        self
    }

    pub fn default_constructor(self) -> Self
    where
        T: Default,
    {
        self.constructor(T::default)
    }

    pub fn declare(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        marker: Option<CsvField>,
    ) -> Self {
        self.fields.push(FieldDeclaration {
            name: name.into(),
            field_type,
            marker,
        });
        self
    }

    /// Declares a field that does not take part in the CSV document.
    pub fn field<V: 'static>(self, name: impl Into<String>) -> Self {
        self.declare(name, FieldType::of::<V>(), None)
    }

    pub fn marked_field<V: 'static>(self, name: impl Into<String>) -> Self {
        self.declare(name, FieldType::of::<V>(), Some(CsvField::default()))
    }

    pub fn marked_field_as<V: 'static>(
        self,
        name: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        self.declare(name, FieldType::of::<V>(), Some(CsvField::named(column)))
    }

    pub fn getter<V, F>(self, name: impl Into<String>, getter: F) -> Self
    where
        V: CsvPrimitive,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.try_getter(name, move |record: &T| Ok(getter(record)))
    }

    /// Registers a getter that can fail. A failing getter drops the cell from the row.
    pub fn try_getter<V, F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        V: CsvPrimitive,
        F: Fn(&T) -> Result<V, ConversionError> + Send + Sync + 'static,
    {
        let getter: Getter<T> = Box::new(move |record: &T| getter(record).map(Into::into));
        self.operations
            .insert(name.into(), Operation::Getter(V::KIND, getter));
        self
    }

    pub fn setter<V, F>(self, name: impl Into<String>, setter: F) -> Self
    where
        V: CsvPrimitive,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.try_setter(name, move |record: &mut T, value: V| {
            setter(record, value);
            Ok(())
        })
    }

    /// Registers a setter that can refuse a value, leaving the field untouched.
    pub fn try_setter<V, F>(mut self, name: impl Into<String>, setter: F) -> Self
    where
        V: CsvPrimitive,
        F: Fn(&mut T, V) -> Result<(), ConversionError> + Send + Sync + 'static,
    {
        let setter: Setter<T> =
            Box::new(move |record: &mut T, value: CsvValue| setter(record, V::try_from(value)?));
        self.operations
            .insert(name.into(), Operation::Setter(V::KIND, setter));
        self
    }

    pub fn fields(&self) -> &[FieldDeclaration] {
        &self.fields
    }

    pub fn has_getter(&self, name: &str) -> bool {
        matches!(self.operations.get(name), Some(Operation::Getter(..)))
    }

    pub fn has_setter(&self, name: &str) -> bool {
        matches!(self.operations.get(name), Some(Operation::Setter(..)))
    }
}

impl<T: 'static> Default for RecordDescription<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A record type that knows how to describe itself.
pub trait CsvRecord: Sized + 'static {
    fn describe() -> RecordDescription<Self>;
}
