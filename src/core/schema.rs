use indexmap::{IndexMap, map::Entry};
use log::{debug, warn};

use super::{
    record::{Constructor, CsvRecord, Getter, Operation, RecordDescription, Setter, accessor_names},
    value::{CsvValue, FieldType, PrimitiveKind},
};
use crate::error::{ConversionError, SchemaError};

/// A column of a [`Schema`]: a marked field with both accessors resolved.
pub struct FieldDescriptor<T> {
    name: String,
    kind: PrimitiveKind,
    getter: Getter<T>,
    setter: Setter<T>,
}

impl<T> FieldDescriptor<T> {
    /// Column name as written in the header.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    /// Reads the current value of the field.
    pub fn read(&self, record: &T) -> Result<CsvValue, ConversionError> {
        (self.getter)(record)
    }

    /// Assigns a value to the field.
    pub fn assign(&self, record: &mut T, value: CsvValue) -> Result<(), ConversionError> {
        (self.setter)(record, value)
    }

    /// Parses the cell text as this column's kind and assigns it.
    pub fn assign_text(&self, record: &mut T, text: &str) -> Result<(), ConversionError> {
        let value = CsvValue::parse(self.kind, text)?;
        self.assign(record, value)
    }
}

impl<T> std::fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Marked field whose type has not been validated yet.
struct Discovered<T> {
    field_type: FieldType,
    getter_kind: PrimitiveKind,
    getter: Getter<T>,
    setter_kind: PrimitiveKind,
    setter: Setter<T>,
}

/// The validated, immutable set of columns of a record type.
///
/// Columns keep their registration order, which is the column order of every
/// document written with this schema.
pub struct Schema<T> {
    type_name: String,
    fields: IndexMap<String, FieldDescriptor<T>>,
    constructor: Constructor<T>,
}

impl<T: 'static> Schema<T> {
    /// Builds the schema of a record type.
    ///
    /// A marked field takes part when both its `get<Field>` and `set<Field>` operations
    /// are declared; otherwise it is left out without error. The discovered fields are
    /// then validated:
    ///
    /// 1. every field type must be one of the nine primitive kinds, matched by the
    ///    value kind of both accessors,
    /// 2. at least one field must be discovered,
    /// 3. the type must provide a zero-argument constructor.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::UnserializableType`] for the first field of another type
    /// - [`SchemaError::AccessorKindMismatch`] for the first field whose accessors
    ///   convert another kind than the declared one
    /// - [`SchemaError::NoFieldsMarked`] when no field was discovered
    /// - [`SchemaError::MissingConstructor`] when no constructor was declared
    pub fn build(description: RecordDescription<T>) -> Result<Self, SchemaError> {
        let RecordDescription {
            type_name,
            fields,
            mut operations,
            constructor,
        } = description;

        let mut discovered: IndexMap<String, Discovered<T>> = IndexMap::new();

        for field in fields {
            let Some(marker) = &field.marker else {
                continue;
            };

            let (getter_name, setter_name) = accessor_names(&field.name);
            let has_getter = matches!(operations.get(&getter_name), Some(Operation::Getter(..)));
            let has_setter = matches!(operations.get(&setter_name), Some(Operation::Setter(..)));
            if !has_getter || !has_setter {
                debug!(
                    "Field {} of {} skipped: {} or {} is missing",
                    field.name, type_name, getter_name, setter_name
                );
                continue;
            }

            let (
                Some(Operation::Getter(getter_kind, getter)),
                Some(Operation::Setter(setter_kind, setter)),
            ) = (
                operations.remove(&getter_name),
                operations.remove(&setter_name),
            ) else {
                continue;
            };

            let column = field.column(marker);
            let found = Discovered {
                field_type: field.field_type,
                getter_kind,
                getter,
                setter_kind,
                setter,
            };

            match discovered.entry(column) {
                Entry::Occupied(mut entry) => {
                    warn!(
                        "Column {} of {} is declared twice, field {} replaces the previous one",
                        entry.key(),
                        type_name,
                        field.name
                    );
                    entry.insert(found);
                }
                Entry::Vacant(entry) => {
                    entry.insert(found);
                }
            }
        }

        let mut columns = IndexMap::with_capacity(discovered.len());
        for (column, found) in discovered {
            let kind = match found.field_type {
                FieldType::Primitive(kind) => kind,
                FieldType::Other(actual_type) => {
                    return Err(SchemaError::UnserializableType {
                        field_name: column,
                        actual_type,
                    });
                }
            };

            if let Some(accessor) = [found.getter_kind, found.setter_kind]
                .into_iter()
                .find(|accessor| *accessor != kind)
            {
                return Err(SchemaError::AccessorKindMismatch {
                    field_name: column,
                    declared: kind,
                    accessor,
                });
            }

            columns.insert(
                column.clone(),
                FieldDescriptor {
                    name: column,
                    kind,
                    getter: found.getter,
                    setter: found.setter,
                },
            );
        }

        if columns.is_empty() {
            return Err(SchemaError::NoFieldsMarked { type_name });
        }

        let Some(constructor) = constructor else {
            return Err(SchemaError::MissingConstructor { type_name });
        };

        debug!(
            "Schema of {} built with columns [{}]",
            type_name,
            columns.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
        );

        Ok(Schema {
            type_name,
            fields: columns,
            constructor,
        })
    }

    /// Builds the schema of a type describing itself through [`CsvRecord`].
    pub fn of() -> Result<Self, SchemaError>
    where
        T: CsvRecord,
    {
        Self::build(T::describe())
    }
}

impl<T> Schema<T> {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Columns in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor<T>> {
        self.fields.values()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn field(&self, column: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.get(column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Creates a blank record.
    pub fn new_record(&self) -> T {
        (self.constructor)()
    }
}

impl<T> std::fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields.values().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
