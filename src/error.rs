use std::{io, path::PathBuf, string::FromUtf8Error};

use thiserror::Error;

use crate::core::value::PrimitiveKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Raised while building a schema. A codec is never created for a type that fails here.
pub enum SchemaError {
    #[error("The field {field_name} of type {actual_type} is an unserializable type.")]
    UnserializableType {
        field_name: String,
        actual_type: String,
    },

    #[error("The field {field_name} is declared as {declared} but an accessor uses {accessor}.")]
    AccessorKindMismatch {
        field_name: String,
        declared: PrimitiveKind,
        accessor: PrimitiveKind,
    },

    #[error("No field of the type {type_name} has been marked to be serialized.")]
    NoFieldsMarked { type_name: String },

    #[error("The type {type_name} needs a constructor that takes no parameters.")]
    MissingConstructor { type_name: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
/// Conversion failure of a single value.
pub enum ConversionError {
    #[error("\"{value}\" is not a valid {kind} literal: {reason}")]
    InvalidLiteral {
        kind: PrimitiveKind,
        value: String,
        reason: String,
    },

    #[error("expected a {expected} value, got {actual}")]
    KindMismatch {
        expected: PrimitiveKind,
        actual: PrimitiveKind,
    },

    #[error("no cell at position {position}")]
    MissingCell { position: usize },

    #[error("accessor failed: {0}")]
    Accessor(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("column {column} of record {record}: {source}")]
/// A [`ConversionError`] located in the document.
pub struct CellError {
    pub column: String,
    /// Zero-based index of the record in the collection.
    pub record: usize,
    #[source]
    pub source: ConversionError,
}

impl CellError {
    pub fn new(column: impl Into<String>, record: usize, source: ConversionError) -> Self {
        CellError {
            column: column.into(),
            record,
            source,
        }
    }
}

#[derive(Error, Debug)]
/// Error returned by the CSV reader, writer and [`CsvSerializer`](crate::item::csv::csv_serializer::CsvSerializer).
pub enum CsvError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Cell(#[from] CellError),

    #[error("Malformed CSV document: {0}")]
    Csv(#[from] csv::Error),

    #[error("The written document is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
