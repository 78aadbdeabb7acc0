/// Value kinds and the tagged value carried between accessors and cells.
pub mod value;

/// Description of a record type: fields, accessors and constructor.
pub mod record;

/// The validated set of columns of a record type.
pub mod schema;
