//! CSV support for reading and writing records described by a [`Schema`](crate::core::schema::Schema).
//!
//! # Dialect
//!
//! ```text
//! "col1","col2",...,"colN",
//! "v1a","v2a",...,"vNa",
//! ```
//!
//! - the separator is `,` and every cell, header included, is wrapped in `"`
//! - a separator follows every cell, the last one included
//! - rows end with the configured [`LineTerminator`](options::LineTerminator); `\r` is
//!   dropped when reading
//! - quotes are not escaped: reading removes every `"` of a cell wherever it occurs,
//!   so values cannot contain `"`, `,` or line breaks
//! - lines are split by the `csv` crate with its own quoting turned off, the quotes
//!   above are plain text to it
//!
//! # Module Architecture
//!
//! 1. **CsvItemWriter**: writes a header and one row per record, in schema column order.
//! 2. **CsvItemReader**: parses a document and builds one record per data line, matching
//!    cells to columns by header name.
//! 3. **CsvSerializer**: owns a schema and the collection of records, with file based
//!    entry points.
//!
//! Conversion errors of single cells follow the [`ConversionPolicy`](options::ConversionPolicy):
//! by default they are reported to a [`Diagnostics`](crate::item::logger::Diagnostics)
//! collaborator and the cell is skipped.
//!
//! # Examples
//!
//! ```
//! use csv_serializer::core::record::RecordDescription;
//! use csv_serializer::core::schema::Schema;
//! use csv_serializer::item::csv::csv_reader::CsvItemReaderBuilder;
//! use csv_serializer::item::csv::csv_writer::CsvItemWriterBuilder;
//! use csv_serializer::item::csv::options::LineTerminator;
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct City {
//!     name: String,
//!     pop: i64,
//! }
//!
//! let schema = Schema::build(
//!     RecordDescription::<City>::new()
//!         .default_constructor()
//!         .marked_field::<String>("name")
//!         .marked_field::<i64>("pop")
//!         .getter("getName", |city: &City| city.name.clone())
//!         .setter("setName", |city: &mut City, name: String| city.name = name)
//!         .getter("getPop", |city: &City| city.pop)
//!         .setter("setPop", |city: &mut City, pop: i64| city.pop = pop),
//! )
//! .unwrap();
//!
//! let cities = vec![City { name: "Boston".to_string(), pop: 4628910 }];
//!
//! let writer = CsvItemWriterBuilder::new()
//!     .line_terminator(LineTerminator::Lf)
//!     .from_schema(&schema);
//! let text = writer.write(&cities).unwrap();
//! assert_eq!(text, "\"name\",\"pop\",\n\"Boston\",\"4628910\",\n");
//!
//! let reader = CsvItemReaderBuilder::new().from_schema(&schema);
//! assert_eq!(reader.read(&text).unwrap(), cities);
//! ```

/// Facade owning a schema and its records.
pub mod csv_serializer;

/// A module providing facilities for reading CSV documents.
pub mod csv_reader;

/// A module providing facilities for writing CSV documents.
pub mod csv_writer;

pub mod options;

use csv::StringRecord;

use crate::{error::CellError, item::logger::Diagnostics};

use self::options::ConversionPolicy;

pub const SEPARATOR: u8 = b',';
pub const QUOTE: char = '"';

/// Wraps a cell in quotes. Nothing inside is escaped.
pub(crate) fn quote(text: &str) -> String {
    format!("{QUOTE}{text}{QUOTE}")
}

/// Removes every quote of a cell.
pub fn remove_quotes(cell: &str) -> String {
    cell.replace(QUOTE, "")
}

/// A line holding nothing but carriage returns.
pub(crate) fn is_blank(row: &StringRecord) -> bool {
    row.len() == 1 && row[0].chars().all(|c| c == '\r')
}

/// Unquoted cells of a row, carriage returns dropped. Trailing empty cells are
/// dropped too, so the separator ending every line does not produce a cell.
pub(crate) fn cells(row: &StringRecord) -> Vec<String> {
    let mut cells: Vec<String> = row
        .iter()
        .map(|cell| remove_quotes(cell).replace('\r', ""))
        .collect();
    while cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells
}

/// Applies the conversion policy to a cell error.
pub(crate) fn handle_cell_error(
    policy: ConversionPolicy,
    diagnostics: &dyn Diagnostics,
    error: CellError,
) -> Result<(), CellError> {
    match policy {
        ConversionPolicy::BestEffort => {
            diagnostics.report(&error);
            Ok(())
        }
        ConversionPolicy::Strict => Err(error),
    }
}
