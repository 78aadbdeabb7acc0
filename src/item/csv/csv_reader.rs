use csv::{ReaderBuilder, Terminator};
use log::debug;

use crate::{
    core::schema::Schema,
    error::{CellError, ConversionError, CsvError},
    item::logger::{Diagnostics, LoggerDiagnostics},
};

use super::{
    SEPARATOR, cells, handle_cell_error, is_blank,
    options::{ConversionPolicy, CsvOptions},
};

/// Reads a CSV document into freshly constructed records.
///
/// The first line is the header. Cells of the following lines are matched to the
/// schema columns by header name, so the document may list the columns in any order.
///
/// # Examples
///
/// ```
/// use csv_serializer::core::{record::RecordDescription, schema::Schema};
/// use csv_serializer::item::csv::csv_reader::CsvItemReaderBuilder;
///
/// #[derive(Default, Debug)]
/// struct Record {
///     name: String,
///     value: i32,
/// }
///
/// let schema = Schema::build(
///     RecordDescription::<Record>::new()
///         .default_constructor()
///         .marked_field::<String>("name")
///         .marked_field::<i32>("value")
///         .getter("getName", |r: &Record| r.name.clone())
///         .setter("setName", |r: &mut Record, name: String| r.name = name)
///         .getter("getValue", |r: &Record| r.value)
///         .setter("setValue", |r: &mut Record, value: i32| r.value = value),
/// )
/// .unwrap();
///
/// let data = "\"value\",\"name\",\r\n\"123\",\"foo\",\r\n\"456\",\"bar\",\r\n";
///
/// let reader = CsvItemReaderBuilder::new().from_schema(&schema);
/// let records = reader.read(data).unwrap();
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].name, "foo");
/// assert_eq!(records[1].value, 456);
/// ```
pub struct CsvItemReader<'a, T> {
    schema: &'a Schema<T>,
    options: CsvOptions,
    diagnostics: &'a dyn Diagnostics,
}

impl<T> CsvItemReader<'_, T> {
    /// Parses a whole document.
    ///
    /// # Parsing Process
    ///
    /// 1. Splits the text into rows on `\n` with a `csv` reader, quoting disabled
    /// 2. Takes the first line as the header, quotes and `\r` removed; an empty first
    ///    line is an empty header
    /// 3. For every following line that is not blank, creates a blank record and
    ///    assigns each schema column found in the header from the cell at the same
    ///    position
    ///
    /// Columns missing from the header keep the value given by the constructor.
    /// Cells that cannot be converted or assigned are handled by the conversion
    /// policy: with the best-effort policy the field keeps its value and reading goes
    /// on with the next cell.
    ///
    /// # Errors
    ///
    /// With [`ConversionPolicy::Strict`], the first cell that cannot be converted.
    /// Errors of the underlying `csv` reader are returned as [`CsvError::Csv`].
    pub fn read(&self, text: &str) -> Result<Vec<T>, CsvError> {
        let rdr = ReaderBuilder::new()
            .delimiter(SEPARATOR)
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .terminator(Terminator::Any(b'\n'))
            .from_reader(text.as_bytes());
        let mut rows = rdr.into_records();

        // The csv reader skips empty lines, so the row after an empty first line is data.
        let header = if text.starts_with('\n') {
            Vec::new()
        } else {
            rows.next().transpose()?.map(|row| cells(&row)).unwrap_or_default()
        };
        let positions: Vec<Option<usize>> = self
            .schema
            .fields()
            .map(|field| header.iter().position(|column| column == field.name()))
            .collect();

        let mut records = Vec::new();

        for row in rows {
            let row = row?;
            if is_blank(&row) {
                continue;
            }

            let values = cells(&row);
            let index = records.len();
            let mut record = self.schema.new_record();

            for (field, position) in self.schema.fields().zip(&positions) {
                let Some(position) = *position else {
                    continue;
                };

                let result = match values.get(position) {
                    Some(cell) => field.assign_text(&mut record, cell),
                    None => Err(ConversionError::MissingCell { position }),
                };

                if let Err(error) = result {
                    handle_cell_error(
                        self.options.policy,
                        self.diagnostics,
                        CellError::new(field.name(), index, error),
                    )?;
                }
            }

            records.push(record);
        }

        debug!(
            "{} record(s) of {} read",
            records.len(),
            self.schema.type_name()
        );

        Ok(records)
    }
}

/// A builder for configuring a [`CsvItemReader`].
///
/// # Default Configuration
///
/// - Policy: best effort
/// - Diagnostics: [`LoggerDiagnostics`]
#[derive(Default)]
pub struct CsvItemReaderBuilder<'a> {
    options: CsvOptions,
    diagnostics: Option<&'a dyn Diagnostics>,
}

impl<'a> CsvItemReaderBuilder<'a> {
    pub fn new() -> Self {
        Self {
            options: CsvOptions::default(),
            diagnostics: None,
        }
    }

    pub fn options(mut self, options: CsvOptions) -> Self {
        self.options = options;
        self
    }

    pub fn policy(mut self, policy: ConversionPolicy) -> Self {
        self.options.policy = policy;
        self
    }

    pub fn diagnostics(mut self, diagnostics: &'a dyn Diagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn from_schema<T>(self, schema: &'a Schema<T>) -> CsvItemReader<'a, T> {
        CsvItemReader {
            schema,
            options: self.options,
            diagnostics: self.diagnostics.unwrap_or(&LoggerDiagnostics),
        }
    }
}
