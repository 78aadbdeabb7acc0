use csv::{QuoteStyle, Writer, WriterBuilder};
use log::debug;

use crate::{
    core::schema::Schema,
    error::{CellError, CsvError},
    item::logger::{Diagnostics, LoggerDiagnostics},
};

use super::{
    SEPARATOR, handle_cell_error,
    options::{ConversionPolicy, CsvOptions, LineTerminator},
    quote,
};

/// Writes records as a CSV document.
///
/// The header lists the schema columns in registration order, and every row
/// follows the same order.
///
/// # Examples
///
/// ```
/// use csv_serializer::core::{record::RecordDescription, schema::Schema};
/// use csv_serializer::item::csv::{csv_writer::CsvItemWriterBuilder, options::LineTerminator};
///
/// #[derive(Default)]
/// struct Row {
///     city: String,
///     population: i64,
/// }
///
/// let schema = Schema::build(
///     RecordDescription::<Row>::new()
///         .default_constructor()
///         .marked_field::<String>("city")
///         .marked_field_as::<i64>("population", "popcount")
///         .getter("getCity", |row: &Row| row.city.clone())
///         .setter("setCity", |row: &mut Row, city: String| row.city = city)
///         .getter("getPopulation", |row: &Row| row.population)
///         .setter("setPopulation", |row: &mut Row, population: i64| row.population = population),
/// )
/// .unwrap();
///
/// let wtr = CsvItemWriterBuilder::new()
///     .line_terminator(LineTerminator::Lf)
///     .from_schema(&schema);
///
/// let rows = vec![
///     Row { city: "Boston".to_string(), population: 4628910 },
///     Row { city: "Concord".to_string(), population: 42695 },
/// ];
///
/// let data = wtr.write(&rows).unwrap();
/// assert_eq!(data, "\
/// \"city\",\"popcount\",
/// \"Boston\",\"4628910\",
/// \"Concord\",\"42695\",
/// ");
/// ```
pub struct CsvItemWriter<'a, T> {
    schema: &'a Schema<T>,
    options: CsvOptions,
    diagnostics: &'a dyn Diagnostics,
}

impl<T> CsvItemWriter<'_, T> {
    /// Writes the header and one row per record, in the given order.
    ///
    /// A value that cannot be read is handled by the conversion policy: with the
    /// best-effort policy the cell, separator included, is left out of its row.
    ///
    /// # Errors
    ///
    /// With [`ConversionPolicy::Strict`], the first unreadable value. Errors of the
    /// underlying `csv` writer are returned as [`CsvError::Csv`].
    pub fn write(&self, records: &[T]) -> Result<String, CsvError> {
        let mut wtr = WriterBuilder::new()
            .delimiter(SEPARATOR)
            .has_headers(false)
            .flexible(true)
            .quote_style(QuoteStyle::Never)
            .terminator(self.options.line_terminator.terminator())
            .from_writer(Vec::new());

        let header: Vec<String> = self.schema.fields().map(|field| quote(field.name())).collect();
        self.write_row(&mut wtr, &header)?;

        for (index, record) in records.iter().enumerate() {
            let mut row = Vec::with_capacity(self.schema.len());
            for field in self.schema.fields() {
                match field.read(record) {
                    Ok(value) => row.push(quote(&value.to_string())),
                    Err(error) => handle_cell_error(
                        self.options.policy,
                        self.diagnostics,
                        CellError::new(field.name(), index, error),
                    )?,
                }
            }
            self.write_row(&mut wtr, &row)?;
        }

        let document = wtr
            .into_inner()
            .map_err(|error| csv::Error::from(error.into_error()))?;

        debug!(
            "{} record(s) of {} written",
            records.len(),
            self.schema.type_name()
        );

        Ok(String::from_utf8(document)?)
    }

    /// Writes quoted cells followed by an empty field, which gives the trailing separator.
    fn write_row(&self, wtr: &mut Writer<Vec<u8>>, row: &[String]) -> Result<(), csv::Error> {
        if row.is_empty() {
            // csv writes an empty record as `""`
            wtr.flush()?;
            wtr.get_mut()
                .extend_from_slice(self.options.line_terminator.as_str().as_bytes());
            return Ok(());
        }

        for cell in row {
            wtr.write_field(cell)?;
        }
        wtr.write_field("")?;
        wtr.write_record(None::<&[u8]>)
    }
}

/// A builder for configuring a [`CsvItemWriter`].
///
/// # Default Configuration
///
/// - Terminator: platform line separator
/// - Policy: best effort
/// - Diagnostics: [`LoggerDiagnostics`]
#[derive(Default)]
pub struct CsvItemWriterBuilder<'a> {
    options: CsvOptions,
    diagnostics: Option<&'a dyn Diagnostics>,
}

impl<'a> CsvItemWriterBuilder<'a> {
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

    pub fn line_terminator(mut self, terminator: LineTerminator) -> Self {
        self.options.line_terminator = terminator;
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

    pub fn from_schema<T>(self, schema: &'a Schema<T>) -> CsvItemWriter<'a, T> {
        CsvItemWriter {
            schema,
            options: self.options,
            diagnostics: self.diagnostics.unwrap_or(&LoggerDiagnostics),
        }
    }
}
