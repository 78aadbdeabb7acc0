use std::{fs, path::Path};

use log::debug;

use crate::{
    core::{
        record::{CsvRecord, RecordDescription},
        schema::Schema,
    },
    error::{CsvError, SchemaError},
    item::logger::{Diagnostics, LoggerDiagnostics},
};

use super::{
    csv_reader::CsvItemReaderBuilder,
    csv_writer::CsvItemWriterBuilder,
    options::{ConversionPolicy, CsvOptions, LineTerminator},
};

/// Serializes and deserializes a collection of records of one type.
///
/// The schema is built and validated when the serializer is created; a type with an
/// unsupported column type, no usable column or no constructor never gets a
/// serializer.
///
/// # Examples
///
/// ```
/// use csv_serializer::core::record::{CsvRecord, RecordDescription};
/// use csv_serializer::item::csv::csv_serializer::CsvSerializerBuilder;
/// use csv_serializer::item::csv::options::LineTerminator;
///
/// #[derive(Default, Debug, Clone, PartialEq)]
/// struct Item {
///     name: String,
///     number: i32,
/// }
///
/// impl CsvRecord for Item {
///     fn describe() -> RecordDescription<Self> {
///         RecordDescription::new()
///             .default_constructor()
///             .marked_field::<i32>("number")
///             .marked_field::<String>("name")
///             .getter("getNumber", |item: &Item| item.number)
///             .setter("setNumber", |item: &mut Item, number: i32| item.number = number)
///             .getter("getName", |item: &Item| item.name.clone())
///             .setter("setName", |item: &mut Item, name: String| item.name = name)
///     }
/// }
///
/// let mut serializer = CsvSerializerBuilder::<Item>::new()
///     .line_terminator(LineTerminator::Lf)
///     .build()
///     .unwrap();
///
/// serializer.add_item(Item { name: "Test1".to_string(), number: 123 });
/// let text = serializer.serialize().unwrap();
/// assert_eq!(text, "\"number\",\"name\",\n\"123\",\"Test1\",\n");
///
/// serializer.clear_items();
/// serializer.deserialize(&text).unwrap();
/// assert_eq!(serializer.items()[0].name, "Test1");
/// ```
pub struct CsvSerializer<T> {
    schema: Schema<T>,
    items: Vec<T>,
    options: CsvOptions,
    diagnostics: Box<dyn Diagnostics>,
}

impl<T: CsvRecord> CsvSerializer<T> {
    /// Creates a serializer with the default options for a type describing itself.
    pub fn new() -> Result<Self, SchemaError> {
        CsvSerializerBuilder::new().build()
    }
}

impl<T: 'static> CsvSerializer<T> {
    pub fn from_description(description: RecordDescription<T>) -> Result<Self, SchemaError> {
        CsvSerializerBuilder::from_description(description).build()
    }

    pub fn schema(&self) -> &Schema<T> {
        &self.schema
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    /// The records waiting to be serialized or produced by the last deserialization.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn add_item(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn add_items<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.items.extend(items);
    }

    /// Removes the record at `index`, or returns `None` when out of range.
    pub fn remove_item(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Removes the records matching the condition and returns how many were removed.
    pub fn remove_items<F>(&mut self, mut condition: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|item| !condition(item));
        before - self.items.len()
    }

    pub fn clear_items(&mut self) {
        self.items.clear();
    }

    /// Serializes the held records.
    ///
    /// # Errors
    ///
    /// With [`ConversionPolicy::Strict`], when a value cannot be read.
    pub fn serialize(&self) -> Result<String, CsvError> {
        let writer = CsvItemWriterBuilder::new()
            .options(self.options)
            .diagnostics(&*self.diagnostics)
            .from_schema(&self.schema);

        writer.write(&self.items)
    }

    /// Serializes the held records and writes the document to `path`.
    pub fn serialize_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CsvError> {
        let path = path.as_ref();
        let content = self.serialize()?;

        fs::write(path, content).map_err(|source| CsvError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("{} record(s) written to {}", self.items.len(), path.display());
        Ok(())
    }

    /// Replaces the held records with the records of the document.
    ///
    /// With [`ConversionPolicy::Strict`], a failing document leaves the held records
    /// untouched.
    pub fn deserialize(&mut self, text: &str) -> Result<(), CsvError> {
        let reader = CsvItemReaderBuilder::new()
            .options(self.options)
            .diagnostics(&*self.diagnostics)
            .from_schema(&self.schema);

        let records = reader.read(text)?;
        self.items = records;
        Ok(())
    }

    /// Replaces the held records with the records of the file at `path`.
    pub fn deserialize_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CsvError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CsvError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.deserialize(&content)?;
        debug!("{} record(s) read from {}", self.items.len(), path.display());
        Ok(())
    }
}

/// A builder for configuring a [`CsvSerializer`].
pub struct CsvSerializerBuilder<T> {
    description: RecordDescription<T>,
    options: CsvOptions,
    diagnostics: Option<Box<dyn Diagnostics>>,
}

impl<T: CsvRecord> CsvSerializerBuilder<T> {
    pub fn new() -> Self {
        Self::from_description(T::describe())
    }
}

impl<T: CsvRecord> Default for CsvSerializerBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> CsvSerializerBuilder<T> {
    pub fn from_description(description: RecordDescription<T>) -> Self {
        CsvSerializerBuilder {
            description,
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

    /// Sets where recovered cell errors are reported, [`LoggerDiagnostics`] by default.
    pub fn diagnostics<D: Diagnostics + 'static>(mut self, diagnostics: D) -> Self {
        self.diagnostics = Some(Box::new(diagnostics));
        self
    }

    /// Builds and validates the schema.
    pub fn build(self) -> Result<CsvSerializer<T>, SchemaError> {
        let schema = Schema::build(self.description)?;

        Ok(CsvSerializer {
            schema,
            items: Vec::new(),
            options: self.options,
            diagnostics: self
                .diagnostics
                .unwrap_or_else(|| Box::new(LoggerDiagnostics)),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{env::temp_dir, error::Error, fs, sync::Arc};

    use rand::distr::{Alphanumeric, SampleString};

    use super::*;
    use crate::item::logger::CollectingDiagnostics;

    #[derive(Default, Debug, Clone, PartialEq)]
    struct Task {
        id: i64,
        title: String,
        done: bool,
    }

    impl CsvRecord for Task {
        fn describe() -> RecordDescription<Self> {
            RecordDescription::new()
                .default_constructor()
                .marked_field::<i64>("id")
                .marked_field::<String>("title")
                .marked_field::<bool>("done")
                .getter("getId", |t: &Task| t.id)
                .setter("setId", |t: &mut Task, id: i64| t.id = id)
                .getter("getTitle", |t: &Task| t.title.clone())
                .setter("setTitle", |t: &mut Task, title: String| t.title = title)
                .getter("getDone", |t: &Task| t.done)
                .setter("setDone", |t: &mut Task, done: bool| t.done = done)
        }
    }

    fn task(id: i64, title: &str, done: bool) -> Task {
        Task {
            id,
            title: title.to_string(),
            done,
        }
    }

    #[test]
    fn items_can_be_added_and_removed() -> Result<(), Box<dyn Error>> {
        let mut serializer = CsvSerializer::<Task>::new()?;

        serializer.add_item(task(1, "write", false));
        serializer.add_items(vec![task(2, "read", true), task(3, "sleep", true)]);
        serializer.add_items([task(4, "eat", false)]);
        assert_eq!(serializer.item_count(), 4);

        assert_eq!(serializer.remove_item(0), Some(task(1, "write", false)));
        assert_eq!(serializer.remove_item(10), None);

        assert_eq!(serializer.remove_items(|t| t.done), 2);
        assert_eq!(serializer.items(), &[task(4, "eat", false)]);

        serializer.clear_items();
        assert_eq!(serializer.item_count(), 0);

        Ok(())
    }

    #[test]
    fn deserialize_replaces_held_items() -> Result<(), Box<dyn Error>> {
        let mut serializer = CsvSerializerBuilder::<Task>::new()
            .line_terminator(LineTerminator::Lf)
            .build()?;
        serializer.add_item(task(9, "stale", false));

        serializer.deserialize("\"id\",\"title\",\"done\",\n\"1\",\"fresh\",\"true\",\n")?;
        assert_eq!(serializer.items(), &[task(1, "fresh", true)]);

        Ok(())
    }

    #[test]
    fn strict_failure_keeps_held_items() -> Result<(), Box<dyn Error>> {
        let mut serializer = CsvSerializerBuilder::<Task>::new()
            .policy(ConversionPolicy::Strict)
            .build()?;
        serializer.add_item(task(9, "kept", false));

        let result = serializer.deserialize("\"id\",\n\"nine\",\n");
        assert!(matches!(result, Err(CsvError::Cell(_))));
        assert_eq!(serializer.items(), &[task(9, "kept", false)]);

        Ok(())
    }

    #[test]
    fn injected_diagnostics_receive_errors() -> Result<(), Box<dyn Error>> {
        let diagnostics = Arc::new(CollectingDiagnostics::new());
        let mut serializer = CsvSerializerBuilder::<Task>::new()
            .diagnostics(Arc::clone(&diagnostics))
            .build()?;

        serializer.deserialize("\"id\",\"title\",\n\"x\",\"a\",\n\"2\",\"b\",\n")?;

        assert_eq!(serializer.item_count(), 2);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.errors()[0].column, "id");

        Ok(())
    }

    #[test]
    fn records_survive_a_file_round_trip() -> Result<(), Box<dyn Error>> {
        let file_name = Alphanumeric.sample_string(&mut rand::rng(), 16);
        let path = temp_dir().join(format!("{file_name}.csv"));

        let mut serializer = CsvSerializer::<Task>::new()?;
        serializer.add_items([task(1, "write", false), task(2, "read", true)]);
        serializer.serialize_to_file(&path)?;

        let mut loaded = CsvSerializer::<Task>::new()?;
        loaded.deserialize_from_file(&path)?;
        assert_eq!(loaded.items(), serializer.items());

        fs::remove_file(&path)?;

        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut serializer = CsvSerializer::<Task>::new().unwrap();
        let path = temp_dir().join("csv_serializer_missing").join("nothing.csv");

        match serializer.deserialize_from_file(&path) {
            Err(CsvError::Io { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
