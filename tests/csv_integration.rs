mod common;

use std::{error::Error, fs};

use common::{Item, Measurement, measurements, temp_file};
use csv_serializer::{
    CsvSerializer, CsvSerializerBuilder, Schema,
    item::csv::{
        csv_reader::CsvItemReaderBuilder,
        csv_writer::CsvItemWriterBuilder,
        options::{ConversionPolicy, CsvOptions, LineTerminator},
    },
    item::logger::CollectingDiagnostics,
};

const ITEMS_CSV: &str = "\"number\",\"name\",
\"123\",\"Test1\",
\"456\",\"Test2\",
\"789\",\"Test3\",
";

fn items() -> Vec<Item> {
    vec![
        Item::new("Test1", 123),
        Item::new("Test2", 456),
        Item::new("Test3", 789),
    ]
}

#[test]
fn items_are_serialized_in_declared_column_order() -> Result<(), Box<dyn Error>> {
    let mut serializer = CsvSerializerBuilder::<Item>::new()
        .line_terminator(LineTerminator::Lf)
        .build()?;
    serializer.add_items(items());

    assert_eq!(serializer.serialize()?, ITEMS_CSV);

    Ok(())
}

#[test]
fn items_are_deserialized_in_document_order() -> Result<(), Box<dyn Error>> {
    let mut serializer = CsvSerializer::<Item>::new()?;

    serializer.deserialize(ITEMS_CSV)?;

    assert_eq!(serializer.items(), items().as_slice());

    Ok(())
}

#[test]
fn header_order_is_stable_across_calls() -> Result<(), Box<dyn Error>> {
    let mut serializer = CsvSerializerBuilder::<Item>::new()
        .line_terminator(LineTerminator::Lf)
        .build()?;

    let empty = serializer.serialize()?;
    serializer.add_items(items());
    let full = serializer.serialize()?;
    let again = serializer.serialize()?;

    assert_eq!(empty, "\"number\",\"name\",\n");
    assert!(full.starts_with(&empty));
    assert_eq!(full, again);

    Ok(())
}

#[test]
fn every_kind_survives_a_round_trip() -> Result<(), Box<dyn Error>> {
    let mut serializer = CsvSerializer::<Measurement>::new()?;
    serializer.add_items(measurements());

    let text = serializer.serialize()?;
    assert!(text.starts_with(
        "\"station\",\"grade\",\"level\",\"depth\",\"count\",\"ts\",\"valid\",\"ratio\",\"value\","
    ));

    let mut loaded = CsvSerializer::<Measurement>::new()?;
    loaded.deserialize(&text)?;

    assert_eq!(loaded.items(), measurements().as_slice());

    Ok(())
}

#[test]
fn reordered_columns_give_the_same_records() -> Result<(), Box<dyn Error>> {
    let reordered = "\"name\",\"number\",
\"Test1\",\"123\",
\"Test2\",\"456\",
\"Test3\",\"789\",
";

    let mut original = CsvSerializer::<Item>::new()?;
    original.deserialize(ITEMS_CSV)?;

    let mut permuted = CsvSerializer::<Item>::new()?;
    permuted.deserialize(reordered)?;

    assert_eq!(original.items(), permuted.items());

    Ok(())
}

#[test]
fn crlf_documents_are_read() -> Result<(), Box<dyn Error>> {
    let mut serializer = CsvSerializerBuilder::<Item>::new()
        .line_terminator(LineTerminator::CrLf)
        .build()?;
    serializer.add_items(items());

    let text = serializer.serialize()?;
    assert_eq!(text, ITEMS_CSV.replace('\n', "\r\n"));

    serializer.deserialize(&text)?;
    assert_eq!(serializer.items(), items().as_slice());

    Ok(())
}

#[test]
fn malformed_number_only_affects_its_field() -> Result<(), Box<dyn Error>> {
    let csv = "\"number\",\"name\",
\"12a\",\"Test1\",
\"456\",\"Test2\",
";

    let mut serializer = CsvSerializer::<Item>::new()?;
    serializer.deserialize(csv)?;

    assert_eq!(
        serializer.items(),
        &[Item::new("Test1", 0), Item::new("Test2", 456)]
    );

    Ok(())
}

#[test]
fn strict_policy_rejects_malformed_number() -> Result<(), Box<dyn Error>> {
    let options: CsvOptions = serde_json::from_str(r#"{ "policy": "strict" }"#)?;
    assert_eq!(options.line_terminator, LineTerminator::Platform);

    let mut serializer = CsvSerializerBuilder::<Item>::new()
        .options(options)
        .build()?;

    assert!(serializer.deserialize("\"number\",\n\"x\",\n").is_err());
    assert_eq!(serializer.item_count(), 0);

    Ok(())
}

#[test]
fn options_are_loaded_from_json() -> Result<(), Box<dyn Error>> {
    let options: CsvOptions =
        serde_json::from_str(r#"{ "line_terminator": "crlf", "policy": "best_effort" }"#)?;

    assert_eq!(
        options,
        CsvOptions {
            line_terminator: LineTerminator::CrLf,
            policy: ConversionPolicy::BestEffort,
        }
    );

    let serializer = CsvSerializerBuilder::<Item>::new()
        .options(options)
        .build()?;
    assert_eq!(serializer.serialize()?, "\"number\",\"name\",\r\n");

    Ok(())
}

#[test]
fn records_are_written_to_and_read_from_file() -> Result<(), Box<dyn Error>> {
    let path = temp_file();

    let mut serializer = CsvSerializerBuilder::<Item>::new()
        .line_terminator(LineTerminator::Lf)
        .build()?;
    serializer.add_items(items());
    serializer.serialize_to_file(&path)?;

    assert_eq!(fs::read_to_string(&path)?, ITEMS_CSV);

    let mut loaded = CsvSerializer::<Item>::new()?;
    loaded.deserialize_from_file(&path)?;
    assert_eq!(loaded.into_items(), items());

    fs::remove_file(&path)?;

    Ok(())
}

#[test]
fn reader_and_writer_work_with_an_external_collection() -> Result<(), Box<dyn Error>> {
    let schema = Schema::<Item>::of()?;
    let diagnostics = CollectingDiagnostics::new();

    let writer = CsvItemWriterBuilder::new()
        .line_terminator(LineTerminator::Lf)
        .diagnostics(&diagnostics)
        .from_schema(&schema);
    let text = writer.write(&items())?;
    assert_eq!(text, ITEMS_CSV);

    let reader = CsvItemReaderBuilder::new()
        .diagnostics(&diagnostics)
        .from_schema(&schema);
    let records = reader.read(&text)?;

    assert_eq!(records, items());
    assert!(diagnostics.is_empty());

    Ok(())
}

#[test]
fn unquoted_cells_and_stray_quotes_are_accepted() -> Result<(), Box<dyn Error>> {
    let mut serializer = CsvSerializer::<Item>::new()?;

    serializer.deserialize("number,name\n1,\"Te\"st\"\n")?;

    assert_eq!(serializer.items(), &[Item::new("Test", 1)]);

    Ok(())
}
