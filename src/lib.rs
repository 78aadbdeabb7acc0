#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # CSV Serializer for Rust

 Converts collections of records to and from a quoted CSV dialect, driven by a schema
 built once per record type.

 ## Core Concepts

- **RecordDescription:** Declares the fields of a record type, which of them are marked
  as columns, their `get<Field>`/`set<Field>` accessors and how to construct a blank record.
- **Schema:** Built once from a description. Keeps the marked fields having both
  accessors, checks that every column type is one of the nine primitive kinds, that at
  least one column exists and that the type can be constructed.
- **CsvItemWriter / CsvItemReader:** Write and read documents for a schema.
- **CsvSerializer:** Owns a schema and the collection of records, with file entry points.
- **Diagnostics:** Receives the cell errors recovered with the best-effort policy.

 ## Supported Types

| **Kind**     | **Rust type** |
|--------------|---------------|
| text         | `String`      |
| character    | `char`        |
| byte         | `i8`          |
| short        | `i16`         |
| integer      | `i32`         |
| long         | `i64`         |
| boolean      | `bool`        |
| single-float | `f32`         |
| double-float | `f64`         |

 ## Getting Started

```rust
# use csv_serializer::{
#     core::record::{CsvRecord, RecordDescription},
#     error::CsvError,
#     item::csv::{csv_serializer::CsvSerializerBuilder, options::LineTerminator},
# };
#[derive(Default, Debug, Clone, PartialEq)]
struct Item {
    name: String,
    number: i32,
}

impl CsvRecord for Item {
    fn describe() -> RecordDescription<Self> {
        RecordDescription::new()
            .default_constructor()
            .marked_field::<i32>("number")
            .marked_field::<String>("name")
            .getter("getNumber", |item: &Item| item.number)
            .setter("setNumber", |item: &mut Item, number: i32| item.number = number)
            .getter("getName", |item: &Item| item.name.clone())
            .setter("setName", |item: &mut Item, name: String| item.name = name)
    }
}

fn main() -> Result<(), CsvError> {
    let mut serializer = CsvSerializerBuilder::<Item>::new()
        .line_terminator(LineTerminator::Lf)
        .build()?;

    serializer.add_items([
        Item { name: "Test1".to_string(), number: 123 },
        Item { name: "Test2".to_string(), number: 456 },
        Item { name: "Test3".to_string(), number: 789 },
    ]);

    let text = serializer.serialize()?;
    assert_eq!(
        text,
        "\"number\",\"name\",\n\"123\",\"Test1\",\n\"456\",\"Test2\",\n\"789\",\"Test3\",\n"
    );

    let expected = serializer.items().to_vec();
    serializer.deserialize(&text)?;
    assert_eq!(serializer.items(), expected.as_slice());

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Core module: values, record descriptions and schemas
pub mod core;

/// Error types
pub mod error;

#[doc(inline)]
pub use error::*;

/// CSV reader, writer and serializer, and the diagnostics collaborator
pub mod item;

pub use crate::core::{
    record::{CsvRecord, RecordDescription},
    schema::Schema,
    value::{CsvValue, PrimitiveKind},
};
pub use item::csv::csv_serializer::{CsvSerializer, CsvSerializerBuilder};
