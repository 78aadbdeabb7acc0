use std::sync::Arc;

use csv_serializer::{
    CsvRecord, CsvSerializerBuilder, RecordDescription, error::CsvError,
    item::logger::CollectingDiagnostics,
};
use log::{info, warn};

#[derive(Default, Debug)]
struct Reading {
    sensor: String,
    value: f32,
    samples: i32,
}

impl CsvRecord for Reading {
    fn describe() -> RecordDescription<Self> {
        RecordDescription::new()
            .default_constructor()
            .marked_field::<String>("sensor")
            .marked_field::<f32>("value")
            .marked_field::<i32>("samples")
            .getter("getSensor", |r: &Reading| r.sensor.clone())
            .setter("setSensor", |r: &mut Reading, sensor: String| r.sensor = sensor)
            .getter("getValue", |r: &Reading| r.value)
            .setter("setValue", |r: &mut Reading, value: f32| r.value = value)
            .getter("getSamples", |r: &Reading| r.samples)
            .setter("setSamples", |r: &mut Reading, samples: i32| r.samples = samples)
    }
}

fn main() -> Result<(), CsvError> {
    env_logger::init();

    let csv = "\"samples\",\"sensor\",\"value\",
\"12\",\"north\",\"21.5\",
\"many\",\"south\",\"19.25\",
\"8\",\"east\",\"n/a\",
\"4\",\"west\",\"18.0\",
";

    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let mut serializer = CsvSerializerBuilder::<Reading>::new()
        .diagnostics(Arc::clone(&diagnostics))
        .build()?;

    serializer.deserialize(csv)?;

    for reading in serializer.items() {
        info!("Record:{:?}", reading);
    }
    for error in diagnostics.errors() {
        warn!("Skipped: {}", error);
    }

    assert_eq!(serializer.item_count(), 4);
    assert_eq!(diagnostics.len(), 2);

    Ok(())
}
