#![allow(dead_code)]

pub mod mocks;

use std::env::temp_dir;
use std::path::PathBuf;

use csv_serializer::core::record::{CsvRecord, RecordDescription};
use rand::distr::{Alphanumeric, SampleString};

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    pub number: i32,
}

impl Item {
    pub fn new(name: &str, number: i32) -> Self {
        Item {
            name: name.to_string(),
            number,
        }
    }
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

/// A record using every supported kind.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Measurement {
    pub station: String,
    pub grade: char,
    pub level: i8,
    pub depth: i16,
    pub count: i32,
    pub timestamp: i64,
    pub valid: bool,
    pub ratio: f32,
    pub value: f64,
}

impl CsvRecord for Measurement {
    fn describe() -> RecordDescription<Self> {
        RecordDescription::new()
            .default_constructor()
            .marked_field::<String>("station")
            .marked_field::<char>("grade")
            .marked_field::<i8>("level")
            .marked_field::<i16>("depth")
            .marked_field::<i32>("count")
            .marked_field_as::<i64>("timestamp", "ts")
            .marked_field::<bool>("valid")
            .marked_field::<f32>("ratio")
            .marked_field::<f64>("value")
            .getter("getStation", |m: &Measurement| m.station.clone())
            .setter("setStation", |m: &mut Measurement, v: String| m.station = v)
            .getter("getGrade", |m: &Measurement| m.grade)
            .setter("setGrade", |m: &mut Measurement, v: char| m.grade = v)
            .getter("getLevel", |m: &Measurement| m.level)
            .setter("setLevel", |m: &mut Measurement, v: i8| m.level = v)
            .getter("getDepth", |m: &Measurement| m.depth)
            .setter("setDepth", |m: &mut Measurement, v: i16| m.depth = v)
            .getter("getCount", |m: &Measurement| m.count)
            .setter("setCount", |m: &mut Measurement, v: i32| m.count = v)
            .getter("getTimestamp", |m: &Measurement| m.timestamp)
            .setter("setTimestamp", |m: &mut Measurement, v: i64| m.timestamp = v)
            .getter("getValid", |m: &Measurement| m.valid)
            .setter("setValid", |m: &mut Measurement, v: bool| m.valid = v)
            .getter("getRatio", |m: &Measurement| m.ratio)
            .setter("setRatio", |m: &mut Measurement, v: f32| m.ratio = v)
            .getter("getValue", |m: &Measurement| m.value)
            .setter("setValue", |m: &mut Measurement, v: f64| m.value = v)
    }
}

pub fn measurements() -> Vec<Measurement> {
    vec![
        Measurement {
            station: "Lyon".to_string(),
            grade: 'A',
            level: -12,
            depth: 340,
            count: 70_000,
            timestamp: 1_700_000_000_123,
            valid: true,
            ratio: 0.75,
            value: 1234.5678,
        },
        Measurement {
            station: "Brest".to_string(),
            grade: 'c',
            level: i8::MAX,
            depth: i16::MIN,
            count: -1,
            timestamp: 0,
            valid: false,
            ratio: 1e-7,
            value: -2.5e30,
        },
        Measurement::default(),
    ]
}

pub fn temp_file() -> PathBuf {
    let file_name = Alphanumeric.sample_string(&mut rand::rng(), 16);
    temp_dir().join(format!("{file_name}.csv"))
}
