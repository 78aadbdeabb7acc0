use std::env::temp_dir;

use csv_serializer::{CsvRecord, CsvSerializer, RecordDescription, error::CsvError};
use log::info;

#[derive(Default, Debug, Clone, PartialEq)]
struct Car {
    year: i16,
    make: String,
    model: String,
    price: f64,
}

impl CsvRecord for Car {
    fn describe() -> RecordDescription<Self> {
        RecordDescription::new()
            .default_constructor()
            .marked_field::<i16>("year")
            .marked_field::<String>("make")
            .marked_field::<String>("model")
            .marked_field_as::<f64>("price", "price_eur")
            .getter("getYear", |car: &Car| car.year)
            .setter("setYear", |car: &mut Car, year: i16| car.year = year)
            .getter("getMake", |car: &Car| car.make.clone())
            .setter("setMake", |car: &mut Car, make: String| car.make = make)
            .getter("getModel", |car: &Car| car.model.clone())
            .setter("setModel", |car: &mut Car, model: String| car.model = model)
            .getter("getPrice", |car: &Car| car.price)
            .setter("setPrice", |car: &mut Car, price: f64| car.price = price)
    }
}

fn car(year: i16, make: &str, model: &str, price: f64) -> Car {
    Car {
        year,
        make: make.to_string(),
        model: model.to_string(),
        price,
    }
}

fn main() -> Result<(), CsvError> {
    env_logger::init();

    let path = temp_dir().join("cars.csv");

    let mut serializer = CsvSerializer::<Car>::new()?;
    serializer.add_items([
        car(1948, "Porsche", "356", 85000.0),
        car(1995, "Peugeot", "205", 3500.5),
        car(2021, "Mazda", "CX-30", 27990.0),
        car(1967, "Ford", "Mustang fastback 1967", 64000.0),
    ]);
    serializer.remove_items(|car| car.year < 1950);
    serializer.serialize_to_file(&path)?;
    info!("{} cars written to {}", serializer.item_count(), path.display());

    let mut loaded = CsvSerializer::<Car>::new()?;
    loaded.deserialize_from_file(&path)?;
    for car in loaded.items() {
        info!("Record:{:?}", car);
    }

    assert_eq!(loaded.items(), serializer.items());

    Ok(())
}
