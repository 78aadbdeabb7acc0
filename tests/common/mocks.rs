//! Mock version of the diagnostics collaborator.
use mockall::mock;

use csv_serializer::{error::CellError, item::logger::Diagnostics};

mock! {
    pub Sink {}
    impl Diagnostics for Sink {
        fn report(&self, error: &CellError);
    }
}
