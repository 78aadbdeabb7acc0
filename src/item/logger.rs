use std::sync::{Arc, Mutex, PoisonError};

use log::warn;

use crate::error::CellError;

/// Receives the cell errors recovered while reading or writing a document.
pub trait Diagnostics {
    fn report(&self, error: &CellError);
}

/// Logs every recovered error through the `log` facade.
#[derive(Default, Debug, Clone, Copy)]
pub struct LoggerDiagnostics;

impl Diagnostics for LoggerDiagnostics {
    fn report(&self, error: &CellError) {
        warn!("Cell skipped: {}", error);
    }
}

/// Keeps every recovered error in memory.
#[derive(Default, Debug)]
pub struct CollectingDiagnostics {
    errors: Mutex<Vec<CellError>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<CellError> {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn report(&self, error: &CellError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error.clone());
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for Arc<D> {
    fn report(&self, error: &CellError) {
        (**self).report(error)
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn report(&self, error: &CellError) {
        (**self).report(error)
    }
}
