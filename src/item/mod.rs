/// This module provides the diagnostics collaborator receiving recovered conversion errors.
pub mod logger;

/// This module provides the CSV reader, writer and serializer.
pub mod csv;
