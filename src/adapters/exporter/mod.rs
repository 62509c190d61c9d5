//! Exporter implementations

pub mod local;

pub use local::LocalExporter;
