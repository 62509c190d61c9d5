//! Collection manager implementations
//!
//! [`JsonCatalog`] keeps the catalog in a single JSON document. It can also run
//! purely in memory, which is what the tests use.

pub mod store;

pub use store::JsonCatalog;
