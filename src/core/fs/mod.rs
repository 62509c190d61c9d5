//! Filesystem primitives used during reconciliation
//!
//! - [`resolver`] - collision-free destination names
//! - [`relocator`] - moves that survive crossing volumes

pub mod relocator;
pub mod resolver;

pub use relocator::{FileRelocator, RelocationOutcome, RelocationStrategy};
pub use resolver::{PathResolver, Resolution, MAX_SUFFIX};
