//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod edit;
pub mod filter;
pub mod import;
pub mod init;
pub mod status;
pub mod validate;
