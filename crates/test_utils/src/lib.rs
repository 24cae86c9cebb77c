//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! member registry test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built persons, addresses and edits
//! - `builders`: Builder for registration details
//! - `database`: PostgreSQL test container and document store
//! - `assertions`: Assertion helpers for person records
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
