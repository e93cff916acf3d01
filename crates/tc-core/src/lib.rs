//! tc-core: shared foundation for thermocouple.
//!
//! Contains:
//! - ids (compact region/node identifiers)
//! - error (shared error types)

pub mod error;
pub mod ids;

pub use error::{CoreError, CoreResult};
pub use ids::*;
