//! tc-model: in-memory data model of a coupled thermal archive.
//!
//! Provides:
//! - Region discovery and the global → (region, local) node index
//! - Per-region point clouds and solution fields
//! - Field-designator classification and per-time-step synchronization
//! - The read-only query surface served to the coupling peer
//!
//! # Example
//!
//! ```
//! use tc_archive::MemoryArchive;
//! use tc_model::{CouplingContext, QueryCallbacks};
//!
//! let mut archive = MemoryArchive::new();
//! let r1 = archive.add_record(0.0);
//! archive.add_submodel("BAR");
//! archive.add_node("BAR", 1, 0, vec![350.0]).unwrap();
//! archive.set_field_samples("POS_X", r1, vec![(0, 0.5)]);
//!
//! let mut ctx = CouplingContext::discover(&archive, false).unwrap();
//! ctx.synchronize(&archive, 0).unwrap();
//!
//! assert_eq!(ctx.point_cloud("BAR").unwrap().coords[0][0], 0.5);
//! assert_eq!(ctx.scalar_field("BAR", "Temperature").unwrap(), &[350.0]);
//! assert_eq!(ctx.restart_point(), "0");
//! ```

pub mod catalog;
pub mod classify;
pub mod context;
pub mod discover;
pub mod error;
pub mod index;
pub mod query;
pub mod sync;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use catalog::{
    DEFAULT_TEMPERATURE, Discretization, PointCloud, Region, RegionCatalog, SolutionData,
    TEMPERATURE, Topology,
};
pub use classify::{Axis, FieldClass, classify};
pub use context::CouplingContext;
pub use discover::{CatalogBuilder, discover};
pub use error::{ModelError, ModelResult};
pub use index::{GlobalIdIndex, NodeLocation};
pub use query::{PointCloudView, QueryCallbacks};
pub use sync::{SyncReport, fill};
