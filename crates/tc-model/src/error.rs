//! Data-model error types.

use tc_archive::ArchiveError;
use tc_core::{CoreError, GlobalId, LocalId};
use thiserror::Error;

/// Errors raised while building, synchronizing or querying the data model.
///
/// Every variant is fatal to a coupling run.
#[derive(Error, Debug)]
pub enum ModelError {
    // Discovery
    #[error("Duplicate region name: {name}")]
    DuplicateRegion { name: String },

    #[error("Region {region}: invalid node id {node_id} ({source})")]
    InvalidNodeId {
        region: String,
        node_id: i64,
        source: CoreError,
    },

    #[error("Region {region}: node {node_id} has invalid global id ({source})")]
    InvalidGlobalId {
        region: String,
        node_id: i64,
        source: CoreError,
    },

    #[error("Region {region}: duplicate local id {local}")]
    DuplicateLocalId { region: String, local: LocalId },

    #[error("Region {region}: local id {local} outside [0, {size})")]
    LocalIdOutOfRange {
        region: String,
        local: LocalId,
        size: usize,
    },

    #[error("Global id {global} claimed by both {first} and {second}")]
    GlobalIdCollision {
        global: GlobalId,
        first: String,
        second: String,
    },

    #[error("Unknown region id: {0}")]
    UnknownRegionId(u32),

    // Synchronization
    #[error("Time step {index} outside recorded range ({len} records)")]
    TimeStepOutOfRange { index: usize, len: usize },

    #[error("Field {designator}: position token names no axis")]
    UnrecognizedPositionToken { designator: String },

    #[error("Field {designator}: position token matches more than one axis")]
    AmbiguousPositionToken { designator: String },

    #[error("Field {designator}: global id {global} is not mapped to any region")]
    UnmappedGlobalId { designator: String, global: i64 },

    #[error("Region {region}: temperature series has {actual} nodes, point cloud has {expected}")]
    SeriesLengthMismatch {
        region: String,
        expected: usize,
        actual: usize,
    },

    #[error("Region {region}: node #{position} has {len} samples, time step {index} requested")]
    SeriesTooShort {
        region: String,
        position: usize,
        index: usize,
        len: usize,
    },

    // Queries
    #[error("Point cloud validity check failed for {region}: {message}")]
    InvalidPointCloud { region: String, message: String },

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Region {region}: unknown variable {variable}")]
    UnknownVariable { region: String, variable: String },

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),
}

pub type ModelResult<T> = Result<T, ModelError>;
