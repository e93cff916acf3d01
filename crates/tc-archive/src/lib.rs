//! tc-archive: read access to transient thermal result archives.
//!
//! The binary record format is handled elsewhere; this crate defines the
//! narrow [`ResultsArchive`] interface the coupling core consumes, an
//! in-memory implementation, and a JSON/YAML document loader for it.

pub mod document;
pub mod memory;

pub use document::{load_archive, save_archive};
pub use memory::{FieldEntry, FieldSamples, MemoryArchive, NodeEntry, RecordInfo, SubmodelEntry};

/// Archive-assigned record number (one record per saved time point).
pub type RecordNumber = u32;

pub type ArchiveResult<T> = Result<T, ArchiveError>;

#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported archive document: {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: String },

    #[error("Record index {index} out of range ({len} records)")]
    RecordOutOfRange { index: usize, len: usize },

    #[error("Unknown record number: {0}")]
    UnknownRecord(RecordNumber),

    #[error("Unknown submodel: {0}")]
    UnknownSubmodel(String),

    #[error("Unknown node {node_id} in submodel {submodel}")]
    UnknownNode { submodel: String, node_id: i64 },

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// A field stored at a record, identified by its designator token
/// (e.g. `POS_X`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub designator: String,
}

impl FieldDescriptor {
    pub fn new(designator: impl Into<String>) -> Self {
        Self {
            designator: designator.into(),
        }
    }
}

/// Read-only view of a transient thermal result archive.
///
/// Node ordering contract: for a given submodel, `node_ids` and
/// `temperature_series` enumerate nodes in the same order.
pub trait ResultsArchive {
    /// All record numbers, in time order.
    fn record_numbers(&self) -> Vec<RecordNumber>;

    /// Simulation time of every record, aligned with `record_numbers`.
    fn record_times(&self) -> Vec<f64>;

    /// Map a 0-based time-step index to its record number.
    fn record_at(&self, index: usize) -> ArchiveResult<RecordNumber> {
        let records = self.record_numbers();
        records
            .get(index)
            .copied()
            .ok_or(ArchiveError::RecordOutOfRange {
                index,
                len: records.len(),
            })
    }

    /// Fields that carry data at `record`.
    fn field_descriptors(&self, record: RecordNumber) -> ArchiveResult<Vec<FieldDescriptor>>;

    /// Values of `field` at `record` as (global id, value) pairs.
    fn field_values(
        &self,
        field: &FieldDescriptor,
        record: RecordNumber,
    ) -> ArchiveResult<Vec<(i64, f64)>>;

    /// Names of all thermal submodels.
    fn submodels(&self) -> Vec<String>;

    /// User-facing node ids of a submodel (1-based by convention).
    fn node_ids(&self, submodel: &str) -> ArchiveResult<Vec<i64>>;

    /// Archive-internal index of a node; this is the node's global id.
    fn internal_index(&self, submodel: &str, node_id: i64) -> ArchiveResult<i64>;

    /// Temperature history of every node of `submodel` that has one,
    /// indexed `[node][record index]`.
    fn temperature_series(&self, submodel: &str) -> ArchiveResult<Vec<Vec<f64>>>;

    /// Whether the submodel has any temperature records at all.
    fn has_temperature_records(&self, submodel: &str) -> ArchiveResult<bool> {
        Ok(!self.temperature_series(submodel)?.is_empty())
    }
}
