//! In-memory archive.
//!
//! Backs the document loader and gives tests a way to assemble synthetic
//! archives without a binary result file.

use serde::{Deserialize, Serialize};

use crate::{ArchiveError, ArchiveResult, FieldDescriptor, RecordNumber, ResultsArchive};

/// One saved time point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordInfo {
    pub number: RecordNumber,
    pub time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeEntry {
    pub id: i64,
    pub internal_index: i64,
    /// Temperature per record; empty when the node has no T records.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub temperature: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmodelEntry {
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeEntry>,
}

/// Samples of a field at one record, as (global id, value) pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSamples {
    pub record: RecordNumber,
    pub values: Vec<(i64, f64)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEntry {
    pub designator: String,
    #[serde(default)]
    pub samples: Vec<FieldSamples>,
}

/// Archive held entirely in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryArchive {
    #[serde(default)]
    pub records: Vec<RecordInfo>,
    #[serde(default)]
    pub submodels: Vec<SubmodelEntry>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its number.
    pub fn add_record(&mut self, time: f64) -> RecordNumber {
        let number = self.records.last().map(|r| r.number + 1).unwrap_or(1);
        self.records.push(RecordInfo { number, time });
        number
    }

    /// Append a submodel (duplicates are kept, as a raw archive would).
    pub fn add_submodel(&mut self, name: impl Into<String>) {
        self.submodels.push(SubmodelEntry {
            name: name.into(),
            nodes: Vec::new(),
        });
    }

    /// Append a node to the most recently added submodel with that name.
    pub fn add_node(
        &mut self,
        submodel: &str,
        id: i64,
        internal_index: i64,
        temperature: Vec<f64>,
    ) -> ArchiveResult<()> {
        let entry = self
            .submodels
            .iter_mut()
            .rev()
            .find(|s| s.name == submodel)
            .ok_or_else(|| ArchiveError::UnknownSubmodel(submodel.to_string()))?;
        entry.nodes.push(NodeEntry {
            id,
            internal_index,
            temperature,
        });
        Ok(())
    }

    /// Store samples of `designator` at `record`, creating the field if needed.
    pub fn set_field_samples(
        &mut self,
        designator: &str,
        record: RecordNumber,
        values: Vec<(i64, f64)>,
    ) {
        let index = match self.fields.iter().position(|f| f.designator == designator) {
            Some(i) => i,
            None => {
                self.fields.push(FieldEntry {
                    designator: designator.to_string(),
                    samples: Vec::new(),
                });
                self.fields.len() - 1
            }
        };
        let field = &mut self.fields[index];
        field.samples.retain(|s| s.record != record);
        field.samples.push(FieldSamples { record, values });
    }

    fn submodel(&self, name: &str) -> ArchiveResult<&SubmodelEntry> {
        self.submodels
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ArchiveError::UnknownSubmodel(name.to_string()))
    }

    fn check_record(&self, record: RecordNumber) -> ArchiveResult<()> {
        if self.records.iter().any(|r| r.number == record) {
            Ok(())
        } else {
            Err(ArchiveError::UnknownRecord(record))
        }
    }
}

impl ResultsArchive for MemoryArchive {
    fn record_numbers(&self) -> Vec<RecordNumber> {
        self.records.iter().map(|r| r.number).collect()
    }

    fn record_times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.time).collect()
    }

    fn field_descriptors(&self, record: RecordNumber) -> ArchiveResult<Vec<FieldDescriptor>> {
        self.check_record(record)?;
        Ok(self
            .fields
            .iter()
            .filter(|f| f.samples.iter().any(|s| s.record == record))
            .map(|f| FieldDescriptor::new(f.designator.clone()))
            .collect())
    }

    fn field_values(
        &self,
        field: &FieldDescriptor,
        record: RecordNumber,
    ) -> ArchiveResult<Vec<(i64, f64)>> {
        self.check_record(record)?;
        let entry = self
            .fields
            .iter()
            .find(|f| f.designator == field.designator)
            .ok_or_else(|| ArchiveError::UnknownField(field.designator.clone()))?;
        Ok(entry
            .samples
            .iter()
            .find(|s| s.record == record)
            .map(|s| s.values.clone())
            .unwrap_or_default())
    }

    fn submodels(&self) -> Vec<String> {
        self.submodels.iter().map(|s| s.name.clone()).collect()
    }

    fn node_ids(&self, submodel: &str) -> ArchiveResult<Vec<i64>> {
        Ok(self.submodel(submodel)?.nodes.iter().map(|n| n.id).collect())
    }

    fn internal_index(&self, submodel: &str, node_id: i64) -> ArchiveResult<i64> {
        self.submodel(submodel)?
            .nodes
            .iter()
            .find(|n| n.id == node_id)
            .map(|n| n.internal_index)
            .ok_or_else(|| ArchiveError::UnknownNode {
                submodel: submodel.to_string(),
                node_id,
            })
    }

    fn temperature_series(&self, submodel: &str) -> ArchiveResult<Vec<Vec<f64>>> {
        Ok(self
            .submodel(submodel)?
            .nodes
            .iter()
            .filter(|n| !n.temperature.is_empty())
            .map(|n| n.temperature.clone())
            .collect())
    }
}
