//! Region catalog: regions, their point clouds, and their solution fields.

use std::collections::BTreeMap;
use std::fmt;

use tc_core::{LocalId, RegionId};
use tracing::debug;

use crate::classify::Axis;

/// Name of the only output field carried by a region.
pub const TEMPERATURE: &str = "Temperature";

/// Value every temperature slot holds before the first synchronization.
pub const DEFAULT_TEMPERATURE: f64 = 300.0;

/// Region topology as declared to the coupling peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Volume,
}

/// Discretization kind as declared to the coupling peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discretization {
    PointCloud,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Volume => write!(f, "volume"),
        }
    }
}

impl fmt::Display for Discretization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discretization::PointCloud => write!(f, "point cloud"),
        }
    }
}

/// A coupling-visible domain partition, one per non-empty archive submodel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub topology: Topology,
    pub discretization: Discretization,
}

/// Node ids and positions of one region.
///
/// `ids[i]` and `coords[i]` describe the same node. Coordinates start at the
/// origin and only position fields overwrite them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    pub(crate) ids: Vec<LocalId>,
    pub(crate) coords: Vec<[f64; 3]>,
    /// local id slot -> position in `ids`
    pub(crate) positions: Vec<Option<usize>>,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[LocalId] {
        &self.ids
    }

    pub fn coords(&self) -> &[[f64; 3]] {
        &self.coords
    }

    /// Position of `local` within `ids`/`coords`.
    pub fn position_of(&self, local: LocalId) -> Option<usize> {
        self.positions.get(local.slot()).copied().flatten()
    }

    pub(crate) fn set_axis(&mut self, position: usize, axis: Axis, value: f64) {
        self.coords[position][axis.component()] = value;
    }
}

/// Named per-node fields of one region, aligned with its point cloud ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionData {
    fields: BTreeMap<String, Vec<f64>>,
}

impl SolutionData {
    pub(crate) fn with_default_temperature(size: usize) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(TEMPERATURE.to_string(), vec![DEFAULT_TEMPERATURE; size]);
        Self { fields }
    }

    pub fn get(&self, variable: &str) -> Option<&[f64]> {
        self.fields.get(variable).map(Vec::as_slice)
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Overwrite a field in place. Lengths are fixed at discovery, so the
    /// caller must pass exactly as many values as the field holds.
    pub(crate) fn overwrite(&mut self, variable: &str, values: &[f64]) {
        if let Some(field) = self.fields.get_mut(variable) {
            field.copy_from_slice(values);
        }
    }
}

/// Ordered, immutable set of regions with their mutable per-node stores.
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    pub(crate) regions: Vec<Region>,
    pub(crate) clouds: Vec<PointCloud>,
    pub(crate) solutions: Vec<SolutionData>,
}

impl RegionCatalog {
    /// All regions in discovery order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Total node count across regions.
    pub fn node_count(&self) -> usize {
        self.clouds.iter().map(PointCloud::len).sum()
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.slot())
    }

    /// Look a region up by name.
    pub fn find(&self, name: &str) -> Option<RegionId> {
        self.regions.iter().find(|r| r.name == name).map(|r| r.id)
    }

    pub fn point_cloud(&self, id: RegionId) -> Option<&PointCloud> {
        self.clouds.get(id.slot())
    }

    pub fn solution(&self, id: RegionId) -> Option<&SolutionData> {
        self.solutions.get(id.slot())
    }

    pub(crate) fn point_cloud_mut(&mut self, id: RegionId) -> Option<&mut PointCloud> {
        self.clouds.get_mut(id.slot())
    }

    pub(crate) fn solution_mut(&mut self, id: RegionId) -> Option<&mut SolutionData> {
        self.solutions.get_mut(id.slot())
    }

    /// Dump every region's nodes at DEBUG level.
    pub fn log_contents(&self) {
        for (region, cloud) in self.regions.iter().zip(&self.clouds) {
            debug!(region = %region.name, size = cloud.len(), "region contents");
            for (id, [x, y, z]) in cloud.ids.iter().zip(&cloud.coords) {
                debug!("{}, {}, {}, {}", id, x, y, z);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::Id;

    #[test]
    fn tags_render_for_the_peer() {
        assert_eq!(Topology::Volume.to_string(), "volume");
        assert_eq!(Discretization::PointCloud.to_string(), "point cloud");
    }

    #[test]
    fn default_temperature_fill() {
        let data = SolutionData::with_default_temperature(3);
        assert_eq!(data.get(TEMPERATURE), Some(&[300.0, 300.0, 300.0][..]));
        assert_eq!(data.variables().collect::<Vec<_>>(), vec![TEMPERATURE]);
        assert!(data.get("Pressure").is_none());
    }

    #[test]
    fn position_lookup_follows_ids() {
        let cloud = PointCloud {
            ids: vec![Id::from_index(1), Id::from_index(0)],
            coords: vec![[0.0; 3]; 2],
            positions: vec![Some(1), Some(0)],
        };
        assert_eq!(cloud.position_of(Id::from_index(0)), Some(1));
        assert_eq!(cloud.position_of(Id::from_index(1)), Some(0));
        assert_eq!(cloud.position_of(Id::from_index(2)), None);
    }
}
