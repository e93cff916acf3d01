//! Region discovery.
//!
//! Every archive submodel with temperature records becomes one region. Node
//! ids are 1-based in the archive; local ids are the same ids shifted to
//! 0-based. Global ids are the archive's internal node indices.

use tc_archive::ResultsArchive;
use tc_core::{GlobalId, Id, LocalId, RegionId};
use tracing::{debug, info};

use crate::catalog::{Discretization, PointCloud, Region, RegionCatalog, SolutionData, Topology};
use crate::error::{ModelError, ModelResult};
use crate::index::{GlobalIdIndex, NodeLocation};
use crate::validate;

/// Builder for the region catalog and its global index.
///
/// Use `add_region` and `add_node` to describe the regions, then call
/// `build()` to validate local ids and claim global ids.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    regions: Vec<Region>,
    clouds: Vec<PointCloud>,
    globals: Vec<(GlobalId, NodeLocation)>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region; names must be unique.
    pub fn add_region(&mut self, name: impl Into<String>) -> ModelResult<RegionId> {
        let name = name.into();
        if self.regions.iter().any(|r| r.name == name) {
            return Err(ModelError::DuplicateRegion { name });
        }
        let id = RegionId::from_index(self.regions.len() as u32);
        self.regions.push(Region {
            id,
            name,
            topology: Topology::Volume,
            discretization: Discretization::PointCloud,
        });
        self.clouds.push(PointCloud::default());
        Ok(id)
    }

    /// Add an archive node (1-based `node_id`) to `region`.
    pub fn add_node(&mut self, region: RegionId, node_id: i64, global: i64) -> ModelResult<LocalId> {
        let name = &self
            .regions
            .get(region.slot())
            .ok_or(ModelError::UnknownRegionId(region.index()))?
            .name;

        let local = Id::try_from_raw(node_id.saturating_sub(1), "local id").map_err(|source| {
            ModelError::InvalidNodeId {
                region: name.clone(),
                node_id,
                source,
            }
        })?;
        let global = Id::try_from_raw(global, "global id").map_err(|source| {
            ModelError::InvalidGlobalId {
                region: name.clone(),
                node_id,
                source,
            }
        })?;

        let cloud = &mut self.clouds[region.slot()];
        cloud.ids.push(local);
        // coordinates to be filled by synchronization
        cloud.coords.push([0.0; 3]);
        self.globals.push((global, NodeLocation { region, local }));
        Ok(local)
    }

    /// Validate and freeze into a catalog plus its global index.
    pub fn build(self) -> ModelResult<(RegionCatalog, GlobalIdIndex)> {
        let mut clouds = self.clouds;
        for (region, cloud) in self.regions.iter().zip(clouds.iter_mut()) {
            cloud.positions = validate::local_positions(&region.name, cloud)?;
        }

        let mut index = GlobalIdIndex::new();
        for (global, location) in self.globals {
            if let Err(existing) = index.insert(global, location) {
                return Err(ModelError::GlobalIdCollision {
                    global,
                    first: describe(&self.regions, existing),
                    second: describe(&self.regions, location),
                });
            }
        }

        let solutions = clouds
            .iter()
            .map(|c| SolutionData::with_default_temperature(c.len()))
            .collect();

        Ok((
            RegionCatalog {
                regions: self.regions,
                clouds,
                solutions,
            },
            index,
        ))
    }
}

fn describe(regions: &[Region], location: NodeLocation) -> String {
    format!(
        "{}:{}",
        regions[location.region.slot()].name,
        location.local
    )
}

/// Discover regions and build the global index from an archive.
pub fn discover<A: ResultsArchive + ?Sized>(
    archive: &A,
) -> ModelResult<(RegionCatalog, GlobalIdIndex)> {
    let mut builder = CatalogBuilder::new();

    for submodel in archive.submodels() {
        if !archive.has_temperature_records(&submodel)? {
            debug!(submodel = %submodel, "no temperature records, skipping");
            continue;
        }

        info!(region = %submodel, "new region");
        let region = builder.add_region(submodel.as_str())?;
        for node_id in archive.node_ids(&submodel)? {
            let global = archive.internal_index(&submodel, node_id)?;
            builder.add_node(region, node_id, global)?;
        }
    }

    for (i, time) in archive.record_times().iter().enumerate() {
        debug!("Time {}: {}", i, time);
    }

    let (catalog, index) = builder.build()?;
    info!(
        regions = catalog.len(),
        nodes = catalog.node_count(),
        "discovery complete"
    );
    Ok((catalog, index))
}
