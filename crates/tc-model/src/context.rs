//! The coupling context: the one long-lived data model of a run.

use tc_archive::ResultsArchive;
use tracing::debug;

use crate::catalog::RegionCatalog;
use crate::discover;
use crate::error::{ModelError, ModelResult};
use crate::index::GlobalIdIndex;
use crate::query::{PointCloudView, QueryCallbacks};
use crate::sync::{self, SyncReport};
use crate::validate;

/// Regions, global index, and time-step counter shared by the synchronizer
/// and the peer-facing queries.
#[derive(Debug, Clone)]
pub struct CouplingContext {
    catalog: RegionCatalog,
    index: GlobalIdIndex,
    time_step: usize,
    verify_point_clouds: bool,
}

impl CouplingContext {
    pub fn new(catalog: RegionCatalog, index: GlobalIdIndex, verify_point_clouds: bool) -> Self {
        Self {
            catalog,
            index,
            time_step: 0,
            verify_point_clouds,
        }
    }

    /// Discover regions from `archive`. With `verify_point_clouds`, every
    /// point-cloud query is shape-checked before it is served.
    pub fn discover<A: ResultsArchive + ?Sized>(
        archive: &A,
        verify_point_clouds: bool,
    ) -> ModelResult<Self> {
        let (catalog, index) = discover::discover(archive)?;
        Ok(Self::new(catalog, index, verify_point_clouds))
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn index(&self) -> &GlobalIdIndex {
        &self.index
    }

    pub fn time_step(&self) -> usize {
        self.time_step
    }

    /// Move to the next time step and return it.
    pub fn advance_time_step(&mut self) -> usize {
        self.time_step += 1;
        self.time_step
    }

    /// Pull `time_step`'s data from the archive.
    pub fn synchronize<A: ResultsArchive + ?Sized>(
        &mut self,
        archive: &A,
        time_step: usize,
    ) -> ModelResult<SyncReport> {
        let report = sync::fill(archive, &mut self.catalog, &self.index, time_step)?;
        self.catalog.log_contents();
        Ok(report)
    }
}

impl QueryCallbacks for CouplingContext {
    fn point_cloud(&self, region: &str) -> ModelResult<PointCloudView<'_>> {
        debug!(region, "point cloud requested");
        let cloud = self
            .catalog
            .find(region)
            .and_then(|id| self.catalog.point_cloud(id))
            .ok_or_else(|| ModelError::UnknownRegion(region.to_string()))?;

        if self.verify_point_clouds {
            validate::check_point_cloud(region, cloud)?;
        }

        Ok(PointCloudView {
            ids: cloud.ids(),
            coords: cloud.coords(),
        })
    }

    fn scalar_field(&self, region: &str, variable: &str) -> ModelResult<&[f64]> {
        let solution = self
            .catalog
            .find(region)
            .and_then(|id| self.catalog.solution(id))
            .ok_or_else(|| ModelError::UnknownRegion(region.to_string()))?;
        solution
            .get(variable)
            .ok_or_else(|| ModelError::UnknownVariable {
                region: region.to_string(),
                variable: variable.to_string(),
            })
    }

    fn restart_point(&self) -> String {
        self.time_step.to_string()
    }
}
