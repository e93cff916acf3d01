//! Per-time-step synchronization from the archive into the data model.
//!
//! A pass reads everything first and writes only once all of it has been
//! validated, so a failed pass leaves coordinates and temperatures untouched.
//! Repeating a pass for the same index reproduces the same state.

use tc_archive::{FieldDescriptor, ResultsArchive};
use tc_core::{Id, RegionId};
use tracing::debug;

use crate::catalog::{RegionCatalog, TEMPERATURE};
use crate::classify::{Axis, FieldClass, classify};
use crate::error::{ModelError, ModelResult};
use crate::index::GlobalIdIndex;

/// What a synchronization pass touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub time_step: usize,
    pub record: u32,
    /// Position fields applied, in archive order.
    pub position_fields: Vec<String>,
    /// Fields without a position marker.
    pub skipped_fields: Vec<String>,
    pub coordinates_written: usize,
    pub regions_updated: usize,
}

struct CoordinateWrite {
    region: RegionId,
    position: usize,
    axis: Axis,
    value: f64,
}

/// Fill coordinates and temperatures for `time_step` from `archive`.
pub fn fill<A: ResultsArchive + ?Sized>(
    archive: &A,
    catalog: &mut RegionCatalog,
    index: &GlobalIdIndex,
    time_step: usize,
) -> ModelResult<SyncReport> {
    let records = archive.record_numbers();
    let record = *records
        .get(time_step)
        .ok_or(ModelError::TimeStepOutOfRange {
            index: time_step,
            len: records.len(),
        })?;

    let mut report = SyncReport {
        time_step,
        record,
        ..SyncReport::default()
    };

    // Classify every descriptor before touching any data.
    let descriptors = archive.field_descriptors(record)?;
    debug!(count = descriptors.len(), record, "field descriptors");
    let mut position_fields: Vec<(FieldDescriptor, Axis)> = Vec::new();
    for descriptor in descriptors {
        match classify(&descriptor.designator)? {
            FieldClass::Position(axis) => position_fields.push((descriptor, axis)),
            FieldClass::Other => {
                debug!(designator = %descriptor.designator, "skipping");
                report.skipped_fields.push(descriptor.designator);
            }
        }
    }

    let mut writes = Vec::new();
    for (descriptor, axis) in &position_fields {
        for (global, value) in archive.field_values(descriptor, record)? {
            writes.push(resolve(catalog, index, descriptor, *axis, global, value)?);
        }
        report.position_fields.push(descriptor.designator.clone());
    }

    let mut temperatures = Vec::with_capacity(catalog.len());
    for (region, cloud) in catalog.regions.iter().zip(&catalog.clouds) {
        let series = archive.temperature_series(&region.name)?;
        if series.len() != cloud.len() {
            return Err(ModelError::SeriesLengthMismatch {
                region: region.name.clone(),
                expected: cloud.len(),
                actual: series.len(),
            });
        }
        // i-th series belongs to the i-th id of the point cloud
        let values = series
            .iter()
            .enumerate()
            .map(|(position, samples)| {
                samples
                    .get(time_step)
                    .copied()
                    .ok_or_else(|| ModelError::SeriesTooShort {
                        region: region.name.clone(),
                        position,
                        index: time_step,
                        len: samples.len(),
                    })
            })
            .collect::<ModelResult<Vec<f64>>>()?;
        temperatures.push((region.id, values));
    }

    for write in &writes {
        if let Some(cloud) = catalog.point_cloud_mut(write.region) {
            cloud.set_axis(write.position, write.axis, write.value);
        }
    }
    report.coordinates_written = writes.len();

    for (region, values) in &temperatures {
        if let Some(solution) = catalog.solution_mut(*region) {
            solution.overwrite(TEMPERATURE, values);
        }
    }
    report.regions_updated = temperatures.len();

    debug!(
        time_step,
        record,
        coordinates = report.coordinates_written,
        regions = report.regions_updated,
        "time step synchronized"
    );
    Ok(report)
}

fn resolve(
    catalog: &RegionCatalog,
    index: &GlobalIdIndex,
    descriptor: &FieldDescriptor,
    axis: Axis,
    global: i64,
    value: f64,
) -> ModelResult<CoordinateWrite> {
    let unmapped = || ModelError::UnmappedGlobalId {
        designator: descriptor.designator.clone(),
        global,
    };
    let id = Id::try_from_raw(global, "global id").map_err(|_| unmapped())?;
    let location = index.get(id).ok_or_else(unmapped)?;
    let position = catalog
        .point_cloud(location.region)
        .and_then(|cloud| cloud.position_of(location.local))
        .ok_or_else(unmapped)?;
    Ok(CoordinateWrite {
        region: location.region,
        position,
        axis,
        value,
    })
}
