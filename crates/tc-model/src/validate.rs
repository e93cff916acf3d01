//! Structural checks on point clouds.

use std::collections::HashSet;

use crate::catalog::PointCloud;
use crate::error::{ModelError, ModelResult};

/// Build the local id -> position table, rejecting duplicate or out-of-range
/// local ids. Local ids must cover exactly `[0, size)`.
pub(crate) fn local_positions(region: &str, cloud: &PointCloud) -> ModelResult<Vec<Option<usize>>> {
    let size = cloud.ids.len();
    let mut positions = vec![None; size];
    for (position, &local) in cloud.ids.iter().enumerate() {
        let slot = positions
            .get_mut(local.slot())
            .ok_or_else(|| ModelError::LocalIdOutOfRange {
                region: region.to_string(),
                local,
                size,
            })?;
        if slot.is_some() {
            return Err(ModelError::DuplicateLocalId {
                region: region.to_string(),
                local,
            });
        }
        *slot = Some(position);
    }
    Ok(positions)
}

/// Shape check served to the peer: unique ids, one coordinate per id.
pub(crate) fn check_point_cloud(region: &str, cloud: &PointCloud) -> ModelResult<()> {
    if cloud.ids.len() != cloud.coords.len() {
        return Err(ModelError::InvalidPointCloud {
            region: region.to_string(),
            message: format!(
                "{} ids but {} coordinates",
                cloud.ids.len(),
                cloud.coords.len()
            ),
        });
    }

    let mut seen = HashSet::with_capacity(cloud.ids.len());
    for id in &cloud.ids {
        if !seen.insert(*id) {
            return Err(ModelError::InvalidPointCloud {
                region: region.to_string(),
                message: format!("duplicate id {}", id),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::Id;

    fn cloud(locals: &[u32], coords: usize) -> PointCloud {
        PointCloud {
            ids: locals.iter().map(|&l| Id::from_index(l)).collect(),
            coords: vec![[0.0; 3]; coords],
            positions: Vec::new(),
        }
    }

    #[test]
    fn permutation_is_accepted() {
        let positions = local_positions("R", &cloud(&[2, 0, 1], 3)).unwrap();
        assert_eq!(positions, vec![Some(1), Some(2), Some(0)]);
    }

    #[test]
    fn gap_is_out_of_range() {
        let err = local_positions("R", &cloud(&[0, 2], 2)).unwrap_err();
        assert!(matches!(err, ModelError::LocalIdOutOfRange { size: 2, .. }));
    }

    #[test]
    fn duplicate_local_id() {
        let err = local_positions("R", &cloud(&[0, 0], 2)).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateLocalId { .. }));
    }

    #[test]
    fn point_cloud_shape() {
        assert!(check_point_cloud("R", &cloud(&[0, 1], 2)).is_ok());
        assert!(matches!(
            check_point_cloud("R", &cloud(&[0, 1], 1)),
            Err(ModelError::InvalidPointCloud { .. })
        ));
        assert!(matches!(
            check_point_cloud("R", &cloud(&[1, 1], 2)),
            Err(ModelError::InvalidPointCloud { .. })
        ));
    }
}
