//! Read-only queries served to the coupling peer.

use tc_core::LocalId;

use crate::error::ModelResult;

/// A region's point cloud as handed to the peer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCloudView<'a> {
    pub ids: &'a [LocalId],
    pub coords: &'a [[f64; 3]],
}

impl PointCloudView<'_> {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// The three callbacks a coupling peer may invoke between driver updates.
///
/// Implementations are pure reads. The peer receives them as a shared
/// borrow, so no query can run while the data model is being synchronized.
pub trait QueryCallbacks {
    /// Ids and coordinates of `region`.
    fn point_cloud(&self, region: &str) -> ModelResult<PointCloudView<'_>>;

    /// Values of `variable` on `region`, ordered like the point cloud ids.
    fn scalar_field(&self, region: &str, variable: &str) -> ModelResult<&[f64]>;

    /// Token from which a later run can resume.
    fn restart_point(&self) -> String;
}
