//! Standalone peer: replays an archive without a coupling service.
//!
//! Selected with host `#`. It schedules one time step per recorded archive
//! step after the first, one iteration per time step, and pulls every
//! region's point cloud and temperature through the registered callbacks,
//! the way a coupling service would when mapping data.

use std::path::Path;

use tc_archive::ResultsArchive;
use tc_model::{CouplingContext, QueryCallbacks, TEMPERATURE};
use tracing::{debug, info};

use crate::error::{PeerError, PeerResult};
use crate::peer::{Connector, CouplingPeer};
use crate::setup::SetupDescriptor;
use crate::types::{CallbackSet, ConvergenceStatus, ParticipantInfo, RegionDecl, SetupInfo};

/// Host name that selects the standalone peer.
pub const STANDALONE_HOST: &str = "#";

/// Connector for [`StandalonePeer`].
#[derive(Debug, Clone)]
pub struct StandaloneConnector {
    regions: Vec<String>,
    time_steps: usize,
    iterations_per_step: usize,
}

impl StandaloneConnector {
    pub fn new(regions: Vec<String>, time_steps: usize, iterations_per_step: usize) -> Self {
        Self {
            regions,
            time_steps,
            iterations_per_step,
        }
    }

    /// Replay every recorded time step of `archive` over the regions of `context`.
    pub fn replaying<A: ResultsArchive + ?Sized>(context: &CouplingContext, archive: &A) -> Self {
        let regions = context
            .catalog()
            .regions()
            .iter()
            .map(|r| r.name.clone())
            .collect();
        let time_steps = archive.record_numbers().len().saturating_sub(1);
        Self::new(regions, time_steps, 1)
    }
}

impl Connector for StandaloneConnector {
    type Peer = StandalonePeer;

    fn connect(&mut self, participant: &ParticipantInfo) -> PeerResult<StandalonePeer> {
        if participant.host != STANDALONE_HOST {
            return Err(PeerError::Connect {
                host: participant.host.clone(),
                port: participant.port,
                message: format!(
                    "no network transport is built in; use host '{}' for standalone replay",
                    STANDALONE_HOST
                ),
            });
        }
        info!(
            name = %participant.name,
            transcript = %participant.transcript_filename,
            build = %participant.build_info,
            "standalone peer"
        );
        Ok(StandalonePeer {
            participant: participant.clone(),
            regions: self.regions.clone(),
            time_steps: self.time_steps,
            iterations_per_step: self.iterations_per_step,
            declared: Vec::new(),
            setup: None,
            callbacks: None,
            initialized: false,
            completed_steps: 0,
            iterations_in_step: 0,
            outputs_received: 0,
            last_restart_point: None,
            connected: true,
        })
    }
}

/// In-process coupling peer used for standalone replay.
#[derive(Debug)]
pub struct StandalonePeer {
    participant: ParticipantInfo,
    regions: Vec<String>,
    time_steps: usize,
    iterations_per_step: usize,
    declared: Vec<RegionDecl>,
    setup: Option<SetupInfo>,
    callbacks: Option<CallbackSet>,
    initialized: bool,
    completed_steps: usize,
    iterations_in_step: usize,
    outputs_received: usize,
    last_restart_point: Option<String>,
    connected: bool,
}

impl StandalonePeer {
    pub fn declared_regions(&self) -> &[RegionDecl] {
        &self.declared
    }

    pub fn completed_steps(&self) -> usize {
        self.completed_steps
    }

    pub fn outputs_received(&self) -> usize {
        self.outputs_received
    }

    pub fn last_restart_point(&self) -> Option<&str> {
        self.last_restart_point.as_deref()
    }

    fn ensure_connected(&self) -> PeerResult<()> {
        if self.connected {
            Ok(())
        } else {
            Err(PeerError::NotConnected)
        }
    }

    fn registered(&self, operation: &'static str) -> PeerResult<CallbackSet> {
        self.callbacks.ok_or_else(|| PeerError::Rejected {
            operation,
            message: "query callbacks were not registered".to_string(),
        })
    }

    /// Pull every region's data the way a mapping step would.
    fn pull_outputs(&self, queries: &dyn QueryCallbacks) -> PeerResult<()> {
        let callbacks = self.registered("output transfer")?;
        if !(callbacks.point_cloud && callbacks.scalar_field) {
            return Err(PeerError::Rejected {
                operation: "output transfer",
                message: "point cloud and scalar field callbacks are required".to_string(),
            });
        }

        for region in &self.regions {
            let cloud = queries.point_cloud(region).map_err(PeerError::Callback)?;
            let values = queries
                .scalar_field(region, TEMPERATURE)
                .map_err(PeerError::Callback)?;
            if values.len() != cloud.len() {
                return Err(PeerError::Rejected {
                    operation: "output transfer",
                    message: format!(
                        "region {}: {} values for {} points",
                        region,
                        values.len(),
                        cloud.len()
                    ),
                });
            }
            debug!(region = %region, points = cloud.len(), "pulled outputs");
        }
        Ok(())
    }
}

impl CouplingPeer for StandalonePeer {
    fn add_region(&mut self, region: &RegionDecl) -> PeerResult<()> {
        self.ensure_connected()?;
        if self.setup.is_some() {
            return Err(PeerError::Rejected {
                operation: "add region",
                message: "setup already completed".to_string(),
            });
        }
        self.declared.push(region.clone());
        Ok(())
    }

    fn complete_setup(&mut self, setup: &SetupInfo) -> PeerResult<()> {
        self.ensure_connected()?;
        self.setup = Some(*setup);
        Ok(())
    }

    fn write_setup_file(&mut self, path: &Path) -> PeerResult<()> {
        self.ensure_connected()?;
        let setup = self.setup.ok_or_else(|| PeerError::Rejected {
            operation: "write setup file",
            message: "setup has not been completed".to_string(),
        })?;
        SetupDescriptor::new(&self.participant, &setup, &self.declared).write(path)
    }

    fn register_callbacks(&mut self, callbacks: CallbackSet) -> PeerResult<()> {
        self.ensure_connected()?;
        self.callbacks = Some(callbacks);
        Ok(())
    }

    fn initialize_analysis(&mut self, queries: &dyn QueryCallbacks) -> PeerResult<()> {
        self.ensure_connected()?;
        self.pull_outputs(queries)?;
        self.initialized = true;
        Ok(())
    }

    fn do_time_step(&mut self, _queries: &dyn QueryCallbacks) -> PeerResult<bool> {
        self.ensure_connected()?;
        if !self.initialized {
            return Err(PeerError::Rejected {
                operation: "time step",
                message: "analysis has not been initialized".to_string(),
            });
        }
        if self.completed_steps >= self.time_steps {
            return Ok(false);
        }
        self.completed_steps += 1;
        self.iterations_in_step = 0;
        Ok(true)
    }

    fn do_iteration(&mut self, _queries: &dyn QueryCallbacks) -> PeerResult<bool> {
        self.ensure_connected()?;
        if self.iterations_in_step >= self.iterations_per_step {
            return Ok(false);
        }
        self.iterations_in_step += 1;
        Ok(true)
    }

    fn update_inputs(&mut self, _queries: &dyn QueryCallbacks) -> PeerResult<()> {
        // This participant has no input variables.
        self.ensure_connected()
    }

    fn update_outputs(
        &mut self,
        status: ConvergenceStatus,
        queries: &dyn QueryCallbacks,
    ) -> PeerResult<()> {
        self.ensure_connected()?;
        self.pull_outputs(queries)?;
        if self.registered("restart point")?.restart_point {
            self.last_restart_point = Some(queries.restart_point());
        }
        self.outputs_received += 1;
        debug!(?status, step = self.completed_steps, "outputs updated");
        Ok(())
    }

    fn disconnect(&mut self) -> PeerResult<()> {
        self.ensure_connected()?;
        self.connected = false;
        Ok(())
    }
}
