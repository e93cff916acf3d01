//! Coupling-peer interface.
//!
//! The peer owns scheduling: it decides when time steps and iterations happen
//! and when to call back into the participant. Calls that may trigger query
//! callbacks receive the participant's queries as a shared borrow, so
//! callbacks can only run between the driver's own updates.

use std::path::Path;

use tc_model::QueryCallbacks;
use tracing::warn;

use crate::error::PeerResult;
use crate::types::{CallbackSet, ConvergenceStatus, ParticipantInfo, RegionDecl, SetupInfo};

/// Operations the participant issues against a connected coupling peer.
pub trait CouplingPeer {
    /// Declare a region and its output variables (setup only).
    fn add_region(&mut self, region: &RegionDecl) -> PeerResult<()>;

    /// Finish the setup phase.
    fn complete_setup(&mut self, setup: &SetupInfo) -> PeerResult<()>;

    /// Persist the completed setup to `path`.
    fn write_setup_file(&mut self, path: &Path) -> PeerResult<()>;

    /// Announce which query callbacks the participant serves.
    fn register_callbacks(&mut self, callbacks: CallbackSet) -> PeerResult<()>;

    fn initialize_analysis(&mut self, queries: &dyn QueryCallbacks) -> PeerResult<()>;

    /// Blocks until the peer decides; `false` ends the run.
    fn do_time_step(&mut self, queries: &dyn QueryCallbacks) -> PeerResult<bool>;

    /// Blocks until the peer decides; `false` ends the current time step.
    fn do_iteration(&mut self, queries: &dyn QueryCallbacks) -> PeerResult<bool>;

    fn update_inputs(&mut self, queries: &dyn QueryCallbacks) -> PeerResult<()>;

    fn update_outputs(
        &mut self,
        status: ConvergenceStatus,
        queries: &dyn QueryCallbacks,
    ) -> PeerResult<()>;

    fn disconnect(&mut self) -> PeerResult<()>;
}

/// Opens connections to a coupling peer.
pub trait Connector {
    type Peer: CouplingPeer;

    fn connect(&mut self, participant: &ParticipantInfo) -> PeerResult<Self::Peer>;
}

/// Owns a connected peer and disconnects it when dropped.
///
/// Use [`Connection::close`] on the normal path to observe disconnect errors;
/// a drop without `close` disconnects best-effort and only logs failures.
pub struct Connection<P: CouplingPeer> {
    peer: P,
    open: bool,
}

impl<P: CouplingPeer> Connection<P> {
    pub fn open(peer: P) -> Self {
        Self { peer, open: true }
    }

    pub fn peer(&mut self) -> &mut P {
        &mut self.peer
    }

    /// Disconnect now and report the outcome.
    pub fn close(mut self) -> PeerResult<()> {
        self.open = false;
        self.peer.disconnect()
    }
}

impl<P: CouplingPeer> Drop for Connection<P> {
    fn drop(&mut self) {
        if self.open {
            self.open = false;
            if let Err(err) = self.peer.disconnect() {
                warn!(error = %err, "disconnect failed");
            }
        }
    }
}
