//! Setup/run state machine.

use std::path::PathBuf;

use tc_archive::ResultsArchive;
use tc_model::{CouplingContext, QueryCallbacks};
use tracing::{debug, info, warn};

use crate::error::CouplingResult;
use crate::peer::{Connection, Connector, CouplingPeer};
use crate::types::{CallbackSet, ConvergenceStatus, ParticipantInfo, RegionDecl, SetupInfo};

/// Default setup file written with `--writescp`.
pub const SETUP_FILE: &str = "setup.scp";

/// What a connection is used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverMode {
    /// Declare regions and finish setup, optionally persisting it.
    Setup { write_setup_file: bool },
    /// Serve data through the time-step/iteration loop.
    Run,
}

#[derive(Debug, Clone)]
pub struct DriverOptions {
    pub mode: DriverMode,
    /// Shape-check point clouds before serving them.
    pub verify_point_clouds: bool,
    pub setup_file: PathBuf,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            mode: DriverMode::Run,
            verify_point_clouds: false,
            setup_file: PathBuf::from(SETUP_FILE),
        }
    }
}

/// Lifecycle of the peer connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Disconnected,
    Connected,
    SetupMode,
    RunMode,
}

/// Counters reported after a successful session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub regions: usize,
    pub time_steps: usize,
    pub synchronizations: usize,
    pub iterations: usize,
    pub restart_point: String,
}

/// Drives one coupling session over an archive.
pub struct CouplingDriver<'a, A: ResultsArchive + ?Sized> {
    archive: &'a A,
    context: CouplingContext,
    options: DriverOptions,
    state: DriverState,
    summary: RunSummary,
}

impl<'a, A: ResultsArchive + ?Sized> CouplingDriver<'a, A> {
    /// Discover regions from `archive`. Build errors surface here, before any
    /// peer is contacted.
    pub fn new(archive: &'a A, options: DriverOptions) -> CouplingResult<Self> {
        let context = CouplingContext::discover(archive, options.verify_point_clouds)?;
        let summary = RunSummary {
            regions: context.catalog().len(),
            ..RunSummary::default()
        };
        Ok(Self {
            archive,
            context,
            options,
            state: DriverState::Disconnected,
            summary,
        })
    }

    pub fn context(&self) -> &CouplingContext {
        &self.context
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Connect, run the configured mode, and disconnect.
    ///
    /// The peer is disconnected on every path; when the session itself failed,
    /// a disconnect failure is logged and the session error is returned.
    pub fn run<C: Connector>(
        &mut self,
        connector: &mut C,
        participant: &ParticipantInfo,
    ) -> CouplingResult<RunSummary> {
        let peer = connector.connect(participant)?;
        let mut connection = Connection::open(peer);
        self.state = DriverState::Connected;
        info!(host = %participant.host, port = participant.port, name = %participant.name, "connected");

        let outcome = match self.options.mode.clone() {
            DriverMode::Setup { write_setup_file } => {
                self.state = DriverState::SetupMode;
                self.setup(connection.peer(), write_setup_file)
            }
            DriverMode::Run => {
                self.state = DriverState::RunMode;
                self.analyze(connection.peer())
            }
        };

        let closed = connection.close();
        self.state = DriverState::Disconnected;

        match (outcome, closed) {
            (Ok(()), Ok(())) => {
                info!("disconnected - all ok");
                self.summary.restart_point = self.context.restart_point();
                Ok(self.summary.clone())
            }
            (Ok(()), Err(err)) => Err(err.into()),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(disconnect_err)) => {
                warn!(error = %disconnect_err, "disconnect after failure also failed");
                Err(err)
            }
        }
    }

    fn setup<P: CouplingPeer>(
        &mut self,
        peer: &mut P,
        write_setup_file: bool,
    ) -> CouplingResult<()> {
        for region in self.context.catalog().regions() {
            debug!(region = %region.name, "declaring region");
            peer.add_region(&RegionDecl::for_region(region))?;
        }

        peer.complete_setup(&SetupInfo::default())?;
        info!(regions = self.summary.regions, "setup complete");

        if write_setup_file {
            peer.write_setup_file(&self.options.setup_file)?;
            info!(path = %self.options.setup_file.display(), "setup file written");
        }
        Ok(())
    }

    fn analyze<P: CouplingPeer>(&mut self, peer: &mut P) -> CouplingResult<()> {
        peer.register_callbacks(CallbackSet::all())?;
        info!("registered callbacks");

        self.synchronize(0)?;

        peer.initialize_analysis(&self.context)?;
        info!("initialized analysis");

        while peer.do_time_step(&self.context)? {
            let step = self.context.advance_time_step();
            self.summary.time_steps += 1;
            info!(step, "time step");
            self.synchronize(step)?;

            while peer.do_iteration(&self.context)? {
                self.summary.iterations += 1;
                debug!(step, iteration = self.summary.iterations, "iteration");
                peer.update_inputs(&self.context)?;
                peer.update_outputs(ConvergenceStatus::NotEvaluated, &self.context)?;
            }
        }
        Ok(())
    }

    fn synchronize(&mut self, step: usize) -> CouplingResult<()> {
        let report = self.context.synchronize(self.archive, step)?;
        self.summary.synchronizations += 1;
        debug!(
            step,
            positions = report.position_fields.len(),
            skipped = report.skipped_fields.len(),
            "synchronized"
        );
        Ok(())
    }
}
