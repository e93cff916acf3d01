//! tc-coupling: drives a thermal result archive as a co-simulation participant.
//!
//! Provides:
//! - The coupling-peer interface ([`CouplingPeer`], [`Connector`]) and its types
//! - A connection guard that always disconnects
//! - [`CouplingDriver`], the setup/run state machine
//! - A standalone peer that replays the archive without a coupling service

pub mod driver;
pub mod error;
pub mod peer;
pub mod setup;
pub mod standalone;
pub mod types;

pub use driver::{CouplingDriver, DriverMode, DriverOptions, DriverState, RunSummary, SETUP_FILE};
pub use error::{CouplingError, CouplingResult, PeerError, PeerResult};
pub use peer::{Connection, Connector, CouplingPeer};
pub use setup::SetupDescriptor;
pub use standalone::{STANDALONE_HOST, StandaloneConnector, StandalonePeer};
pub use types::*;
