//! Values exchanged with the coupling peer.

use std::fmt;

use tc_model::{Discretization, Region, TEMPERATURE, Topology};

/// Identity of this participant, passed to the peer on connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantInfo {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub build_info: String,
    pub transcript_filename: String,
}

impl ParticipantInfo {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        name: impl Into<String>,
        build_info: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            host: host.into(),
            port,
            transcript_filename: format!("{name}.stdout"),
            name,
            build_info: build_info.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorType {
    Scalar,
}

/// Where a variable's values live on the discretization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Node,
}

impl fmt::Display for TensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorType::Scalar => write!(f, "scalar"),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Node => write!(f, "node"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub tensor_type: TensorType,
    pub location: Location,
}

impl Variable {
    pub fn nodal_scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tensor_type: TensorType::Scalar,
            location: Location::Node,
        }
    }
}

/// A region as declared to the peer during setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDecl {
    pub name: String,
    pub topology: Topology,
    pub discretization: Discretization,
    pub output_variables: Vec<Variable>,
}

impl RegionDecl {
    /// Declaration for a catalog region: nodal scalar temperature output.
    pub fn for_region(region: &Region) -> Self {
        Self {
            name: region.name.clone(),
            topology: region.topology,
            discretization: region.discretization,
            output_variables: vec![Variable::nodal_scalar(TEMPERATURE)],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisType {
    Transient,
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisType::Transient => write!(f, "transient"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupInfo {
    pub analysis_type: AnalysisType,
    pub restarts_supported: bool,
}

impl Default for SetupInfo {
    fn default() -> Self {
        Self {
            analysis_type: AnalysisType::Transient,
            restarts_supported: true,
        }
    }
}

/// Convergence signal sent with each output update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    Converged,
    NotYetConverged,
    Diverging,
    NotEvaluated,
}

/// Which query callbacks the participant has registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallbackSet {
    pub point_cloud: bool,
    pub scalar_field: bool,
    pub restart_point: bool,
}

impl CallbackSet {
    pub fn all() -> Self {
        Self {
            point_cloud: true,
            scalar_field: true,
            restart_point: true,
        }
    }
}
