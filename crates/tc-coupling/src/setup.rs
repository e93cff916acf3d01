//! Setup descriptor persisted after a setup-mode run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PeerResult;
use crate::types::{ParticipantInfo, RegionDecl, SetupInfo};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableEntry {
    pub name: String,
    pub tensor_type: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub name: String,
    pub topology: String,
    pub discretization: String,
    pub output_variables: Vec<VariableEntry>,
}

/// Everything a coupling service needs to reconnect this participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupDescriptor {
    pub participant: String,
    pub build_info: String,
    pub written_at: String,
    pub analysis_type: String,
    pub restarts_supported: bool,
    pub regions: Vec<RegionEntry>,
}

impl SetupDescriptor {
    pub fn new(participant: &ParticipantInfo, setup: &SetupInfo, regions: &[RegionDecl]) -> Self {
        Self {
            participant: participant.name.clone(),
            build_info: participant.build_info.clone(),
            written_at: chrono::Utc::now().to_rfc3339(),
            analysis_type: setup.analysis_type.to_string(),
            restarts_supported: setup.restarts_supported,
            regions: regions
                .iter()
                .map(|r| RegionEntry {
                    name: r.name.clone(),
                    topology: r.topology.to_string(),
                    discretization: r.discretization.to_string(),
                    output_variables: r
                        .output_variables
                        .iter()
                        .map(|v| VariableEntry {
                            name: v.name.clone(),
                            tensor_type: v.tensor_type.to_string(),
                            location: v.location.to_string(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn write(&self, path: &Path) -> PeerResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn load(path: &Path) -> PeerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
