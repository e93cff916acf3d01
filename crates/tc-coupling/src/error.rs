//! Error types for coupling operations.

use tc_model::ModelError;
use thiserror::Error;

/// Failures signaled by (or while talking to) the coupling peer.
#[derive(Error, Debug)]
pub enum PeerError {
    #[error("Cannot connect to {host}:{port}: {message}")]
    Connect {
        host: String,
        port: u16,
        message: String,
    },

    #[error("Peer rejected {operation}: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },

    #[error("Peer is not connected")]
    NotConnected,

    #[error("Query callback failed: {0}")]
    Callback(#[source] ModelError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PeerResult<T> = Result<T, PeerError>;

/// Any failure that ends a coupling run.
#[derive(Error, Debug)]
pub enum CouplingError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Peer(#[from] PeerError),
}

pub type CouplingResult<T> = Result<T, CouplingError>;
