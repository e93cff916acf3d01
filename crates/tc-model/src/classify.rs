//! Field designator classification.
//!
//! Position fields follow the naming convention `POS_X`, `POS_Y`, `POS_Z`
//! somewhere inside the designator (e.g. `POS_X_PLATE`). Anything without the
//! `POS_` marker is an ordinary field and is not used for geometry.

use crate::error::{ModelError, ModelResult};

const POSITION_MARKER: &str = "POS_";

/// Cartesian coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index into an `[f64; 3]` coordinate.
    pub fn component(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    fn token(self) -> &'static str {
        match self {
            Axis::X => "POS_X",
            Axis::Y => "POS_Y",
            Axis::Z => "POS_Z",
        }
    }
}

/// What a field descriptor carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    Position(Axis),
    Other,
}

/// Classify a designator.
///
/// A designator with the position marker must name exactly one axis;
/// none or several is an error.
pub fn classify(designator: &str) -> ModelResult<FieldClass> {
    if !designator.contains(POSITION_MARKER) {
        return Ok(FieldClass::Other);
    }

    let mut matches = Axis::ALL
        .into_iter()
        .filter(|axis| designator.contains(axis.token()));

    match (matches.next(), matches.next()) {
        (Some(axis), None) => Ok(FieldClass::Position(axis)),
        (None, _) => Err(ModelError::UnrecognizedPositionToken {
            designator: designator.to_string(),
        }),
        (Some(_), Some(_)) => Err(ModelError::AmbiguousPositionToken {
            designator: designator.to_string(),
        }),
    }
}
