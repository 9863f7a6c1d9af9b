//! Flat error taxonomy for a single `find_path` call, matching spec.md
//! §4.4/§7. Mirrors the shape of `graph::LoadError` and the teacher's
//! `layers::error`/`gtfs::error`: no wrapped context, one variant per
//! distinguishable failure the caller needs to branch on.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingError {
    #[error("graph not loaded")]
    GraphNotLoaded,
    #[error("unknown origin node")]
    UnknownOriginNode,
    #[error("unknown destination node")]
    UnknownDestinationNode,
    #[error("no reachable nodes near origin coordinates")]
    NoReachableOriginNodes,
    #[error("no reachable nodes near destination coordinates")]
    NoReachableDestinationNodes,
    #[error("no path found")]
    NoPathFound,
    #[error("computation exceeded the search cap")]
    ComputationTimedOut,
    #[error("path reconstruction failed")]
    PathReconstructionFailed,
}

// Hand-implemented the same way the teacher's `gtfs::error::Error` does:
// serialize as the `Display` string, not the bare variant name, since
// this is the message a client actually sees in a `RESULT`/`ERROR`
// payload. Never meant to round-trip back into a `RoutingError`.
impl Serialize for RoutingError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RoutingError {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Err(serde::de::Error::custom(format!("cannot deserialize RoutingError: {s}")))
    }
}
