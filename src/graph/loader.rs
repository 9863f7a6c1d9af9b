//! Loading `transit_graph.json` / `stops_metadata.json` into a
//! [`GraphStore`], with an optional bincode snapshot cache in the same
//! shape as the teacher's `layers::city::City::load`/`load_cached`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::store::GraphStore;
use super::types::{Edge, NodeId, StopMetadata};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read graph data: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed graph JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cache not found")]
    CacheNotFound,
    #[error("cached snapshot is corrupt: {0}")]
    CacheCorrupt(#[from] bincode::Error),
}

/// On-disk snapshot of the fields needed to rebuild a `GraphStore`
/// without touching `petgraph`/`rstar` (neither derives `Serialize`
/// cheaply across versions) — the raw maps are what we cache, and
/// `GraphStore::new` rebuilds the graph/RTree from them on load.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    graph: HashMap<NodeId, HashMap<NodeId, Vec<Edge>>>,
    metadata: HashMap<NodeId, StopMetadata>,
}

/// Parse `transit_graph.json` and `stops_metadata.json` from disk and
/// build a [`GraphStore`]. If `cache_dir` is set, a matching bincode
/// snapshot is read first (and written back after a fresh parse), the
/// way `City::load` consults `CITY_CACHE_DIR` before re-parsing GTFS.
pub fn load_graph_store(
    graph_path: &Path,
    metadata_path: &Path,
    cache_dir: Option<&Path>,
) -> Result<GraphStore, LoadError> {
    if let Some(dir) = cache_dir {
        match load_cached(dir) {
            Ok(store) => {
                log::debug!("loaded transit graph from cache at {}", dir.display());
                return Ok(store);
            }
            Err(LoadError::CacheNotFound) => {
                log::debug!("no cached snapshot at {}, parsing JSON", dir.display());
            }
            Err(e) => {
                log::warn!("cached snapshot at {} is unusable ({e}), reparsing", dir.display());
            }
        }
    }

    let graph: HashMap<NodeId, HashMap<NodeId, Vec<Edge>>> =
        serde_json::from_str(&fs::read_to_string(graph_path)?)?;
    let metadata: HashMap<NodeId, StopMetadata> =
        serde_json::from_str(&fs::read_to_string(metadata_path)?)?;

    if let Some(dir) = cache_dir {
        if let Err(e) = set_cache(dir, &graph, &metadata) {
            log::warn!("failed to write graph cache at {}: {e}", dir.display());
        }
    }

    Ok(GraphStore::new(graph, metadata))
}

fn cache_file(dir: &Path) -> PathBuf {
    dir.join("transit_graph.cached")
}

fn load_cached(dir: &Path) -> Result<GraphStore, LoadError> {
    let path = cache_file(dir);
    if !path.exists() {
        return Err(LoadError::CacheNotFound);
    }
    let snapshot: Snapshot = bincode::deserialize_from(fs::File::open(path)?)?;
    Ok(GraphStore::new(snapshot.graph, snapshot.metadata))
}

fn set_cache(
    dir: &Path,
    graph: &HashMap<NodeId, HashMap<NodeId, Vec<Edge>>>,
    metadata: &HashMap<NodeId, StopMetadata>,
) -> Result<(), LoadError> {
    fs::create_dir_all(dir)?;
    let snapshot = Snapshot {
        graph: graph.clone(),
        metadata: metadata.clone(),
    };
    bincode::serialize_into(fs::File::create(cache_file(dir))?, &snapshot)?;
    Ok(())
}
