//! Route search: a single customised Dijkstra search plus a thin
//! alternative-generation layer built on top of it (spec.md §4.4/§4.5).

pub mod alternatives;
pub mod dijkstra;
pub mod error;

pub use alternatives::generate_alternatives;
pub use dijkstra::{find_path, Endpoint, PathfindOptions, PathResult};
pub use error::RoutingError;
