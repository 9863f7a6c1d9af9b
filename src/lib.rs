//! Multi-modal transit routing core: a static graph accessor, a
//! customised Dijkstra search with virtual endpoint injection, and the
//! compaction/ranking passes that turn a raw path into the legs and map
//! segments a client renders.

pub mod classify;
pub mod graph;
pub mod legs;
pub mod pathfind;
pub mod pq;
pub mod rank;
pub mod segments;
pub mod server;
pub mod worker;
