pub mod geo_util;
pub mod loader;
pub mod store;
pub mod types;

pub use loader::{load_graph_store, LoadError};
pub use store::GraphStore;
pub use types::*;
