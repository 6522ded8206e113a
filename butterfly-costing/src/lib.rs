//! Per-mode edge costing for route search
//!
//! A costing model answers two questions for the search loop: may this edge
//! (or node) be traversed at all for the travel mode, and what does traversing
//! it cost. It also supplies the A* heuristic factor and the bucket width used
//! by approximate bucket-sorted expansion. Models are immutable after
//! construction and safe to share across concurrent search workers.

pub mod costing;
pub mod error;
pub mod graph;

pub use costing::{cost_model_for_mode, AutoCost, AutoCostConfig, CostModel, EdgeFilter, Mode};
pub use error::{Error, Result};
pub use graph::{DirectedEdge, NodeInfo};
