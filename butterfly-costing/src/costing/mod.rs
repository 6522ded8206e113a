//! Costing capability shared by all travel modes
//!
//! One trait, one implementation per mode, selected by a mode-keyed factory.
//! The search loop calls `edge_allowed` / `node_allowed` / `edge_cost` once
//! per edge or node it visits, supplying the restriction mask and distance to
//! destination it tracks itself; coupling is one-directional (search calls
//! into costing, never the reverse).

pub mod car;

pub use car::{AutoCost, AutoCostConfig};

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::graph::{access, DirectedEdge, NodeInfo};

/// Pure predicate handed to location snapping to exclude edges from spatial
/// search results. Returns true when the edge must be excluded. No restriction
/// mask or destination distance is available at that stage, so this is
/// independent of the `edge_allowed` path.
pub type EdgeFilter = fn(&DirectedEdge) -> bool;

/// Travel mode enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Car = 0,
    Bike = 1,
    Foot = 2,
}

impl Mode {
    pub fn all() -> &'static [Mode] {
        &[Mode::Car, Mode::Bike, Mode::Foot]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Car => "car",
            Mode::Bike => "bike",
            Mode::Foot => "foot",
        }
    }

    pub fn from_u8(v: u8) -> Option<Mode> {
        match v {
            0 => Some(Mode::Car),
            1 => Some(Mode::Bike),
            2 => Some(Mode::Foot),
            _ => None,
        }
    }

    /// Bit for this mode in edge/node access masks.
    pub fn access_bit(&self) -> u8 {
        match self {
            Mode::Car => access::CAR,
            Mode::Bike => access::BIKE,
            Mode::Foot => access::FOOT,
        }
    }
}

/// Dynamic costing for a single travel mode.
///
/// Implementations are immutable after construction; every method is a pure
/// function of the model and its arguments, so one instance can be shared
/// across concurrent search workers without locking.
pub trait CostModel: Send + Sync {
    /// Checks if access is allowed for the provided directed edge.
    ///
    /// `restriction_mask` identifies the edges at the end node onto which
    /// turns are restricted at all times; it is compared against the edge's
    /// `local_edge_index`. `dist_to_dest` is the straight-line distance in
    /// meters from the edge's end to the destination.
    fn edge_allowed(
        &self,
        edge: &DirectedEdge,
        restriction_mask: u32,
        is_uturn: bool,
        dist_to_dest: f32,
    ) -> bool;

    /// Checks if access is allowed through the provided node (gates,
    /// bollards).
    fn node_allowed(&self, node: &NodeInfo) -> bool;

    /// Cost to traverse the edge, in seconds.
    fn edge_cost(&self, edge: &DirectedEdge) -> f32;

    /// Time to traverse the edge, in seconds. Coincides with `edge_cost` for
    /// models whose only cost dimension is time.
    fn edge_seconds(&self, edge: &DirectedEdge) -> f32;

    /// Cost factor for A* heuristics, in seconds per meter. Multiplied with
    /// the straight-line distance to the destination it must underestimate
    /// the true remaining cost, or the search loses optimality.
    fn astar_cost_factor(&self) -> f32;

    /// Unit size for the approximate bucket sort used in expansion ordering:
    /// costs within one unit of each other sort as equal.
    fn unit_size(&self) -> f32;

    /// Filter used by location searching to exclude edges from snapping
    /// candidates.
    fn edge_filter(&self) -> EdgeFilter;
}

/// Build the costing model for a travel mode with default configuration.
pub fn cost_model_for_mode(mode: Mode) -> Result<Arc<dyn CostModel>> {
    match mode {
        Mode::Car => Ok(Arc::new(AutoCost::with_config(AutoCostConfig::default())?)),
        other => Err(Error::UnsupportedMode(other)),
    }
}
