//! Automobile costing - access rules, travel-time costs, and A* parameters

use serde::Deserialize;

use crate::costing::{CostModel, EdgeFilter};
use crate::error::{Error, Result};
use crate::graph::{access, DirectedEdge, NodeInfo};

const SEC_PER_HOUR: f32 = 3600.0;

/// Seconds per meter charged for speed 0 (unknown) and speed 255 (never
/// produced by the table loop). Large but finite so accumulation stays usable
/// as an upper bound.
const UNKNOWN_SPEED_FACTOR: f32 = SEC_PER_HOUR;

/// Automobile costing policy knobs. Distance cutoffs are meters of
/// straight-line distance to the destination.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AutoCostConfig {
    /// Allow an upward transition onto the topmost level (0) only beyond this
    pub trans_up_top_level_cutoff: f32,
    /// Allow an upward transition onto any other level only beyond this
    pub trans_up_cutoff: f32,
    /// Allow a downward transition onto level 1 only within this
    pub trans_down_arterial_cutoff: f32,
    /// Allow a downward transition onto any other level only within this
    pub trans_down_cutoff: f32,
    /// Skip shortcut edges within this distance of the destination
    pub shortcut_cutoff: f32,
    /// Skip not-thru edges beyond this distance of the destination
    pub not_thru_cutoff: f32,
    /// Reference speed (km/h) for the A* cost factor. Must be at or above the
    /// fastest edge speed the mode will realistically encounter, or the
    /// heuristic overestimates and the search loses optimality.
    pub reference_speed_kmh: u8,
    /// Speeds above this log a data-quality warning (diagnostic only)
    pub plausible_speed_kmh: u8,
}

impl Default for AutoCostConfig {
    fn default() -> Self {
        Self {
            trans_up_top_level_cutoff: 50_000.0,
            trans_up_cutoff: 10_000.0,
            trans_down_arterial_cutoff: 50_000.0,
            trans_down_cutoff: 10_000.0,
            shortcut_cutoff: 10_000.0,
            not_thru_cutoff: 5_000.0,
            reference_speed_kmh: 120,
            plausible_speed_kmh: 150,
        }
    }
}

/// Automobile cost model.
///
/// Holds a 256-entry speed cost table: index = edge speed in km/h, value =
/// seconds per meter. Built once at construction, immutable after.
pub struct AutoCost {
    speed_factor: [f32; 256],
    config: AutoCostConfig,
}

impl AutoCost {
    pub fn with_config(config: AutoCostConfig) -> Result<Self> {
        if !(1..=254).contains(&config.reference_speed_kmh) {
            return Err(Error::InvalidConfig(format!(
                "reference speed {} km/h outside 1..=254",
                config.reference_speed_kmh
            )));
        }

        let mut speed_factor = [0.0f32; 256];
        speed_factor[0] = UNKNOWN_SPEED_FACTOR;
        for s in 1..255 {
            speed_factor[s] = (SEC_PER_HOUR * 0.001) / s as f32;
        }
        // Index 255 is never produced by the loop; treat it like speed 0 so
        // every u8 speed indexes a defined, finite entry.
        speed_factor[255] = UNKNOWN_SPEED_FACTOR;

        Ok(Self {
            speed_factor,
            config,
        })
    }

    pub fn config(&self) -> &AutoCostConfig {
        &self.config
    }
}

impl CostModel for AutoCost {
    fn edge_allowed(
        &self,
        edge: &DirectedEdge,
        restriction_mask: u32,
        is_uturn: bool,
        dist_to_dest: f32,
    ) -> bool {
        // Simple turn restrictions.
        if restriction_mask & (1 << edge.local_edge_index) != 0 {
            return false;
        }

        // Allow upward transitions except when close to the destination.
        if edge.transitions_up() {
            return if edge.end_node_level == 0 {
                dist_to_dest > self.config.trans_up_top_level_cutoff
            } else {
                dist_to_dest > self.config.trans_up_cutoff
            };
        }

        // Allow downward transitions only when near the destination.
        if edge.transitions_down() {
            return if edge.end_node_level == 1 {
                dist_to_dest < self.config.trans_down_arterial_cutoff
            } else {
                dist_to_dest < self.config.trans_down_cutoff
            };
        }

        // Skip shortcut edges when near the destination.
        if edge.is_shortcut() && dist_to_dest < self.config.shortcut_cutoff {
            return false;
        }

        // No u-turns; no entering not-thru edges except near the destination.
        if is_uturn || (edge.is_not_thru() && dist_to_dest > self.config.not_thru_cutoff) {
            return false;
        }

        edge.forward_access & access::CAR != 0
    }

    fn node_allowed(&self, node: &NodeInfo) -> bool {
        node.access & access::CAR != 0
    }

    fn edge_cost(&self, edge: &DirectedEdge) -> f32 {
        if edge.speed > self.config.plausible_speed_kmh {
            tracing::warn!(speed = edge.speed, "implausible edge speed");
        }
        edge.length * self.speed_factor[edge.speed as usize]
    }

    fn edge_seconds(&self, edge: &DirectedEdge) -> f32 {
        edge.length * self.speed_factor[edge.speed as usize]
    }

    fn astar_cost_factor(&self) -> f32 {
        self.speed_factor[self.config.reference_speed_kmh as usize]
    }

    fn unit_size(&self) -> f32 {
        // Consider anything within 1 sec to be the same cost.
        1.0
    }

    fn edge_filter(&self) -> EdgeFilter {
        |edge| {
            edge.transitions_up()
                || edge.transitions_down()
                || edge.forward_access & access::CAR == 0
        }
    }
}
