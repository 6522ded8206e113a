//! Read-only views of graph-tile records consumed by costing models
//!
//! The graph layer owns these records; costing only reads attributes through
//! them. Boolean edge attributes are packed into a flags word, and access
//! masks use one bit per travel mode (same encoding as turn-rule `applies`
//! masks: bit0=car, bit1=bike, bit2=foot).

/// Travel-mode access bits, shared by edge and node access masks.
pub mod access {
    pub const CAR: u8 = 1 << 0;
    pub const BIKE: u8 = 1 << 1;
    pub const FOOT: u8 = 1 << 2;
}

/// Bit positions in [`DirectedEdge::flags`].
pub mod edge_flags {
    pub const SHORTCUT: u8 = 0;
    pub const NOT_THRU: u8 = 1;
    pub const TRANS_UP: u8 = 2;
    pub const TRANS_DOWN: u8 = 3;
}

/// Directed edge attributes relevant to costing.
///
/// `local_edge_index` is the edge's position among its start node's outgoing
/// edges (0-31); turn restriction masks are keyed by it. `end_node_level` is
/// the hierarchy level of the node the edge leads to (0 = topmost).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectedEdge {
    /// Length in meters
    pub length: f32,
    /// Speed in km/h (0 = unknown)
    pub speed: u8,
    /// Index among the start node's outgoing edges (0-31)
    pub local_edge_index: u8,
    /// Hierarchy level of the end node (0 = topmost)
    pub end_node_level: u8,
    /// Travel modes permitted in the forward direction (`access` bits)
    pub forward_access: u8,
    /// Packed boolean attributes (`edge_flags` bits)
    pub flags: u8,
}

impl DirectedEdge {
    /// Precomputed multi-edge bypass.
    pub fn is_shortcut(&self) -> bool {
        self.flags & (1 << edge_flags::SHORTCUT) != 0
    }

    /// Dead-ends without reaching a through route.
    pub fn is_not_thru(&self) -> bool {
        self.flags & (1 << edge_flags::NOT_THRU) != 0
    }

    /// Crosses to a coarser hierarchy level.
    pub fn transitions_up(&self) -> bool {
        self.flags & (1 << edge_flags::TRANS_UP) != 0
    }

    /// Crosses to a more detailed hierarchy level.
    pub fn transitions_down(&self) -> bool {
        self.flags & (1 << edge_flags::TRANS_DOWN) != 0
    }
}

impl Default for DirectedEdge {
    fn default() -> Self {
        Self {
            length: 0.0,
            speed: 0,
            local_edge_index: 0,
            end_node_level: 0,
            forward_access: 0,
            flags: 0,
        }
    }
}

/// Node attributes relevant to costing. Access can be restricted by gates or
/// bollards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeInfo {
    /// Travel modes permitted through the node (`access` bits)
    pub access: u8,
}
